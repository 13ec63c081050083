//! State machine behind the import modal.
//!
//! All of the modal's state lives in one [`ImportState`] value. Transition
//! methods never perform I/O; they return [`Effect`]s that the caller carries
//! out (send the request, arm or stop the poller, arm the close timer).
//!
//! ```text
//! Idle ──submit──▶ Submitting ──Imported──▶ Succeeded ──(2 s)──▶ Closed
//!  ▲                   │ └──────Accepted──▶ Polling ──completed──▶ Succeeded
//!  └──request failed───┘                       └─────error────▶ JobFailed ──close──▶ Closed
//! ```

use std::time::Duration;

use thiserror::Error;

use super::selection::{ImportSelection, SelectedFile};
use super::{CLOSE_DELAY, ImportJob, JobStatus, SubmitResponse};
use crate::error::ApiError;

/// Shown when a submission fails without a server-provided detail.
pub const SUBMIT_FALLBACK: &str = "Erro ao importar arquivo";
/// Shown when a job ends in `error` without a message.
pub const JOB_FALLBACK: &str = "Erro ao processar importação";
/// Shown when the service answers a synchronous submission with a job.
pub const UNEXPECTED_JOB: &str = "O servidor iniciou uma importação assíncrona não solicitada";

#[derive(Clone, Debug, PartialEq)]
pub enum ImportState {
    /// Ready for a submission. `error` holds the last submission failure.
    Idle { error: Option<String> },
    Submitting { attempt: u64, async_mode: bool },
    /// Import finished (inline or through a job); the modal closes shortly.
    Succeeded { message: String },
    Polling { job_id: String, job: Option<ImportJob> },
    /// The job reported `error`. Stays until the user closes the modal.
    JobFailed { job_id: String, message: String },
    Closed,
}

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Send the selected file. The response must be fed back with `attempt`.
    Submit { attempt: u64, async_mode: bool },
    StartPolling { job_id: String },
    StopPolling,
    ScheduleClose(Duration),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("nenhum arquivo selecionado")]
    NoFile,
    #[error("importação em andamento")]
    Busy,
    #[error("a importação falhou; feche o modal para tentar novamente")]
    AwaitingAck,
    #[error("o modal de importação está fechado")]
    Closed,
}

/// Progress numbers rendered while a job runs.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressView {
    pub percent: f64,
    pub processed: u64,
    pub total: u64,
    pub inserted: u64,
    pub queued: bool,
}

impl ProgressView {
    pub fn caption(&self) -> String {
        if self.queued {
            return "Na fila de processamento...".to_string();
        }
        if self.total > 0 {
            format!(
                "Processando... {} / {} registros ({:.0}%)",
                self.processed, self.total, self.percent
            )
        } else {
            format!("Processando... {:.0}%", self.percent)
        }
    }
}

impl ImportState {
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            ImportState::Submitting { .. } | ImportState::Polling { .. }
        )
    }

    /// A failed job keeps the modal locked until it is closed.
    pub fn awaiting_ack(&self) -> bool {
        matches!(self, ImportState::JobFailed { .. })
    }

    pub fn job_id(&self) -> Option<&str> {
        match self {
            ImportState::Polling { job_id, .. } | ImportState::JobFailed { job_id, .. } => {
                Some(job_id)
            }
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ImportState::Idle { error } => error.as_deref(),
            ImportState::JobFailed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match self {
            ImportState::Succeeded { message } => Some(message),
            _ => None,
        }
    }

    /// `None` unless a job is being polled.
    pub fn progress(&self) -> Option<ProgressView> {
        let ImportState::Polling { job, .. } = self else {
            return None;
        };
        Some(match job {
            Some(job) => ProgressView {
                percent: job.progress,
                processed: job.processed,
                total: job.total,
                inserted: job.inserted,
                queued: job.status == JobStatus::Queued,
            },
            None => ProgressView {
                percent: 0.0,
                processed: 0,
                total: 0,
                inserted: 0,
                queued: true,
            },
        })
    }
}

pub fn success_message(inserted: u64) -> String {
    format!("Importação concluída! {} registros importados.", inserted)
}

#[derive(Clone, Debug)]
pub struct ImportSession {
    selection: ImportSelection,
    state: ImportState,
    attempts: u64,
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportSession {
    pub fn new() -> Self {
        Self {
            selection: ImportSelection::default(),
            state: ImportState::Idle { error: None },
            attempts: 0,
        }
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    pub fn selection(&self) -> &ImportSelection {
        &self.selection
    }

    pub fn can_submit(&self) -> bool {
        self.selection.file().is_some()
            && matches!(self.state, ImportState::Idle { .. })
    }

    /// Picks a new file. Clears any previous submission error; a job still
    /// being polled is abandoned, so the returned effects stop the poller.
    /// A failed job must be acknowledged by closing first.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<Vec<Effect>, SessionError> {
        let effects = match &self.state {
            ImportState::Closed => return Err(SessionError::Closed),
            ImportState::Submitting { .. } | ImportState::Succeeded { .. } => {
                return Err(SessionError::Busy);
            }
            ImportState::JobFailed { .. } => return Err(SessionError::AwaitingAck),
            ImportState::Polling { .. } => vec![Effect::StopPolling],
            ImportState::Idle { .. } => Vec::new(),
        };
        self.selection.select(file);
        self.state = ImportState::Idle { error: None };
        Ok(effects)
    }

    pub fn set_async_mode(&mut self, enabled: bool) -> Result<(), SessionError> {
        match self.state {
            ImportState::Closed => Err(SessionError::Closed),
            ImportState::JobFailed { .. } => Err(SessionError::AwaitingAck),
            ImportState::Idle { .. } => {
                self.selection.set_async_mode(enabled);
                Ok(())
            }
            _ => Err(SessionError::Busy),
        }
    }

    pub fn dismiss_error(&mut self) {
        if let ImportState::Idle { error } = &mut self.state {
            *error = None;
        }
    }

    /// Starts a submission of the selected file.
    pub fn submit(&mut self) -> Result<Effect, SessionError> {
        match self.state {
            ImportState::Closed => return Err(SessionError::Closed),
            ImportState::JobFailed { .. } => return Err(SessionError::AwaitingAck),
            ImportState::Idle { .. } => {}
            _ => return Err(SessionError::Busy),
        }
        if self.selection.file().is_none() {
            return Err(SessionError::NoFile);
        }
        self.attempts += 1;
        let async_mode = self.selection.async_mode();
        self.state = ImportState::Submitting {
            attempt: self.attempts,
            async_mode,
        };
        Ok(Effect::Submit {
            attempt: self.attempts,
            async_mode,
        })
    }

    fn is_current_attempt(&self, attempt: u64) -> Option<bool> {
        match self.state {
            ImportState::Submitting {
                attempt: current,
                async_mode,
            } if current == attempt => Some(async_mode),
            _ => None,
        }
    }

    /// Applies the service's answer to submission `attempt`. Answers to
    /// superseded attempts are ignored.
    pub fn submission_succeeded(&mut self, attempt: u64, response: SubmitResponse) -> Vec<Effect> {
        let Some(async_mode) = self.is_current_attempt(attempt) else {
            return Vec::new();
        };
        match response {
            SubmitResponse::Imported {
                registros_importados,
                ..
            } => {
                self.state = ImportState::Succeeded {
                    message: success_message(registros_importados),
                };
                vec![Effect::ScheduleClose(CLOSE_DELAY)]
            }
            SubmitResponse::Accepted { .. } if !async_mode => {
                self.state = ImportState::Idle {
                    error: Some(UNEXPECTED_JOB.to_string()),
                };
                Vec::new()
            }
            SubmitResponse::Accepted { job_id } => {
                self.state = ImportState::Polling {
                    job_id: job_id.clone(),
                    job: None,
                };
                vec![Effect::StartPolling { job_id }]
            }
        }
    }

    pub fn submission_failed(&mut self, attempt: u64, error: &ApiError) {
        if self.is_current_attempt(attempt).is_some() {
            self.state = ImportState::Idle {
                error: Some(error.user_message(SUBMIT_FALLBACK)),
            };
        }
    }

    /// Applies one status snapshot of `job_id`. Snapshots of any other job
    /// are stale and ignored.
    pub fn job_update(&mut self, job_id: &str, mut job: ImportJob) -> Vec<Effect> {
        let previous = match &self.state {
            ImportState::Polling {
                job_id: current,
                job: previous,
            } if current == job_id => previous.as_ref().map(|p| p.progress),
            _ => return Vec::new(),
        };

        match job.status {
            JobStatus::Queued | JobStatus::Processing => {
                let floor = previous.unwrap_or(0.0);
                job.progress = job.progress.clamp(0.0, 100.0).max(floor);
                if job.total > 0 {
                    job.processed = job.processed.min(job.total);
                }
                self.state = ImportState::Polling {
                    job_id: job_id.to_string(),
                    job: Some(job),
                };
                Vec::new()
            }
            JobStatus::Completed => {
                self.state = ImportState::Succeeded {
                    message: success_message(job.inserted),
                };
                vec![Effect::StopPolling, Effect::ScheduleClose(CLOSE_DELAY)]
            }
            JobStatus::Error => {
                let message = job
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| JOB_FALLBACK.to_string());
                self.state = ImportState::JobFailed {
                    job_id: job_id.to_string(),
                    message,
                };
                vec![Effect::StopPolling]
            }
        }
    }

    /// Closes the modal from any state. Polling always stops.
    pub fn close(&mut self) -> Vec<Effect> {
        self.selection = ImportSelection::default();
        self.state = ImportState::Closed;
        vec![Effect::StopPolling]
    }

    /// Starts a fresh cycle after [`ImportSession::close`]. Nothing of the
    /// previous job is kept; the attempt counter keeps increasing so late
    /// answers to earlier submissions stay recognisable.
    pub fn reopen(&mut self) {
        if self.state == ImportState::Closed {
            self.selection = ImportSelection::default();
            self.state = ImportState::Idle { error: None };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polling_session(job_id: &str) -> ImportSession {
        let mut session = ImportSession::new();
        session.select_file(SelectedFile::new("big.csv", 6_000_000)).unwrap();
        let Effect::Submit { attempt, .. } = session.submit().unwrap() else {
            panic!("expected submit");
        };
        session.submission_succeeded(attempt, SubmitResponse::Accepted { job_id: job_id.into() });
        session
    }

    fn snapshot(status: JobStatus, progress: f64) -> ImportJob {
        ImportJob {
            status,
            progress,
            processed: 10,
            total: 100,
            inserted: 0,
            error: None,
        }
    }

    #[test]
    fn submit_needs_a_file() {
        let mut session = ImportSession::new();
        assert_eq!(session.submit(), Err(SessionError::NoFile));
        assert!(!session.can_submit());
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut session = ImportSession::new();
        session.select_file(SelectedFile::new("a.csv", 10)).unwrap();
        session.submit().unwrap();
        assert_eq!(session.submit(), Err(SessionError::Busy));
        assert_eq!(session.set_async_mode(true), Err(SessionError::Busy));
    }

    #[test]
    fn failed_submission_returns_to_idle_with_detail() {
        let mut session = ImportSession::new();
        session.select_file(SelectedFile::new("a.csv", 10)).unwrap();
        let Effect::Submit { attempt, .. } = session.submit().unwrap() else {
            panic!("expected submit");
        };
        session.submission_failed(
            attempt,
            &ApiError::Server {
                status: 400,
                detail: Some("Coluna 'numero_doc' ausente".into()),
            },
        );
        assert_eq!(session.state().error(), Some("Coluna 'numero_doc' ausente"));
        assert_eq!(session.state().job_id(), None);
        assert!(session.can_submit());

        session.dismiss_error();
        assert_eq!(session.state(), &ImportState::Idle { error: None });
    }

    #[test]
    fn network_failure_uses_fallback() {
        let mut session = ImportSession::new();
        session.select_file(SelectedFile::new("a.csv", 10)).unwrap();
        let Effect::Submit { attempt, .. } = session.submit().unwrap() else {
            panic!("expected submit");
        };
        session.submission_failed(attempt, &ApiError::Network("offline".into()));
        assert_eq!(session.state().error(), Some(SUBMIT_FALLBACK));
    }

    #[test]
    fn sync_submission_never_yields_a_job() {
        let mut session = ImportSession::new();
        session.select_file(SelectedFile::new("a.csv", 10)).unwrap();
        let Effect::Submit { attempt, async_mode } = session.submit().unwrap() else {
            panic!("expected submit");
        };
        assert!(!async_mode);
        let effects =
            session.submission_succeeded(attempt, SubmitResponse::Accepted { job_id: "x".into() });
        assert!(effects.is_empty());
        assert_eq!(session.state().job_id(), None);
        assert_eq!(session.state().error(), Some(UNEXPECTED_JOB));
    }

    #[test]
    fn progress_never_goes_backwards() {
        let mut session = polling_session("abc");
        assert!(session.state().progress().unwrap().queued);

        session.job_update("abc", snapshot(JobStatus::Processing, 40.0));
        session.job_update("abc", snapshot(JobStatus::Processing, 35.0));
        let view = session.state().progress().unwrap();
        assert_eq!(view.percent, 40.0);
        assert_eq!(view.caption(), "Processando... 10 / 100 registros (40%)");

        session.job_update("abc", snapshot(JobStatus::Processing, 140.0));
        assert_eq!(session.state().progress().unwrap().percent, 100.0);
    }

    #[test]
    fn processed_is_capped_by_total() {
        let mut session = polling_session("abc");
        let mut job = snapshot(JobStatus::Processing, 50.0);
        job.processed = 150;
        session.job_update("abc", job);
        assert_eq!(session.state().progress().unwrap().processed, 100);
    }

    #[test]
    fn completed_job_stops_polling_and_schedules_close() {
        let mut session = polling_session("abc");
        let mut done = snapshot(JobStatus::Completed, 100.0);
        done.inserted = 98;
        let effects = session.job_update("abc", done);
        assert_eq!(effects, vec![Effect::StopPolling, Effect::ScheduleClose(CLOSE_DELAY)]);
        assert_eq!(session.state().success(), Some("Importação concluída! 98 registros importados."));

        // Anything arriving afterwards is ignored.
        let effects = session.job_update("abc", snapshot(JobStatus::Processing, 10.0));
        assert!(effects.is_empty());
        assert!(session.state().success().is_some());
    }

    #[test]
    fn job_error_is_a_dead_end_until_closed() {
        let mut session = polling_session("abc");
        let mut failed = snapshot(JobStatus::Error, 12.0);
        failed.error = Some("linha 42 invalida".into());
        let effects = session.job_update("abc", failed);
        assert_eq!(effects, vec![Effect::StopPolling]);
        assert_eq!(session.state().error(), Some("linha 42 invalida"));
        assert_eq!(session.state().success(), None);

        assert_eq!(session.close(), vec![Effect::StopPolling]);
        assert_eq!(session.state(), &ImportState::Closed);
    }

    fn failed_session() -> ImportSession {
        let mut session = polling_session("abc");
        let mut failed = snapshot(JobStatus::Error, 12.0);
        failed.error = Some("linha 42 invalida".into());
        session.job_update("abc", failed);
        session
    }

    #[test]
    fn failed_job_blocks_resubmission_until_closed() {
        let mut session = failed_session();
        assert!(session.state().awaiting_ack());
        assert!(!session.can_submit());
        assert_eq!(session.submit(), Err(SessionError::AwaitingAck));
        assert_eq!(session.set_async_mode(false), Err(SessionError::AwaitingAck));
        assert_eq!(session.state().error(), Some("linha 42 invalida"));
        assert_eq!(session.state().job_id(), Some("abc"));

        session.close();
        session.reopen();
        session.select_file(SelectedFile::new("a.csv", 10)).unwrap();
        assert!(session.can_submit());
        assert!(session.submit().is_ok());
    }

    #[test]
    fn failed_job_ignores_new_file() {
        let mut session = failed_session();
        assert_eq!(
            session.select_file(SelectedFile::new("other.csv", 10)),
            Err(SessionError::AwaitingAck)
        );
        assert_eq!(session.selection().file().map(|f| f.name.as_str()), Some("big.csv"));
        assert!(matches!(session.state(), ImportState::JobFailed { .. }));
    }

    #[test]
    fn job_error_without_message_uses_fallback() {
        let mut session = polling_session("abc");
        session.job_update("abc", snapshot(JobStatus::Error, 0.0));
        assert_eq!(session.state().error(), Some(JOB_FALLBACK));
    }

    #[test]
    fn updates_for_other_jobs_are_dropped() {
        let mut session = polling_session("new");
        let effects = session.job_update("old", snapshot(JobStatus::Completed, 100.0));
        assert!(effects.is_empty());
        assert_eq!(session.state().job_id(), Some("new"));
    }

    #[test]
    fn reopened_session_forgets_previous_job() {
        let mut session = polling_session("old");
        session.close();
        session.reopen();
        assert_eq!(session.state(), &ImportState::Idle { error: None });
        assert!(session.selection().file().is_none());
        assert!(!session.selection().async_mode());

        session.select_file(SelectedFile::new("b.csv", 6_000_000)).unwrap();
        let Effect::Submit { attempt, .. } = session.submit().unwrap() else {
            panic!("expected submit");
        };
        assert_eq!(attempt, 2);
        session.submission_succeeded(attempt, SubmitResponse::Accepted { job_id: "new".into() });

        assert!(session.job_update("old", snapshot(JobStatus::Completed, 100.0)).is_empty());
        assert_eq!(session.state().job_id(), Some("new"));
    }

    #[test]
    fn late_answer_to_superseded_attempt_is_ignored() {
        let mut session = ImportSession::new();
        session.select_file(SelectedFile::new("a.csv", 10)).unwrap();
        let Effect::Submit { attempt: first, .. } = session.submit().unwrap() else {
            panic!("expected submit");
        };
        session.close();
        session.reopen();
        session.select_file(SelectedFile::new("b.csv", 10)).unwrap();
        session.submit().unwrap();

        let effects = session.submission_succeeded(
            first,
            SubmitResponse::Imported {
                registros_importados: 5,
                message: None,
                log_id: None,
            },
        );
        assert!(effects.is_empty());
        assert!(matches!(session.state(), ImportState::Submitting { attempt: 2, .. }));
    }

    #[test]
    fn new_selection_while_polling_stops_the_poller() {
        let mut session = polling_session("abc");
        let effects = session.select_file(SelectedFile::new("c.csv", 10)).unwrap();
        assert_eq!(effects, vec![Effect::StopPolling]);
        assert_eq!(session.state(), &ImportState::Idle { error: None });
        // Async mode chosen for the large file is kept.
        assert!(session.selection().async_mode());
    }

    #[test]
    fn closed_session_rejects_input() {
        let mut session = ImportSession::new();
        session.close();
        assert_eq!(
            session.select_file(SelectedFile::new("a.csv", 1)),
            Err(SessionError::Closed)
        );
        assert_eq!(session.submit(), Err(SessionError::Closed));
    }
}
