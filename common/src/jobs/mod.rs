//! Batch import jobs as seen from the console.
//!
//! A submission either completes inline (the service answers with the number
//! of imported records) or is accepted as a background job that the console
//! polls until it reaches a terminal status. [`session::ImportSession`] holds
//! the modal's state machine and [`poller::JobPoller`] runs the polling loop.

pub mod poller;
pub mod selection;
pub mod session;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay between two status queries of the same job.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Delay before the import modal closes itself after a successful import.
pub const CLOSE_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

impl JobStatus {
    /// `Completed` and `Error` end a job; nothing is polled after them.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }
}

/// Progress snapshot of a background import, as returned by
/// `GET /import/status/{job_id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImportJob {
    pub status: JobStatus,
    /// Percentage, 0 to 100.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub inserted: u64,
    #[serde(default)]
    pub error: Option<String>,
}

/// Answer of `POST /import`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmitResponse {
    /// The service queued the import; poll `job_id` for progress.
    Accepted { job_id: String },
    /// The service finished the import inline.
    Imported {
        registros_importados: u64,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        log_id: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::poller::{JobPoller, JobStatusSource, PollEvent, PollExit, Sleeper};
    use super::selection::SelectedFile;
    use super::session::{Effect, ImportSession, ImportState};
    use super::*;
    use crate::error::ApiError;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    struct Scripted(RefCell<VecDeque<ImportJob>>);

    impl JobStatusSource for Scripted {
        async fn job_status(&self, _job_id: &str) -> Result<ImportJob, ApiError> {
            self.0
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ApiError::Network("script exhausted".into()))
        }
    }

    struct TokioSleeper;

    impl Sleeper for TokioSleeper {
        async fn sleep(&self, duration: Duration) {
            tokio::time::sleep(duration).await;
        }
    }

    fn job(status: JobStatus, progress: f64, processed: u64, inserted: u64) -> ImportJob {
        ImportJob {
            status,
            progress,
            processed,
            total: 1000,
            inserted,
            error: None,
        }
    }

    #[test]
    fn decodes_both_submit_shapes() {
        let accepted: SubmitResponse = serde_json::from_str(r#"{"job_id":"abc"}"#).unwrap();
        assert_eq!(accepted, SubmitResponse::Accepted { job_id: "abc".into() });

        let imported: SubmitResponse = serde_json::from_str(
            r#"{"success":true,"message":"Importação concluída. Tipo detectado: documentos","registros_importados":12,"log_id":4}"#,
        )
        .unwrap();
        assert!(matches!(
            imported,
            SubmitResponse::Imported { registros_importados: 12, log_id: Some(4), .. }
        ));
    }

    #[test]
    fn decodes_status_with_missing_counters() {
        let job: ImportJob =
            serde_json::from_str(r#"{"status":"error","error":"linha 42 invalida"}"#).unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert!(job.status.is_terminal());
        assert_eq!(job.processed, 0);
        assert_eq!(job.error.as_deref(), Some("linha 42 invalida"));
        assert!(!JobStatus::Queued.is_terminal());
    }

    // Large file, async import, two polls, auto close.
    #[tokio::test(start_paused = true)]
    async fn large_file_is_imported_through_a_polled_job() {
        let mut session = ImportSession::new();
        session
            .select_file(SelectedFile::new("lote.csv", 10 * 1024 * 1024))
            .unwrap();
        assert!(session.selection().async_mode());

        let (attempt, async_mode) = match session.submit().unwrap() {
            Effect::Submit { attempt, async_mode } => (attempt, async_mode),
            other => panic!("unexpected effect {other:?}"),
        };
        assert!(async_mode);

        let effects = session.submission_succeeded(
            attempt,
            SubmitResponse::Accepted { job_id: "abc".into() },
        );
        assert_eq!(effects, vec![Effect::StartPolling { job_id: "abc".into() }]);

        let source = Scripted(RefCell::new(VecDeque::from(vec![
            job(JobStatus::Processing, 40.0, 400, 0),
            job(JobStatus::Completed, 100.0, 1000, 1000),
        ])));
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let mut poller = JobPoller::default();
        let started = tokio::time::Instant::now();
        let exit = poller
            .arm(source, TokioSleeper, "abc".into(), POLL_INTERVAL, move |ev| {
                sink.borrow_mut().push(ev)
            })
            .await;
        assert_eq!(exit, PollExit::Finished(JobStatus::Completed));
        assert_eq!(started.elapsed(), POLL_INTERVAL);

        let mut close_scheduled = None;
        for event in events.borrow_mut().drain(..) {
            match event {
                PollEvent::Update(update) => {
                    for effect in session.job_update("abc", update) {
                        match effect {
                            Effect::StopPolling => poller.stop(),
                            Effect::ScheduleClose(delay) => close_scheduled = Some(delay),
                            other => panic!("unexpected effect {other:?}"),
                        }
                    }
                }
                PollEvent::TransientFailure(err) => panic!("unexpected failure {err}"),
            }
        }

        assert_eq!(
            session.state(),
            &ImportState::Succeeded {
                message: "Importação concluída! 1000 registros importados.".into()
            }
        );
        assert_eq!(close_scheduled, Some(CLOSE_DELAY));
    }

    #[test]
    fn small_file_imports_inline_without_polling() {
        let mut session = ImportSession::new();
        session.select_file(SelectedFile::new("docs.csv", 1024)).unwrap();
        let Effect::Submit { attempt, async_mode } = session.submit().unwrap() else {
            panic!("expected submit effect");
        };
        assert!(!async_mode);

        let effects = session.submission_succeeded(
            attempt,
            SubmitResponse::Imported {
                registros_importados: 12,
                message: None,
                log_id: None,
            },
        );
        assert_eq!(effects, vec![Effect::ScheduleClose(CLOSE_DELAY)]);
        assert_eq!(session.state().success(), Some("Importação concluída! 12 registros importados."));
        assert_eq!(session.state().job_id(), None);
    }
}
