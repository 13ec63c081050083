//! Cooperative polling loop for background import jobs.
//!
//! The loop queries the job once right away, then once per interval, and ends
//! on the first terminal status. There is no backoff: a failed query is
//! reported as [`PollEvent::TransientFailure`] and the next one happens on the
//! normal schedule.
//!
//! [`JobPoller`] owns the abort handle of the single loop it may run. Arming
//! a new loop, calling [`JobPoller::stop`] or dropping the poller aborts the
//! previous one. The abort flag is checked before every query and before every
//! event is delivered, so once `stop` returns no further event reaches the
//! caller.

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{AbortHandle, Abortable};

use super::{ImportJob, JobStatus};
use crate::error::ApiError;

/// One status query against the import service.
#[allow(async_fn_in_trait)]
pub trait JobStatusSource {
    async fn job_status(&self, job_id: &str) -> Result<ImportJob, ApiError>;
}

impl<S: JobStatusSource + ?Sized> JobStatusSource for Rc<S> {
    async fn job_status(&self, job_id: &str) -> Result<ImportJob, ApiError> {
        (**self).job_status(job_id).await
    }
}

impl<S: JobStatusSource + ?Sized> JobStatusSource for &S {
    async fn job_status(&self, job_id: &str) -> Result<ImportJob, ApiError> {
        (**self).job_status(job_id).await
    }
}

/// Timer used between queries (`gloo-timers` in the browser, `tokio` in tests).
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    Update(ImportJob),
    TransientFailure(ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollExit {
    /// The job reached this terminal status.
    Finished(JobStatus),
    /// The loop was aborted before reaching a terminal status.
    Cancelled,
}

#[derive(Debug, Default)]
pub struct JobPoller {
    active: Option<AbortHandle>,
}

impl JobPoller {
    /// Aborts any running loop and returns a new one for `job_id`. The caller
    /// drives the returned future (`spawn_local` in the browser).
    pub fn arm<S, T, F>(
        &mut self,
        source: S,
        sleeper: T,
        job_id: String,
        interval: Duration,
        on_event: F,
    ) -> impl Future<Output = PollExit> + use<S, T, F>
    where
        S: JobStatusSource,
        T: Sleeper,
        F: FnMut(PollEvent),
    {
        self.stop();
        let (handle, registration) = AbortHandle::new_pair();
        let guard = handle.clone();
        self.active = Some(handle);

        let run = poll_loop(source, sleeper, job_id, interval, guard, on_event);
        Abortable::new(run, registration).map(|result| result.unwrap_or(PollExit::Cancelled))
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.abort();
        }
    }

    /// Whether a loop was armed and not stopped since. A loop that ended on
    /// its own still counts until `stop` is called.
    pub fn is_armed(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_aborted())
    }
}

impl Drop for JobPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop<S, T, F>(
    source: S,
    sleeper: T,
    job_id: String,
    interval: Duration,
    guard: AbortHandle,
    mut on_event: F,
) -> PollExit
where
    S: JobStatusSource,
    T: Sleeper,
    F: FnMut(PollEvent),
{
    loop {
        if guard.is_aborted() {
            return PollExit::Cancelled;
        }
        let result = source.job_status(&job_id).await;
        if guard.is_aborted() {
            return PollExit::Cancelled;
        }

        match result {
            Ok(job) => {
                let status = job.status;
                on_event(PollEvent::Update(job));
                if status.is_terminal() {
                    return PollExit::Finished(status);
                }
            }
            Err(err) => on_event(PollEvent::TransientFailure(err)),
        }

        sleeper.sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use tokio::time::Instant;

    /// Replays scripted answers, keeps answering `processing` once exhausted.
    struct FakeService {
        script: RefCell<VecDeque<Result<ImportJob, ApiError>>>,
        latency: Duration,
        calls: RefCell<Vec<Instant>>,
        in_flight: Cell<u32>,
        max_in_flight: Cell<u32>,
    }

    impl FakeService {
        fn new(script: Vec<Result<ImportJob, ApiError>>, latency: Duration) -> Rc<Self> {
            Rc::new(Self {
                script: RefCell::new(script.into()),
                latency,
                calls: RefCell::new(Vec::new()),
                in_flight: Cell::new(0),
                max_in_flight: Cell::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl JobStatusSource for FakeService {
        async fn job_status(&self, _job_id: &str) -> Result<ImportJob, ApiError> {
            self.calls.borrow_mut().push(Instant::now());
            self.in_flight.set(self.in_flight.get() + 1);
            self.max_in_flight
                .set(self.max_in_flight.get().max(self.in_flight.get()));
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.in_flight.set(self.in_flight.get() - 1);
            self.script
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(processing(50.0)))
        }
    }

    struct TokioSleeper;

    impl Sleeper for TokioSleeper {
        async fn sleep(&self, duration: Duration) {
            tokio::time::sleep(duration).await;
        }
    }

    fn processing(progress: f64) -> ImportJob {
        ImportJob {
            status: JobStatus::Processing,
            progress,
            processed: 0,
            total: 0,
            inserted: 0,
            error: None,
        }
    }

    fn finished(status: JobStatus) -> ImportJob {
        ImportJob {
            status,
            progress: 100.0,
            processed: 10,
            total: 10,
            inserted: 10,
            error: None,
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<PollEvent>>>, impl FnMut(PollEvent)) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        (events, move |ev| sink.borrow_mut().push(ev))
    }

    const SECOND: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn first_query_is_immediate_then_fixed_interval() {
        let service = FakeService::new(
            vec![
                Ok(processing(10.0)),
                Ok(processing(20.0)),
                Ok(finished(JobStatus::Completed)),
            ],
            Duration::ZERO,
        );
        let (events, on_event) = recorder();
        let start = Instant::now();
        let mut poller = JobPoller::default();

        let exit = poller
            .arm(service.clone(), TokioSleeper, "job".into(), SECOND, on_event)
            .await;

        assert_eq!(exit, PollExit::Finished(JobStatus::Completed));
        let offsets: Vec<Duration> = service.calls.borrow().iter().map(|t| *t - start).collect();
        assert_eq!(offsets, vec![Duration::ZERO, SECOND, 2 * SECOND]);
        assert_eq!(events.borrow().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn completed_stops_polling_for_good() {
        let service = FakeService::new(vec![Ok(finished(JobStatus::Completed))], Duration::ZERO);
        let (_events, on_event) = recorder();
        let mut poller = JobPoller::default();

        poller
            .arm(service.clone(), TokioSleeper, "job".into(), SECOND, on_event)
            .await;
        tokio::time::sleep(10 * SECOND).await;

        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn error_status_is_terminal() {
        let mut failed = finished(JobStatus::Error);
        failed.error = Some("linha 42 invalida".into());
        let service = FakeService::new(vec![Ok(processing(5.0)), Ok(failed)], Duration::ZERO);
        let (events, on_event) = recorder();
        let mut poller = JobPoller::default();

        let exit = poller
            .arm(service.clone(), TokioSleeper, "job".into(), SECOND, on_event)
            .await;

        assert_eq!(exit, PollExit::Finished(JobStatus::Error));
        assert_eq!(service.call_count(), 2);
        assert!(matches!(
            events.borrow().last(),
            Some(PollEvent::Update(ImportJob { status: JobStatus::Error, .. }))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_do_not_end_the_loop() {
        let service = FakeService::new(
            vec![
                Err(ApiError::Network("connection reset".into())),
                Err(ApiError::Server { status: 502, detail: None }),
                Ok(finished(JobStatus::Completed)),
            ],
            Duration::ZERO,
        );
        let (events, on_event) = recorder();
        let mut poller = JobPoller::default();

        let exit = poller
            .arm(service.clone(), TokioSleeper, "job".into(), SECOND, on_event)
            .await;

        assert_eq!(exit, PollExit::Finished(JobStatus::Completed));
        let events = events.borrow();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], PollEvent::TransientFailure(ApiError::Network(_))));
        assert!(matches!(events[1], PollEvent::TransientFailure(ApiError::Server { status: 502, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_between_queries() {
        let service = FakeService::new(Vec::new(), Duration::ZERO);
        let (events, on_event) = recorder();
        let mut poller = JobPoller::default();

        let run = poller.arm(service.clone(), TokioSleeper, "job".into(), SECOND, on_event);
        let stopper = async {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            poller.stop();
        };
        let (exit, ()) = tokio::join!(run, stopper);

        assert_eq!(exit, PollExit::Cancelled);
        assert_eq!(service.call_count(), 3);
        tokio::time::sleep(5 * SECOND).await;
        assert_eq!(service.call_count(), 3);
        assert_eq!(events.borrow().len(), 3);
        assert!(!poller.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn answer_in_flight_at_stop_is_never_delivered() {
        let service = FakeService::new(
            vec![Ok(finished(JobStatus::Completed))],
            Duration::from_millis(500),
        );
        let (events, on_event) = recorder();
        let mut poller = JobPoller::default();

        let run = poller.arm(service.clone(), TokioSleeper, "job".into(), SECOND, on_event);
        let stopper = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            poller.stop();
        };
        let (exit, ()) = tokio::join!(run, stopper);

        assert_eq!(exit, PollExit::Cancelled);
        assert!(events.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_aborts_the_previous_loop() {
        let old_service = FakeService::new(Vec::new(), Duration::ZERO);
        let new_service = FakeService::new(
            vec![Ok(processing(1.0)), Ok(finished(JobStatus::Completed))],
            Duration::ZERO,
        );
        let (old_events, old_sink) = recorder();
        let (new_events, new_sink) = recorder();
        let mut poller = JobPoller::default();

        let old_run = poller.arm(old_service.clone(), TokioSleeper, "old".into(), SECOND, old_sink);
        let new_run = poller.arm(new_service.clone(), TokioSleeper, "new".into(), SECOND, new_sink);
        let (old_exit, new_exit) = tokio::join!(old_run, new_run);

        assert_eq!(old_exit, PollExit::Cancelled);
        assert_eq!(new_exit, PollExit::Finished(JobStatus::Completed));
        assert_eq!(old_service.call_count(), 0);
        assert!(old_events.borrow().is_empty());
        assert_eq!(new_events.borrow().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn never_two_queries_in_flight() {
        // Queries start at 0, 2.5, 5 and 7.5 s; the fourth is still in flight at 9 s.
        let service = FakeService::new(Vec::new(), Duration::from_millis(1500));
        let (_events, on_event) = recorder();
        let mut poller = JobPoller::default();

        let run = poller.arm(service.clone(), TokioSleeper, "job".into(), SECOND, on_event);
        let stopper = async {
            tokio::time::sleep(9 * SECOND).await;
            poller.stop();
        };
        tokio::join!(run, stopper);

        assert_eq!(service.max_in_flight.get(), 1);
        assert_eq!(service.call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_poller_cancels_its_loop() {
        let service = FakeService::new(Vec::new(), Duration::ZERO);
        let (_events, on_event) = recorder();
        let mut poller = JobPoller::default();
        let run = poller.arm(service.clone(), TokioSleeper, "job".into(), SECOND, on_event);
        drop(poller);

        assert_eq!(run.await, PollExit::Cancelled);
        assert_eq!(service.call_count(), 0);
    }
}
