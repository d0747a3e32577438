//! The steppable search capability shared by the stochastic engines.
//!
//! Each engine advances one generation or iteration per [`Search::step`]
//! call and reports a snapshot of its progress. The caller owns pacing and
//! threading: either call `step` from its own loop, use [`drive`] with a
//! cancellation flag, or move the search onto a worker thread with [`spawn`]
//! and receive reports over a channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A search that advances in discrete steps and tracks its best candidate.
pub trait Search {
    /// Solution representation (genome, tour, placement).
    type Candidate;

    /// Snapshot produced by each step.
    type Report: Clone;

    /// Advances the search by one generation or iteration.
    fn step(&mut self) -> Self::Report;

    /// Number of completed steps.
    fn iteration(&self) -> usize;

    /// Best candidate seen so far, if any step has run.
    fn best(&self) -> Option<&Self::Candidate>;

    /// Quality metric of [`best`](Search::best): fitness or distance
    /// depending on the engine.
    fn best_score(&self) -> Option<f64>;

    /// Whether the engine's own stopping condition has been reached.
    fn is_finished(&self) -> bool;
}

/// Summary of a [`drive`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveOutcome {
    /// Steps executed by this call.
    pub steps: usize,
    /// Whether the cancel flag stopped the loop.
    pub cancelled: bool,
}

/// Steps `search` until it finishes or `cancel` is raised.
///
/// The flag is checked before every step, so a flag that is already set
/// runs zero steps. `on_step` receives each report by shared reference and
/// cannot touch the engine.
pub fn drive<S, F>(search: &mut S, cancel: Option<&AtomicBool>, mut on_step: F) -> DriveOutcome
where
    S: Search + ?Sized,
    F: FnMut(&S::Report),
{
    let mut steps = 0usize;
    while !search.is_finished() {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return DriveOutcome {
                    steps,
                    cancelled: true,
                };
            }
        }
        let report = search.step();
        steps += 1;
        on_step(&report);
    }
    DriveOutcome {
        steps,
        cancelled: false,
    }
}

/// A search running on a worker thread.
pub struct SearchHandle<S: Search> {
    /// Reports in step order. Closed when the worker finishes.
    pub reports: Receiver<S::Report>,
    cancel: Arc<AtomicBool>,
    worker: JoinHandle<(S, DriveOutcome)>,
}

impl<S: Search> SearchHandle<S> {
    /// Asks the worker to stop before its next step.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Waits for the worker and returns the search with its final state.
    pub fn join(self) -> thread::Result<(S, DriveOutcome)> {
        self.worker.join()
    }
}

/// Moves `search` onto a new thread and streams its reports.
///
/// Dropping the receiver is treated as cancellation.
pub fn spawn<S>(mut search: S) -> SearchHandle<S>
where
    S: Search + Send + 'static,
    S::Report: Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    let worker = thread::spawn(move || {
        let outcome = drive(&mut search, Some(flag.as_ref()), |report| {
            if tx.send(report.clone()).is_err() {
                flag.store(true, Ordering::Relaxed);
            }
        });
        (search, outcome)
    });

    SearchHandle {
        reports: rx,
        cancel,
        worker,
    }
}
