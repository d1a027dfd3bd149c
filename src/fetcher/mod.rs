//! Bounded concurrent item fetching
//!
//! The fetcher takes the first N ranked IDs and retrieves their details with a
//! fixed pool of workers:
//! - jobs are queued in ascending rank order, so the pool fills in rank order
//! - each worker runs one detail request at a time, so at most `concurrency`
//!   requests are ever in flight
//! - outcomes are sent back to the controller, which writes each into the slot
//!   pre-assigned to its rank; completion order never affects the result
//!
//! A worker frees its place in the pool as soon as its request finishes,
//! whether it succeeded or not.

mod lister;

pub use lister::list_ranked;

use crate::config::{Config, FailurePolicy};
use crate::error::{Error, Result};
use crate::source::ItemSource;
use crate::types::{Item, RankedId, ResultSet, Slot};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of one detail fetch, reported by a worker
struct FetchOutcome {
    job: RankedId,
    result: Result<Item>,
}

/// Fetches item details for a ranked list with a capped number of in-flight requests
pub struct BoundedFetcher {
    source: Arc<dyn ItemSource>,
    num_stories: usize,
    concurrency: usize,
    failure_policy: FailurePolicy,
}

impl BoundedFetcher {
    /// Create a fetcher using the batch size, concurrency and failure policy from `config`
    pub fn new(source: Arc<dyn ItemSource>, config: &Config) -> Self {
        Self {
            source,
            num_stories: config.num_stories,
            concurrency: config.effective_concurrency().max(1),
            failure_policy: config.failure_policy,
        }
    }

    /// Number of result slots every fetch produces
    pub fn num_stories(&self) -> usize {
        self.num_stories
    }

    /// Maximum number of detail requests in flight at once
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetch details for the first `num_stories` ranked IDs
    ///
    /// The returned set always has exactly `num_stories` slots. Slot r holds the
    /// item at position r of `ranked`; the `rank` carried by each entry is not
    /// consulted, so every requested item lands in a slot. Slots past the end of
    /// `ranked` stay [`Slot::Empty`].
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`] the first failed detail fetch is returned
    /// and no result set is produced. No new requests are started after that;
    /// requests already in flight are left to finish and their results are
    /// discarded. Under [`FailurePolicy::Partial`] failures are recorded as
    /// [`Slot::Failed`] instead.
    ///
    /// A worker that panics is reported as [`Error::Task`] under either policy,
    /// and no new requests are started after the panic.
    pub async fn fetch(&self, ranked: &[RankedId]) -> Result<ResultSet> {
        let mut results = ResultSet::with_len(self.num_stories);
        let jobs: Vec<RankedId> = ranked
            .iter()
            .take(self.num_stories)
            .enumerate()
            .map(|(rank, entry)| RankedId { rank, id: entry.id })
            .collect();
        if jobs.is_empty() {
            return Ok(results);
        }

        let workers = self.concurrency.min(jobs.len());
        info!(
            items = jobs.len(),
            workers,
            policy = ?self.failure_policy,
            "fetching top items"
        );

        let job_queue = fill_job_queue(jobs).await?;
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let mut pool = JoinSet::new();
        for worker in 0..workers {
            pool.spawn(run_worker(
                worker,
                Arc::clone(&self.source),
                Arc::clone(&job_queue),
                outcome_tx.clone(),
                cancel.clone(),
            ));
        }
        // The channel closes once every worker has exited
        drop(outcome_tx);

        while let Some(FetchOutcome { job, result }) = outcome_rx.recv().await {
            match result {
                Ok(item) => results.set(job.rank, Slot::Filled(item)),
                Err(e) => match self.failure_policy {
                    FailurePolicy::Abort => {
                        error!(
                            rank = job.rank,
                            id = job.id.get(),
                            error = %e,
                            "item fetch failed, aborting batch"
                        );
                        cancel.cancel();
                        pool.detach_all();
                        return Err(e);
                    }
                    FailurePolicy::Partial => {
                        warn!(
                            rank = job.rank,
                            id = job.id.get(),
                            error = %e,
                            "item fetch failed, recording failed slot"
                        );
                        results.set(job.rank, Slot::Failed { id: job.id, error: e });
                    }
                },
            }
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "fetch worker did not complete");
                return Err(Error::Task(e.to_string()));
            }
        }

        info!(
            fetched = results.items().count(),
            failed = results.failed_ranks().len(),
            "finished fetching top items"
        );
        Ok(results)
    }
}

/// Queue every job in rank order and close the queue
async fn fill_job_queue(jobs: Vec<RankedId>) -> Result<Arc<Mutex<mpsc::Receiver<RankedId>>>> {
    let (job_tx, job_rx) = mpsc::channel(jobs.len());
    for job in jobs {
        job_tx
            .send(job)
            .await
            .map_err(|_| Error::Task("job queue closed while filling".into()))?;
    }
    Ok(Arc::new(Mutex::new(job_rx)))
}

/// Cancels the batch unless the owning worker returns normally
///
/// A panicking task's future is dropped after the unwind has been caught, so
/// the guard cannot rely on `std::thread::panicking`.
struct CancelUnlessFinished {
    cancel: CancellationToken,
    finished: bool,
}

impl Drop for CancelUnlessFinished {
    fn drop(&mut self) {
        if !self.finished {
            self.cancel.cancel();
        }
    }
}

async fn run_worker(
    worker: usize,
    source: Arc<dyn ItemSource>,
    jobs: Arc<Mutex<mpsc::Receiver<RankedId>>>,
    outcomes: mpsc::UnboundedSender<FetchOutcome>,
    cancel: CancellationToken,
) {
    let mut guard = CancelUnlessFinished {
        cancel: cancel.clone(),
        finished: false,
    };
    loop {
        if cancel.is_cancelled() {
            debug!(worker, "batch aborted, worker stopping");
            break;
        }

        // Empty and closed both mean there is nothing left to do
        let next = jobs.lock().await.try_recv().ok();
        let Some(job) = next else {
            break;
        };

        debug!(worker, rank = job.rank, id = job.id.get(), "fetching story");
        let result = source.item(job.id).await;

        if outcomes.send(FetchOutcome { job, result }).is_err() {
            // Controller already returned
            break;
        }
    }
    guard.finished = true;
}
