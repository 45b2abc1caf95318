use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};

use playlist_core::{Aggregator, ChannelRecord, SourceTask};

use crate::fetch::PageFetcher;
use crate::notify::RunObserver;
use crate::source::fetch_source_channels;
use crate::{FetchOutcome, RunError, RunSummary};

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Admission-gate capacity: at most this many fetch+extract
    /// operations run concurrently.
    pub workers: usize,
    /// When set, the raw listing API responses are dumped here.
    pub debug_dump: Option<PathBuf>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            workers: 5,
            debug_dump: None,
        }
    }
}

/// Fetch and extract every source concurrently, merge the results in
/// completion order and return the deduplicated channel list.
///
/// One worker task is spawned per source; a semaphore of `workers`
/// permits bounds how many are in flight, and each permit is released
/// as soon as its fetch+extract finishes, independent of collection.
/// Outcomes travel over a channel sized to hold every result so no
/// producer ever blocks on the consumer. Per-source failures become
/// observer events, not run failures; only an entirely empty result
/// set is an error.
pub async fn run_pipeline(
    fetcher: Arc<dyn PageFetcher>,
    tasks: Vec<SourceTask>,
    settings: &PipelineSettings,
    observer: &dyn RunObserver,
) -> Result<Vec<ChannelRecord>, RunError> {
    let total = tasks.len();
    let gate = Arc::new(Semaphore::new(settings.workers.max(1)));
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<FetchOutcome>(total.max(1));

    for task in tasks {
        let fetcher = Arc::clone(&fetcher);
        let gate = Arc::clone(&gate);
        let outcome_tx = outcome_tx.clone();
        let debug_dump = settings.debug_dump.clone();

        tokio::spawn(async move {
            // The semaphore is never closed, so acquisition only fails
            // if the run is being torn down.
            let permit = match gate.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };
            log::info!("[{}/{}] fetching {}", task.index + 1, total, task.url);
            let result =
                fetch_source_channels(fetcher.as_ref(), &task.url, debug_dump.as_deref()).await;
            drop(permit);

            let _ = outcome_tx.send(FetchOutcome { task, result }).await;
        });
    }
    drop(outcome_tx);

    let mut aggregator = Aggregator::new();
    let mut failed = 0usize;

    while let Some(outcome) = outcome_rx.recv().await {
        match outcome.result {
            Ok(channels) => {
                let stats = aggregator.merge(channels);
                observer.on_source_succeeded(&outcome.task, &stats, aggregator.len());
            }
            Err(error) => {
                failed += 1;
                observer.on_source_failed(&outcome.task, &error);
            }
        }
    }

    let summary = RunSummary {
        sources_total: total,
        sources_failed: failed,
        unique_channels: aggregator.len(),
    };
    observer.on_run_completed(&summary);

    if aggregator.is_empty() {
        return Err(RunError::NoChannels);
    }
    Ok(aggregator.into_channels())
}
