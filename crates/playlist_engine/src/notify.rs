use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinSet;
use url::Url;

use playlist_core::{MergeStats, SourceTask};

use crate::{FailureKind, FetchError, RunSummary};

/// Events the orchestrator publishes while a run progresses. The
/// pipeline depends only on this trait; delivery (log file, push
/// service) is the subscriber's concern.
pub trait RunObserver: Send + Sync {
    fn on_source_succeeded(&self, _task: &SourceTask, _stats: &MergeStats, _unique_total: usize) {}
    fn on_source_failed(&self, _task: &SourceTask, _error: &FetchError) {}
    fn on_run_completed(&self, _summary: &RunSummary) {}
}

impl<T: RunObserver + ?Sized> RunObserver for Arc<T> {
    fn on_source_succeeded(&self, task: &SourceTask, stats: &MergeStats, unique_total: usize) {
        (**self).on_source_succeeded(task, stats, unique_total);
    }

    fn on_source_failed(&self, task: &SourceTask, error: &FetchError) {
        (**self).on_source_failed(task, error);
    }

    fn on_run_completed(&self, summary: &RunSummary) {
        (**self).on_run_completed(summary);
    }
}

/// Reports run events through the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl RunObserver for LogObserver {
    fn on_source_succeeded(&self, task: &SourceTask, stats: &MergeStats, unique_total: usize) {
        log::info!(
            "source {}: {} channels merged, {} duplicates dropped ({} unique so far)",
            task.url,
            stats.added,
            stats.duplicates,
            unique_total
        );
    }

    fn on_source_failed(&self, task: &SourceTask, error: &FetchError) {
        log::warn!("source {} failed: {error}", task.url);
    }

    fn on_run_completed(&self, summary: &RunSummary) {
        log::info!(
            "run finished: {} unique channels from {} sources ({} failed)",
            summary.unique_channels,
            summary.sources_total,
            summary.sources_failed
        );
    }
}

/// Fans one event out to every subscribed observer, in order.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn RunObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn RunObserver>) {
        self.observers.push(observer);
    }
}

impl RunObserver for ObserverSet {
    fn on_source_succeeded(&self, task: &SourceTask, stats: &MergeStats, unique_total: usize) {
        for observer in &self.observers {
            observer.on_source_succeeded(task, stats, unique_total);
        }
    }

    fn on_source_failed(&self, task: &SourceTask, error: &FetchError) {
        for observer in &self.observers {
            observer.on_source_failed(task, error);
        }
    }

    fn on_run_completed(&self, summary: &RunSummary) {
        for observer in &self.observers {
            observer.on_run_completed(summary);
        }
    }
}

/// Build the push URL for one Bark message:
/// `{host}/{key}/{title}/{body}` with each segment percent-encoded.
pub fn bark_push_url(host: &Url, key: &str, title: &str, body: &str) -> Result<Url, FetchError> {
    let mut url = host.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| FetchError::new(FailureKind::InvalidUrl, "bark host cannot be a base"))?;
        segments.pop_if_empty();
        segments.push(key);
        segments.push(title);
        segments.push(body);
    }
    Ok(url)
}

/// Pushes run events to a Bark endpoint. Delivery runs concurrently
/// with aggregation; failures are logged, never propagated. Callers
/// must [`flush`](Self::flush) before the runtime shuts down or
/// deliveries still in flight are cancelled with it.
pub struct BarkObserver {
    client: reqwest::Client,
    host: Url,
    key: String,
    title: String,
    pending: Mutex<JoinSet<()>>,
}

impl BarkObserver {
    pub fn new(host: &str, key: impl Into<String>) -> Result<Self, FetchError> {
        let host = Url::parse(host)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            host,
            key: key.into(),
            title: "IPTV".to_string(),
            pending: Mutex::new(JoinSet::new()),
        })
    }

    fn push(&self, body: String) {
        let url = match bark_push_url(&self.host, &self.key, &self.title, &body) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("bark push skipped: {err}");
                return;
            }
        };
        let client = self.client.clone();
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        pending.spawn(async move {
            match client.get(url).send().await {
                Ok(response) if !response.status().is_success() => {
                    log::warn!("bark push rejected: http status {}", response.status());
                }
                Ok(_) => {}
                Err(err) => log::warn!("bark push failed: {err}"),
            }
        });
    }

    /// Wait until every push issued so far has been delivered (or has
    /// failed and been logged).
    pub async fn flush(&self) {
        let mut pending = match self.pending.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => return,
        };
        while pending.join_next().await.is_some() {}
    }
}

impl RunObserver for BarkObserver {
    fn on_source_succeeded(&self, task: &SourceTask, stats: &MergeStats, unique_total: usize) {
        self.push(format!(
            "source {} ok: {} merged, {} unique total",
            task.url, stats.added, unique_total
        ));
    }

    fn on_source_failed(&self, task: &SourceTask, error: &FetchError) {
        self.push(format!("source {} failed: {error}", task.url));
    }

    fn on_run_completed(&self, summary: &RunSummary) {
        self.push(format!(
            "run finished: {} unique channels, {}/{} sources failed",
            summary.unique_channels, summary.sources_failed, summary.sources_total
        ));
    }
}
