//! Playlist engine: the IO side of the channel aggregation pipeline.
mod decode;
mod discover;
mod extract;
mod fetch;
mod notify;
mod orchestrate;
mod persist;
mod source;
mod types;

pub use decode::decode_document;
pub use discover::{discover_sources, render_source_list, DiscoverySettings, MulticastSource};
pub use extract::extract_channels;
pub use fetch::{FetchSettings, PageFetcher, ReqwestFetcher, RequestMode};
pub use notify::{bark_push_url, BarkObserver, LogObserver, ObserverSet, RunObserver};
pub use orchestrate::{run_pipeline, PipelineSettings};
pub use persist::{copy_output, write_atomic, PersistError};
pub use source::{build_api_url, fetch_source_channels};
pub use types::{FailureKind, FetchError, FetchOutcome, FetchedDocument, RunError, RunSummary};
