//! Playlist core: channel data model, dedup aggregation and serialization.
mod aggregate;
mod channel;
mod playlist;
mod source_list;

pub use aggregate::{Aggregator, MergeStats};
pub use channel::{is_supported_address, ChannelRecord, SourceTask, ACCEPTED_SCHEMES};
pub use playlist::{parse_delimited, to_delimited, to_extended_m3u};
pub use source_list::parse_source_list;
