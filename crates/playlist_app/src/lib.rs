//! Playlist app: configuration loading and the aggregation run loop.
pub mod config;
pub mod run;
