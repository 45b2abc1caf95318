use url::Url;

/// URI schemes a stream address may use. Anything else is discarded
/// at extraction time and never enters the pipeline.
pub const ACCEPTED_SCHEMES: &[&str] = &["http", "https", "rtsp", "rtmp", "udp", "rtp"];

/// One scraped live-stream channel. Dedup identity is the exact
/// `address` string; no case or trailing-slash normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub name: String,
    pub address: String,
}

impl ChannelRecord {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// One page/API endpoint to fetch channels from. `index` is the
/// 0-based position in the source list, used for log lines only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTask {
    pub index: usize,
    pub url: String,
}

impl SourceTask {
    pub fn new(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
        }
    }
}

/// Whether `address` parses as a URL with one of the accepted schemes.
pub fn is_supported_address(address: &str) -> bool {
    match Url::parse(address) {
        Ok(url) => ACCEPTED_SCHEMES.contains(&url.scheme()),
        Err(_) => false,
    }
}
