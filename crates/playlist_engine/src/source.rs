use std::path::Path;

use url::Url;

use playlist_core::ChannelRecord;

use crate::decode::decode_document;
use crate::extract::extract_channels;
use crate::fetch::{PageFetcher, RequestMode};
use crate::{FailureKind, FetchError};

/// Retrieve all channels one source page offers.
///
/// The site serves listing data from a `getall.php` endpoint keyed by
/// the same query parameters as the page URL, so that is queried first
/// with an XHR profile. An empty (but successful) API response falls
/// back to scraping the page itself. An API error is the source's
/// error; no page attempt is made for it.
pub async fn fetch_source_channels(
    fetcher: &dyn PageFetcher,
    page_url: &str,
    debug_dump: Option<&Path>,
) -> Result<Vec<ChannelRecord>, FetchError> {
    let api_url = build_api_url(page_url)?;

    let doc = fetcher
        .fetch(&api_url, page_url, RequestMode::Api)
        .await?;
    let html = decode_document(&doc)?;

    if let Some(path) = debug_dump {
        if let Err(err) = std::fs::write(path, &html) {
            log::warn!("failed to dump listing response to {}: {err}", path.display());
        }
    }

    let channels = extract_channels(&html);
    if !channels.is_empty() {
        return Ok(channels);
    }

    let doc = fetcher
        .fetch(page_url, page_url, RequestMode::Page)
        .await?;
    let html = decode_document(&doc)?;
    Ok(extract_channels(&html))
}

/// Build the listing API URL for a source page, carrying over the
/// `ip`, `tk`, `p` and `c` query parameters (missing ones stay empty,
/// the endpoint expects all four).
pub fn build_api_url(page_url: &str) -> Result<String, FetchError> {
    let parsed = Url::parse(page_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

    let param = |name: &str| {
        parsed
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    };

    let mut api = parsed.clone();
    api.set_path("/getall.php");
    api.set_fragment(None);
    api.query_pairs_mut()
        .clear()
        .append_pair("ip", &param("ip"))
        .append_pair("c", &param("c"))
        .append_pair("tk", &param("tk"))
        .append_pair("p", &param("p"));

    Ok(api.into())
}
