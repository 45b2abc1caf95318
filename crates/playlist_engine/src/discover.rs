use scraper::{Html, Selector};
use url::Url;

use crate::decode::decode_document;
use crate::fetch::{PageFetcher, RequestMode};
use crate::FetchError;

/// One multicast provider entry on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulticastSource {
    pub ip: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    pub listing_url: String,
    pub referer: String,
    /// Stop after this many sources.
    pub limit: usize,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            listing_url: "https://tonkiang.us/iptvmulticast.php".to_string(),
            referer: "https://tonkiang.us/?".to_string(),
            limit: 5,
        }
    }
}

/// Scrape the multicast listing page for channel-list links.
///
/// Only links to the multicast page variant (`p=2`) count; each must
/// carry an `ip` query value. Relative hrefs resolve against the
/// listing URL. At most `limit` sources are returned, in page order.
pub async fn discover_sources(
    fetcher: &dyn PageFetcher,
    settings: &DiscoverySettings,
) -> Result<Vec<MulticastSource>, FetchError> {
    let doc = fetcher
        .fetch(&settings.listing_url, &settings.referer, RequestMode::Page)
        .await?;
    let html = decode_document(&doc)?;
    Ok(parse_listing(&html, &settings.listing_url, settings.limit))
}

fn parse_listing(html: &str, listing_url: &str, limit: usize) -> Vec<MulticastSource> {
    let doc = Html::parse_document(html);
    let link_sel = match Selector::parse("div.channel a[href*='channellist.html?ip=']").ok() {
        Some(sel) => sel,
        None => return Vec::new(),
    };
    let base = Url::parse(listing_url).ok();

    let mut sources = Vec::new();
    for anchor in doc.select(&link_sel) {
        if sources.len() >= limit {
            break;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(resolved) = resolve_href(href, base.as_ref()) else {
            continue;
        };

        let query = |name: &str| {
            resolved
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };
        if query("p").as_deref() != Some("2") {
            continue;
        }
        let Some(ip) = query("ip").filter(|ip| !ip.trim().is_empty()) else {
            continue;
        };

        sources.push(MulticastSource {
            ip: ip.trim().to_string(),
            url: resolved.into(),
        });
    }
    sources
}

fn resolve_href(href: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.and_then(|base| base.join(trimmed).ok())
}

/// The source-list file body for a set of discovered sources: one URL
/// per line, trailing newline.
pub fn render_source_list(sources: &[MulticastSource]) -> String {
    let mut out = String::new();
    for source in sources {
        out.push_str(&source.url);
        out.push('\n');
    }
    out
}
