use scraper::{ElementRef, Html, Selector};

use playlist_core::{is_supported_address, ChannelRecord};

/// Substrings that mark a result block as site chrome rather than a
/// real channel entry (search prompts, captcha notices, source rows).
const PLACEHOLDER_NAMES: &[&str] = &["请使用搜索框", "验证", "来自", "组播源"];

struct Selectors {
    result: Selector,
    tip: Selector,
    channel: Selector,
    copy_affordance: Selector,
    address_cell: Selector,
}

impl Selectors {
    fn new() -> Option<Self> {
        Some(Self {
            result: Selector::parse("div.result").ok()?,
            tip: Selector::parse("div.channel div.tip").ok()?,
            channel: Selector::parse("div.channel").ok()?,
            copy_affordance: Selector::parse("img[onclick*='copyto']").ok()?,
            address_cell: Selector::parse("div.m3u8 td").ok()?,
        })
    }
}

/// Extract validated channel records from one listing document, in
/// document order.
///
/// Every lookup tolerates absent markup; a block is only dropped by the
/// final name/address validation. Names come from the `tip` element
/// when present, else from the whole channel block with markup noise
/// collapsed. Addresses come from a `copyto('...')` click-to-copy
/// payload when present, else from the first http(s) token in the
/// address table.
pub fn extract_channels(html: &str) -> Vec<ChannelRecord> {
    let doc = Html::parse_document(html);
    let selectors = match Selectors::new() {
        Some(selectors) => selectors,
        None => return Vec::new(),
    };

    doc.select(&selectors.result)
        .filter_map(|block| extract_block(block, &selectors))
        .collect()
}

fn extract_block(block: ElementRef<'_>, selectors: &Selectors) -> Option<ChannelRecord> {
    let name = channel_name(block, selectors);
    if name.is_empty() || PLACEHOLDER_NAMES.iter().any(|p| name.contains(p)) {
        return None;
    }

    let address =
        copyto_address(block, selectors).or_else(|| table_address(block, selectors))?;
    if !is_supported_address(&address) {
        return None;
    }

    Some(ChannelRecord { name, address })
}

fn channel_name(block: ElementRef<'_>, selectors: &Selectors) -> String {
    if let Some(tip) = block.select(&selectors.tip).next() {
        return element_text(tip).trim().to_string();
    }
    match block.select(&selectors.channel).next() {
        Some(channel) => collapse_whitespace(&element_text(channel)),
        None => String::new(),
    }
}

/// Primary address tier: `onclick="copyto('<address>')"` payloads.
/// First affordance in the block wins.
fn copyto_address(block: ElementRef<'_>, selectors: &Selectors) -> Option<String> {
    block
        .select(&selectors.copy_affordance)
        .filter_map(|img| img.value().attr("onclick"))
        .filter_map(parse_copyto)
        .next()
}

fn parse_copyto(onclick: &str) -> Option<String> {
    let start = onclick.find("copyto('")? + "copyto('".len();
    let rest = &onclick[start..];
    let end = rest.find('\'')?;
    let address = rest[..end].trim();
    if address.is_empty() {
        None
    } else {
        Some(address.to_string())
    }
}

/// Fallback address tier: the first whitespace-separated http(s) token
/// found in the block's address-table cells.
fn table_address(block: ElementRef<'_>, selectors: &Selectors) -> Option<String> {
    block
        .select(&selectors.address_cell)
        .flat_map(|cell| {
            element_text(cell)
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .find(|token| token.starts_with("http://") || token.starts_with("https://"))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
