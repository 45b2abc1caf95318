use crate::ChannelRecord;

/// Render the extended playlist format: an `#EXTM3U` header, then one
/// `#EXTINF:-1,{name}` directive line and one bare address line per
/// record. Record order is preserved exactly.
pub fn to_extended_m3u(channels: &[ChannelRecord]) -> String {
    let mut out = String::from("#EXTM3U\n");
    for channel in channels {
        out.push_str("#EXTINF:-1,");
        out.push_str(&channel.name);
        out.push('\n');
        out.push_str(&channel.address);
        out.push('\n');
    }
    out
}

/// Render the delimited text format: one `{name},{address}` line per
/// record, no header, same order.
pub fn to_delimited(channels: &[ChannelRecord]) -> String {
    let mut out = String::new();
    for channel in channels {
        out.push_str(&channel.name);
        out.push(',');
        out.push_str(&channel.address);
        out.push('\n');
    }
    out
}

/// Inverse of [`to_delimited`] for well-formed input: each non-empty
/// line splits on its first comma into name and address.
pub fn parse_delimited(text: &str) -> Vec<ChannelRecord> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| line.split_once(','))
        .map(|(name, address)| ChannelRecord::new(name, address))
        .collect()
}
