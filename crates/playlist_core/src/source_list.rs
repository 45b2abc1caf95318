use crate::SourceTask;

/// Parse a newline-delimited source URL list. Lines are trimmed;
/// blank lines and lines starting with `#` are skipped. Task indexes
/// count surviving URLs from 0 in file order.
pub fn parse_source_list(text: &str) -> Vec<SourceTask> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .enumerate()
        .map(|(index, url)| SourceTask::new(index, url))
        .collect()
}
