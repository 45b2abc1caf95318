use std::collections::HashSet;

use crate::ChannelRecord;

/// Counters for one merged source result, reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStats {
    pub added: usize,
    pub duplicates: usize,
}

/// Order-preserving dedup over stream addresses.
///
/// Owned exclusively by the pipeline's single collection loop; merges
/// happen in completion order, so the first source to finish wins a
/// contested address. State lives for one run only.
#[derive(Debug, Default)]
pub struct Aggregator {
    seen: HashSet<String>,
    ordered: Vec<ChannelRecord>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every record whose address has not been seen yet, in the
    /// order given. Duplicates are dropped silently.
    pub fn merge(&mut self, channels: impl IntoIterator<Item = ChannelRecord>) -> MergeStats {
        let mut stats = MergeStats::default();
        for channel in channels {
            if self.seen.insert(channel.address.clone()) {
                self.ordered.push(channel);
                stats.added += 1;
            } else {
                stats.duplicates += 1;
            }
        }
        stats
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_channels(self) -> Vec<ChannelRecord> {
        self.ordered
    }
}
