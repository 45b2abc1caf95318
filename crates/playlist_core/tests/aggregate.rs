use playlist_core::{Aggregator, ChannelRecord};
use pretty_assertions::assert_eq;

fn ch(name: &str, address: &str) -> ChannelRecord {
    ChannelRecord::new(name, address)
}

#[test]
fn first_observed_address_wins() {
    let mut agg = Aggregator::new();
    agg.merge(vec![ch("CCTV-1", "udp://10.0.0.1:1234")]);
    agg.merge(vec![ch("CCTV-1 HD", "udp://10.0.0.1:1234")]);

    let channels = agg.into_channels();
    assert_eq!(channels, vec![ch("CCTV-1", "udp://10.0.0.1:1234")]);
}

#[test]
fn merge_preserves_observation_order() {
    let mut agg = Aggregator::new();
    agg.merge(vec![ch("b", "http://b/1"), ch("a", "http://a/1")]);
    agg.merge(vec![ch("c", "http://c/1")]);

    let addresses: Vec<_> = agg
        .into_channels()
        .into_iter()
        .map(|c| c.address)
        .collect();
    assert_eq!(addresses, vec!["http://b/1", "http://a/1", "http://c/1"]);
}

#[test]
fn merge_counts_added_and_duplicates() {
    let mut agg = Aggregator::new();
    let first = agg.merge(vec![ch("a", "http://a/1"), ch("b", "http://b/1")]);
    assert_eq!((first.added, first.duplicates), (2, 0));

    let second = agg.merge(vec![ch("a2", "http://a/1"), ch("c", "http://c/1")]);
    assert_eq!((second.added, second.duplicates), (1, 1));
    assert_eq!(agg.len(), 3);
}

#[test]
fn addresses_differing_in_case_stay_distinct() {
    let mut agg = Aggregator::new();
    agg.merge(vec![ch("a", "http://host/Live"), ch("b", "http://host/live")]);
    assert_eq!(agg.len(), 2);
}

#[test]
fn same_inputs_same_order_yield_identical_output() {
    let outcomes = vec![
        vec![ch("a", "http://a/1"), ch("b", "http://b/1")],
        vec![ch("b2", "http://b/1"), ch("c", "http://c/1")],
        vec![ch("a", "http://a/1")],
    ];

    let run = |outcomes: &[Vec<ChannelRecord>]| {
        let mut agg = Aggregator::new();
        for outcome in outcomes {
            agg.merge(outcome.clone());
        }
        agg.into_channels()
    };

    assert_eq!(run(&outcomes), run(&outcomes));
}

#[test]
fn empty_aggregator_reports_empty() {
    let agg = Aggregator::new();
    assert!(agg.is_empty());
    assert_eq!(agg.len(), 0);
}
