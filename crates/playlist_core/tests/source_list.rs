use playlist_core::{parse_source_list, SourceTask};
use pretty_assertions::assert_eq;

#[test]
fn skips_blanks_and_comments() {
    let text = "\n# multicast sources\nhttp://a/1\n\n  http://b/2  \n# trailing note\n";
    let tasks = parse_source_list(text);
    assert_eq!(
        tasks,
        vec![
            SourceTask::new(0, "http://a/1"),
            SourceTask::new(1, "http://b/2"),
        ]
    );
}

#[test]
fn comment_only_file_yields_no_tasks() {
    assert!(parse_source_list("# one\n# two\n\n").is_empty());
}

#[test]
fn indexes_count_surviving_lines_from_zero() {
    let tasks = parse_source_list("# skipped\nhttp://only/1\n");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].index, 0);
}
