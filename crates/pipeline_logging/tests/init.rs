use pipeline_logging::{initialize, LogDestination};

#[test]
fn file_destination_fails_when_the_directory_cannot_be_created() {
    let temp = tempfile::TempDir::new().unwrap();
    let blocker = temp.path().join("logs");
    std::fs::write(&blocker, "not a directory").unwrap();

    assert!(initialize(LogDestination::File, &blocker).is_err());
}

#[test]
fn terminal_destination_ignores_an_unusable_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    let blocker = temp.path().join("logs");
    std::fs::write(&blocker, "not a directory").unwrap();

    // No file logger is opened, so the bad directory never matters.
    assert!(initialize(LogDestination::Terminal, &blocker)
        .unwrap()
        .is_none());
}

#[test]
fn file_destination_creates_a_dated_log_file() {
    let temp = tempfile::TempDir::new().unwrap();

    let path = initialize(LogDestination::File, temp.path())
        .unwrap()
        .expect("a log file path");
    assert!(path.exists());

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("app-") && name.ends_with(".log"), "{name}");
}
