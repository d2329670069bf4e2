mod common;

use anyhow::Result;
use common::{PAST, TestFolder};
use foldermon::TrackError;
use foldermon::registry::{
    AddOutcome, CommitPolicy, FileRegistry, RegistryOptions, StatusBaseline,
};
use foldermon::tracking::{FileKind, Timestamp};

fn registry_with(folder: &TestFolder, baseline: StatusBaseline, policy: CommitPolicy) -> FileRegistry {
    FileRegistry::with_options(
        folder.path(),
        RegistryOptions {
            baseline,
            commit_policy: policy,
            ..RegistryOptions::default()
        },
    )
}

#[test]
fn test_notes_scenario() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("notes.txt", "a b\nc\nd e f\n")?;
    let mut registry = folder.registry();

    assert_eq!(registry.add("notes.txt")?, AddOutcome::Tracked(FileKind::Text));
    let line = registry.describe_one("notes.txt")?;

    assert!(line.starts_with("Text File: notes.txt, Created: "));
    assert!(line.ends_with("Lines: 3, Words: 6, Characters: 12"));
    Ok(())
}

#[test]
fn test_photo_scenario() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_bytes("photo.png", &[0x89, b'P', b'N', b'G'])?;
    let mut registry = folder.registry();

    assert_eq!(registry.add("photo.png")?, AddOutcome::Tracked(FileKind::Image));
    let line = registry.describe_one("photo.png")?;

    assert!(line.starts_with("Image File: photo.png, Created: "));
    assert!(line.ends_with("Dimensions: 1024x860"));
    Ok(())
}

#[test]
fn test_unsupported_extension_is_never_tracked() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("data.csv", "a,b\n")?;
    let mut registry = folder.registry();

    assert_eq!(registry.add("data.csv")?, AddOutcome::Unsupported);
    assert!(registry.is_empty());
    let err = registry.describe_one("data.csv").unwrap_err();
    assert!(matches!(err, TrackError::NotFound { .. }));
    Ok(())
}

#[test]
fn test_extension_matching_ignores_case() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("README.TXT", "hello\n")?;
    folder.create_bytes("Shot.JPG", b"jpeg")?;
    let mut registry = folder.registry();

    assert_eq!(registry.add("README.TXT")?, AddOutcome::Tracked(FileKind::Text));
    assert_eq!(registry.add("Shot.JPG")?, AddOutcome::Tracked(FileKind::Image));
    assert!(registry.describe_one("Shot.JPG")?.ends_with("Dimensions: 1024x860"));
    Ok(())
}

#[test]
fn test_add_missing_file_fails_not_found() -> Result<()> {
    let folder = TestFolder::new()?;
    let mut registry = folder.registry();

    let err = registry.add("ghost.txt").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.path(), std::path::Path::new("ghost.txt"));
    assert!(registry.is_empty());
    Ok(())
}

#[test]
fn test_add_then_remove() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("notes.txt", "x\n")?;
    let mut registry = folder.registry();

    registry.add("notes.txt")?;
    assert!(registry.remove("notes.txt"));
    assert!(!registry.contains("notes.txt"));
    assert!(registry.describe_one("notes.txt").unwrap_err().is_not_found());

    // Removing again is a no-op
    assert!(!registry.remove("notes.txt"));
    Ok(())
}

#[test]
fn test_commit_sets_snapshot_to_live_mtime() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("a.txt", "a\n")?;
    folder.create_file("b.txt", "b\n")?;
    let mut registry = folder.registry();
    registry.add("a.txt")?;
    registry.add("b.txt")?;

    folder.set_mtime("a.txt", PAST)?;
    let report = registry.commit_all()?;

    assert_eq!(report.committed, 2);
    assert!(report.is_complete());
    for file in registry.iter() {
        assert_eq!(file.snapshot_at(), file.current_modified_time()?);
    }
    assert_eq!(
        registry.get("a.txt").unwrap().snapshot_at(),
        Timestamp::from_unix(PAST)
    );
    Ok(())
}

#[test]
fn test_readd_resets_lifecycle() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("notes.txt", "a\n")?;
    let mut registry = folder.registry();
    registry.add("notes.txt")?;

    folder.set_mtime("notes.txt", PAST)?;
    registry.commit_all()?;
    assert_eq!(
        registry.get("notes.txt").unwrap().snapshot_at(),
        Timestamp::from_unix(PAST)
    );

    assert_eq!(registry.add("notes.txt")?, AddOutcome::Replaced(FileKind::Text));
    assert_eq!(registry.len(), 1);

    let file = registry.get("notes.txt").unwrap();
    let metadata = std::fs::metadata(folder.path().join("notes.txt"))?;
    assert_eq!(file.created_at(), Timestamp::created(&metadata)?);
    assert_eq!(file.snapshot_at(), file.created_at());
    assert_ne!(file.snapshot_at(), Timestamp::from_unix(PAST));
    Ok(())
}

#[test]
fn test_status_compares_against_creation_time() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("a.txt", "a\n")?;
    folder.create_file("b.txt", "b\n")?;
    let mut registry = folder.registry();
    registry.add("a.txt")?;
    registry.add("b.txt")?;

    assert!(registry.changed()?.is_empty());

    folder.set_mtime("a.txt", PAST)?;
    let status = registry.status()?;
    assert_eq!(status.len(), 2);
    assert!(status[0].changed);
    assert!(!status[1].changed);

    // Commits do not clear a change under the default baseline
    registry.commit_all()?;
    assert_eq!(registry.changed()?, vec![std::path::PathBuf::from("a.txt")]);
    Ok(())
}

#[test]
fn test_status_against_snapshot_clears_after_commit() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("a.txt", "a\n")?;
    let mut registry = registry_with(&folder, StatusBaseline::Snapshot, CommitPolicy::FailFast);
    registry.add("a.txt")?;

    folder.set_mtime("a.txt", PAST)?;
    assert_eq!(registry.changed()?.len(), 1);

    registry.commit_all()?;
    assert!(registry.changed()?.is_empty());
    Ok(())
}

#[test]
fn test_status_fails_for_vanished_file() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("a.txt", "a\n")?;
    let mut registry = folder.registry();
    registry.add("a.txt")?;

    folder.remove_file("a.txt")?;
    let err = registry.status().unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn test_fail_fast_commit_changes_nothing() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("a.txt", "a\n")?;
    folder.create_file("b.txt", "b\n")?;
    let mut registry = folder.registry();
    registry.add("a.txt")?;
    registry.add("b.txt")?;

    folder.set_mtime("a.txt", PAST)?;
    folder.remove_file("b.txt")?;

    let err = registry.commit_all().unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.path(), std::path::Path::new("b.txt"));

    let a = registry.get("a.txt").unwrap();
    assert_eq!(a.snapshot_at(), a.created_at());
    Ok(())
}

#[test]
fn test_skip_and_report_commit() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("a.txt", "a\n")?;
    folder.create_file("b.txt", "b\n")?;
    let mut registry = registry_with(&folder, StatusBaseline::Created, CommitPolicy::SkipAndReport);
    registry.add("a.txt")?;
    registry.add("b.txt")?;

    folder.set_mtime("a.txt", PAST)?;
    folder.remove_file("b.txt")?;

    let report = registry.commit_all()?;
    assert_eq!(report.committed, 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(!report.is_complete());
    assert_eq!(
        registry.get("a.txt").unwrap().snapshot_at(),
        Timestamp::from_unix(PAST)
    );
    Ok(())
}

#[test]
fn test_describe_is_fresh_and_leaves_timestamps() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("notes.txt", "one\n")?;
    let mut registry = folder.registry();
    registry.add("notes.txt")?;
    let before = registry.get("notes.txt").unwrap().clone();

    assert!(registry.describe_one("notes.txt")?.ends_with("Lines: 1, Words: 1, Characters: 4"));

    folder.create_file("notes.txt", "one two\nthree\n")?;
    assert!(registry.describe_one("notes.txt")?.ends_with("Lines: 2, Words: 3, Characters: 14"));

    let after = registry.get("notes.txt").unwrap();
    assert_eq!(after.created_at(), before.created_at());
    assert_eq!(after.snapshot_at(), before.snapshot_at());
    Ok(())
}

#[test]
fn test_describe_all_in_sorted_order() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("b.txt", "b\n")?;
    folder.create_file("a.txt", "a\n")?;
    folder.create_bytes("c.png", b"png")?;
    let mut registry = folder.registry();
    for name in ["c.png", "b.txt", "a.txt"] {
        registry.add(name)?;
    }

    let lines = registry.describe_all()?;
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Text File: a.txt"));
    assert!(lines[1].starts_with("Text File: b.txt"));
    assert!(lines[2].starts_with("Image File: c.png"));
    Ok(())
}

#[test]
fn test_describe_all_aborts_on_missing_text_file() -> Result<()> {
    let folder = TestFolder::new()?;
    folder.create_file("a.txt", "a\n")?;
    let mut registry = folder.registry();
    registry.add("a.txt")?;

    folder.remove_file("a.txt")?;
    assert!(registry.describe_all().unwrap_err().is_not_found());
    Ok(())
}
