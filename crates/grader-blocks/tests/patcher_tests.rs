//! Integration tests for patching files on disk.

use grader_blocks::{Error, MarkerPair, PatchOptions, Payload, patch, patch_with_options};
use grader_fs::NormalizedPath;
use grader_test_utils::{AFTER, BEFORE, TestSubmission, marked_source};
use pretty_assertions::assert_eq;

fn markers() -> MarkerPair {
    MarkerPair::new(BEFORE, AFTER).unwrap()
}

fn payload() -> Payload {
    Payload::new("#[cfg(test)]\nmod tests {\n    #[test]\n    fn autograder001() {}\n}\n")
}

fn target(sub: &TestSubmission) -> NormalizedPath {
    NormalizedPath::new(sub.target_path())
}

#[test]
fn test_patch_replaces_student_block() {
    let sub = TestSubmission::new().with_marked_target("// student scribbles\nfn stale() {}\n");

    let outcome = patch(&target(&sub), &markers(), &payload()).unwrap();

    assert!(outcome.is_success());
    assert!(outcome.written);
    assert_eq!(sub.read_target(), marked_source(payload().as_str()));
    assert_ne!(outcome.checksum_before, outcome.checksum_after);
}

#[test]
fn test_patch_is_idempotent() {
    let sub = TestSubmission::new().with_marked_target("old\n");
    let path = target(&sub);

    patch(&path, &markers(), &payload()).unwrap();
    let once = sub.read_target();
    let second = patch(&path, &markers(), &payload()).unwrap();
    let twice = sub.read_target();

    assert_eq!(once, twice);
    assert!(second.is_success());
    assert!(!second.written, "unchanged content should not be rewritten");
    assert_eq!(second.checksum_before, second.checksum_after);
}

#[test]
fn test_patch_with_different_payload_discards_previous() {
    let sub = TestSubmission::new().with_marked_target("");
    let path = target(&sub);

    patch(&path, &markers(), &Payload::new("fn first() {}")).unwrap();
    patch(&path, &markers(), &Payload::new("fn second() {}")).unwrap();

    let content = sub.read_target();
    assert!(!content.contains("fn first()"));
    assert_eq!(content, marked_source("fn second() {}\n"));
}

#[test]
fn test_missing_before_leaves_file_untouched() {
    let original = "fn main() {}\n// AFTER only\n";
    let sub = TestSubmission::new().with_target(original);

    let outcome = patch(&target(&sub), &markers(), &payload()).unwrap();

    assert!(!outcome.is_success());
    assert!(!outcome.found_before);
    assert!(!outcome.written);
    assert_eq!(sub.read_target(), original);
}

#[test]
fn test_missing_after_leaves_file_untouched() {
    let original = format!("fn main() {{}}\n{}\nold tests\n", BEFORE);
    let sub = TestSubmission::new().with_target(&original);

    let outcome = patch(&target(&sub), &markers(), &payload()).unwrap();

    assert!(outcome.found_before);
    assert!(!outcome.found_after);
    assert_eq!(sub.read_target(), original);

    let err = outcome.into_result().unwrap_err();
    assert!(err.is_format_error());
    assert!(matches!(
        err,
        Error::MalformedMarkers { found_before: true, found_after: false, .. }
    ));
}

#[test]
fn test_out_of_order_markers_leave_file_untouched() {
    let original = format!("{}\n{}\nX\n", AFTER, BEFORE);
    let sub = TestSubmission::new().with_target(&original);

    let err = patch(&target(&sub), &markers(), &payload()).unwrap_err();

    assert!(matches!(err, Error::MarkersOutOfOrder { after_line: 1, before_line: 2 }));
    assert!(err.is_format_error());
    assert_eq!(sub.read_target(), original);
}

#[test]
fn test_dry_run_does_not_write() {
    let sub = TestSubmission::new().with_marked_target("old\n");
    let before = sub.read_target();
    let options = PatchOptions {
        dry_run: true,
        ..PatchOptions::default()
    };

    let outcome = patch_with_options(&target(&sub), &markers(), &payload(), options).unwrap();

    assert!(outcome.is_success());
    assert!(!outcome.written);
    assert_eq!(sub.read_target(), before);
    let splice = outcome.into_result().unwrap();
    assert_eq!(splice.content, marked_source(payload().as_str()));
}

#[test]
fn test_missing_file_is_fs_error() {
    let sub = TestSubmission::new();

    let err = patch(&target(&sub), &markers(), &payload()).unwrap_err();

    assert!(matches!(err, Error::Fs(grader_fs::Error::Io { .. })));
    assert!(!err.is_format_error());
}
