use grader_fs::{NormalizedPath, RobustnessConfig, io};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn fast_config() -> RobustnessConfig {
    RobustnessConfig {
        lock_timeout: Duration::from_millis(300),
        enable_fsync: false,
    }
}

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("test.txt"));

    io::write_atomic(&path, b"hello world", fast_config()).unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated", fast_config()).unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("target.rs"));

    io::write_text(&path, "content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();

    assert!(leftovers.is_empty(), "found leftovers: {:?}", leftovers);
}

#[test]
fn test_lock_file_persists_and_is_reused() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("target.rs"));
    let lock_path = temp.path().join("target.rs.lock");

    io::write_atomic(&path, b"first", fast_config()).unwrap();
    assert!(lock_path.exists(), "lock file must not be unlinked after release");

    io::write_atomic(&path, b"second", fast_config()).unwrap();

    assert!(lock_path.exists());
    assert_eq!(io::read_text(&path).unwrap(), "second");
}

#[test]
fn test_write_text_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("src").join("types").join("merkle.rs"));

    io::write_text(&path, "mod tests {}").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "mod tests {}");
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing.rs"));

    let err = io::read_text(&path).unwrap_err();
    assert!(matches!(err, grader_fs::Error::Io { .. }));
    assert!(err.to_string().contains("missing.rs"));
}

#[test]
fn test_read_text_rejects_invalid_utf8() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("binary.rs");
    fs::write(&file_path, [0xff, 0xfe, 0x00]).unwrap();

    let result = io::read_text(&NormalizedPath::new(&file_path));
    assert!(result.is_err());
}

#[test]
fn test_lock_timeout_is_respected() {
    use fs2::FileExt;

    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("locked.txt");
    fs::write(&file_path, "original").unwrap();
    let lock_path = format!("{}.lock", file_path.display());

    let lock_file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .unwrap();
    lock_file.lock_exclusive().unwrap();

    let path = NormalizedPath::new(&file_path);
    let result = io::write_atomic(&path, b"content", fast_config());

    drop(lock_file);

    assert!(matches!(result, Err(grader_fs::Error::LockFailed { .. })));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "original");
}

#[cfg(unix)]
#[test]
fn test_write_atomic_preserves_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("script.rs");
    fs::write(&file_path, "old").unwrap();
    fs::set_permissions(&file_path, fs::Permissions::from_mode(0o640)).unwrap();

    io::write_atomic(&NormalizedPath::new(&file_path), b"new", fast_config()).unwrap();

    let mode = fs::metadata(&file_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}
