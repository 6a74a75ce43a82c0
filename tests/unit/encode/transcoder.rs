use super::*;
use crate::foundation::error::ErrorKind;

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"x").unwrap();
}

#[test]
fn contiguous_sequence_is_counted() {
    let dir = tempfile::tempdir().unwrap();
    for i in 1..=12 {
        touch(dir.path(), &format!("{i}.png"));
    }
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "cover.png");
    assert_eq!(scan_frame_sequence(dir.path()).unwrap(), 12);
}

#[test]
fn empty_directory_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan_frame_sequence(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn gap_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    for i in [1, 2, 4] {
        touch(dir.path(), &format!("{i}.png"));
    }
    let err = scan_frame_sequence(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().contains("expected 3.png"));
}

#[test]
fn sequence_must_start_at_one() {
    let dir = tempfile::tempdir().unwrap();
    for i in [0, 1, 2] {
        touch(dir.path(), &format!("{i}.png"));
    }
    assert_eq!(scan_frame_sequence(dir.path()).unwrap_err().kind(), ErrorKind::Decode);
}

#[test]
fn missing_directory_fails() {
    assert!(scan_frame_sequence(Path::new("/no/such/frames/dir")).is_err());
}
