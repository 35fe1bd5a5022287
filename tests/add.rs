//! Copying files from disk into an archive.

mod common;

use common::{PNG_BYTES, write_sample_tree};
use zipdoc::{Archive, Error, Filesystem, LocalFs};

#[tokio::test]
async fn add_relative_path_under_root() {
    let dir = tempfile::tempdir().unwrap();
    let names = write_sample_tree(dir.path());

    let mut archive = Archive::new();
    archive
        .add(&LocalFs, names[0], Some(dir.path()))
        .await
        .unwrap();

    assert_eq!(archive.list(), vec![names[0]]);
}

#[tokio::test]
async fn add_all_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let names = write_sample_tree(dir.path());

    let mut archive = Archive::new();
    archive
        .add_all(&LocalFs, &names, Some(dir.path()))
        .await
        .unwrap();

    let mut got = archive.list();
    got.sort();
    assert_eq!(got, names);
    assert_eq!(
        archive
            .read_buffer("contents/icon.png", None)
            .await
            .unwrap()
            .document,
        PNG_BYTES
    );
}

#[tokio::test]
async fn add_all_from_directory_listing() {
    let dir = tempfile::tempdir().unwrap();
    let names = write_sample_tree(dir.path());

    let files = LocalFs
        .list_files(&dir.path().join("contents"))
        .await
        .unwrap();
    assert!(files.iter().all(|file| file.is_absolute()));

    let mut archive = Archive::new();
    archive
        .add_all(&LocalFs, &files, Some(dir.path()))
        .await
        .unwrap();

    let mut got = archive.list();
    got.sort();
    assert_eq!(got, names);
}

#[tokio::test]
async fn add_without_root_uses_path_as_given() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    std::fs::write(&file, b"plain").unwrap();

    let mut archive = Archive::new();
    archive.add(&LocalFs, &file, None).await.unwrap();

    let key = file.to_str().unwrap();
    assert_eq!(archive.list(), vec![key]);
    assert_eq!(
        archive.read_utf8(key, None).await.unwrap().document,
        "plain"
    );
}

#[tokio::test]
async fn add_missing_file_leaves_archive_unchanged() {
    let dir = tempfile::tempdir().unwrap();

    let mut archive = Archive::new();
    archive.write_utf8("keep.txt", "kept").await.unwrap();
    let before = archive.generate().await.unwrap();

    let err = archive
        .add(&LocalFs, "missing/file.txt", Some(dir.path()))
        .await
        .unwrap_err();
    match err {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(archive.generate().await.unwrap(), before);
}

#[tokio::test]
async fn add_all_stops_at_first_failure_without_rollback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("p1.txt"), b"one").unwrap();
    std::fs::write(dir.path().join("p3.txt"), b"three").unwrap();

    let mut archive = Archive::new();
    let err = archive
        .add_all(&LocalFs, ["p1.txt", "p2.txt", "p3.txt"], Some(dir.path()))
        .await
        .unwrap_err();

    match err {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(archive.list(), vec!["p1.txt"]);
}

#[tokio::test]
async fn add_all_repeated_path_keeps_one_entry() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("v1")).unwrap();
    std::fs::create_dir(dir.path().join("v2")).unwrap();
    std::fs::write(dir.path().join("v1/a.txt"), b"old").unwrap();
    std::fs::write(dir.path().join("v2/a.txt"), b"new").unwrap();

    let mut archive = Archive::new();
    archive
        .add_all(
            &LocalFs,
            [dir.path().join("v1/a.txt"), dir.path().join("v2/a.txt")],
            Some(dir.path()),
        )
        .await
        .unwrap();
    archive
        .add_all(&LocalFs, ["a.txt", "a.txt"], Some(dir.path().join("v2").as_path()))
        .await
        .unwrap();

    assert_eq!(archive.list(), vec!["v1/a.txt", "v2/a.txt", "a.txt"]);
    assert_eq!(archive.read_utf8("a.txt", None).await.unwrap().document, "new");
}
