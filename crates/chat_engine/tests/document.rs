use std::fs;

use chat_engine::{DocumentError, DocumentReader, FsDocumentReader};
use tempfile::TempDir;

#[tokio::test]
async fn reads_whole_file_as_text() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("releve.txt");
    fs::write(&path, "Relevé d'information\nBonus 0,50\n").unwrap();

    let text = FsDocumentReader::default().read_text(&path).await.unwrap();
    assert_eq!(text, "Relevé d'information\nBonus 0,50\n");
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.txt");

    let err = FsDocumentReader::default().read_text(&path).await.unwrap_err();
    assert!(matches!(err, DocumentError::Io(_)));
}

#[tokio::test]
async fn size_limit_is_enforced_when_configured() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("big.txt");
    fs::write(&path, "0123456789").unwrap();

    let err = FsDocumentReader::new(Some(4)).read_text(&path).await.unwrap_err();
    assert!(matches!(
        err,
        DocumentError::TooLarge {
            max_bytes: 4,
            actual: 10
        }
    ));

    let text = FsDocumentReader::new(Some(10)).read_text(&path).await.unwrap();
    assert_eq!(text, "0123456789");
}
