use std::io;
use std::path::Path;

use widget_logging::chat_info;

use crate::decode::{decode_document, DecodeError};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("document too large (max {max_bytes}, actual {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[async_trait::async_trait]
pub trait DocumentReader: Send + Sync {
    /// Reads the whole file and returns it as text.
    async fn read_text(&self, path: &Path) -> Result<String, DocumentError>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentReader {
    /// `None` reads files of any size.
    max_bytes: Option<u64>,
}

impl FsDocumentReader {
    pub fn new(max_bytes: Option<u64>) -> Self {
        Self { max_bytes }
    }
}

#[async_trait::async_trait]
impl DocumentReader for FsDocumentReader {
    async fn read_text(&self, path: &Path) -> Result<String, DocumentError> {
        if let Some(max_bytes) = self.max_bytes {
            let actual = tokio::fs::metadata(path).await?.len();
            if actual > max_bytes {
                return Err(DocumentError::TooLarge { max_bytes, actual });
            }
        }
        let bytes = tokio::fs::read(path).await?;
        let text = decode_document(&bytes)?;
        chat_info!(
            "Read client document {:?} ({} bytes, {} chars)",
            path,
            bytes.len(),
            text.chars().count()
        );
        Ok(text)
    }
}
