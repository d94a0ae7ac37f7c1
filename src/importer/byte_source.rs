// ==========================================
// Exam Import Pipeline - Byte Sources
// ==========================================
// The single suspension point of the pipeline: the
// raw buffer is read asynchronously once, then every
// later stage runs to completion on in-memory data.
// The calling UI hands the pipeline whatever source
// it has (file handle, upload buffer) behind this
// trait.
// ==========================================

use crate::importer::error::{ImportError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

// ==========================================
// ByteSource Trait
// ==========================================
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Read the entire source into memory.
    async fn read_bytes(&self) -> Result<Vec<u8>>;

    /// Human-readable origin for log lines and findings.
    fn describe(&self) -> String;
}

// ==========================================
// FileByteSource - read from disk via tokio
// ==========================================
pub struct FileByteSource {
    path: PathBuf,
}

impl FileByteSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ByteSource for FileByteSource {
    async fn read_bytes(&self) -> Result<Vec<u8>> {
        if !self.path.exists() {
            return Err(ImportError::FileNotFound(
                self.path.display().to_string(),
            ));
        }
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ==========================================
// MemoryByteSource - already-buffered input
// ==========================================
// Used when the caller holds the upload in memory.
pub struct MemoryByteSource {
    bytes: Vec<u8>,
}

impl MemoryByteSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[async_trait]
impl ByteSource for MemoryByteSource {
    async fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<memory buffer, {} bytes>", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_source_reads_contents() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"title,subject\n").unwrap();

        let source = FileByteSource::new(file.path());
        let bytes = source.read_bytes().await.unwrap();

        assert_eq!(bytes, b"title,subject\n");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileByteSource::new("does_not_exist.csv");
        let result = source.read_bytes().await;

        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_memory_source_round_trips() {
        let source = MemoryByteSource::new(vec![1, 2, 3]);
        assert_eq!(source.read_bytes().await.unwrap(), vec![1, 2, 3]);
    }
}
