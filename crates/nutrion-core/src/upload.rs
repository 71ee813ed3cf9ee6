//! Uploaded files as handed over by the front end.

use std::path::Path;

use crate::error::AnalysisError;

/// A user-supplied file: raw bytes plus whatever the front end knows about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File contents, untouched
    pub bytes: Vec<u8>,
    /// Mime type declared by the front end, if any
    pub declared_mime: Option<String>,
    /// Original filename, used for mime inference
    pub filename: String,
}

impl Upload {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>, declared_mime: Option<String>) -> Self {
        Self {
            bytes,
            declared_mime,
            filename: filename.into(),
        }
    }

    /// Read an upload from disk.
    ///
    /// An unreadable file is reported the same way as an empty one.
    pub fn from_path(path: &Path, declared_mime: Option<String>) -> Result<Self, AnalysisError> {
        let bytes = std::fs::read(path).map_err(|e| {
            tracing::debug!("Failed to read upload {}: {e}", path.display());
            AnalysisError::EmptyUpload
        })?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(bytes, filename, declared_mime))
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_path_reads_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("breakfast.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let upload = Upload::from_path(&path, None).unwrap();
        assert_eq!(upload.filename, "breakfast.png");
        assert_eq!(upload.bytes, vec![0x89, b'P', b'N', b'G']);
        assert!(upload.declared_mime.is_none());
    }

    #[test]
    fn from_path_missing_file_is_empty_upload() {
        let dir = tempfile::tempdir().unwrap();
        let err = Upload::from_path(&dir.path().join("nope.jpg"), None).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyUpload));
    }

    #[test]
    fn from_path_keeps_declared_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dinner");
        std::fs::write(&path, b"abc").unwrap();

        let upload = Upload::from_path(&path, Some("image/webp".to_string())).unwrap();
        assert_eq!(upload.declared_mime.as_deref(), Some("image/webp"));
        assert_eq!(upload.len(), 3);
    }
}
