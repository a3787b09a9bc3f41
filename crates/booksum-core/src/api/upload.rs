use std::path::Path;

use crate::error::{BooksumError, Result};
use crate::model::{SummaryLength, SummaryType};

/// MIME types the client lets through. The backend does the authoritative check.
pub const ALLOWED_MIME_TYPES: &[&str] = &["text/plain", "application/pdf"];

/// A file picked for summarization, with the MIME type reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk. The MIME type comes from the extension only,
    /// the same weak signal a browser file picker reports.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                BooksumError::InvalidInput(format!("not a file: {}", path.display()))
            })?;
        let mime_type = mime_for_path(path).to_string();
        Ok(Self::new(file_name, mime_type, bytes))
    }

    pub fn is_supported(&self) -> bool {
        ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str())
    }

    /// Reject anything outside the allow-list.
    pub fn ensure_supported(&self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(BooksumError::UnsupportedFileType(self.mime_type.clone()))
        }
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "text" => "text/plain",
        "pdf" => "application/pdf",
        "md" | "markdown" => "text/markdown",
        "html" | "htm" => "text/html",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "epub" => "application/epub+zip",
        _ => "application/octet-stream",
    }
}

/// What gets summarized: exactly one of pasted text or an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySource {
    Text(String),
    File(FileUpload),
}

/// Multipart body of the create-summary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub summary_type: SummaryType,
    pub summary_length: SummaryLength,
    pub source: SummarySource,
}

impl SummaryRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            summary_type: SummaryType::default(),
            summary_length: SummaryLength::default(),
            source: SummarySource::Text(text.into()),
        }
    }

    pub fn from_file(upload: FileUpload) -> Self {
        Self {
            summary_type: SummaryType::default(),
            summary_length: SummaryLength::default(),
            source: SummarySource::File(upload),
        }
    }

    pub fn with_type(mut self, summary_type: SummaryType) -> Self {
        self.summary_type = summary_type;
        self
    }

    pub fn with_length(mut self, summary_length: SummaryLength) -> Self {
        self.summary_length = summary_length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("book.txt")), "text/plain");
        assert_eq!(mime_for_path(Path::new("BOOK.PDF")), "application/pdf");
        assert_eq!(mime_for_path(Path::new("notes.md")), "text/markdown");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_allow_list() {
        assert!(FileUpload::new("a.txt", "text/plain", vec![]).is_supported());
        assert!(FileUpload::new("a.pdf", "application/pdf", vec![]).is_supported());
        let epub = FileUpload::new("a.epub", "application/epub+zip", vec![]);
        assert!(!epub.is_supported());
        assert!(matches!(
            epub.ensure_supported(),
            Err(BooksumError::UnsupportedFileType(m)) if m == "application/epub+zip"
        ));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = std::env::temp_dir().join(format!("booksum-upload-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("chapter.txt");
        std::fs::write(&path, "It was a dark and stormy night.").unwrap();

        let upload = FileUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "chapter.txt");
        assert_eq!(upload.mime_type, "text/plain");
        assert_eq!(upload.bytes, b"It was a dark and stormy night.");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = FileUpload::from_path(Path::new("/nonexistent/book.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, BooksumError::Io(_)));
    }

    #[test]
    fn test_request_builder() {
        let req = SummaryRequest::from_text("hello")
            .with_type(SummaryType::Bullet)
            .with_length(SummaryLength::Short);
        assert_eq!(req.summary_type, SummaryType::Bullet);
        assert_eq!(req.summary_length.words(), 50);
        assert_eq!(req.source, SummarySource::Text("hello".into()));
    }
}
