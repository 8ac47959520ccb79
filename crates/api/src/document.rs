//! Page-count probe for book documents.
//!
//! The reader needs the page count before it can clamp stored progress or
//! enable navigation, and the server does not report it. The document is
//! fetched once and the count read out of the PDF itself.

use async_trait::async_trait;
use lopdf::Document;
use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("document request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("document could not be parsed: {0}")]
    Parse(String),
}

/// Resolves a catalog asset path against the API origin.
///
/// The server stores absolute URLs for some rows and server-relative
/// paths for others, so both forms are accepted.
#[must_use]
pub fn resolve_asset_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Number of pages in the document at `path`. May be zero.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if the document cannot be fetched or is not
    /// a well-formed PDF.
    async fn page_count(&self, path: &str) -> Result<u32, DocumentError>;
}

//
// ─── HTTP SOURCE ───────────────────────────────────────────────────────────────
//

pub struct HttpDocumentSource {
    client: Client,
    base_url: String,
}

impl HttpDocumentSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn page_count(&self, path: &str) -> Result<u32, DocumentError> {
        let url = resolve_asset_url(&self.base_url, path);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(DocumentError::HttpStatus(response.status()));
        }

        let bytes = response.bytes().await?;
        let doc =
            Document::load_mem(&bytes).map_err(|e| DocumentError::Parse(e.to_string()))?;
        Ok(u32::try_from(doc.get_pages().len()).unwrap_or(u32::MAX))
    }
}

//
// ─── FIXED SOURCE ──────────────────────────────────────────────────────────────
//

/// Source answering with a preset page count, for tests and demos.
#[derive(Debug, Clone)]
pub struct FixedDocumentSource {
    pages: Option<u32>,
}

impl FixedDocumentSource {
    #[must_use]
    pub fn with_pages(pages: u32) -> Self {
        Self { pages: Some(pages) }
    }

    /// A source whose documents always fail to open.
    #[must_use]
    pub fn failing() -> Self {
        Self { pages: None }
    }
}

#[async_trait]
impl DocumentSource for FixedDocumentSource {
    async fn page_count(&self, _path: &str) -> Result<u32, DocumentError> {
        self.pages
            .ok_or_else(|| DocumentError::Parse("document unavailable".into()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_url_passes_absolute_urls_through() {
        assert_eq!(
            resolve_asset_url("http://localhost:5000", "https://cdn.example/bumi.pdf"),
            "https://cdn.example/bumi.pdf"
        );
    }

    #[test]
    fn asset_url_joins_relative_paths() {
        assert_eq!(
            resolve_asset_url("http://localhost:5000/", "/uploads/bumi.pdf"),
            "http://localhost:5000/uploads/bumi.pdf"
        );
        assert_eq!(
            resolve_asset_url("http://localhost:5000", "uploads/bumi.pdf"),
            "http://localhost:5000/uploads/bumi.pdf"
        );
    }

    #[test]
    fn malformed_bytes_fail_to_parse() {
        let err = Document::load_mem(b"definitely not a pdf");
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn fixed_source_reports_preset_count() {
        let source = FixedDocumentSource::with_pages(12);
        assert_eq!(source.page_count("books/bumi.pdf").await.unwrap(), 12);
    }

    #[tokio::test]
    async fn failing_source_errors() {
        let source = FixedDocumentSource::failing();
        assert!(matches!(
            source.page_count("books/bumi.pdf").await.unwrap_err(),
            DocumentError::Parse(_)
        ));
    }
}
