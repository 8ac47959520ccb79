use std::sync::Arc;

use shelf_api::{ApiError, BookCatalog, DocumentSource, ProgressStore};
use shelf_core::model::{Book, BookId, ReadingProgress};

use crate::error::ReaderError;

/// Everything the reader view needs before the first page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedBook {
    pub book: Book,
    /// `None` when the book has no document or it failed to open.
    pub page_count: Option<u32>,
    pub stored_progress: Option<ReadingProgress>,
}

/// Gathers a book, its document's page count, and the stored position.
#[derive(Clone)]
pub struct ReadingFlow {
    books: Arc<dyn BookCatalog>,
    progress: Arc<dyn ProgressStore>,
    documents: Arc<dyn DocumentSource>,
}

impl ReadingFlow {
    #[must_use]
    pub fn new(
        books: Arc<dyn BookCatalog>,
        progress: Arc<dyn ProgressStore>,
        documents: Arc<dyn DocumentSource>,
    ) -> Self {
        Self {
            books,
            progress,
            documents,
        }
    }

    /// Load the book, probe its document, and fetch any stored position.
    ///
    /// The document and the stored position are both allowed to fail
    /// without failing the open: a missing or broken document shows as
    /// unavailable, and an unreachable progress store reads as no stored
    /// position. Reading stays usable either way.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::Api` only when the book itself cannot be
    /// fetched.
    pub async fn open(&self, book_id: BookId) -> Result<OpenedBook, ReaderError> {
        let book = self.books.get_book(book_id).await?;

        let page_count = match book.pdf_path() {
            None => None,
            Some(path) => match self.documents.page_count(path).await {
                Ok(count) => Some(count),
                Err(e) => {
                    tracing::warn!(error = %e, book = book_id.value(), "Document failed to open");
                    None
                }
            },
        };

        let stored_progress = match self.progress.fetch(book_id).await {
            Ok(stored) => stored,
            Err(ApiError::Unauthenticated) => None,
            Err(e) => {
                tracing::warn!(error = %e, book = book_id.value(), "Stored position unavailable");
                None
            }
        };

        Ok(OpenedBook {
            book,
            page_count,
            stored_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use shelf_api::{FixedDocumentSource, InMemoryApi};
    use shelf_core::model::{UserId, UserProfile, UserRole};

    fn backend() -> InMemoryApi {
        let api = InMemoryApi::new();
        api.sign_in(
            UserProfile::new(
                UserId::new("u1"),
                "Siti",
                "siti@mail.id",
                UserRole::Reader,
            )
            .unwrap(),
        );
        api.put_book(
            Book::new(
                BookId::new(1),
                "Bumi",
                "Tere Liye",
                vec!["Novel".into()],
                None,
                Some("books/bumi.pdf".into()),
            )
            .unwrap(),
        );
        api
    }

    fn flow(backend: &InMemoryApi, documents: FixedDocumentSource) -> ReadingFlow {
        let api = backend.clone().into_api();
        ReadingFlow::new(api.books, api.progress, Arc::new(documents))
    }

    #[tokio::test]
    async fn open_gathers_document_and_stored_position() {
        let backend = backend();
        backend
            .save(BookId::new(1), 12, 40)
            .await
            .expect("seed progress");

        let flow = flow(&backend, FixedDocumentSource::with_pages(40));
        let opened = flow.open(BookId::new(1)).await.unwrap();

        assert_eq!(opened.book.title(), "Bumi");
        assert_eq!(opened.page_count, Some(40));
        assert_eq!(opened.stored_progress.unwrap().current_page(), 12);
    }

    #[tokio::test]
    async fn missing_book_fails_the_open() {
        let backend = backend();
        let flow = flow(&backend, FixedDocumentSource::with_pages(40));

        let err = flow.open(BookId::new(99)).await.unwrap_err();
        assert!(matches!(err, ReaderError::Api(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn broken_document_still_opens_the_book() {
        let backend = backend();
        let flow = flow(&backend, FixedDocumentSource::failing());

        let opened = flow.open(BookId::new(1)).await.unwrap();
        assert_eq!(opened.page_count, None);
    }

    #[tokio::test]
    async fn book_without_document_skips_the_probe() {
        let backend = backend();
        backend.put_book(
            Book::new(
                BookId::new(2),
                "Belum Terbit",
                "Anon",
                vec![],
                None,
                None,
            )
            .unwrap(),
        );

        // A failing source proves the probe is never consulted.
        let flow = flow(&backend, FixedDocumentSource::failing());
        let opened = flow.open(BookId::new(2)).await.unwrap();
        assert_eq!(opened.page_count, None);
        assert_eq!(opened.book.pdf_path(), None);
    }

    #[tokio::test]
    async fn signed_out_reader_opens_without_stored_position() {
        let backend = backend();
        backend.sign_out();

        let flow = flow(&backend, FixedDocumentSource::with_pages(40));
        let opened = flow.open(BookId::new(1)).await.unwrap();
        assert_eq!(opened.stored_progress, None);
    }
}
