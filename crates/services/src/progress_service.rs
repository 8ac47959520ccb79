use std::sync::Arc;

use shelf_api::ProgressStore;
use shelf_core::model::{BookId, ProgressOverview, ReadingProgress};

use crate::error::ProgressServiceError;
use crate::reading::ProgressAutosave;

/// Reading-position reads and writes for the signed-in reader.
#[derive(Clone)]
pub struct ProgressService {
    progress: Arc<dyn ProgressStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressStore>) -> Self {
        Self { progress }
    }

    /// Stored position in one book, if the reader has one.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` if the store cannot be reached.
    pub async fn load(
        &self,
        book_id: BookId,
    ) -> Result<Option<ReadingProgress>, ProgressServiceError> {
        Ok(self.progress.fetch(book_id).await?)
    }

    /// Upsert the reader's position in one book.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` if the write fails.
    pub async fn save(
        &self,
        book_id: BookId,
        current_page: u32,
        total_pages: u32,
    ) -> Result<(), ProgressServiceError> {
        self.progress.save(book_id, current_page, total_pages).await?;
        Ok(())
    }

    /// Remove a book from the continue-reading shelf.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` if the delete fails.
    pub async fn delete(&self, book_id: BookId) -> Result<(), ProgressServiceError> {
        self.progress.delete(book_id).await?;
        Ok(())
    }

    /// Every book the reader has a position in, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` if the store cannot be reached.
    pub async fn overview(&self) -> Result<Vec<ProgressOverview>, ProgressServiceError> {
        Ok(self.progress.overview().await?)
    }

    /// Fresh debounced writer for one reader visit to `book_id`.
    #[must_use]
    pub fn autosave(&self, book_id: BookId) -> ProgressAutosave {
        ProgressAutosave::new(book_id, Arc::clone(&self.progress))
    }
}
