use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use shelf_core::model::{
    Book, BookId, ProgressOverview, Rating, ReadingProgress, Review, ReviewId, ReviewStatistics,
    UserProfile,
};

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("not signed in")]
    Unauthenticated,

    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Serialization(String),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Supplies the bearer token attached to authenticated requests.
///
/// Returning `None` means nobody is signed in; authenticated calls then
/// fail with [`ApiError::Unauthenticated`] without touching the network.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// A token source that always hands out the same token, or none.
#[derive(Clone, Default)]
pub struct FixedToken(Option<String>);

impl FixedToken {
    #[must_use]
    pub fn signed_in(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self(None)
    }
}

impl TokenSource for FixedToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A book's review list together with its server-computed aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct BookReviews {
    pub reviews: Vec<Review>,
    pub statistics: ReviewStatistics,
}

/// Read access to the public book catalog.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Fetch every book on the shelf.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the catalog cannot be fetched or decoded.
    async fn list_books(&self) -> Result<Vec<Book>, ApiError>;

    /// Fetch one book by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the book does not exist.
    async fn get_book(&self, id: BookId) -> Result<Book, ApiError>;
}

/// The signed-in reader's remote progress records.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Fetch the stored position for one book, if any was saved.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails; a missing record is
    /// `Ok(None)`, not an error.
    async fn fetch(&self, book_id: BookId) -> Result<Option<ReadingProgress>, ApiError>;

    /// Upsert the position for one book. One record per book per
    /// reader; saving again overwrites.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the save is rejected or the network fails.
    async fn save(
        &self,
        book_id: BookId,
        current_page: u32,
        total_pages: u32,
    ) -> Result<(), ApiError>;

    /// Drop the stored position for one book.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the delete fails.
    async fn delete(&self, book_id: BookId) -> Result<(), ApiError>;

    /// Fetch the continue-reading shelf: every book the reader has a
    /// position in, joined with its metadata.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn overview(&self) -> Result<Vec<ProgressOverview>, ApiError>;
}

/// Reviews and rating aggregates.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Fetch all reviews for a book plus its rating statistics. Public,
    /// no sign-in needed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn book_reviews(&self, book_id: BookId) -> Result<BookReviews, ApiError>;

    /// Fetch the signed-in reader's own review of a book, if any.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails; no review yet is
    /// `Ok(None)`.
    async fn my_review(&self, book_id: BookId) -> Result<Option<Review>, ApiError>;

    /// Create or replace the signed-in reader's review of a book.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the save is rejected.
    async fn save_review(
        &self,
        book_id: BookId,
        rating: Rating,
        text: Option<String>,
    ) -> Result<(), ApiError>;

    /// Delete a review by ID. Owners can delete their own.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the delete fails.
    async fn delete_review(&self, id: ReviewId) -> Result<(), ApiError>;
}

/// Resolves the bearer token into a user profile.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Who the current token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` without a token, or other
    /// errors if the backend rejects it.
    async fn me(&self) -> Result<UserProfile, ApiError>;
}

/// Aggregates the backend stores behind trait objects so the transport
/// can be swapped without touching callers.
#[derive(Clone)]
pub struct Api {
    pub books: Arc<dyn BookCatalog>,
    pub progress: Arc<dyn ProgressStore>,
    pub reviews: Arc<dyn ReviewStore>,
    pub session: Arc<dyn SessionGateway>,
}

impl Api {
    /// An API served entirely from in-process maps.
    #[must_use]
    pub fn in_memory() -> Self {
        crate::memory::InMemoryApi::new().into_api()
    }
}
