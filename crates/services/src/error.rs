//! Shared error types for the services crate.

use thiserror::Error;

use shelf_api::ApiError;
use shelf_core::model::ReviewError;

/// Errors emitted by `IdentityService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("session token was rejected")]
    TokenRejected,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `BookService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BookServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ReviewService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReviewServiceError {
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while opening a book in the reader.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReaderError {
    #[error(transparent)]
    Api(#[from] ApiError),
}
