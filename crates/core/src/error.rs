use thiserror::Error;

use crate::model::{BookError, ProgressError, ReviewError, UserError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Book(#[from] BookError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    User(#[from] UserError),
}
