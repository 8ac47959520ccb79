#![forbid(unsafe_code)]

pub mod app_services;
pub mod book_service;
pub mod error;
pub mod identity;
pub mod progress_service;
pub mod reading;
pub mod review_service;

pub use shelf_api::{resolve_asset_url, ApiError};
pub use shelf_core::Clock;

pub use app_services::AppServices;
pub use book_service::{BookService, category_names, filter_catalog};
pub use error::{
    BookServiceError, IdentityError, ProgressServiceError, ReaderError, ReviewServiceError,
};
pub use identity::{IdentityService, SessionTokens};
pub use progress_service::ProgressService;
pub use reading::{
    OpenedBook, ProgressAutosave, ReadingFlow, SAVE_DEBOUNCE, SyncCommand, SyncMachine, SyncPhase,
};
pub use review_service::ReviewService;
