#![forbid(unsafe_code)]

//! Remote backend access for the bookshelf client.
//!
//! Every server concern sits behind a trait in [`stores`] so the rest
//! of the app never touches HTTP directly: [`http`] implements them
//! against the real REST backend, [`memory`] against in-process maps
//! for tests and offline development. [`document`] fetches the page
//! documents themselves.

pub mod document;
pub mod http;
pub mod memory;
pub mod stores;

pub use document::{
    DocumentError, DocumentSource, FixedDocumentSource, HttpDocumentSource, resolve_asset_url,
};
pub use http::HttpApi;
pub use memory::InMemoryApi;
pub use stores::{
    Api, ApiError, BookCatalog, BookReviews, FixedToken, ProgressStore, ReviewStore,
    SessionGateway, TokenSource,
};
