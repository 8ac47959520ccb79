//! Backend speaking to the catalog server over HTTP.
//!
//! One [`HttpApi`] value carries the shared client, base URL and token
//! source; the per-store trait impls in the submodules clone it freely.

use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};

use crate::stores::{
    Api, ApiError, BookCatalog, ProgressStore, ReviewStore, SessionGateway, TokenSource,
};

mod books;
mod progress;
mod reviews;
mod session;
mod wire;

#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl HttpApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            tokens,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.tokens.bearer_token().ok_or(ApiError::Unauthenticated)
    }

    fn check(response: Response) -> Result<Response, ApiError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        Ok(response)
    }
}

impl Api {
    /// Build an [`Api`] backed by the HTTP server at `base_url`.
    ///
    /// Requests that need the reader's identity ask `tokens` for a bearer
    /// token at call time, so a sign-in that happens after construction is
    /// picked up without rebuilding the bundle.
    #[must_use]
    pub fn http(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        let api = HttpApi::new(base_url, tokens);
        let books: Arc<dyn BookCatalog> = Arc::new(api.clone());
        let progress: Arc<dyn ProgressStore> = Arc::new(api.clone());
        let reviews: Arc<dyn ReviewStore> = Arc::new(api.clone());
        let session: Arc<dyn SessionGateway> = Arc::new(api);
        Self {
            books,
            progress,
            reviews,
            session,
        }
    }
}
