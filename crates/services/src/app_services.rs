use std::sync::Arc;

use shelf_api::{Api, DocumentSource, HttpDocumentSource, InMemoryApi, TokenSource};
use shelf_core::model::BookId;

use crate::book_service::BookService;
use crate::identity::{IdentityService, SessionTokens};
use crate::progress_service::ProgressService;
use crate::reading::{ProgressAutosave, ReadingFlow};
use crate::review_service::ReviewService;

/// Assembles app-facing services around one API bundle.
#[derive(Clone)]
pub struct AppServices {
    api_url: String,
    identity: Arc<IdentityService>,
    books: Arc<BookService>,
    progress: Arc<ProgressService>,
    reviews: Arc<ReviewService>,
    reader: Arc<ReadingFlow>,
}

impl AppServices {
    /// Build services backed by the HTTP server at `api_url`.
    #[must_use]
    pub fn new_http(api_url: &str) -> Self {
        let tokens = Arc::new(SessionTokens::new());
        let api = Api::http(api_url, Arc::clone(&tokens) as Arc<dyn TokenSource>);
        let documents: Arc<dyn DocumentSource> = Arc::new(HttpDocumentSource::new(api_url));
        Self::assemble(api_url, api, tokens, documents)
    }

    /// Build services over an in-process backend, for tests and demos.
    #[must_use]
    pub fn new_in_memory(backend: &InMemoryApi, documents: Arc<dyn DocumentSource>) -> Self {
        let tokens = Arc::new(SessionTokens::new());
        Self::assemble("memory:", backend.clone().into_api(), tokens, documents)
    }

    fn assemble(
        api_url: &str,
        api: Api,
        tokens: Arc<SessionTokens>,
        documents: Arc<dyn DocumentSource>,
    ) -> Self {
        let identity = Arc::new(IdentityService::new(tokens, Arc::clone(&api.session)));
        let books = Arc::new(BookService::new(Arc::clone(&api.books)));
        let progress = Arc::new(ProgressService::new(Arc::clone(&api.progress)));
        let reviews = Arc::new(ReviewService::new(Arc::clone(&api.reviews)));
        let reader = Arc::new(ReadingFlow::new(
            Arc::clone(&api.books),
            Arc::clone(&api.progress),
            documents,
        ));

        Self {
            api_url: api_url.to_owned(),
            identity,
            books,
            progress,
            reviews,
            reader,
        }
    }

    /// Origin server-relative asset paths resolve against.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub fn identity(&self) -> Arc<IdentityService> {
        Arc::clone(&self.identity)
    }

    #[must_use]
    pub fn books(&self) -> Arc<BookService> {
        Arc::clone(&self.books)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn reviews(&self) -> Arc<ReviewService> {
        Arc::clone(&self.reviews)
    }

    #[must_use]
    pub fn reader(&self) -> Arc<ReadingFlow> {
        Arc::clone(&self.reader)
    }

    /// Fresh autosave driver for one reader visit.
    #[must_use]
    pub fn autosave(&self, book_id: BookId) -> ProgressAutosave {
        self.progress.autosave(book_id)
    }
}
