use std::sync::Arc;

use dioxus::prelude::*;

use shelf_core::model::{BookId, UserProfile};
use shelf_services::{
    BookService, IdentityService, ProgressAutosave, ProgressService, ReadingFlow, ReviewService,
};

/// What the composition root must hand the views.
pub trait UiApp: Send + Sync {
    /// Origin that server-relative cover and document paths resolve against.
    fn api_url(&self) -> String;

    /// Profile resolved from a launch token, if one was given and accepted.
    fn launch_profile(&self) -> Option<UserProfile>;

    fn identity(&self) -> Arc<IdentityService>;
    fn books(&self) -> Arc<BookService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn reviews(&self) -> Arc<ReviewService>;
    fn reader(&self) -> Arc<ReadingFlow>;
}

#[derive(Clone)]
pub struct AppContext {
    api_url: String,
    launch_profile: Option<UserProfile>,

    identity: Arc<IdentityService>,
    books: Arc<BookService>,
    progress: Arc<ProgressService>,
    reviews: Arc<ReviewService>,
    reader: Arc<ReadingFlow>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            api_url: app.api_url(),
            launch_profile: app.launch_profile(),
            identity: app.identity(),
            books: app.books(),
            progress: app.progress(),
            reviews: app.reviews(),
            reader: app.reader(),
        }
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub fn launch_profile(&self) -> Option<UserProfile> {
        self.launch_profile.clone()
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

    /// Debounced position writer for one reader visit. One per visit;
    /// the reader view cancels it on unmount.
    #[must_use]
    pub fn autosave(&self, book_id: BookId) -> ProgressAutosave {
        self.progress.autosave(book_id)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The signed-in reader, if any, shared through the component tree.
///
/// Views read it to gate progress syncing and the review form, and the
/// navbar writes it on sign-in and sign-out. Backed by a signal, so
/// every subscriber re-renders when the session changes.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionContext {
    profile: Signal<Option<UserProfile>>,
}

impl SessionContext {
    /// Must be called inside a component; the root `App` provides it.
    #[must_use]
    pub fn new(initial: Option<UserProfile>) -> Self {
        Self {
            profile: Signal::new(initial),
        }
    }

    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.profile.read().clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.profile.read().is_some()
    }

    pub fn signed_in(&mut self, profile: UserProfile) {
        self.profile.set(Some(profile));
    }

    pub fn signed_out(&mut self) {
        self.profile.set(None);
    }
}
