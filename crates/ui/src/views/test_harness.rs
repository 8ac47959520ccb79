use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use shelf_api::{DocumentSource, FixedDocumentSource, InMemoryApi};
use shelf_core::model::{UserId, UserProfile, UserRole};
use shelf_services::{
    AppServices, BookService, IdentityService, ProgressService, ReadingFlow, ReviewService,
};

use crate::context::{SessionContext, UiApp, build_app_context};
use crate::views::{HomeView, ProgressView, ReaderView, ReviewSection};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
    profile: Option<UserProfile>,
}

impl UiApp for TestApp {
    fn api_url(&self) -> String {
        self.services.api_url().to_string()
    }

    fn launch_profile(&self) -> Option<UserProfile> {
        self.profile.clone()
    }

    fn identity(&self) -> Arc<IdentityService> {
        self.services.identity()
    }

    fn books(&self) -> Arc<BookService> {
        self.services.books()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn reviews(&self) -> Arc<ReviewService> {
        self.services.reviews()
    }

    fn reader(&self) -> Arc<ReadingFlow> {
        self.services.reader()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Reader(u64),
    Progress,
    Reviews(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let profile = app.launch_profile();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| SessionContext::new(profile));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Reader(book_id) => rsx! { ReaderView { book_id } },
        ViewKind::Progress => rsx! { ProgressView {} },
        ViewKind::Reviews(book_id) => rsx! { ReviewSection { book_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: InMemoryApi,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn reader_profile() -> UserProfile {
    UserProfile::new(
        UserId::new("reader-1"),
        "Dewi",
        "dewi@example.com",
        UserRole::Reader,
    )
    .expect("valid profile")
}

pub fn setup_view_harness(
    view: ViewKind,
    backend: InMemoryApi,
    document_pages: Option<u32>,
    signed_in: bool,
) -> ViewHarness {
    let documents: Arc<dyn DocumentSource> = match document_pages {
        Some(pages) => Arc::new(FixedDocumentSource::with_pages(pages)),
        None => Arc::new(FixedDocumentSource::failing()),
    };
    let services = AppServices::new_in_memory(&backend, documents);

    let profile = if signed_in {
        let profile = reader_profile();
        backend.sign_in(profile.clone());
        Some(profile)
    } else {
        None
    };

    let app = Arc::new(TestApp {
        services: services.clone(),
        profile,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        backend,
        services,
    }
}
