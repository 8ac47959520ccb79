use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_router::Link;
use keyboard_types::Key;

use shelf_core::model::BookId;
use shelf_core::reader::{DocumentStatus, TouchPoint};
use shelf_services::{resolve_asset_url, ApiError, ReaderError};

use crate::context::{AppContext, SessionContext};
use crate::routes::Route;
use crate::views::{ReviewSection, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ReaderIntent, ReaderVm};

#[derive(Clone, Debug, PartialEq)]
struct ReaderData {
    title: String,
    author: String,
    category: Option<String>,
    cover_url: Option<String>,
    document_url: Option<String>,
}

fn touch_points(event: &TouchEvent) -> Vec<TouchPoint> {
    event
        .touches()
        .iter()
        .map(|touch| {
            let point = touch.client_coordinates();
            TouchPoint::new(point.x, point.y)
        })
        .collect()
}

#[component]
pub fn ReaderView(book_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionContext>();
    let book_id = BookId::new(book_id);
    let reader = ctx.reader();
    let api_url = ctx.api_url().to_string();

    let mut vm = use_signal(|| ReaderVm::new(book_id));
    // One debounced writer per visit; dropped saves are cancelled below.
    let autosave = use_hook(|| Rc::new(ctx.autosave(book_id)));
    let mut show_reviews = use_signal(|| false);

    let resource = {
        let autosave = Rc::clone(&autosave);
        use_resource(move || {
            let reader = reader.clone();
            let api_url = api_url.clone();
            let autosave = Rc::clone(&autosave);
            // Read synchronously so a sign-in or sign-out re-runs the
            // load, exactly like re-opening the book.
            let signed_in = session.is_signed_in();
            async move {
                let opened = match reader.open(book_id).await {
                    Ok(opened) => opened,
                    Err(ReaderError::Api(ApiError::NotFound)) => {
                        return Err(ViewError::BookMissing);
                    }
                    Err(_) => return Err(ViewError::Unknown),
                };

                let correction = vm.write().open(&opened);
                if signed_in {
                    autosave.load_settled(correction);
                } else {
                    // Signed out: nothing may be written, including a
                    // save armed before a mid-visit sign-out.
                    autosave.cancel();
                }

                Ok::<_, ViewError>(ReaderData {
                    title: opened.book.title().to_string(),
                    author: opened.book.author().to_string(),
                    category: opened.book.primary_category().map(str::to_string),
                    cover_url: opened
                        .book
                        .cover_path()
                        .map(|path| resolve_asset_url(&api_url, path)),
                    document_url: opened
                        .book
                        .pdf_path()
                        .map(|path| resolve_asset_url(&api_url, path)),
                })
            }
        })
    };

    {
        let autosave = Rc::clone(&autosave);
        use_drop(move || autosave.cancel());
    }

    let dispatch = {
        let autosave = Rc::clone(&autosave);
        use_callback(move |intent: ReaderIntent| {
            let changed = vm.write().apply(intent);
            if changed && session.is_signed_in() {
                let guard = vm.read();
                if let Some(total) = guard.total_pages() {
                    autosave.page_changed(guard.current_page(), total);
                }
            }
        })
    };

    let on_key = use_callback(move |evt: KeyboardEvent| {
        match evt.data.key() {
            Key::ArrowRight => {
                evt.prevent_default();
                dispatch.call(ReaderIntent::NextPage);
            }
            Key::ArrowLeft => {
                evt.prevent_default();
                dispatch.call(ReaderIntent::PreviousPage);
            }
            _ => {}
        }
    });

    let state = view_state_from_resource(&resource);
    let signed_in = session.is_signed_in();

    let vm_guard = vm.read();
    let status = vm_guard.status();
    let current_page = vm_guard.current_page();
    let total_pages = vm_guard.total_pages();
    let page_input = vm_guard.page_input().to_string();
    let zoom_label = vm_guard.zoom_label();
    let zoom_percent = (vm_guard.zoom_scale() * 100.0).round();
    let can_go_previous = vm_guard.can_go_previous();
    let can_go_next = vm_guard.can_go_next();
    let progress_percent = vm_guard.progress_percent();
    drop(vm_guard);

    let total_label = total_pages.map_or_else(|| "--".to_string(), |total| total.to_string());
    let percent_label = format!("{progress_percent:.1}%");

    rsx! {
        div { class: "page reader-page", id: "reader-root", tabindex: "0", autofocus: "true", onkeydown: on_key,
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "reader-error",
                        p { "{err.message()}" }
                        Link { class: "btn btn-secondary", to: Route::Home {}, "Back to Library" }
                    }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "reader-layout",
                        aside { class: "reader-sidebar",
                            if let Some(url) = data.cover_url.as_ref() {
                                img { class: "reader-cover", src: "{url}", alt: "{data.title}" }
                            }
                            h3 { class: "reader-title", "{data.title}" }
                            p { class: "reader-author", "{data.author}" }
                            if let Some(name) = data.category.as_ref() {
                                span { class: "reader-category", "{name}" }
                            }
                            div { class: "reader-progress",
                                div { class: "reader-progress-track",
                                    div {
                                        class: "reader-progress-fill",
                                        style: "width: {progress_percent}%",
                                    }
                                }
                                span { class: "reader-progress-label", "{percent_label}" }
                            }
                            p { class: "reader-page-label", "Page {current_page} of {total_label}" }
                            if !signed_in {
                                p { class: "reader-hint", "Sign in to keep your reading position." }
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| show_reviews.set(!show_reviews()),
                                if show_reviews() { "Hide Reviews" } else { "Show Reviews" }
                            }
                            Link { class: "reader-back", to: Route::Home {}, "Back to Library" }
                        }
                        section { class: "reader-main",
                            PageToolbar {
                                dispatch,
                                page_input: page_input.clone(),
                                total_label: total_label.clone(),
                                zoom_label: zoom_label.clone(),
                                can_go_previous,
                                can_go_next,
                                with_zoom: true,
                            }
                            match status {
                                DocumentStatus::Loading => rsx! {
                                    div { class: "reader-placeholder", p { "Opening the document..." } }
                                },
                                DocumentStatus::Unavailable => rsx! {
                                    div { class: "reader-placeholder",
                                        if data.document_url.is_none() {
                                            p { "This book has no readable document yet." }
                                        } else {
                                            p { "The document could not be opened." }
                                        }
                                    }
                                },
                                DocumentStatus::Ready => rsx! {
                                    div {
                                        class: "reader-surface",
                                        ontouchstart: move |evt: TouchEvent| {
                                            dispatch.call(ReaderIntent::TouchStart(touch_points(&evt)));
                                        },
                                        ontouchmove: move |evt: TouchEvent| {
                                            dispatch.call(ReaderIntent::TouchMove(touch_points(&evt)));
                                        },
                                        ontouchend: move |_| dispatch.call(ReaderIntent::TouchEnd),
                                        if let Some(url) = data.document_url.as_ref() {
                                            iframe {
                                                class: "reader-document",
                                                src: "{url}#page={current_page}&zoom={zoom_percent}",
                                                title: "{data.title}",
                                            }
                                        }
                                    }
                                },
                            }
                            PageToolbar {
                                dispatch,
                                page_input,
                                total_label: total_label.clone(),
                                zoom_label,
                                can_go_previous,
                                can_go_next,
                                with_zoom: false,
                            }
                            if show_reviews() {
                                ReviewSection { book_id: book_id.value() }
                            }
                        }
                    }
                },
            }
        }
    }
}

/// Page navigation strip; the top copy also carries the zoom controls.
#[component]
fn PageToolbar(
    dispatch: Callback<ReaderIntent>,
    page_input: String,
    total_label: String,
    zoom_label: String,
    can_go_previous: bool,
    can_go_next: bool,
    with_zoom: bool,
) -> Element {
    rsx! {
        div { class: "reader-toolbar",
            div { class: "reader-nav",
                button {
                    class: "btn btn-nav",
                    r#type: "button",
                    disabled: !can_go_previous,
                    onclick: move |_| dispatch.call(ReaderIntent::FirstPage),
                    "⏮"
                }
                button {
                    class: "btn btn-nav",
                    r#type: "button",
                    disabled: !can_go_previous,
                    onclick: move |_| dispatch.call(ReaderIntent::PreviousPage),
                    "Prev"
                }
                form {
                    class: "reader-page-form",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        dispatch.call(ReaderIntent::SubmitPageInput);
                    },
                    input {
                        class: "reader-page-input",
                        r#type: "text",
                        value: "{page_input}",
                        oninput: move |evt| dispatch.call(ReaderIntent::PageInput(evt.value())),
                        onblur: move |_| dispatch.call(ReaderIntent::BlurPageInput),
                    }
                    span { class: "reader-page-total", "of {total_label}" }
                }
                button {
                    class: "btn btn-nav",
                    r#type: "button",
                    disabled: !can_go_next,
                    onclick: move |_| dispatch.call(ReaderIntent::NextPage),
                    "Next"
                }
                button {
                    class: "btn btn-nav",
                    r#type: "button",
                    disabled: !can_go_next,
                    onclick: move |_| dispatch.call(ReaderIntent::LastPage),
                    "⏭"
                }
            }
            if with_zoom {
                div { class: "reader-zoom",
                    button {
                        class: "btn btn-nav",
                        r#type: "button",
                        onclick: move |_| dispatch.call(ReaderIntent::ZoomOut),
                        "−"
                    }
                    button {
                        class: "btn btn-nav reader-zoom-reset",
                        r#type: "button",
                        onclick: move |_| dispatch.call(ReaderIntent::ResetZoom),
                        "{zoom_label}"
                    }
                    button {
                        class: "btn btn-nav",
                        r#type: "button",
                        onclick: move |_| dispatch.call(ReaderIntent::ZoomIn),
                        "+"
                    }
                }
            }
        }
    }
}
