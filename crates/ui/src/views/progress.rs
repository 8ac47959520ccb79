use dioxus::prelude::*;
use dioxus_router::use_navigator;

use shelf_core::model::BookId;

use crate::context::{AppContext, SessionContext};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProgressCardVm, map_progress_cards};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RemoveState {
    Idle,
    Removing,
    Error(ViewError),
}

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionContext>();

    let mut remove_target = use_signal(|| None::<BookId>);
    let mut remove_state = use_signal(|| RemoveState::Idle);

    let resource = {
        let progress = ctx.progress();
        let api_url = ctx.api_url().to_string();
        use_resource(move || {
            let progress = progress.clone();
            let api_url = api_url.clone();
            let signed_in = session.is_signed_in();
            async move {
                if !signed_in {
                    return Ok(Vec::new());
                }
                let rows = progress
                    .overview()
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(map_progress_cards(&rows, &api_url))
            }
        })
    };

    let state = view_state_from_resource(&resource);
    let progress_service = ctx.progress();

    rsx! {
        div { class: "page progress-page",
            div { class: "view-header",
                h2 { class: "view-title", "My Progress" }
                p { class: "view-subtitle", "Every book you have started, with your place in it." }
            }
            div { class: "view-divider" }
            if !session.is_signed_in() {
                p { class: "progress-hint", "Sign in to see your reading progress." }
            } else {
                match state {
                    ViewState::Idle => rsx! {
                        p { "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        div { class: "view-error",
                            p { "{err.message()}" }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| {
                                    let mut resource = resource;
                                    resource.restart();
                                },
                                "Retry"
                            }
                        }
                    },
                    ViewState::Ready(cards) => rsx! {
                        if cards.is_empty() {
                            p { class: "progress-empty",
                                "You have not started any books yet. Open one from the library to begin."
                            }
                        } else {
                            div { class: "progress-grid",
                                for card in cards {
                                    ProgressCard {
                                        key: "{card.book_id.value()}",
                                        card,
                                        on_remove: move |book_id| {
                                            remove_target.set(Some(book_id));
                                            remove_state.set(RemoveState::Idle);
                                        },
                                    }
                                }
                            }
                        }
                        if let Some(book_id) = remove_target() {
                            div {
                                class: "modal-overlay",
                                onclick: move |_| {
                                    remove_target.set(None);
                                    remove_state.set(RemoveState::Idle);
                                },
                                div {
                                    class: "modal",
                                    onclick: move |evt| evt.stop_propagation(),
                                    h3 { class: "modal-title", "Remove from your shelf?" }
                                    p { class: "modal-body",
                                        "This deletes your saved reading position for this book."
                                    }
                                    if let RemoveState::Error(err) = remove_state() {
                                        p { class: "modal-error", "{err.message()}" }
                                    }
                                    div { class: "modal-actions",
                                        button {
                                            class: "btn btn-secondary",
                                            r#type: "button",
                                            onclick: move |_| {
                                                remove_target.set(None);
                                                remove_state.set(RemoveState::Idle);
                                            },
                                            "Cancel"
                                        }
                                        button {
                                            class: "btn btn-primary",
                                            r#type: "button",
                                            disabled: remove_state() == RemoveState::Removing,
                                            onclick: move |_| {
                                                let mut remove_state = remove_state;
                                                let mut remove_target = remove_target;
                                                let mut resource = resource;
                                                let progress_service = progress_service.clone();
                                                spawn(async move {
                                                    remove_state.set(RemoveState::Removing);
                                                    match progress_service.delete(book_id).await {
                                                        Ok(()) => {
                                                            remove_state.set(RemoveState::Idle);
                                                            remove_target.set(None);
                                                            resource.restart();
                                                        }
                                                        Err(_) => {
                                                            remove_state.set(RemoveState::Error(ViewError::Unknown));
                                                        }
                                                    }
                                                });
                                            },
                                            "Remove"
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn ProgressCard(card: ProgressCardVm, on_remove: EventHandler<BookId>) -> Element {
    let navigator = use_navigator();
    let book_id = card.book_id;

    rsx! {
        article { class: "progress-card",
            if let Some(url) = card.cover_url.as_ref() {
                img { class: "progress-cover", src: "{url}", alt: "{card.title}" }
            } else {
                div { class: "progress-cover progress-cover--placeholder", "{card.initial()}" }
            }
            div { class: "progress-card-body",
                div { class: "progress-card-header",
                    h3 { class: "progress-card-title", "{card.title}" }
                    if card.complete {
                        span { class: "progress-complete-badge", "Finished" }
                    }
                }
                p { class: "progress-card-author", "{card.author}" }
                if let Some(name) = card.category.as_ref() {
                    span { class: "progress-card-category", "{name}" }
                }
                div { class: "progress-bar",
                    div { class: "progress-bar-track",
                        div {
                            class: "progress-bar-fill",
                            style: "width: {card.percent_width}%",
                        }
                    }
                    span { class: "progress-bar-label", "{card.percent_label}" }
                }
                p { class: "progress-card-pages", "{card.page_label}" }
                if let Some(label) = card.last_read_label.as_ref() {
                    p { class: "progress-card-date", "Last read {label}" }
                }
                div { class: "progress-card-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            navigator.push(Route::Read { book_id: book_id.value() });
                        },
                        "Continue Reading"
                    }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| on_remove.call(book_id),
                        "Remove"
                    }
                }
            }
        }
    }
}
