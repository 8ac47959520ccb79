use dioxus::prelude::*;
use dioxus_router::use_navigator;

use shelf_services::category_names;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{BookCardVm, map_book_card};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    cards: Vec<BookCardVm>,
    categories: Vec<String>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let books = ctx.books();
    let reviews = ctx.reviews();
    let api_url = ctx.api_url().to_string();
    let mut search = use_signal(String::new);
    let mut category = use_signal(|| None::<String>);

    let resource = use_resource(move || {
        let books = books.clone();
        let reviews = reviews.clone();
        let api_url = api_url.clone();
        async move {
            let catalog = books.list_books().await.map_err(|_| ViewError::Unknown)?;
            let categories = category_names(&catalog);

            let mut cards = Vec::with_capacity(catalog.len());
            for book in &catalog {
                // A failed statistics fetch just leaves the card
                // without a badge.
                let statistics = reviews
                    .book_reviews(book.id())
                    .await
                    .ok()
                    .map(|aggregate| aggregate.statistics);
                cards.push(map_book_card(book, &api_url, statistics.as_ref()));
            }

            Ok::<_, ViewError>(HomeData { cards, categories })
        }
    });

    let state = view_state_from_resource(&resource);
    let query = search().trim().to_lowercase();
    let active_category = category();

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Library" }
                p { class: "view-subtitle", "Pick a book to start reading." }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
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
                },
                ViewState::Ready(data) => {
                    let visible = data
                        .cards
                        .iter()
                        .filter(|card| {
                            card.matches_query(&query)
                                && card.in_category(active_category.as_deref())
                        })
                        .cloned()
                        .collect::<Vec<_>>();
                    let empty_message = if data.cards.is_empty() {
                        "The shelf is empty right now."
                    } else {
                        "No books match that search."
                    };
                    let chips = data.categories.iter().map(|name| {
                        let label = name.clone();
                        let selected = active_category.as_deref() == Some(name.as_str());
                        let chip_class = if selected {
                            "chip chip--active"
                        } else {
                            "chip"
                        };
                        rsx! {
                            button {
                                class: "{chip_class}",
                                r#type: "button",
                                onclick: move |_| {
                                    // Clicking the active chip clears the filter.
                                    if category() == Some(label.clone()) {
                                        category.set(None);
                                    } else {
                                        category.set(Some(label.clone()));
                                    }
                                },
                                "{name}"
                            }
                        }
                    });
                    rsx! {
                        div { class: "catalog-search",
                            input {
                                class: "catalog-search-input",
                                r#type: "text",
                                placeholder: "Search title or author...",
                                value: "{search()}",
                                oninput: move |evt| search.set(evt.value()),
                            }
                            if !search().is_empty() {
                                button {
                                    class: "catalog-search-clear",
                                    r#type: "button",
                                    onclick: move |_| search.set(String::new()),
                                    span { "×" }
                                }
                            }
                        }
                        if !data.categories.is_empty() {
                            div { class: "catalog-chips",
                                button {
                                    class: if active_category.is_none() { "chip chip--active" } else { "chip" },
                                    r#type: "button",
                                    onclick: move |_| category.set(None),
                                    "All"
                                }
                                {chips}
                            }
                        }
                        if visible.is_empty() {
                            p { class: "catalog-empty", "{empty_message}" }
                        } else {
                            div { class: "book-grid",
                                for card in visible {
                                    BookCard { card }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn BookCard(card: BookCardVm) -> Element {
    let navigator = use_navigator();
    let book_id = card.id.value();

    rsx! {
        div {
            class: "book-card",
            onclick: move |_| {
                let _ = navigator.push(Route::Read { book_id });
            },
            if let Some(url) = card.cover_url.as_ref() {
                img { class: "book-cover", src: "{url}", alt: "{card.title}" }
            } else {
                div { class: "book-cover book-cover--placeholder",
                    span { "{card.initial()}" }
                }
            }
            div { class: "book-card-body",
                h4 { class: "book-card-title", "{card.title}" }
                p { class: "book-card-author", "{card.author}" }
                div { class: "book-card-meta",
                    for name in card.categories.iter().take(2) {
                        span { class: "book-card-category", "{name}" }
                    }
                    if let Some(label) = card.rating_label.as_ref() {
                        span { class: "book-card-rating", "{label}" }
                    }
                }
            }
        }
    }
}
