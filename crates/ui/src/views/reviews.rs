use std::time::Duration;

use dioxus::prelude::*;

use shelf_core::model::{BookId, ReviewId, ReviewStatistics};

use crate::context::{AppContext, SessionContext};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{BreakdownBarVm, ReviewCardVm, map_breakdown_bars, map_review_cards, star_row};

#[derive(Clone, Debug, PartialEq)]
struct MyReviewVm {
    id: ReviewId,
    stars: u8,
    text: String,
}

#[derive(Clone, Debug, PartialEq)]
struct ReviewData {
    cards: Vec<ReviewCardVm>,
    statistics: ReviewStatistics,
    mine: Option<MyReviewVm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormStatus {
    Idle,
    Saving,
    Saved,
    Failed,
    MissingStars,
}

impl FormStatus {
    fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Saving => Some("Saving..."),
            Self::Saved => Some("Review saved."),
            Self::Failed => Some("The review could not be saved."),
            Self::MissingStars => Some("Pick a star rating first."),
        }
    }
}

#[component]
pub fn ReviewSection(book_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionContext>();
    let book_id = BookId::new(book_id);

    let mut stars = use_signal(|| 0u8);
    let mut text = use_signal(String::new);
    let mut form_status = use_signal(|| FormStatus::Idle);
    let mut seeded = use_signal(|| false);

    let resource = {
        let reviews = ctx.reviews();
        use_resource(move || {
            let reviews = reviews.clone();
            let signed_in = session.is_signed_in();
            async move {
                let aggregate = reviews
                    .book_reviews(book_id)
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                let mine = if signed_in {
                    // A missing own review is just "not reviewed yet".
                    reviews.my_review(book_id).await.ok().flatten()
                } else {
                    None
                };
                Ok::<_, ViewError>(ReviewData {
                    cards: map_review_cards(&aggregate.reviews),
                    statistics: aggregate.statistics,
                    mine: mine.map(|review| MyReviewVm {
                        id: review.id(),
                        stars: review.rating().stars(),
                        text: review.text().unwrap_or_default().to_string(),
                    }),
                })
            }
        })
    };

    // Seed the form from an existing review once, so edits are not
    // clobbered by later refreshes.
    use_effect(move || {
        if seeded() {
            return;
        }
        if let Some(Ok(data)) = resource.value().read().as_ref() {
            seeded.set(true);
            if let Some(mine) = data.mine.as_ref() {
                stars.set(mine.stars);
                text.set(mine.text.clone());
            }
        }
    });

    let submit_review = {
        let reviews = ctx.reviews();
        use_callback(move |()| {
            let chosen = stars();
            if chosen == 0 {
                form_status.set(FormStatus::MissingStars);
                return;
            }
            let reviews = reviews.clone();
            let body = text();
            let mut resource = resource;
            spawn(async move {
                form_status.set(FormStatus::Saving);
                match reviews.submit(book_id, chosen, &body).await {
                    Ok(()) => {
                        form_status.set(FormStatus::Saved);
                        resource.restart();
                        let mut form_status = form_status;
                        spawn(async move {
                            tokio::time::sleep(Duration::from_secs(2)).await;
                            if form_status() == FormStatus::Saved {
                                form_status.set(FormStatus::Idle);
                            }
                        });
                    }
                    Err(_) => form_status.set(FormStatus::Failed),
                }
            });
        })
    };

    let delete_review = {
        let reviews = ctx.reviews();
        use_callback(move |id: ReviewId| {
            let reviews = reviews.clone();
            let mut resource = resource;
            spawn(async move {
                if reviews.delete(id).await.is_ok() {
                    stars.set(0);
                    text.set(String::new());
                    form_status.set(FormStatus::Idle);
                    resource.restart();
                } else {
                    form_status.set(FormStatus::Failed);
                }
            });
        })
    };

    let state = view_state_from_resource(&resource);
    let signed_in = session.is_signed_in();

    rsx! {
        section { class: "review-section",
            h3 { class: "review-heading", "Reviews" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "review-error", "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    if data.statistics.total_reviews() > 0 {
                        ReviewSummary { statistics: data.statistics }
                    }
                    if signed_in {
                        form {
                            class: "review-form",
                            onsubmit: move |evt: FormEvent| {
                                evt.prevent_default();
                                submit_review.call(());
                            },
                            div { class: "review-star-picker",
                                for value in 1..=5u8 {
                                    button {
                                        key: "{value}",
                                        class: if value <= stars() { "star-btn star-btn--filled" } else { "star-btn" },
                                        r#type: "button",
                                        onclick: move |_| stars.set(value),
                                        if value <= stars() { "★" } else { "☆" }
                                    }
                                }
                            }
                            textarea {
                                class: "review-text-input",
                                placeholder: "Share what you thought of this book (optional)",
                                value: "{text}",
                                oninput: move |evt| text.set(evt.value()),
                            }
                            div { class: "review-form-actions",
                                button {
                                    class: "btn btn-primary",
                                    r#type: "submit",
                                    disabled: form_status() == FormStatus::Saving,
                                    if data.mine.is_some() { "Update Review" } else { "Submit Review" }
                                }
                                if let Some(mine) = data.mine.as_ref() {
                                    {
                                        let id = mine.id;
                                        rsx! {
                                            button {
                                                class: "btn btn-ghost",
                                                r#type: "button",
                                                onclick: move |_| delete_review.call(id),
                                                "Delete My Review"
                                            }
                                        }
                                    }
                                }
                            }
                            if let Some(message) = form_status().message() {
                                p { class: "review-form-status", "{message}" }
                            }
                        }
                    } else {
                        p { class: "review-hint", "Sign in to review this book." }
                    }
                    if data.cards.is_empty() {
                        p { class: "review-empty", "No reviews yet. Be the first to write one." }
                    } else {
                        ul { class: "review-list",
                            for card in data.cards.clone() {
                                ReviewCard { key: "{card.id.value()}", card }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ReviewSummary(statistics: ReviewStatistics) -> Element {
    let bars: Vec<BreakdownBarVm> = map_breakdown_bars(&statistics);
    let total = statistics.total_reviews();
    let noun = if total == 1 { "review" } else { "reviews" };

    rsx! {
        div { class: "review-summary",
            div { class: "review-average",
                span { class: "review-average-number", "{statistics.average_display()}" }
                span { class: "review-average-stars", "{star_row(statistics.average_stars())}" }
                span { class: "review-average-count", "{total} {noun}" }
            }
            div { class: "review-breakdown",
                for bar in bars {
                    div { key: "{bar.stars}", class: "breakdown-row",
                        span { class: "breakdown-stars", "{bar.stars}★" }
                        div { class: "breakdown-track",
                            div { class: "breakdown-fill", style: "width: {bar.percent}%" }
                        }
                        span { class: "breakdown-count", "{bar.count}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ReviewCard(card: ReviewCardVm) -> Element {
    rsx! {
        li { class: "review-card",
            div { class: "review-card-header",
                span { class: "review-author", "{card.reviewer}" }
                span { class: "review-stars", "{card.stars_label}" }
                span { class: "review-date", "{card.date_label}" }
            }
            if let Some(body) = card.text.as_ref() {
                p { class: "review-text", "{body}" }
            }
        }
    }
}
