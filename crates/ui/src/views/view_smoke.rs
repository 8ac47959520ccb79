use shelf_api::InMemoryApi;
use shelf_core::model::{Book, BookId, Rating, ReadingProgress, Review, ReviewId};
use shelf_core::time::fixed_now;

use super::test_harness::{ViewKind, setup_view_harness};

fn seed_book(backend: &InMemoryApi, id: u64, title: &str, category: &str) {
    backend.put_book(
        Book::new(
            BookId::new(id),
            title,
            "Tere Liye",
            vec![category.to_string()],
            Some(format!("/covers/{id}.jpg")),
            Some(format!("/pdfs/{id}.pdf")),
        )
        .expect("valid book"),
    );
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_catalog() {
    let backend = InMemoryApi::new();
    seed_book(&backend, 1, "Laskar Pelangi", "Novel");
    seed_book(&backend, 2, "Bumi", "Fantasi");
    backend.put_review(
        BookId::new(1),
        Review::new(
            ReviewId::new(1),
            "Andi",
            Rating::new(4).unwrap(),
            None,
            fixed_now(),
        ),
    );
    backend.put_review(
        BookId::new(1),
        Review::new(
            ReviewId::new(2),
            "Siti",
            Rating::new(4).unwrap(),
            None,
            fixed_now(),
        ),
    );

    let mut harness = setup_view_harness(ViewKind::Home, backend, Some(40), false);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Laskar Pelangi"), "missing title in {html}");
    assert!(html.contains("Bumi"), "missing title in {html}");
    assert!(html.contains("Novel"), "missing category chip in {html}");
    let badge = "★ 4.0 (2)";
    assert!(html.contains(badge), "missing {badge} in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let backend = InMemoryApi::new();
    backend.set_offline(true);

    let mut harness = setup_view_harness(ViewKind::Home, backend, Some(40), false);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Something went wrong"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reader_view_smoke_restores_saved_position() {
    let backend = InMemoryApi::new();
    seed_book(&backend, 7, "Atomic Habits", "Pengembangan Diri");
    backend.put_progress(ReadingProgress::new(BookId::new(7), 12, 40, Some(fixed_now())).unwrap());

    let mut harness = setup_view_harness(ViewKind::Reader(7), backend, Some(40), true);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Atomic Habits"), "missing title in {html}");
    assert!(
        html.contains("Page 12 of 40"),
        "missing restored position in {html}"
    );
    assert!(html.contains("100%"), "missing zoom label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reader_view_smoke_renders_unavailable_document() {
    let backend = InMemoryApi::new();
    seed_book(&backend, 3, "Pulang", "Novel");

    let mut harness = setup_view_harness(ViewKind::Reader(3), backend, None, false);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("The document could not be opened"),
        "missing unavailable notice in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_lists_started_books() {
    let backend = InMemoryApi::new();
    seed_book(&backend, 1, "Laskar Pelangi", "Novel");
    seed_book(&backend, 2, "Bumi", "Fantasi");
    backend.put_progress(ReadingProgress::new(BookId::new(1), 12, 40, Some(fixed_now())).unwrap());
    backend.put_progress(ReadingProgress::new(BookId::new(2), 40, 40, Some(fixed_now())).unwrap());

    let mut harness = setup_view_harness(ViewKind::Progress, backend, Some(40), true);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Laskar Pelangi"), "missing title in {html}");
    assert!(html.contains("30%"), "missing percent in {html}");
    assert!(html.contains("Finished"), "missing finished badge in {html}");
    assert!(
        html.contains("Continue Reading"),
        "missing continue action in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_prompts_when_signed_out() {
    let backend = InMemoryApi::new();
    seed_book(&backend, 1, "Laskar Pelangi", "Novel");

    let mut harness = setup_view_harness(ViewKind::Progress, backend, Some(40), false);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Sign in to see your reading progress"),
        "missing sign-in prompt in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn review_section_smoke_renders_summary() {
    let backend = InMemoryApi::new();
    seed_book(&backend, 5, "Negeri 5 Menara", "Novel");
    backend.put_review(
        BookId::new(5),
        Review::new(
            ReviewId::new(1),
            "Andi",
            Rating::new(5).unwrap(),
            Some("Bagus sekali".to_string()),
            fixed_now(),
        ),
    );
    backend.put_review(
        BookId::new(5),
        Review::new(
            ReviewId::new(2),
            "Siti",
            Rating::new(3).unwrap(),
            None,
            fixed_now(),
        ),
    );

    let mut harness = setup_view_harness(ViewKind::Reviews(5), backend, Some(40), false);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("4.0"), "missing average in {html}");
    assert!(html.contains("2 reviews"), "missing count in {html}");
    assert!(html.contains("Andi"), "missing reviewer in {html}");
    assert!(html.contains("Bagus sekali"), "missing review text in {html}");
    assert!(
        html.contains("Sign in to review this book"),
        "missing sign-in hint in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn review_section_smoke_renders_form_when_signed_in() {
    let backend = InMemoryApi::new();
    seed_book(&backend, 5, "Negeri 5 Menara", "Novel");

    let mut harness = setup_view_harness(ViewKind::Reviews(5), backend, Some(40), true);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Submit Review"), "missing submit in {html}");
    assert!(html.contains("No reviews yet"), "missing empty notice in {html}");
    assert!(
        !html.contains("Sign in to review this book"),
        "unexpected sign-in hint in {html}"
    );
}
