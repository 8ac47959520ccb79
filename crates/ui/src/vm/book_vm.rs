use shelf_core::model::{Book, BookId, ReviewStatistics};
use shelf_services::resolve_asset_url;

/// One catalog card on the home view.
#[derive(Clone, Debug, PartialEq)]
pub struct BookCardVm {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub categories: Vec<String>,
    pub cover_url: Option<String>,
    pub has_document: bool,
    /// Absent when the book has no reviews or the statistics fetch
    /// failed; the card simply shows no badge.
    pub rating_label: Option<String>,
}

impl BookCardVm {
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(query) || self.author.to_lowercase().contains(query)
    }

    #[must_use]
    pub fn in_category(&self, category: Option<&str>) -> bool {
        category.is_none_or(|name| self.categories.iter().any(|c| c == name))
    }

    /// Placeholder glyph for books without a cover image.
    #[must_use]
    pub fn initial(&self) -> String {
        self.title
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
    }
}

#[must_use]
pub fn map_book_card(
    book: &Book,
    api_url: &str,
    statistics: Option<&ReviewStatistics>,
) -> BookCardVm {
    let rating_label = statistics
        .filter(|stats| stats.total_reviews() > 0)
        .map(|stats| {
            format!(
                "\u{2605} {} ({})",
                stats.average_display(),
                stats.total_reviews()
            )
        });

    BookCardVm {
        id: book.id(),
        title: book.title().to_string(),
        author: book.author().to_string(),
        categories: book.categories().to_vec(),
        cover_url: book
            .cover_path()
            .map(|path| resolve_asset_url(api_url, path)),
        has_document: book.pdf_path().is_some(),
        rating_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bumi() -> Book {
        Book::new(
            BookId::new(1),
            "Bumi",
            "Tere Liye",
            vec!["Novel".into()],
            Some("covers/bumi.jpg".into()),
            Some("books/bumi.pdf".into()),
        )
        .unwrap()
    }

    #[test]
    fn card_resolves_cover_against_the_api_origin() {
        let card = map_book_card(&bumi(), "http://localhost:5000", None);
        assert_eq!(
            card.cover_url.as_deref(),
            Some("http://localhost:5000/covers/bumi.jpg")
        );
        assert!(card.has_document);
        assert_eq!(card.rating_label, None);
    }

    #[test]
    fn query_matches_title_and_author_case_insensitively() {
        let card = map_book_card(&bumi(), "http://localhost:5000", None);
        assert!(card.matches_query(""));
        assert!(card.matches_query("bumi"));
        assert!(card.matches_query("tere"));
        assert!(!card.matches_query("laskar"));
    }

    #[test]
    fn rating_badge_needs_at_least_one_review() {
        let none = ReviewStatistics::empty();
        let card = map_book_card(&bumi(), "http://localhost:5000", Some(&none));
        assert_eq!(card.rating_label, None);

        let some = ReviewStatistics::new(4.5, 12, [6, 6, 0, 0, 0]);
        let card = map_book_card(&bumi(), "http://localhost:5000", Some(&some));
        assert_eq!(card.rating_label.as_deref(), Some("\u{2605} 4.5 (12)"));
    }
}
