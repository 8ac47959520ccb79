use thiserror::Error;

use crate::model::ids::BookId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BookError {
    #[error("book title cannot be empty")]
    EmptyTitle,

    #[error("book author cannot be empty")]
    EmptyAuthor,
}

//
// ─── BOOK ──────────────────────────────────────────────────────────────────────
//

/// A book in the catalog.
///
/// Carries the metadata shown on shelf cards plus the paths the reader
/// needs to fetch the cover image and the page document. A book can be
/// listed before its document has been uploaded, so `pdf_path` is
/// optional; the reading view shows a placeholder for such books.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    categories: Vec<String>,
    cover_path: Option<String>,
    pdf_path: Option<String>,
}

impl Book {
    /// Creates a new Book.
    ///
    /// Title, author and categories are trimmed. Blank categories and
    /// blank paths are dropped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if title or author is empty or whitespace-only.
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        categories: Vec<String>,
        cover_path: Option<String>,
        pdf_path: Option<String>,
    ) -> Result<Self, BookError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BookError::EmptyTitle);
        }

        let author = author.into();
        if author.trim().is_empty() {
            return Err(BookError::EmptyAuthor);
        }

        let categories = categories
            .into_iter()
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .collect();

        let cover_path = cover_path
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty());
        let pdf_path = pdf_path
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty());

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            author: author.trim().to_owned(),
            categories,
            cover_path,
            pdf_path,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> BookId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// First category, used as the shelf card label.
    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    #[must_use]
    pub fn cover_path(&self) -> Option<&str> {
        self.cover_path.as_deref()
    }

    #[must_use]
    pub fn pdf_path(&self) -> Option<&str> {
        self.pdf_path.as_deref()
    }

    /// Whether this book matches a shelf search query, checked against
    /// title, author and categories without case.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&query)
            || self.author.to_lowercase().contains(&query)
            || self
                .categories
                .iter()
                .any(|c| c.to_lowercase().contains(&query))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book::new(
            BookId::new(1),
            "Laskar Pelangi",
            "Andrea Hirata",
            vec!["Novel".into(), "Fiksi".into()],
            Some("covers/laskar.jpg".into()),
            Some("books/laskar.pdf".into()),
        )
        .unwrap()
    }

    #[test]
    fn book_new_rejects_empty_title() {
        let err = Book::new(
            BookId::new(1),
            "   ",
            "Andrea Hirata",
            vec![],
            None,
            Some("books/a.pdf".into()),
        )
        .unwrap_err();
        assert_eq!(err, BookError::EmptyTitle);
    }

    #[test]
    fn book_new_rejects_empty_author() {
        let err = Book::new(BookId::new(1), "Laskar Pelangi", "", vec![], None, None).unwrap_err();
        assert_eq!(err, BookError::EmptyAuthor);
    }

    #[test]
    fn book_without_document_is_allowed() {
        let book = Book::new(
            BookId::new(1),
            "Bumi",
            "Tere Liye",
            vec![],
            None,
            Some("   ".into()),
        )
        .unwrap();
        assert_eq!(book.pdf_path(), None);
    }

    #[test]
    fn book_drops_blank_categories() {
        let book = Book::new(
            BookId::new(1),
            "Bumi",
            "Tere Liye",
            vec!["  ".into(), " Fantasi ".into(), String::new()],
            None,
            None,
        )
        .unwrap();

        assert_eq!(book.categories(), &["Fantasi".to_owned()]);
        assert_eq!(book.primary_category(), Some("Fantasi"));
    }

    #[test]
    fn book_matches_query_across_fields() {
        let book = sample_book();
        assert!(book.matches_query("laskar"));
        assert!(book.matches_query("HIRATA"));
        assert!(book.matches_query("fiksi"));
        assert!(book.matches_query("  "));
        assert!(!book.matches_query("pemrograman"));
    }

    #[test]
    fn book_happy_path() {
        let book = sample_book();
        assert_eq!(book.id(), BookId::new(1));
        assert_eq!(book.title(), "Laskar Pelangi");
        assert_eq!(book.author(), "Andrea Hirata");
        assert_eq!(book.primary_category(), Some("Novel"));
        assert_eq!(book.cover_path(), Some("covers/laskar.jpg"));
        assert_eq!(book.pdf_path(), Some("books/laskar.pdf"));
    }
}
