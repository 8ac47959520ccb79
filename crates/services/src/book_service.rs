use std::sync::Arc;

use shelf_api::BookCatalog;
use shelf_core::model::{Book, BookId};

use crate::error::BookServiceError;

/// Catalog reads.
///
/// The server exposes no search endpoint, so text search and category
/// filtering happen client side over the fetched list via
/// [`filter_catalog`].
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookCatalog>,
}

impl BookService {
    #[must_use]
    pub fn new(books: Arc<dyn BookCatalog>) -> Self {
        Self { books }
    }

    /// Every book in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `BookServiceError::Api` if the catalog cannot be fetched.
    pub async fn list_books(&self) -> Result<Vec<Book>, BookServiceError> {
        Ok(self.books.list_books().await?)
    }

    /// Fetch one book by id.
    ///
    /// # Errors
    ///
    /// Returns `BookServiceError::Api` with `ApiError::NotFound` when the
    /// book does not exist.
    pub async fn get_book(&self, id: BookId) -> Result<Book, BookServiceError> {
        Ok(self.books.get_book(id).await?)
    }
}

/// Distinct category names across `books`, sorted, for the filter chips.
#[must_use]
pub fn category_names(books: &[Book]) -> Vec<String> {
    let mut names: Vec<String> = books
        .iter()
        .flat_map(|book| book.categories().iter().cloned())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Books matching a text query and an optional category chip.
#[must_use]
pub fn filter_catalog<'a>(
    books: &'a [Book],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Book> {
    books
        .iter()
        .filter(|book| book.matches_query(query))
        .filter(|book| {
            category.is_none_or(|chip| book.categories().iter().any(|c| c == chip))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: u64, title: &str, author: &str, categories: &[&str]) -> Book {
        Book::new(
            BookId::new(id),
            title,
            author,
            categories.iter().map(|c| (*c).to_owned()).collect(),
            None,
            None,
        )
        .unwrap()
    }

    fn catalog() -> Vec<Book> {
        vec![
            book(1, "Bumi", "Tere Liye", &["Fantasi", "Novel"]),
            book(2, "Laskar Pelangi", "Andrea Hirata", &["Novel"]),
            book(3, "Filosofi Teras", "Henry Manampiring", &["Pengembangan Diri"]),
        ]
    }

    #[test]
    fn category_names_are_sorted_and_distinct() {
        assert_eq!(
            category_names(&catalog()),
            vec!["Fantasi", "Novel", "Pengembangan Diri"]
        );
    }

    #[test]
    fn filter_matches_across_title_and_author() {
        let books = catalog();
        let hits = filter_catalog(&books, "tere", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title(), "Bumi");
    }

    #[test]
    fn filter_by_category_chip() {
        let books = catalog();
        let hits = filter_catalog(&books, "", Some("Novel"));
        let titles: Vec<&str> = hits.iter().map(|b| b.title()).collect();
        assert_eq!(titles, vec!["Bumi", "Laskar Pelangi"]);
    }

    #[test]
    fn empty_query_and_no_chip_matches_everything() {
        let books = catalog();
        assert_eq!(filter_catalog(&books, "", None).len(), 3);
    }

    #[tokio::test]
    async fn list_and_get_pass_through() {
        let backend = shelf_api::InMemoryApi::new();
        for b in catalog() {
            backend.put_book(b);
        }

        let service = BookService::new(backend.into_api().books);
        assert_eq!(service.list_books().await.unwrap().len(), 3);
        assert_eq!(
            service.get_book(BookId::new(2)).await.unwrap().title(),
            "Laskar Pelangi"
        );
    }
}
