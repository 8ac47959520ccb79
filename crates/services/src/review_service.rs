use std::sync::Arc;

use shelf_api::{BookReviews, ReviewStore};
use shelf_core::model::{BookId, Rating, Review, ReviewId};

use crate::error::ReviewServiceError;

/// Review reads plus the submit and delete flow for the signed-in reader.
#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewStore>,
}

impl ReviewService {
    #[must_use]
    pub fn new(reviews: Arc<dyn ReviewStore>) -> Self {
        Self { reviews }
    }

    /// All reviews of a book along with its rating statistics.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Api` if the store cannot be reached.
    pub async fn book_reviews(&self, book_id: BookId) -> Result<BookReviews, ReviewServiceError> {
        Ok(self.reviews.book_reviews(book_id).await?)
    }

    /// The reader's own review of a book, if they wrote one.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Api` if the store cannot be reached.
    pub async fn my_review(&self, book_id: BookId) -> Result<Option<Review>, ReviewServiceError> {
        Ok(self.reviews.my_review(book_id).await?)
    }

    /// Submit or replace the reader's review of a book.
    ///
    /// Blank text is stored as "no text"; a bare star rating is a valid
    /// review.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Review` if `stars` is outside `1..=5`.
    /// Returns `ReviewServiceError::Api` if the write fails.
    pub async fn submit(
        &self,
        book_id: BookId,
        stars: u8,
        text: &str,
    ) -> Result<(), ReviewServiceError> {
        let rating = Rating::new(stars)?;
        let text = Some(text.trim().to_owned()).filter(|t| !t.is_empty());
        self.reviews.save_review(book_id, rating, text).await?;
        Ok(())
    }

    /// Delete the reader's review.
    ///
    /// # Errors
    ///
    /// Returns `ReviewServiceError::Api` if the delete fails.
    pub async fn delete(&self, id: ReviewId) -> Result<(), ReviewServiceError> {
        self.reviews.delete_review(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use shelf_api::InMemoryApi;
    use shelf_core::model::{ReviewError, UserId, UserProfile, UserRole};

    fn signed_in_backend() -> InMemoryApi {
        let backend = InMemoryApi::new();
        backend.sign_in(
            UserProfile::new(
                UserId::new("u1"),
                "Siti",
                "siti@mail.id",
                UserRole::Reader,
            )
            .unwrap(),
        );
        backend
    }

    #[tokio::test]
    async fn submit_rejects_zero_stars_before_any_write() {
        let backend = signed_in_backend();
        let service = ReviewService::new(backend.clone().into_api().reviews);

        let err = service.submit(BookId::new(1), 0, "Bagus").await.unwrap_err();
        assert!(matches!(
            err,
            ReviewServiceError::Review(ReviewError::InvalidRating)
        ));
        assert_eq!(
            backend
                .book_reviews(BookId::new(1))
                .await
                .unwrap()
                .reviews
                .len(),
            0
        );
    }

    #[tokio::test]
    async fn submit_blank_text_stores_rating_only() {
        let backend = signed_in_backend();
        let service = ReviewService::new(backend.into_api().reviews);

        let book = BookId::new(1);
        service.submit(book, 4, "   ").await.unwrap();

        let mine = service.my_review(book).await.unwrap().unwrap();
        assert_eq!(mine.rating().stars(), 4);
        assert_eq!(mine.text(), None);
    }

    #[tokio::test]
    async fn submit_twice_replaces_and_delete_removes() {
        let backend = signed_in_backend();
        let service = ReviewService::new(backend.into_api().reviews);

        let book = BookId::new(1);
        service.submit(book, 3, "Lumayan").await.unwrap();
        service.submit(book, 5, "Ternyata bagus").await.unwrap();

        let page = service.book_reviews(book).await.unwrap();
        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.statistics.total_reviews(), 1);

        let mine = service.my_review(book).await.unwrap().unwrap();
        service.delete(mine.id()).await.unwrap();
        assert!(service.my_review(book).await.unwrap().is_none());
    }
}
