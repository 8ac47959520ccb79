use async_trait::async_trait;

use shelf_core::model::{BookId, Rating, Review, ReviewId};

use crate::http::HttpApi;
use crate::http::wire::{BookReviewsDto, SaveReviewBody, UserReviewEnvelope};
use crate::stores::{ApiError, BookReviews, ReviewStore};

#[async_trait]
impl ReviewStore for HttpApi {
    async fn book_reviews(&self, book_id: BookId) -> Result<BookReviews, ApiError> {
        // Reading reviews is public; only writing needs the bearer token.
        let response = self
            .client
            .get(self.url(&format!("/api/reviews/book/{}", book_id.value())))
            .send()
            .await?;
        let dto: BookReviewsDto = Self::check(response)?.json().await?;
        Ok(dto.into_book_reviews())
    }

    async fn my_review(&self, book_id: BookId) -> Result<Option<Review>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/reviews/book/{}/user", book_id.value())))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let envelope: UserReviewEnvelope = Self::check(response)?.json().await?;
        Ok(envelope.into_review())
    }

    async fn save_review(
        &self,
        book_id: BookId,
        rating: Rating,
        text: Option<String>,
    ) -> Result<(), ApiError> {
        // The server upserts on the reader's existing review, so first
        // submission and edit share this call.
        let body = SaveReviewBody {
            book_id: book_id.value(),
            rating: rating.stars(),
            review_text: text.unwrap_or_default(),
        };
        let response = self
            .client
            .post(self.url("/api/reviews"))
            .bearer_auth(self.bearer()?)
            .json(&body)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn delete_review(&self, id: ReviewId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/reviews/{}", id.value())))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }
}
