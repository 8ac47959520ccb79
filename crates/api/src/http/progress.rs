use async_trait::async_trait;

use shelf_core::model::{BookId, ProgressOverview, ReadingProgress};

use crate::http::HttpApi;
use crate::http::wire::{OverviewRowDto, ProgressEnvelope, SaveProgressBody};
use crate::stores::{ApiError, ProgressStore};

#[async_trait]
impl ProgressStore for HttpApi {
    async fn fetch(&self, book_id: BookId) -> Result<Option<ReadingProgress>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/progress/book/{}", book_id.value())))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let envelope: ProgressEnvelope = Self::check(response)?.json().await?;
        envelope.into_progress(book_id)
    }

    async fn save(
        &self,
        book_id: BookId,
        current_page: u32,
        total_pages: u32,
    ) -> Result<(), ApiError> {
        let body = SaveProgressBody {
            book_id: book_id.value(),
            current_page,
            total_pages,
        };
        let response = self
            .client
            .post(self.url("/api/progress"))
            .bearer_auth(self.bearer()?)
            .json(&body)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn delete(&self, book_id: BookId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/progress/book/{}", book_id.value())))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn overview(&self) -> Result<Vec<ProgressOverview>, ApiError> {
        let response = self
            .client
            .get(self.url("/api/progress/user"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let rows: Vec<OverviewRowDto> = Self::check(response)?.json().await?;
        Ok(rows.into_iter().map(OverviewRowDto::into_row).collect())
    }
}
