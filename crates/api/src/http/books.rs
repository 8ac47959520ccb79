use async_trait::async_trait;

use shelf_core::model::{Book, BookId};

use crate::http::HttpApi;
use crate::http::wire::BookDto;
use crate::stores::{ApiError, BookCatalog};

// The catalog routes predate the /api prefix and sit at the server root.
// They are public, so no bearer token is attached.
#[async_trait]
impl BookCatalog for HttpApi {
    async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let response = self.client.get(self.url("/books")).send().await?;
        let dtos: Vec<BookDto> = Self::check(response)?.json().await?;
        dtos.into_iter().map(BookDto::into_book).collect()
    }

    async fn get_book(&self, id: BookId) -> Result<Book, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/books/{}", id.value())))
            .send()
            .await?;
        Self::check(response)?.json::<BookDto>().await?.into_book()
    }
}
