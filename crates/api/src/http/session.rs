use async_trait::async_trait;

use shelf_core::model::UserProfile;

use crate::http::HttpApi;
use crate::http::wire::MeDto;
use crate::stores::{ApiError, SessionGateway};

#[async_trait]
impl SessionGateway for HttpApi {
    async fn me(&self) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .get(self.url("/api/auth/me"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::check(response)?.json::<MeDto>().await?.into_profile()
    }
}
