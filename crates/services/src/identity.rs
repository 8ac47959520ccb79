use std::sync::{Arc, Mutex};

use reqwest::StatusCode;

use shelf_api::{ApiError, SessionGateway, TokenSource};
use shelf_core::model::UserProfile;

use crate::error::IdentityError;

/// Bearer token shared between the app and the HTTP backend.
///
/// The backend asks for the token at request time, so storing one here is
/// enough for the next request to carry it. No token means requests go
/// out unauthenticated.
#[derive(Default)]
pub struct SessionTokens {
    token: Mutex<Option<String>>,
}

impl SessionTokens {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

impl TokenSource for SessionTokens {
    fn bearer_token(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }
}

/// Resolves who is signed in.
#[derive(Clone)]
pub struct IdentityService {
    tokens: Arc<SessionTokens>,
    session: Arc<dyn SessionGateway>,
}

impl IdentityService {
    #[must_use]
    pub fn new(tokens: Arc<SessionTokens>, session: Arc<dyn SessionGateway>) -> Self {
        Self { tokens, session }
    }

    /// Adopt a pre-issued bearer token and resolve the profile behind it.
    ///
    /// On any failure the token is discarded again, so a failed sign-in
    /// leaves later requests unauthenticated rather than carrying a
    /// credential that never worked.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::TokenRejected` if the server refuses the
    /// token. Returns `IdentityError::Api` for transport failures.
    pub async fn sign_in(&self, token: impl Into<String>) -> Result<UserProfile, IdentityError> {
        self.tokens.store(token);

        match self.session.me().await {
            Ok(profile) => Ok(profile),
            Err(error) => {
                self.tokens.clear();
                Err(match error {
                    ApiError::Unauthenticated => IdentityError::TokenRejected,
                    ApiError::HttpStatus(status)
                        if status == StatusCode::UNAUTHORIZED
                            || status == StatusCode::FORBIDDEN =>
                    {
                        IdentityError::TokenRejected
                    }
                    other => other.into(),
                })
            }
        }
    }

    pub fn sign_out(&self) {
        self.tokens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use shelf_api::InMemoryApi;
    use shelf_core::model::{UserId, UserRole};

    fn backend_with_profile() -> InMemoryApi {
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
    async fn sign_in_resolves_profile_and_keeps_token() {
        let backend = backend_with_profile();
        let tokens = Arc::new(SessionTokens::new());
        let service = IdentityService::new(
            Arc::clone(&tokens),
            backend.into_api().session,
        );

        let profile = service.sign_in("tok-abc").await.unwrap();
        assert_eq!(profile.name(), "Siti");
        assert_eq!(tokens.bearer_token().as_deref(), Some("tok-abc"));
    }

    #[tokio::test]
    async fn rejected_token_is_discarded() {
        let backend = InMemoryApi::new();
        let tokens = Arc::new(SessionTokens::new());
        let service = IdentityService::new(
            Arc::clone(&tokens),
            backend.into_api().session,
        );

        let err = service.sign_in("tok-bad").await.unwrap_err();
        assert!(matches!(err, IdentityError::TokenRejected));
        assert_eq!(tokens.bearer_token(), None);
    }

    #[tokio::test]
    async fn transport_failure_also_clears_the_token() {
        let backend = backend_with_profile();
        backend.set_offline(true);
        let tokens = Arc::new(SessionTokens::new());
        let service = IdentityService::new(
            Arc::clone(&tokens),
            backend.into_api().session,
        );

        let err = service.sign_in("tok-abc").await.unwrap_err();
        assert!(matches!(err, IdentityError::Api(_)));
        assert_eq!(tokens.bearer_token(), None);
    }

    #[tokio::test]
    async fn sign_out_clears_the_token() {
        let backend = backend_with_profile();
        let tokens = Arc::new(SessionTokens::new());
        let service = IdentityService::new(
            Arc::clone(&tokens),
            backend.into_api().session,
        );

        service.sign_in("tok-abc").await.unwrap();
        service.sign_out();
        assert_eq!(tokens.bearer_token(), None);
    }
}
