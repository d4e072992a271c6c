use async_trait::async_trait;

use super::cartesia_client::{send_checked, CartesiaClient};
use super::upstream_error::UpstreamError;
use crate::domain::access_token::{AccessTokenRequest, UpstreamAccessToken};

const ACCESS_TOKEN_PATH: &str = "/access-token";

/// Issues short-lived access tokens through the provider. Single attempt.
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    async fn issue(
        &self,
        request: &AccessTokenRequest,
        bearer_token: &str,
    ) -> Result<UpstreamAccessToken, UpstreamError>;
}

pub struct CartesiaAccessTokenRepository {
    client: CartesiaClient,
}

impl CartesiaAccessTokenRepository {
    pub fn new(client: CartesiaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccessTokenRepository for CartesiaAccessTokenRepository {
    async fn issue(
        &self,
        request: &AccessTokenRequest,
        bearer_token: &str,
    ) -> Result<UpstreamAccessToken, UpstreamError> {
        let response =
            send_checked(self.client.post(ACCESS_TOKEN_PATH, bearer_token).json(request)).await?;

        response
            .json::<UpstreamAccessToken>()
            .await
            .map_err(UpstreamError::transport)
    }
}
