//! Username -> user id resolution via the batch lookup endpoint

use async_trait::async_trait;
use modbridge_core::{DomainError, IdentityResolver, RepoResult, UserId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::CloudClient;
use crate::error::{map_transport_error, response_detail};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    usernames: [&'a str; 1],
    exclude_banned_users: bool,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    data: Vec<LookupMatch>,
}

#[derive(Deserialize)]
struct LookupMatch {
    id: Option<u64>,
}

/// `IdentityResolver` backed by the public users API
#[derive(Debug, Clone)]
pub struct RobloxUserResolver {
    client: CloudClient,
}

impl RobloxUserResolver {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityResolver for RobloxUserResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, handle: &str) -> RepoResult<UserId> {
        let url = self.client.users_url(&["v1", "usernames", "users"])?;
        let request = LookupRequest {
            usernames: [handle],
            exclude_banned_users: false,
        };

        let response = self
            .client
            .http()
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::ResolutionFailed(map_transport_error(e).to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response_detail(response).await;
            return Err(DomainError::ResolutionFailed(format!(
                "status {}: {detail}",
                status.as_u16()
            )));
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| DomainError::ResolutionFailed(format!("malformed response: {e}")))?;

        let user_id = body
            .data
            .first()
            .and_then(|m| m.id)
            .and_then(|id| UserId::new(id).ok())
            .ok_or_else(|| DomainError::UserNotFound(handle.to_string()))?;

        debug!(%user_id, "Username resolved");
        Ok(user_id)
    }
}
