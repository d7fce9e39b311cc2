//! Standard data store entry client
//!
//! One HTTP round trip per call. No retries and no locking: concurrent
//! writers to the same entry are last-writer-wins.

use async_trait::async_trait;
use modbridge_core::{Document, DocumentStore, DomainError, RepoResult};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::{CloudClient, API_KEY_HEADER};
use crate::error::{map_transport_error, response_detail};

/// `DocumentStore` backed by the cloud data store entry endpoint
#[derive(Debug, Clone)]
pub struct OpenCloudDataStore {
    client: CloudClient,
    scope: String,
}

impl OpenCloudDataStore {
    /// Create a store client bound to one scope
    pub fn new(client: CloudClient, scope: impl Into<String>) -> Self {
        Self {
            client,
            scope: scope.into(),
        }
    }

    fn entry_url(&self) -> RepoResult<reqwest::Url> {
        self.client.api_url(&[
            "datastores",
            "v1",
            "universes",
            self.client.universe_id(),
            "standard-datastores",
            "datastore",
            "entries",
            "entry",
        ])
    }

    fn entry_query<'a>(&'a self, store: &'a str, key: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("datastoreName", store),
            ("scope", self.scope.as_str()),
            ("entryKey", key),
        ]
    }
}

#[async_trait]
impl DocumentStore for OpenCloudDataStore {
    #[instrument(skip(self), fields(scope = %self.scope))]
    async fn get(&self, store: &str, key: &str) -> RepoResult<Option<Document>> {
        let response = self
            .client
            .http()
            .get(self.entry_url()?)
            .header(API_KEY_HEADER, self.client.api_key())
            .query(&self.entry_query(store, key))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Entry not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DomainError::StoreRequestFailed {
                status: status.as_u16(),
                detail: response_detail(response).await,
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        Ok(Some(Document::from_body(&body)))
    }

    #[instrument(skip(self, value), fields(scope = %self.scope))]
    async fn set(&self, store: &str, key: &str, value: &Value) -> RepoResult<()> {
        let response = self
            .client
            .http()
            .post(self.entry_url()?)
            .header(API_KEY_HEADER, self.client.api_key())
            .query(&self.entry_query(store, key))
            .json(value)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::StoreRequestFailed {
                status: status.as_u16(),
                detail: response_detail(response).await,
            });
        }

        debug!("Entry written");
        Ok(())
    }
}
