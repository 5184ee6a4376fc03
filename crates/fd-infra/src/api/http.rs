use std::marker::PhantomData;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use fd_core::config::ApiConfig;
use fd_core::ports::{ApiError, EntityApiPort};
use fd_core::{Entity, EntityId};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Error body shape of the CRM API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// REST client for one resource: `{base_url}/{resource}` and
/// `{base_url}/{resource}/{id}`.
pub struct HttpEntityApi<E> {
    client: Client,
    base_url: String,
    token: Option<String>,
    _entity: PhantomData<fn() -> E>,
}

/// HTTP client honouring the configured timeout.
pub fn build_client(config: &ApiConfig) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("build http client failed")
}

impl<E: Entity> HttpEntityApi<E> {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        Ok(Self::with_client(build_client(config)?, config))
    }

    /// Share one connection pool across resources.
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, E::RESOURCE.path())
    }

    fn entity_url(&self, id: EntityId) -> String {
        format!("{}/{}/{}", self.base_url, E::RESOURCE.path(), id)
    }

    /// Send `request`; non-success statuses become [`ApiError`]s.
    async fn send(&self, request: RequestBuilder, id: Option<EntityId>) -> Result<Response, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        debug!(resource = %E::RESOURCE, status = status.as_u16(), "API request rejected");

        if status == StatusCode::NOT_FOUND {
            let what = match id {
                Some(id) => format!("{} {id}", E::RESOURCE.label()),
                None => E::RESOURCE.label().to_string(),
            };
            return Err(ApiError::NotFound(what));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_default();
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl<E: Entity> EntityApiPort<E> for HttpEntityApi<E> {
    async fn fetch_all(&self) -> Result<Vec<E>, ApiError> {
        let response = self.send(self.client.get(self.collection_url()), None).await?;
        Self::decode(response).await
    }

    async fn fetch_by_id(&self, id: EntityId) -> Result<E, ApiError> {
        let response = self.send(self.client.get(self.entity_url(id)), Some(id)).await?;
        Self::decode(response).await
    }

    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError> {
        let request = self.client.post(self.collection_url()).json(draft);
        let response = self.send(request, None).await?;
        Self::decode(response).await
    }

    async fn update(&self, id: EntityId, patch: &E::Patch) -> Result<E, ApiError> {
        let request = self.client.patch(self.entity_url(id)).json(patch);
        let response = self.send(request, Some(id)).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.send(self.client.delete(self.entity_url(id)), Some(id))
            .await?;
        Ok(())
    }
}
