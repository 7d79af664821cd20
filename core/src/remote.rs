//! Remote Store Client: typed operations over one HTTP round trip each.
//!
//! # Design
//! `RemoteStore` glues the stateless `TodoClient` to a `Transport`. It adds
//! request/response logging and nothing else: no retries, no caching, no
//! batching. Deletes are idempotent from the caller's side, so a 404 on
//! `delete` is reported as success.

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{HealthStatus, ListQuery, Todo, TodoCreate, TodoId, TodoListResponse, TodoUpdate};

#[derive(Debug, Clone)]
pub struct RemoteStore<T> {
    client: TodoClient,
    transport: T,
}

impl RemoteStore<ReqwestTransport> {
    /// Remote store over reqwest, pointed at `config.api_url`.
    pub fn connect(config: &ClientConfig) -> Self {
        Self::new(TodoClient::new(&config.api_url), ReqwestTransport::new())
    }
}

impl<T: Transport> RemoteStore<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.path.clone();
        debug!(%method, %url, "api request");
        match self.transport.execute(request).await {
            Ok(response) => {
                if response.status >= 400 {
                    warn!(%method, %url, status = response.status, body = %response.body, "api error response");
                } else {
                    debug!(%method, %url, status = response.status, "api response");
                }
                Ok(response)
            }
            Err(err) => {
                warn!(%method, %url, error = %err, "api request failed");
                Err(err)
            }
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<TodoListResponse, ApiError> {
        let response = self.round_trip(self.client.build_list_todos(query)).await?;
        self.client.parse_list_todos(response)
    }

    pub async fn get(&self, id: TodoId) -> Result<Todo, ApiError> {
        let response = self.round_trip(self.client.build_get_todo(id)).await?;
        self.client.parse_get_todo(response)
    }

    pub async fn create(&self, input: &TodoCreate) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input)?;
        let response = self.round_trip(request).await?;
        self.client.parse_create_todo(response)
    }

    pub async fn update(&self, id: TodoId, input: &TodoUpdate) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, input)?;
        let response = self.round_trip(request).await?;
        self.client.parse_update_todo(response)
    }

    pub async fn delete(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.round_trip(self.client.build_delete_todo(id)).await?;
        match self.client.parse_delete_todo(response) {
            Err(ApiError::NotFound) => {
                debug!(%id, "todo already absent");
                Ok(())
            }
            other => other,
        }
    }

    pub async fn delete_completed(&self) -> Result<(), ApiError> {
        let response = self.round_trip(self.client.build_delete_completed()).await?;
        self.client.parse_delete_completed(response)
    }

    pub async fn delete_all(&self) -> Result<(), ApiError> {
        let response = self.round_trip(self.client.build_delete_all()).await?;
        self.client.parse_delete_all(response)
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self.round_trip(self.client.build_health()).await?;
        self.client.parse_health(response)
    }
}
