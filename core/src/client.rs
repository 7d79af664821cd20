//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only its base URLs and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The round trip in between belongs to a `Transport`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{HealthStatus, ListQuery, Todo, TodoCreate, TodoId, TodoListResponse, TodoUpdate};

/// Path prefix of the versioned API. `/health` lives outside it.
pub const API_PREFIX: &str = "/api/v1";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
    root_url: String,
}

impl TodoClient {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api/v1`.
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let root_url = base_url
            .strip_suffix(API_PREFIX)
            .unwrap_or(&base_url)
            .to_string();
        Self { base_url, root_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self, query: &ListQuery) -> HttpRequest {
        self.bodiless(
            HttpMethod::Get,
            format!("{}/todos{}", self.base_url, query.to_query_string()),
        )
    }

    pub fn build_get_todo(&self, id: TodoId) -> HttpRequest {
        self.bodiless(HttpMethod::Get, format!("{}/todos/{id}", self.base_url))
    }

    /// Fails with `ApiError::Validation` when the title is blank; nothing is
    /// sent in that case.
    pub fn build_create_todo(&self, input: &TodoCreate) -> Result<HttpRequest, ApiError> {
        if input.title.trim().is_empty() {
            return Err(ApiError::Validation("title must not be empty".to_string()));
        }
        self.with_json(HttpMethod::Post, format!("{}/todos", self.base_url), input)
    }

    pub fn build_update_todo(&self, id: TodoId, input: &TodoUpdate) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, format!("{}/todos/{id}", self.base_url), input)
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, format!("{}/todos/{id}", self.base_url))
    }

    pub fn build_delete_completed(&self) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, format!("{}/todos/completed", self.base_url))
    }

    pub fn build_delete_all(&self) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, format!("{}/todos/all", self.base_url))
    }

    pub fn build_health(&self) -> HttpRequest {
        self.bodiless(HttpMethod::Get, format!("{}/health", self.root_url))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<TodoListResponse, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_completed(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_all(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<HealthStatus, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    fn bodiless(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<B: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Any 2xx is success; the server's usual codes (201 on create, 204 on
/// delete) are not required. 404 maps to `NotFound`, the rest to `Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODO_JSON: &str = r#"{"id":1,"title":"New","description":null,"completed":false,"created_at":"2024-05-01T09:30:00","updated_at":"2024-05-01T09:30:00"}"#;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:8000/api/v1")
    }

    #[test]
    fn build_list_todos_without_query() {
        let req = client().build_list_todos(&ListQuery::default());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/api/v1/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_todos_with_query() {
        let query = ListQuery {
            completed: Some(false),
            limit: Some(5),
            offset: None,
        };
        let req = client().build_list_todos(&query);
        assert_eq!(
            req.path,
            "http://localhost:8000/api/v1/todos?completed=false&limit=5"
        );
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let input = TodoCreate::new("Buy milk").with_description("semi-skimmed");
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/api/v1/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["description"], "semi-skimmed");
    }

    #[test]
    fn build_create_todo_rejects_blank_title() {
        let err = client().build_create_todo(&TodoCreate::new(" \t ")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn build_update_todo_sends_only_present_fields() {
        let req = client()
            .build_update_todo(TodoId(9), &TodoUpdate::completed(true))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8000/api/v1/todos/9");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn bulk_deletes_use_fixed_paths() {
        let c = client();
        let req = c.build_delete_completed();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8000/api/v1/todos/completed");
        let req = c.build_delete_all();
        assert_eq!(req.path, "http://localhost:8000/api/v1/todos/all");
    }

    #[test]
    fn health_lives_outside_the_api_prefix() {
        let req = client().build_health();
        assert_eq!(req.path, "http://localhost:8000/health");

        let bare = TodoClient::new("http://example.test");
        assert_eq!(bare.build_health().path, "http://example.test/health");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:8000/api/v1/");
        let req = client.build_get_todo(TodoId(3));
        assert_eq!(req.path, "http://localhost:8000/api/v1/todos/3");
        assert_eq!(client.build_health().path, "http://localhost:8000/health");
    }

    #[test]
    fn parse_create_todo_success() {
        let todo = client()
            .parse_create_todo(HttpResponse::new(201, TODO_JSON))
            .unwrap();
        assert_eq!(todo.title, "New");
        assert_eq!(todo.id, TodoId(1));
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_update_todo_not_found() {
        let err = client()
            .parse_update_todo(HttpResponse::new(404, r#"{"detail":"Todo not found with id: 1"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client()
            .parse_list_todos(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_delete_variants_accept_any_2xx() {
        let c = client();
        assert!(c.parse_delete_todo(HttpResponse::new(204, "")).is_ok());
        assert!(c.parse_delete_todo(HttpResponse::new(200, "")).is_ok());
        assert!(c.parse_delete_completed(HttpResponse::new(204, "")).is_ok());
        assert!(c.parse_delete_all(HttpResponse::new(202, "")).is_ok());
        assert!(matches!(
            c.parse_delete_all(HttpResponse::new(300, "")),
            Err(ApiError::Http { status: 300, .. })
        ));
    }

    #[test]
    fn parse_create_todo_accepts_200() {
        let todo = client()
            .parse_create_todo(HttpResponse::new(200, TODO_JSON))
            .unwrap();
        assert_eq!(todo.id, TodoId(1));
    }

    #[test]
    fn parse_health_success() {
        let health = client()
            .parse_health(HttpResponse::new(200, r#"{"status":"healthy","service":"todo-api"}"#))
            .unwrap();
        assert_eq!(health.status, "healthy");
    }
}
