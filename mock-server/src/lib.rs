//! In-memory reference implementation of the todo HTTP API.
//!
//! # Design
//! The store is a `BTreeMap` keyed by sequential id, so iteration order is
//! creation order. Handlers mirror the production service's status codes:
//! 201 on create, 204 on every delete, 404 with a `{detail}` body for a
//! missing id, 422 with a per-field `{detail}` map for invalid payloads.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::{NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const API_PREFIX: &str = "/api/v1";
pub const SERVICE_NAME: &str = "todo-api";

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 100;
const MAX_TITLE_LEN: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub items: Vec<Todo>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub completed: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    todos: BTreeMap<u64, Todo>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/completed", delete(delete_completed))
        .route("/todos/all", delete(delete_all))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo));
    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Server clock, truncated to microseconds like a SQL timestamp column.
fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond((now.nanosecond() / 1_000) * 1_000).unwrap_or(now)
}

fn not_found(id: u64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": format!("Todo not found with id: {id}") })),
    )
        .into_response()
}

fn unprocessable(field: &str, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": { field: message } })),
    )
        .into_response()
}

fn validate_title(title: &str) -> Result<(), Response> {
    if title.trim().is_empty() {
        return Err(unprocessable("title", "Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(unprocessable(
            "title",
            "Title must be between 1 and 255 characters",
        ));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), Response> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LEN => Err(unprocessable(
            "description",
            "Description must not exceed 1000 characters",
        )),
        _ => Ok(()),
    }
}

async fn health() -> Json<serde_json::Value> {
    tracing::info!("health check requested");
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

async fn list_todos(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<TodoList> {
    let completed = match params.completed.as_deref() {
        None | Some("all") => None,
        Some(value) => Some(value.eq_ignore_ascii_case("true")),
    };
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);
    tracing::info!(?completed, limit, offset, "listing todos");

    let store = db.read().await;
    let matching: Vec<&Todo> = store
        .todos
        .values()
        .filter(|t| completed.is_none_or(|c| t.completed == c))
        .collect();
    let total = matching.len();
    let items = matching
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();
    Json(TodoList {
        items,
        total,
        limit,
        offset,
    })
}

async fn create_todo(State(db): State<Db>, Json(input): Json<CreateTodo>) -> Response {
    if let Err(rejection) = validate_title(&input.title)
        .and_then(|_| validate_description(input.description.as_deref()))
    {
        return rejection;
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let stamp = now();
    let todo = Todo {
        id: store.next_id,
        title: input.title,
        description: input.description,
        completed: input.completed,
        created_at: stamp,
        updated_at: stamp,
    };
    tracing::info!(id = todo.id, "created todo");
    store.todos.insert(todo.id, todo.clone());
    (StatusCode::CREATED, Json(todo)).into_response()
}

async fn get_todo(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    let store = db.read().await;
    match store.todos.get(&id) {
        Some(todo) => Json(todo.clone()).into_response(),
        None => not_found(id),
    }
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Response {
    if let Some(title) = input.title.as_deref() {
        if let Err(rejection) = validate_title(title) {
            return rejection;
        }
    }
    if let Err(rejection) = validate_description(input.description.as_deref()) {
        return rejection;
    }
    let mut store = db.write().await;
    let Some(todo) = store.todos.get_mut(&id) else {
        return not_found(id);
    };
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = Some(description);
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    todo.updated_at = now().max(todo.created_at);
    tracing::info!(id, "updated todo");
    Json(todo.clone()).into_response()
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    let mut store = db.write().await;
    match store.todos.remove(&id) {
        Some(_) => {
            tracing::info!(id, "deleted todo");
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(id),
    }
}

async fn delete_completed(State(db): State<Db>) -> StatusCode {
    let mut store = db.write().await;
    store.todos.retain(|_, t| !t.completed);
    tracing::info!(remaining = store.todos.len(), "deleted completed todos");
    StatusCode::NO_CONTENT
}

async fn delete_all(State(db): State<Db>) -> StatusCode {
    db.write().await.todos.clear();
    tracing::info!("deleted all todos");
    StatusCode::NO_CONTENT
}
