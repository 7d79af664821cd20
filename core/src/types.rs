//! Domain DTOs for the todo API and the view types derived from them.
//!
//! # Design
//! The wire types mirror the server's JSON schema but are defined
//! independently from the mock-server crate; integration tests catch drift.
//! `Filter` and `Stats` never travel over the wire. They are pure views over
//! a cached list of `Todo` values.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Server-assigned todo identity. Opaque to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(TodoId)
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: NaiveDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: NaiveDateTime,
}

/// Server timestamps arrive either zone-less (`2024-05-01T09:30:00.123456`)
/// or as RFC 3339 with an offset. Offset values are normalised to UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(stamped) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(stamped.naive_utc());
        }
        raw.parse::<NaiveDateTime>().map_err(D::Error::custom)
    }
}

impl Todo {
    /// True once the server has stamped a change after creation.
    pub fn was_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TodoCreate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
/// `Some(String::new())` is sent as an explicit empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoUpdate {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// One page of todos as returned by `GET /todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoListResponse {
    pub items: Vec<Todo>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// Query parameters for `GET /todos`. Unset fields fall back to server defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub completed: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    pub fn for_filter(filter: Filter) -> Self {
        let completed = match filter {
            Filter::All => None,
            Filter::Active => Some(false),
            Filter::Completed => Some(true),
        };
        Self {
            completed,
            ..Self::default()
        }
    }

    /// Render as a query string including the leading `?`, or empty.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(completed) = self.completed {
            pairs.push(format!("completed={completed}"));
        }
        if let Some(limit) = self.limit {
            pairs.push(format!("limit={limit}"));
        }
        if let Some(offset) = self.offset {
            pairs.push(format!("offset={offset}"));
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

/// View predicate over the cached list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter '{0}', expected all, active or completed")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

/// Counts derived from the cached list. `completed + active == total` always.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

impl Stats {
    pub fn of(todos: &[Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            total,
            completed,
            active: total - completed,
        }
    }

    pub fn count(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}
