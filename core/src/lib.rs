//! Client core for the todo service: the remote store client and the
//! session state store that mirrors server data for a UI.
//!
//! # Overview
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network.
//! - A `Transport` performs the round trip; `ReqwestTransport` is the
//!   production one.
//! - `RemoteStore` pairs the two into typed async operations.
//! - `TodoStore` owns the cached list for one UI session and applies every
//!   mutation only after the server confirms it.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod remote;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use remote::RemoteStore;
pub use store::{ActionError, Confirm, TodoStore};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    Filter, HealthStatus, ListQuery, Stats, Todo, TodoCreate, TodoId, TodoListResponse, TodoUpdate,
};
