//! Session state for the todo UI: the cached list, the active filter, the
//! loading flag and the two notification slots.
//!
//! # Design
//! `TodoStore` is the only owner of the cached `todos`. Every mutation goes
//! through the `RemoteStore` first and touches local state only after the
//! server has confirmed it; nothing is applied speculatively. Because every
//! operation takes `&mut self`, a store has at most one request in flight;
//! overlapping mutations cannot race on the cache.
//!
//! Failures are funnelled into a single `error` slot (last failure wins).
//! Confirmations go into `success_message`, which is independent of `error`
//! so each can be dismissed on its own.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::ApiError;
use crate::remote::RemoteStore;
use crate::transport::Transport;
use crate::types::{Filter, ListQuery, Stats, Todo, TodoCreate, TodoId, TodoUpdate};

pub const CLEAR_ALL_PROMPT: &str = "Delete all todos? This cannot be undone.";

const FETCH_FAILED: &str = "Failed to load todos, please check your network connection";
const ADD_FAILED: &str = "Failed to add todo, please try again";
const UPDATE_FAILED: &str = "Failed to update todo, please try again";
const DELETE_FAILED: &str = "Failed to delete todo, please try again";
const CLEAR_COMPLETED_FAILED: &str = "Failed to clear completed todos, please try again";
const CLEAR_ALL_FAILED: &str = "Failed to clear all todos, please try again";

/// Synchronous yes/no prompt, asked before destructive bulk operations.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Why a store operation did not happen.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The title was blank after trimming; no request was sent.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The user declined the confirmation prompt; no request was sent.
    #[error("operation cancelled")]
    Cancelled,

    /// An update with no fields set; no request was sent.
    #[error("nothing to update")]
    NothingToUpdate,

    #[error(transparent)]
    Remote(#[from] ApiError),
}

/// Sets the loading flag for its lifetime and clears it on every exit path,
/// including a dropped future.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct TodoStore<T, C> {
    remote: RemoteStore<T>,
    confirm: C,
    todos: Vec<Todo>,
    filter: Filter,
    is_loading: bool,
    error: Option<String>,
    success_message: Option<String>,
}

impl<T: Transport, C: Confirm> TodoStore<T, C> {
    pub fn new(remote: RemoteStore<T>, confirm: C) -> Self {
        Self {
            remote,
            confirm,
            todos: Vec::new(),
            filter: Filter::All,
            is_loading: false,
            error: None,
            success_message: None,
        }
    }

    pub fn remote(&self) -> &RemoteStore<T> {
        &self.remote
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// The cached list narrowed by the current filter, in cache order.
    pub fn filtered_todos(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| self.filter.matches(t)).collect()
    }

    pub fn stats(&self) -> Stats {
        Stats::of(&self.todos)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_success(&mut self) {
        self.success_message = None;
    }

    /// Replace the cache with the server's list.
    pub async fn fetch_all(&mut self) -> Result<(), ActionError> {
        let _loading = LoadingGuard::acquire(&mut self.is_loading);
        self.error = None;
        match self.remote.list(&ListQuery::default()).await {
            Ok(page) => {
                let mut seen = HashSet::with_capacity(page.items.len());
                self.todos = page
                    .items
                    .into_iter()
                    .filter(|t| seen.insert(t.id))
                    .collect();
                debug!(count = self.todos.len(), total = page.total, "fetched todos");
                Ok(())
            }
            Err(err) => {
                self.error = Some(FETCH_FAILED.to_string());
                Err(err.into())
            }
        }
    }

    /// Create a todo and append the server's copy to the cache.
    pub async fn add(&mut self, title: &str, description: Option<&str>) -> Result<Todo, ActionError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ActionError::EmptyTitle);
        }
        let input = TodoCreate {
            title: title.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        };

        let _loading = LoadingGuard::acquire(&mut self.is_loading);
        self.success_message = None;
        match self.remote.create(&input).await {
            Ok(todo) => {
                info!(id = %todo.id, "added todo");
                self.success_message = Some(format!("Added todo \"{}\"", todo.title));
                match self.todos.iter_mut().find(|t| t.id == todo.id) {
                    Some(existing) => *existing = todo.clone(),
                    None => self.todos.push(todo.clone()),
                }
                Ok(todo)
            }
            Err(err) => {
                self.error = Some(ADD_FAILED.to_string());
                Err(err.into())
            }
        }
    }

    /// Apply a partial update and swap the confirmed entry in place.
    pub async fn update(&mut self, id: TodoId, changes: TodoUpdate) -> Result<Todo, ActionError> {
        if changes.is_empty() {
            return Err(ActionError::NothingToUpdate);
        }
        let _loading = LoadingGuard::acquire(&mut self.is_loading);
        match self.remote.update(id, &changes).await {
            Ok(updated) => {
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
                    *slot = updated.clone();
                }
                Ok(updated)
            }
            Err(err) => {
                self.error = Some(UPDATE_FAILED.to_string());
                Err(err.into())
            }
        }
    }

    pub async fn toggle_complete(&mut self, id: TodoId, completed: bool) -> Result<Todo, ActionError> {
        self.update(id, TodoUpdate::completed(completed)).await
    }

    pub async fn remove(&mut self, id: TodoId) -> Result<(), ActionError> {
        let _loading = LoadingGuard::acquire(&mut self.is_loading);
        match self.remote.delete(id).await {
            Ok(()) => {
                self.todos.retain(|t| t.id != id);
                Ok(())
            }
            Err(err) => {
                self.error = Some(DELETE_FAILED.to_string());
                Err(err.into())
            }
        }
    }

    pub async fn clear_completed(&mut self) -> Result<(), ActionError> {
        let _loading = LoadingGuard::acquire(&mut self.is_loading);
        match self.remote.delete_completed().await {
            Ok(()) => {
                self.todos.retain(|t| !t.completed);
                Ok(())
            }
            Err(err) => {
                self.error = Some(CLEAR_COMPLETED_FAILED.to_string());
                Err(err.into())
            }
        }
    }

    /// Delete everything, after the user confirms. A declined prompt returns
    /// `ActionError::Cancelled` and leaves both notification slots alone.
    pub async fn clear_all(&mut self) -> Result<(), ActionError> {
        if !self.confirm.confirm(CLEAR_ALL_PROMPT) {
            debug!("clear all declined");
            return Err(ActionError::Cancelled);
        }
        let _loading = LoadingGuard::acquire(&mut self.is_loading);
        match self.remote.delete_all().await {
            Ok(()) => {
                self.todos.clear();
                Ok(())
            }
            Err(err) => {
                self.error = Some(CLEAR_ALL_FAILED.to_string());
                Err(err.into())
            }
        }
    }
}
