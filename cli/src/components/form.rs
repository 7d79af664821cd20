//! Input form for new todos.

use todo_client::{ActionError, Confirm, Todo, TodoStore, Transport};

/// Draft buffers for the next todo. Kept across a failed submit so the user
/// can retry without retyping.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
}

impl TodoForm {
    pub fn set(&mut self, title: &str, description: Option<&str>) {
        self.title = title.to_string();
        self.description = description.unwrap_or_default().to_string();
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Whether the submit action is offered: a title and no request in flight.
    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && self.has_title()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }

    /// Submit the draft. A blank title is rejected before reaching the store.
    /// Buffers are cleared only when the server accepted the todo. The store
    /// is borrowed mutably, so no other request can be in flight here.
    pub async fn submit<T: Transport, C: Confirm>(
        &mut self,
        store: &mut TodoStore<T, C>,
    ) -> Result<Todo, ActionError> {
        if !self.has_title() {
            return Err(ActionError::EmptyTitle);
        }
        let description = Some(self.description.trim()).filter(|d| !d.is_empty());
        let todo = store.add(self.title.trim(), description).await?;
        self.title.clear();
        self.description.clear();
        Ok(todo)
    }

    pub fn render(&self, is_loading: bool) -> String {
        if is_loading {
            return "Adding...\n".to_string();
        }
        if self.is_empty() {
            return String::new();
        }
        let mut out = format!("Draft: {}", self.title);
        if !self.description.is_empty() {
            out.push_str(&format!(" | {}", self.description));
        }
        if self.can_submit(is_loading) {
            out.push_str("  (type `add` to retry)");
        }
        out.push('\n');
        out
    }
}
