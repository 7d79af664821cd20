//! Terminal front end for the todo service.
//!
//! `App` is the page shell: it owns one `TodoStore` for the session, forwards
//! parsed commands to it and renders the components in `components`.

pub mod app;
pub mod components;
pub mod config;
pub mod prompt;

pub use app::{App, Command, Flow};
pub use config::Args;
pub use prompt::StdinConfirm;
