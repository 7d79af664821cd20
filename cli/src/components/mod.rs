//! Terminal renderings of the todo UI. Components hold at most a transient
//! input buffer; everything they draw comes from the `TodoStore`.

pub mod filter;
pub mod form;
pub mod item;
pub mod list;
pub mod toast;

pub use filter::TodoFilter;
pub use form::TodoForm;
pub use toast::{AutoDismiss, Toast, ToastKind};
