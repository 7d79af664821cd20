//! REPL shell: parses command lines, forwards intents to the store, and
//! renders a frame after each command.

use std::str::FromStr;
use std::time::{Duration, Instant};

use todo_client::{ActionError, Confirm, Filter, TodoId, TodoStore, Transport};
use tracing::{info, warn};

use crate::components::{list, AutoDismiss, Toast, TodoFilter, TodoForm};

pub const DELETE_PROMPT: &str = "Delete this todo?";

pub const HELP: &str = "\
Commands:
  add <title> [| <description>]   add a todo (`add` alone retries the draft)
  toggle <id>                     flip a todo between open and done
  rm <id>                         delete a todo
  filter <all|active|completed>   change the view
  clear-completed                 delete every completed todo
  clear-all                       delete every todo
  refresh                         reload from the server
  dismiss [error|success]         close a notification
  help                            show this text
  quit                            leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Add {
        title: Option<String>,
        description: Option<String>,
    },
    Toggle(TodoId),
    Remove(TodoId),
    Filter(Filter),
    ClearCompleted,
    ClearAll,
    Refresh,
    Dismiss(Option<Slot>),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs a todo id")]
    MissingId(&'static str),
    #[error("`{0}` is not a todo id")]
    BadId(String),
    #[error("{0}")]
    BadFilter(String),
    #[error("dismiss what? expected `error` or `success`")]
    BadSlot,
}

fn parse_id(verb: &'static str, arg: &str) -> Result<TodoId, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingId(verb));
    }
    arg.parse().map_err(|_| CommandError::BadId(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        match verb.to_ascii_lowercase().as_str() {
            "" | "ls" | "list" => Ok(Command::Show),
            "add" | "a" => {
                if rest.is_empty() {
                    return Ok(Command::Add {
                        title: None,
                        description: None,
                    });
                }
                let (title, description) = match rest.split_once('|') {
                    Some((t, d)) => (t.trim(), Some(d.trim().to_string())),
                    None => (rest, None),
                };
                Ok(Command::Add {
                    title: Some(title.to_string()),
                    description,
                })
            }
            "toggle" | "t" | "done" => parse_id("toggle", rest).map(Command::Toggle),
            "rm" | "delete" | "del" => parse_id("rm", rest).map(Command::Remove),
            "filter" | "f" => rest
                .parse()
                .map(Command::Filter)
                .map_err(|e: todo_client::types::ParseFilterError| CommandError::BadFilter(e.to_string())),
            "clear-completed" | "cc" => Ok(Command::ClearCompleted),
            "clear-all" | "ca" => Ok(Command::ClearAll),
            "refresh" | "r" => Ok(Command::Refresh),
            "dismiss" | "x" => match rest {
                "" => Ok(Command::Dismiss(None)),
                "error" => Ok(Command::Dismiss(Some(Slot::Error))),
                "success" => Ok(Command::Dismiss(Some(Slot::Success))),
                _ => Err(CommandError::BadSlot),
            },
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One UI session: the store, the form draft, and transient notices.
pub struct App<T, C> {
    store: TodoStore<T, C>,
    confirm: C,
    form: TodoForm,
    success_timer: AutoDismiss,
    notice: Option<String>,
}

impl<T: Transport, C: Confirm> App<T, C> {
    pub fn new(store: TodoStore<T, C>, confirm: C, success_duration: Duration) -> Self {
        Self {
            store,
            confirm,
            form: TodoForm::default(),
            success_timer: AutoDismiss::new(success_duration),
            notice: None,
        }
    }

    pub fn store(&self) -> &TodoStore<T, C> {
        &self.store
    }

    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    /// Initial load: probe the server, then fetch the list.
    pub async fn mount(&mut self) {
        match self.store.remote().health().await {
            Ok(health) => info!(
                api = self.store.remote().client().base_url(),
                status = %health.status,
                service = %health.service,
                "api reachable"
            ),
            Err(err) => warn!(api = self.store.remote().client().base_url(), error = %err, "health check failed"),
        }
        let _ = self.store.fetch_all().await;
    }

    pub async fn dispatch(&mut self, command: Command) -> Flow {
        self.notice = None;
        match command {
            Command::Show => {}
            Command::Help => self.notice = Some(HELP.to_string()),
            Command::Quit => return Flow::Quit,
            Command::Add { title, description } => {
                if let Some(title) = title {
                    self.form.set(&title, description.as_deref());
                }
                match self.form.submit(&mut self.store).await {
                    Ok(_) => self.success_timer.start(Instant::now()),
                    Err(err) => self.report(err),
                }
            }
            Command::Toggle(id) => {
                let Some(completed) = self.store.todos().iter().find(|t| t.id == id).map(|t| t.completed) else {
                    self.notice = Some(format!("No todo #{id} in this list."));
                    return Flow::Continue;
                };
                if let Err(err) = self.store.toggle_complete(id, !completed).await {
                    self.report(err);
                }
            }
            Command::Remove(id) => {
                if !self.confirm.confirm(DELETE_PROMPT) {
                    self.report(ActionError::Cancelled);
                } else if let Err(err) = self.store.remove(id).await {
                    self.report(err);
                }
            }
            Command::Filter(filter) => self.store.set_filter(filter),
            Command::ClearCompleted => {
                if TodoFilter::can_clear_completed(&self.store.stats(), self.store.is_loading()) {
                    if let Err(err) = self.store.clear_completed().await {
                        self.report(err);
                    }
                } else {
                    self.notice = Some("Nothing completed to clear.".to_string());
                }
            }
            Command::ClearAll => {
                if TodoFilter::can_clear_all(&self.store.stats(), self.store.is_loading()) {
                    if let Err(err) = self.store.clear_all().await {
                        self.report(err);
                    }
                } else {
                    self.notice = Some("Nothing to clear.".to_string());
                }
            }
            Command::Refresh => {
                let _ = self.store.fetch_all().await;
            }
            Command::Dismiss(slot) => match slot {
                Some(Slot::Error) => self.store.dismiss_error(),
                Some(Slot::Success) => self.dismiss_success(),
                None => {
                    self.store.dismiss_error();
                    self.dismiss_success();
                }
            },
        }
        Flow::Continue
    }

    /// Close the success toast once its time is up.
    pub fn tick(&mut self, now: Instant) {
        if self.store.success_message().is_some() && self.success_timer.is_expired(now) {
            self.dismiss_success();
        }
    }

    fn dismiss_success(&mut self) {
        self.store.dismiss_success();
        self.success_timer.stop();
    }

    /// Remote failures already sit in the store's error slot; only local
    /// outcomes need a notice.
    fn report(&mut self, err: ActionError) {
        match err {
            ActionError::EmptyTitle => self.notice = Some("Title is required.".to_string()),
            ActionError::Cancelled => self.notice = Some("Cancelled.".to_string()),
            ActionError::NothingToUpdate => self.notice = Some("Nothing to update.".to_string()),
            ActionError::Remote(_) => {}
        }
    }

    pub fn render(&mut self, now: Instant) -> String {
        self.tick(now);
        let store = &self.store;
        let mut out = String::new();
        if let Some(message) = store.success_message() {
            out.push_str(&Toast::success(message).render());
        }
        if let Some(message) = store.error() {
            out.push_str(&Toast::error(message).render());
        }
        out.push_str(&self.form.render(store.is_loading()));
        out.push_str(&TodoFilter::render(store.filter(), &store.stats(), store.is_loading()));
        out.push('\n');
        out.push_str(&list::render(&store.filtered_todos(), store.filter()));
        if let Some(notice) = &self.notice {
            out.push_str(notice);
            if !notice.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}
