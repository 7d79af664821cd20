//! Notification banners.
//!
//! Success toasts close on their own after a fixed duration; error toasts stay
//! until dismissed or replaced by a newer error.

use std::time::{Duration, Instant};

pub const DEFAULT_SUCCESS_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast<'a> {
    pub kind: ToastKind,
    pub message: &'a str,
}

impl<'a> Toast<'a> {
    pub fn success(message: &'a str) -> Self {
        Self {
            kind: ToastKind::Success,
            message,
        }
    }

    pub fn error(message: &'a str) -> Self {
        Self {
            kind: ToastKind::Error,
            message,
        }
    }

    pub fn render(&self) -> String {
        match self.kind {
            ToastKind::Success => format!("(ok) {}\n", self.message),
            ToastKind::Error => format!("(!) {}  (dismiss with `dismiss error`)\n", self.message),
        }
    }
}

/// Tracks when the current success toast appeared.
#[derive(Debug, Clone)]
pub struct AutoDismiss {
    duration: Duration,
    shown_at: Option<Instant>,
}

impl AutoDismiss {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            shown_at: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.shown_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.shown_at = None;
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|shown| now.saturating_duration_since(shown) >= self.duration)
    }
}
