//! One-way progress channel from the search pipeline to whatever is showing it.

use crate::events::Event;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Ok,
    Warn,
    Err,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Sink for status announcements. Reporting never fails; a sink with nobody
/// listening drops the message.
pub trait StatusReporter: Send + Sync {
    fn report(&self, message: &str, severity: Severity);
}

impl StatusReporter for mpsc::UnboundedSender<Event> {
    fn report(&self, message: &str, severity: Severity) {
        let _ = self.send(Event::Status(StatusMessage::new(message, severity)));
    }
}

/// An unmounted sink is a no-op.
impl<R: StatusReporter> StatusReporter for Option<R> {
    fn report(&self, message: &str, severity: Severity) {
        if let Some(inner) = self {
            inner.report(message, severity);
        }
    }
}

impl<R: StatusReporter + ?Sized> StatusReporter for &R {
    fn report(&self, message: &str, severity: Severity) {
        (**self).report(message, severity);
    }
}
