//! User-facing notifications.
//!
//! The data form of the product's toasts. Machines emit these as actions;
//! presenting them (toast, log line, nothing) is the driver's concern.

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational notification.
    Info,

    /// Destructive notification, shown for rejected input.
    Destructive,
}

/// A notification surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short headline.
    pub title: String,

    /// Longer description.
    pub body: String,

    /// Presentation severity.
    pub severity: Severity,
}

impl Notification {
    /// Build an informational notification.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into(), severity: Severity::Info }
    }

    /// Build a destructive notification.
    pub fn destructive(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into(), severity: Severity::Destructive }
    }
}
