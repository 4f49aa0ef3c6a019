//! Toast notifications.
//!
//! The orchestrator never talks to a UI directly; it hands each outcome to
//! a [`Notifier`]. The web server broadcasts them to connected browsers,
//! the CLI and tests log or record them.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Toast color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastColor {
    Success,
    Error,
}

/// A fire-and-forget user notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub color: ToastColor,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color: ToastColor::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color: ToastColor::Error,
        }
    }
}

/// Receives notifications. Delivery is best effort; nothing is returned.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.color {
            ToastColor::Success => info!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
            ToastColor::Error => warn!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
        }
    }
}
