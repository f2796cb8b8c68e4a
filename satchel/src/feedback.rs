use crate::ports::UiFeedback;
use tracing::{debug, info};

/// Feedback sink for headless use: every signal is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopFeedback;

impl UiFeedback for NoopFeedback {
    fn show_busy(&self, _label: &str) {}
    fn hide_busy(&self) {}
    fn notify(&self, _message: &str) {}
}

/// Routes busy and notification signals into the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingFeedback;

impl UiFeedback for TracingFeedback {
    fn show_busy(&self, label: &str) {
        debug!(label, "busy");
    }

    fn hide_busy(&self) {
        debug!("idle");
    }

    fn notify(&self, message: &str) {
        info!(text = message, "notify");
    }
}

/// Holds the busy indicator for a scope.
///
/// `hide_busy` fires exactly once when the guard drops, whichever way the
/// scope is left. A disabled guard signals nothing.
#[must_use = "the busy indicator is hidden as soon as the guard is dropped"]
pub struct BusyGuard<'a> {
    feedback: Option<&'a dyn UiFeedback>,
}

impl<'a> BusyGuard<'a> {
    pub fn engage(feedback: &'a dyn UiFeedback, label: &str, enabled: bool) -> Self {
        if !enabled {
            return Self { feedback: None };
        }

        feedback.show_busy(label);
        Self {
            feedback: Some(feedback),
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if let Some(feedback) = self.feedback.take() {
            feedback.hide_busy();
        }
    }
}
