//! Notification sink for user-facing advisories.
//!
//! The core produces exactly one kind of notification: the one-time advisory
//! raised when `try_login` falls back to generating a local key. The sink is
//! fire-and-forget; failures to display or copy are invisible to the core.

/// Fire-and-forget advisory channel to the user.
///
/// Implemented by the application shell (toast/alert plus clipboard access).
pub trait NotificationSink: Send + Sync {
    /// Shows an advisory message to the user.
    fn notify(&self, message: &str);

    /// Places text on the user's clipboard.
    fn copy_to_clipboard(&self, text: &str);
}

/// A sink that drops all notifications. Useful for headless consumers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl NotificationSink for NoopNotifier {
    fn notify(&self, _message: &str) {}

    fn copy_to_clipboard(&self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_notifier_accepts_calls() {
        let sink = NoopNotifier;
        sink.notify("hello");
        sink.copy_to_clipboard("nsec1...");
    }
}
