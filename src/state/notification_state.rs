//! The single notification slot.

use crate::dom::NodeId;

/// Visual kind of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Success,
    Warning,
}

impl NotificationKind {
    /// Class suffix used on the toast element (`toast-success`).
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
        }
    }
}

/// Holds the toast currently on screen, if any. Replacing and clearing are
/// the only mutations.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    current: Option<NodeId>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Puts `toast` in the slot and returns the one it displaced.
    pub fn replace(&mut self, toast: NodeId) -> Option<NodeId> {
        self.current.replace(toast)
    }

    /// Empties the slot only if it still holds `toast`.
    pub fn clear_if(&mut self, toast: NodeId) -> bool {
        if self.current == Some(toast) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
