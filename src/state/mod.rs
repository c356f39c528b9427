//! State management modules for the UI state coordinator.
//!
//! This module contains state-only logic (no document mutation):
//! - Layout state (viewport width, breakpoint, sidebar regions)
//! - Tab state (tab sets and their members)
//! - Navigation state (groups and links)
//! - Notification state (the single toast slot)

mod layout_state;
mod tab_state;
mod nav_state;
mod notification_state;

pub use layout_state::{LayoutMode, LayoutState};
pub use tab_state::{TabSet, TabState};
pub use nav_state::NavState;
pub use notification_state::{NotificationKind, NotificationState};
