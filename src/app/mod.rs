//! Application-level modules for the pawablox interaction layer.
//!
//! This module contains the UI state coordinator, its centralized state and
//! the form behaviour it delegates to.

mod app_state;
mod coordinator;
pub mod forms;

pub use app_state::AppState;
pub use coordinator::{CopyOutcome, DispatchOutcome, SavedContent, Task, UiStateCoordinator};
pub use crate::state::NotificationKind;
