//! Centralized coordinator state.
//!
//! The live document plus the focused state components that index into it.
//! Each component keeps its own invariants; the coordinator is the only
//! writer.

use crate::dom::Document;
use crate::state::{LayoutState, NavState, NotificationState, TabState};

/// Everything the coordinator owns for the lifetime of one page.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The page being coordinated
    pub doc: Document,

    /// Viewport and sidebar regions
    pub layout: LayoutState,

    /// Tab sets
    pub tabs: TabState,

    /// Navigation groups and links
    pub nav: NavState,

    /// The single toast slot
    pub notification: NotificationState,
}

impl AppState {
    /// Creates state for a freshly loaded page.
    pub fn new(doc: Document, breakpoint: f32, viewport_width: f32) -> Self {
        Self {
            doc,
            layout: LayoutState::new(breakpoint, viewport_width),
            tabs: TabState::new(),
            nav: NavState::new(),
            notification: NotificationState::new(),
        }
    }
}
