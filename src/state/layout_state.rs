//! Viewport and sidebar layout state.
//!
//! This module tracks the viewport width against the layout breakpoint and
//! holds the handles of the sidebar regions. The open/visible flags
//! themselves live on the document (`open` on the sidebar, `active` on the
//! overlay) so that what is painted is what is true.

use crate::dom::NodeId;

/// Layout mode derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Width at or below the breakpoint: sidebar is a toggleable drawer
    Narrow,
    /// Width above the breakpoint: sidebar is always shown, drawer state unused
    Wide,
}

/// State related to the viewport and the sidebar drawer.
///
/// Responsibilities:
/// - Classifying the viewport width against the breakpoint
/// - Holding the sidebar, overlay and toggle control handles
#[derive(Debug, Clone)]
pub struct LayoutState {
    /// Breakpoint in viewport units
    breakpoint: f32,
    /// Last sampled viewport width
    viewport_width: f32,
    /// `#sidebar` container
    sidebar: Option<NodeId>,
    /// `#overlay` shown behind the open drawer
    overlay: Option<NodeId>,
    /// `#sidebarToggle` control
    toggle: Option<NodeId>,
}

impl LayoutState {
    /// Creates a layout state for the given breakpoint and initial width.
    pub fn new(breakpoint: f32, viewport_width: f32) -> Self {
        Self {
            breakpoint,
            viewport_width,
            sidebar: None,
            overlay: None,
            toggle: None,
        }
    }

    // ===== Layout Queries =====

    pub fn breakpoint(&self) -> f32 {
        self.breakpoint
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Layout mode for the current width. Exactly the breakpoint is narrow.
    pub fn mode(&self) -> LayoutMode {
        self.mode_for(self.viewport_width)
    }

    pub fn mode_for(&self, width: f32) -> LayoutMode {
        if width > self.breakpoint {
            LayoutMode::Wide
        } else {
            LayoutMode::Narrow
        }
    }

    pub fn is_wide(&self) -> bool {
        self.mode() == LayoutMode::Wide
    }

    pub fn sidebar(&self) -> Option<NodeId> {
        self.sidebar
    }

    pub fn overlay(&self) -> Option<NodeId> {
        self.overlay
    }

    pub fn toggle(&self) -> Option<NodeId> {
        self.toggle
    }

    // ===== Layout Mutations =====

    /// Records a new viewport width and returns the previous layout mode.
    pub fn set_viewport_width(&mut self, width: f32) -> LayoutMode {
        let previous = self.mode();
        self.viewport_width = width;
        previous
    }

    /// Records the sidebar regions found at bind time.
    pub fn set_regions(&mut self, sidebar: Option<NodeId>, overlay: Option<NodeId>, toggle: Option<NodeId>) {
        self.sidebar = sidebar;
        self.overlay = overlay;
        self.toggle = toggle;
    }
}
