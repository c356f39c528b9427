//! UI panel rendering subsystem
//!
//! This module contains the preview shell's panels:
//! - Header panel (page controls, narrow-layout sidebar toggle)
//! - Page view (the document rendered as widgets)
//! - Toast overlay (the single notification slot)
//! - Status bar (layout and timer state)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod page_view;
pub mod toast_overlay;
pub mod status_bar;
pub mod panel_manager;
