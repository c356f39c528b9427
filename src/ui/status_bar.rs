//! Status bar UI rendering
//!
//! Shows where the page came from and the coordinator's layout state.

use eframe::egui;
use egui::RichText;
use pawablox::{Clipboard, UiStateCoordinator};
use std::path::Path;

/// Renders the status panel at the bottom of the window
pub fn render_status_bar<C: Clipboard>(
    ui: &mut egui::Ui,
    coordinator: &UiStateCoordinator<C>,
    page_path: Option<&Path>,
) {
    let layout = coordinator.layout();
    let source = page_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in demo page".to_string());

    ui.horizontal(|ui| {
        ui.label(RichText::new(source).strong());
        ui.label(RichText::new("|").strong());
        ui.label(format!(
            "Viewport: {:.0}px ({}, breakpoint {:.0}px)",
            layout.viewport_width(),
            if layout.is_wide() { "wide" } else { "narrow" },
            layout.breakpoint()
        ));
        ui.label(RichText::new("|").strong());
        ui.label(format!(
            "Sidebar: {}",
            if coordinator.is_sidebar_open() { "open" } else { "closed" }
        ));
        ui.label(RichText::new("|").strong());
        ui.label(format!(
            "Tab sets: {} | Timers: {}",
            coordinator.tab_sets().len(),
            coordinator.pending_tasks()
        ));
    });
}
