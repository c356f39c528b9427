//! Header panel UI rendering
//!
//! Handles the top bar with page controls and, in narrow layout, the sidebar
//! toggle.

use eframe::egui;
use egui::{Color32, RichText};
use pawablox::NodeId;
use std::path::PathBuf;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a page file to open
    OpenPageRequested(PathBuf),
    /// User asked to reload the current page from disk
    ReloadRequested,
    /// User clicked the sidebar toggle
    ToggleClicked(NodeId),
}

/// Renders the application header.
///
/// `toggle` is the page's sidebar toggle when it should be shown.
pub fn render_header(
    ui: &mut egui::Ui,
    title: &str,
    toggle: Option<NodeId>,
    can_reload: bool,
    error: Option<&str>,
) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if let Some(toggle) = toggle {
            if ui.button("☰").on_hover_text("Toggle navigation").clicked() {
                interaction = Some(HeaderInteraction::ToggleClicked(toggle));
            }
            ui.separator();
        }

        if ui.button("📁 Open Page").clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("Page Description", &["json"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenPageRequested(path));
            }
        }

        if can_reload && ui.button("⟳ Reload").clicked() {
            interaction = Some(HeaderInteraction::ReloadRequested);
        }

        ui.separator();
        ui.label(RichText::new(title).strong());
    });

    if let Some(err) = error {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
