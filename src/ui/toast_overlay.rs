//! Toast notification rendering
//!
//! The coordinator drives the toast through its inline `transform` style. The
//! overlay turns that into a slide animation anchored at the bottom-right
//! corner, with the same duration as the toast's exit transition.

use eframe::egui;
use egui::{Color32, RichText};
use pawablox::{resolve_color, Document, NodeId};
use std::time::Duration;

const SLIDE_DISTANCE: f32 = 100.0;

/// Draws `toast` above every panel.
pub fn render_toast(ctx: &egui::Context, doc: &Document, toast: NodeId, transition: Duration) {
    let shown = doc.style(toast, "transform") == Some("translateY(0)");
    let progress = ctx.animate_bool_with_time(
        egui::Id::new(("pawablox-toast-slide", toast.raw())),
        shown,
        transition.as_secs_f32(),
    );
    let offset = (1.0 - progress) * SLIDE_DISTANCE;

    let fill = doc
        .style(toast, "background-color")
        .and_then(resolve_color)
        .unwrap_or(Color32::DARK_GRAY);
    let text_color = doc
        .style(toast, "color")
        .and_then(resolve_color)
        .unwrap_or(Color32::WHITE);
    let message = doc.text_content(toast);

    egui::Area::new(egui::Id::new("pawablox-toast"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0 + offset))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(fill)
                .inner_margin(egui::Margin::symmetric(16, 12))
                .corner_radius(8.0)
                .shadow(ui.visuals().popup_shadow)
                .show(ui, |ui| {
                    ui.label(RichText::new(message).color(text_color).strong());
                });
        });
}
