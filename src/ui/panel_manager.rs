//! Panel orchestration and layout management.
//!
//! Lays the page out the way the catalog stylesheet does: a permanent sidebar
//! in wide layout, a drawer with a dimming overlay in narrow layout, the page
//! content in the center and the toast above everything.

use crate::ui::page_view::{self, PageInteraction, PageView};
use crate::ui::{header, status_bar, toast_overlay};
use eframe::egui;
use pawablox::{Clipboard, Event, UiStateCoordinator};
use std::path::{Path, PathBuf};

/// Result of panel interactions that need to be handled by the application.
pub enum PanelInteraction {
    /// User requested to open a page file
    OpenPageRequested(PathBuf),
    /// User requested to reload the current page
    ReloadRequested,
    /// User interacted with the page itself
    Page(PageInteraction),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    pub fn render_all_panels<C: Clipboard>(
        ctx: &egui::Context,
        coordinator: &UiStateCoordinator<C>,
        page_path: Option<&Path>,
        error: Option<&str>,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;
        let mut page_interaction: Option<PageInteraction> = None;

        let doc = coordinator.document();
        let layout = coordinator.layout();
        let view = PageView::new(doc, coordinator.subscriptions());
        let wide = layout.is_wide();

        // The toggle only makes sense when the sidebar is a drawer
        let toggle = match (layout.toggle(), layout.sidebar()) {
            (Some(toggle), Some(_)) if !wide => Some(toggle),
            _ => None,
        };

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) =
                header::render_header(ui, doc.title(), toggle, page_path.is_some(), error)
            {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::OpenPageRequested(path) => {
                        PanelInteraction::OpenPageRequested(path)
                    }
                    header::HeaderInteraction::ReloadRequested => PanelInteraction::ReloadRequested,
                    header::HeaderInteraction::ToggleClicked(toggle) => {
                        PanelInteraction::Page(PageInteraction::Dispatch(Event::click(toggle)))
                    }
                });
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, coordinator, page_path);
        });

        if let Some(sidebar) = layout.sidebar() {
            if wide || coordinator.is_sidebar_open() {
                egui::SidePanel::left("sidebar")
                    .default_width(260.0)
                    .resizable(wide)
                    .show(ctx, |ui| {
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            view.render_children(ui, sidebar, &mut page_interaction);
                        });
                    });
            }
        }

        let content_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(12))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(content_frame)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    view.render_children(ui, doc.body(), &mut page_interaction);
                });

                if let Some(overlay) = layout.overlay() {
                    if !wide && coordinator.is_overlay_visible() {
                        page_view::render_overlay(ui, overlay, &mut page_interaction);
                    }
                }
            });

        if let Some(toast) = coordinator.current_notification() {
            toast_overlay::render_toast(ctx, doc, toast, coordinator.config().toast_exit());
        }

        interaction.or(page_interaction.map(PanelInteraction::Page))
    }
}
