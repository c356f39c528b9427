//! Pawablox Preview Shell
//!
//! Desktop host for catalog pages built on egui. The shell:
//! - loads a page description (or the built-in demo page) into a document
//! - binds a `UiStateCoordinator` to it once the page is ready
//! - forwards clicks, typed input and form submits as document events
//! - feeds the window width as the viewport signal
//! - advances the coordinator's timer clock with real frame time
//!
//! The layout mirrors the catalog stylesheet: a permanent sidebar in wide
//! layout and a drawer with an overlay below the breakpoint.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use pawablox::app::forms;
use pawablox::theme::apply_catalog_visuals;
use pawablox::{
    load_page, parse_page, CoordinatorConfig, Document, Event, EventKind, SystemClipboard,
    UiStateCoordinator,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod ui;

use ui::page_view::PageInteraction;
use ui::panel_manager::{PanelInteraction, PanelManager};

const DEMO_PAGE: &str = include_str!("../assets/demo_page.json");

#[derive(Parser, Debug)]
#[command(name = "pawablox-gui", about = "Preview pawablox catalog pages")]
struct Cli {
    /// Page description file to open (built-in demo page when omitted)
    page: Option<PathBuf>,

    /// Coordinator configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1200.0)]
    width: f32,
}

/// Main application entry point that initializes and launches the preview shell.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = CoordinatorConfig::load_or_default(cli.config.as_deref())
        .context("failed to load coordinator configuration")?;
    let doc = match &cli.page {
        Some(path) => load_page(path).with_context(|| format!("failed to open page {}", path.display()))?,
        None => parse_page(DEMO_PAGE).context("built-in demo page is invalid")?,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width, 800.0])
            .with_title("Pawablox Preview"),
        ..Default::default()
    };

    let width = cli.width;
    let page_path = cli.page;
    eframe::run_native(
        "Pawablox Preview",
        options,
        Box::new(move |cc| Ok(Box::new(PreviewApp::new(cc, doc, config, page_path, width)))),
    )
    .map_err(|e| anyhow::anyhow!("preview shell failed: {}", e))
}

/// The preview shell application.
///
/// All page behavior lives in the coordinator; the shell only renders the
/// document and translates egui input into document events.
struct PreviewApp {
    coordinator: UiStateCoordinator<SystemClipboard>,
    config: CoordinatorConfig,
    /// File the current page was loaded from, if any
    page_path: Option<PathBuf>,
    error_message: Option<String>,
    last_width: f32,
    /// Input clock value at the previous frame
    last_time: Option<f64>,
}

impl PreviewApp {
    fn new(
        cc: &eframe::CreationContext,
        doc: Document,
        config: CoordinatorConfig,
        page_path: Option<PathBuf>,
        width: f32,
    ) -> Self {
        cc.egui_ctx.style_mut(|style| apply_catalog_visuals(&mut style.visuals));

        Self {
            coordinator: Self::bind_page(doc, &config, width),
            config,
            page_path,
            error_message: None,
            last_width: width,
            last_time: None,
        }
    }

    fn bind_page(doc: Document, config: &CoordinatorConfig, width: f32) -> UiStateCoordinator<SystemClipboard> {
        let mut coordinator = UiStateCoordinator::new(doc, SystemClipboard::new(), config.clone(), width);
        coordinator.bind();
        coordinator
    }

    /// Replaces the current page. On failure the current page stays up and
    /// the error is shown in the header.
    fn open_page(&mut self, path: &Path) {
        match load_page(path) {
            Ok(doc) => {
                tracing::info!(path = %path.display(), "page opened");
                self.coordinator = Self::bind_page(doc, &self.config, self.last_width);
                self.page_path = Some(path.to_path_buf());
                self.error_message = None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to open page: {}", e);
                self.error_message = Some(format!("Failed to open {}: {}", path.display(), e));
            }
        }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction) {
        match interaction {
            PanelInteraction::OpenPageRequested(path) => self.open_page(&path),
            PanelInteraction::ReloadRequested => {
                if let Some(path) = self.page_path.clone() {
                    self.open_page(&path);
                }
            }
            PanelInteraction::Page(page) => self.handle_page_interaction(page),
        }
    }

    fn handle_page_interaction(&mut self, interaction: PageInteraction) {
        match interaction {
            PageInteraction::Dispatch(event) => {
                let outcome = self.coordinator.dispatch(event);
                if event.kind == EventKind::Submit && !outcome.default_prevented {
                    tracing::info!(form = event.target.raw(), "form submitted");
                }
            }
            PageInteraction::ChoiceActivated(input) => {
                // Native activation first, then the click bubbles and the
                // change fires, as for a real input
                forms::activate_choice(self.coordinator.document_mut(), input);
                self.coordinator.dispatch(Event::click(input));
                self.coordinator.dispatch(Event::change(input));
            }
            PageInteraction::ValueEdited { node, value } => {
                self.coordinator.document_mut().set_value(node, &value);
            }
        }
    }

    /// Feeds the viewport signal and the timer clock.
    fn sync_with_frame(&mut self, ctx: &egui::Context) {
        let width = ctx.content_rect().width();
        if (width - self.last_width).abs() > f32::EPSILON {
            self.last_width = width;
            self.coordinator.on_viewport_resize(width);
        }

        let now = ctx.input(|i| i.time);
        let elapsed = self.last_time.map(|last| (now - last).max(0.0)).unwrap_or(0.0);
        self.last_time = Some(now);
        self.coordinator.advance(Duration::from_secs_f64(elapsed));
    }
}

impl eframe::App for PreviewApp {
    /// Main update loop:
    /// 1. Feed viewport width and elapsed time to the coordinator
    /// 2. Render all panels via PanelManager
    /// 3. Apply the resulting interaction
    /// 4. Hand pending copy commands to the windowing layer
    /// 5. Wake up again when the next timer falls due
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_with_frame(ctx);

        if let Some(interaction) = PanelManager::render_all_panels(
            ctx,
            &self.coordinator,
            self.page_path.as_deref(),
            self.error_message.as_deref(),
        ) {
            self.handle_panel_interaction(interaction);
            ctx.request_repaint();
        }

        if let Some(text) = self.coordinator.clipboard_mut().take_copy_command() {
            ctx.copy_text(text);
        }

        if let Some(wait) = self.coordinator.next_task_in() {
            ctx.request_repaint_after(wait);
        }
    }
}
