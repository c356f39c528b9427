//! Page document rendering
//!
//! Walks the live document and draws it with egui widgets. Rendering never
//! mutates the document: user input is reported back as a [`PageInteraction`]
//! and applied by the application after the frame's panels are drawn.

use eframe::egui;
use egui::{Color32, RichText, Sense, Stroke};
use pawablox::dom::NodeKind;
use pawablox::{resolve_color, Document, Event, EventKind, NodeId, Subscriptions, Token};

/// Result of user interaction with the rendered page
pub enum PageInteraction {
    /// A document event to route through the coordinator
    Dispatch(Event),
    /// The user clicked a checkbox or radio input itself
    ChoiceActivated(NodeId),
    /// The user typed into a text field
    ValueEdited { node: NodeId, value: String },
}

/// Read-only view over the document for one frame.
pub struct PageView<'a> {
    doc: &'a Document,
    subscriptions: &'a Subscriptions,
}

impl<'a> PageView<'a> {
    pub fn new(doc: &'a Document, subscriptions: &'a Subscriptions) -> Self {
        Self { doc, subscriptions }
    }

    /// Renders the children of `node`, laying runs of tab buttons out in a row.
    pub fn render_children(&self, ui: &mut egui::Ui, node: NodeId, out: &mut Option<PageInteraction>) {
        let children = self.doc.children(node);
        let mut i = 0;
        while i < children.len() {
            if self.doc.has_class(children[i], "tab-button") {
                let start = i;
                while i < children.len() && self.doc.has_class(children[i], "tab-button") {
                    i += 1;
                }
                ui.horizontal(|ui| {
                    for child in &children[start..i] {
                        self.render_node(ui, *child, out);
                    }
                });
            } else {
                self.render_node(ui, children[i], out);
                i += 1;
            }
        }
    }

    fn render_node(&self, ui: &mut egui::Ui, node: NodeId, out: &mut Option<PageInteraction>) {
        match self.doc.kind(node) {
            Some(NodeKind::Text(text)) => {
                let text = text.trim();
                if !text.is_empty() {
                    ui.label(text);
                }
            }
            Some(NodeKind::Element(data)) => {
                if !self.is_hidden(node) {
                    self.render_element(ui, node, data.tag(), out);
                }
            }
            None => {}
        }
    }

    /// Elements the page itself would not show, plus the regions the panel
    /// manager draws on its own (sidebar, overlay, toggle, toasts).
    fn is_hidden(&self, node: NodeId) -> bool {
        let doc = self.doc;

        if matches!(doc.attr(node, "id"), Some("sidebar" | "overlay" | "sidebarToggle")) {
            return true;
        }
        if doc.has_attr(node, "hidden") || doc.has_class(node, "toast") {
            return true;
        }
        if doc.has_class(node, "tab-content") && !doc.has_class(node, "active") {
            return true;
        }
        if doc.has_class(node, "nav-submenu") {
            if let Some(group) = doc.closest_class(node, "nav-group") {
                return !doc.has_class(group, "open");
            }
        }
        // Off-screen helpers such as the copy text area
        doc.style(node, "left").is_some_and(|left| left.starts_with('-'))
    }

    fn render_element(&self, ui: &mut egui::Ui, node: NodeId, tag: &str, out: &mut Option<PageInteraction>) {
        match tag {
            "button" => self.render_button(ui, node, out),
            "input" => self.render_input(ui, node, out),
            "textarea" => self.render_text_field(ui, node, true, out),
            "a" => self.render_link(ui, node, out),
            "i" => {
                ui.label(icon_glyph(self.doc, node));
            }
            "h1" => {
                ui.heading(self.doc.text_content(node).trim());
            }
            "h2" | "h3" | "h4" => {
                ui.add_space(8.0);
                ui.label(RichText::new(self.doc.text_content(node).trim()).strong().size(16.0));
            }
            "pre" | "code" => {
                ui.code(self.doc.text_content(node));
            }
            _ if self.is_leaf(node) => self.render_text(ui, node, out),
            _ => self.render_container(ui, node, out),
        }
    }

    fn is_leaf(&self, node: NodeId) -> bool {
        self.doc.children(node).iter().all(|c| !self.doc.is_element(*c))
    }

    fn is_clickable(&self, node: NodeId) -> bool {
        self.subscriptions.has(node, EventKind::Click)
    }

    fn render_text(&self, ui: &mut egui::Ui, node: NodeId, out: &mut Option<PageInteraction>) {
        let doc = self.doc;

        // Color previews are empty boxes painted with their background
        if let Some(color) = doc.style(node, "background-color").and_then(resolve_color) {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(48.0, 32.0), Sense::hover());
            ui.painter().rect_filled(rect, 4.0, color);
            return;
        }

        let mut text = doc.text_content(node).trim().to_string();
        if doc.has_class(node, "nav-group-header") {
            let open = doc.parent(node).is_some_and(|g| doc.has_class(g, "open"));
            text = format!("{} {}", if open { "▾" } else { "▸" }, text);
        }
        if text.is_empty() {
            return;
        }

        let mut rich = RichText::new(text);
        if let Some(color) = doc.style(node, "color").and_then(resolve_color) {
            rich = rich.color(color);
        }
        if doc.has_class(node, "field-error") {
            rich = rich.small();
        }

        if self.is_clickable(node) {
            if ui.add(egui::Label::new(rich.strong()).sense(Sense::click())).clicked() {
                emit(out, PageInteraction::Dispatch(Event::click(node)));
            }
        } else {
            ui.label(rich);
        }
    }

    fn render_container(&self, ui: &mut egui::Ui, node: NodeId, out: &mut Option<PageInteraction>) {
        let doc = self.doc;
        let horizontal = ["checkbox", "radio", "color-swatch"]
            .iter()
            .any(|c| doc.has_class(node, c));
        let wrapped = doc.has_class(node, "color-grid");

        let body = |ui: &mut egui::Ui, out: &mut Option<PageInteraction>| {
            if wrapped {
                ui.horizontal_wrapped(|ui| self.render_children(ui, node, out));
            } else if horizontal {
                ui.horizontal(|ui| self.render_children(ui, node, out));
            } else {
                self.render_children(ui, node, out);
            }
        };

        if !self.is_clickable(node) {
            body(ui, out);
            return;
        }

        // Clickable regions: the whole frame is the click target
        let mut frame = egui::Frame::group(ui.style());
        if doc.has_class(node, "copied") {
            if let Some(color) = resolve_color(Token::Green600.css_var()) {
                frame = frame.stroke(Stroke::new(2.0, color));
            }
        }
        let response = frame.show(ui, |ui| body(ui, out)).response;

        let hit = ui.interact(response.rect, egui::Id::new(("pawablox-node", node.raw())), Sense::click());
        if hit.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if hit.clicked() {
            emit(out, PageInteraction::Dispatch(Event::click(node)));
        }
    }

    fn render_button(&self, ui: &mut egui::Ui, node: NodeId, out: &mut Option<PageInteraction>) {
        let doc = self.doc;

        let mut label = String::new();
        for child in doc.children(node) {
            match doc.kind(*child) {
                Some(NodeKind::Element(_)) if doc.tag(*child) == Some("i") => {
                    label.push_str(icon_glyph(doc, *child));
                    label.push(' ');
                }
                Some(_) => label.push_str(doc.text_content(*child).trim()),
                None => {}
            }
        }

        let button = egui::Button::new(label.trim()).selected(doc.has_class(node, "active"));
        let response = ui.add_enabled(!doc.has_attr(node, "disabled"), button);
        if !response.clicked() {
            return;
        }

        let form = doc.ancestors(node).find(|n| doc.tag(*n) == Some("form"));
        let event = match (doc.attr(node, "type"), form) {
            (Some("submit"), Some(form)) => Event::submit(form),
            _ => Event::click(node),
        };
        emit(out, PageInteraction::Dispatch(event));
    }

    fn render_input(&self, ui: &mut egui::Ui, node: NodeId, out: &mut Option<PageInteraction>) {
        let doc = self.doc;
        match doc.attr(node, "type") {
            Some("checkbox") => {
                let mut checked = doc.is_checked(node);
                if ui.checkbox(&mut checked, "").clicked() {
                    emit(out, PageInteraction::ChoiceActivated(node));
                }
            }
            Some("radio") => {
                if ui.radio(doc.is_checked(node), "").clicked() {
                    emit(out, PageInteraction::ChoiceActivated(node));
                }
            }
            _ => self.render_text_field(ui, node, false, out),
        }
    }

    fn render_text_field(&self, ui: &mut egui::Ui, node: NodeId, multiline: bool, out: &mut Option<PageInteraction>) {
        let doc = self.doc;
        let mut value = doc.value(node).to_string();
        let hint = doc.attr(node, "placeholder").unwrap_or("").to_string();

        let edit = if multiline {
            egui::TextEdit::multiline(&mut value).desired_rows(3)
        } else {
            egui::TextEdit::singleline(&mut value)
        }
        .hint_text(hint)
        .desired_width(280.0);

        let changed = match doc.style(node, "border-color").and_then(resolve_color) {
            Some(color) => egui::Frame::default()
                .stroke(Stroke::new(1.5, color))
                .show(ui, |ui| ui.add(edit))
                .inner
                .changed(),
            None => ui.add(edit).changed(),
        };

        if changed {
            emit(out, PageInteraction::ValueEdited { node, value });
        }
    }

    fn render_link(&self, ui: &mut egui::Ui, node: NodeId, out: &mut Option<PageInteraction>) {
        let doc = self.doc;
        let text = doc.text_content(node).trim().to_string();
        let response = ui.selectable_label(doc.has_class(node, "active"), text);
        if response.clicked() {
            emit(out, PageInteraction::Dispatch(Event::click(node)));
        }
        if let Some(href) = doc.attr(node, "href") {
            response.on_hover_text(href);
        }
    }
}

fn emit(out: &mut Option<PageInteraction>, interaction: PageInteraction) {
    if out.is_none() {
        *out = Some(interaction);
    }
}

fn icon_glyph(doc: &Document, icon: NodeId) -> &'static str {
    if doc.has_class(icon, "fa-check") {
        "✔"
    } else if doc.has_class(icon, "fa-copy") {
        "📋"
    } else if doc.has_class(icon, "fa-paper-plane") {
        "✉"
    } else {
        "•"
    }
}

/// Dimmed layer over the page; clicking it counts as a click on `overlay`.
pub fn render_overlay(ui: &mut egui::Ui, overlay: NodeId, out: &mut Option<PageInteraction>) {
    let rect = ui.max_rect();
    let response = ui.interact(rect, egui::Id::new("pawablox-overlay"), Sense::click());
    ui.painter().rect_filled(rect, 0.0, Color32::from_black_alpha(96));
    if response.clicked() {
        emit(out, PageInteraction::Dispatch(Event::click(overlay)));
    }
}
