//! Example component generation for catalog pages.
//!
//! A string tag plus a flat configuration record is turned into an
//! [`Example`] (the kind together with the configuration shape that kind
//! understands), and [`ExampleFactory::build`] produces the element subtree for
//! it in a document. Unknown tags produce nothing.
//!
//! # Examples
//!
//! ```
//! use pawablox::{Document, ExampleConfig, ExampleFactory, to_html};
//!
//! let mut doc = Document::new("http://localhost/");
//! let mut factory = ExampleFactory::new();
//! let config = ExampleConfig { text: Some("Save".into()), ..Default::default() };
//! let button = factory.create(&mut doc, "button", config).unwrap();
//! assert_eq!(to_html(&doc, button), r#"<button class="btn btn-primary">Save</button>"#);
//!
//! assert!(factory.create(&mut doc, "carousel", ExampleConfig::default()).is_none());
//! ```

use crate::dom::{Document, NodeId};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const ID_SUFFIX_LEN: usize = 9;

/// Kinds of example the catalog knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExampleKind {
    Button,
    Badge,
    Checkbox,
    Radio,
    Input,
    Alert,
}

impl ExampleKind {
    pub const ALL: [ExampleKind; 6] = [
        ExampleKind::Button,
        ExampleKind::Badge,
        ExampleKind::Checkbox,
        ExampleKind::Radio,
        ExampleKind::Input,
        ExampleKind::Alert,
    ];

    /// Parses a kind tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "button" => Some(ExampleKind::Button),
            "badge" => Some(ExampleKind::Badge),
            "checkbox" => Some(ExampleKind::Checkbox),
            "radio" => Some(ExampleKind::Radio),
            "input" => Some(ExampleKind::Input),
            "alert" => Some(ExampleKind::Alert),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ExampleKind::Button => "button",
            ExampleKind::Badge => "badge",
            ExampleKind::Checkbox => "checkbox",
            ExampleKind::Radio => "radio",
            ExampleKind::Input => "input",
            ExampleKind::Alert => "alert",
        }
    }
}

/// Flat record of optional display properties, as catalog pages supply them.
/// Each kind reads only the properties it understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleConfig {
    pub variant: Option<String>,
    pub size: Option<String>,
    pub text: Option<String>,
    pub icon: Option<String>,
    pub disabled: bool,
    pub loading: bool,
    pub label: Option<String>,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonConfig {
    pub variant: Option<String>,
    pub size: Option<String>,
    pub text: Option<String>,
    pub icon: Option<String>,
    pub disabled: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeConfig {
    pub variant: Option<String>,
    pub text: Option<String>,
    pub icon: Option<String>,
}

/// Shared by checkboxes and radios; `name` only applies to radios.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceConfig {
    pub id: Option<String>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputConfig {
    pub label: Option<String>,
    pub input_type: Option<String>,
    pub placeholder: Option<String>,
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertConfig {
    pub variant: Option<String>,
    pub message: Option<String>,
}

/// An example request: the kind with its configuration shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Example {
    Button(ButtonConfig),
    Badge(BadgeConfig),
    Checkbox(ChoiceConfig),
    Radio(ChoiceConfig),
    Input(InputConfig),
    Alert(AlertConfig),
}

impl Example {
    /// Splits a flat configuration into the shape of `kind`.
    pub fn new(kind: ExampleKind, config: ExampleConfig) -> Self {
        let ExampleConfig {
            variant,
            size,
            text,
            icon,
            disabled,
            loading,
            label,
            description,
            placeholder,
            input_type,
            name,
            id,
            message,
        } = config;

        match kind {
            ExampleKind::Button => Example::Button(ButtonConfig {
                variant,
                size,
                text,
                icon,
                disabled,
                loading,
            }),
            ExampleKind::Badge => Example::Badge(BadgeConfig { variant, text, icon }),
            ExampleKind::Checkbox => Example::Checkbox(ChoiceConfig {
                id,
                name,
                label,
                description,
            }),
            ExampleKind::Radio => Example::Radio(ChoiceConfig {
                id,
                name,
                label,
                description,
            }),
            ExampleKind::Input => Example::Input(InputConfig {
                label,
                input_type,
                placeholder,
                disabled,
            }),
            ExampleKind::Alert => Example::Alert(AlertConfig { variant, message }),
        }
    }

    /// Parses a kind tag and shapes the configuration for it.
    pub fn from_tag(tag: &str, config: ExampleConfig) -> Option<Self> {
        ExampleKind::from_tag(tag).map(|kind| Self::new(kind, config))
    }

    pub fn kind(&self) -> ExampleKind {
        match self {
            Example::Button(_) => ExampleKind::Button,
            Example::Badge(_) => ExampleKind::Badge,
            Example::Checkbox(_) => ExampleKind::Checkbox,
            Example::Radio(_) => ExampleKind::Radio,
            Example::Input(_) => ExampleKind::Input,
            Example::Alert(_) => ExampleKind::Alert,
        }
    }
}

/// Builds example components. Generated ids are unique for the lifetime of
/// the factory.
pub struct ExampleFactory {
    rng: StdRng,
    issued: HashSet<String>,
}

impl Default for ExampleFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ExampleFactory {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Factory with a fixed seed, for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    /// Builds the example named by `tag`. Unknown tags yield `None`.
    pub fn create(&mut self, doc: &mut Document, tag: &str, config: ExampleConfig) -> Option<NodeId> {
        Example::from_tag(tag, config).map(|example| self.build(doc, &example))
    }

    /// Builds a detached element subtree for `example`.
    pub fn build(&mut self, doc: &mut Document, example: &Example) -> NodeId {
        match example {
            Example::Button(config) => self.button(doc, config),
            Example::Badge(config) => self.badge(doc, config),
            Example::Checkbox(config) => self.choice(doc, config, "checkbox"),
            Example::Radio(config) => self.choice(doc, config, "radio"),
            Example::Input(config) => self.input(doc, config),
            Example::Alert(config) => self.alert(doc, config),
        }
    }

    /// `<prefix>-` followed by a random lowercase base-36 suffix, never
    /// repeated by this factory nor already present in `doc`.
    pub fn generate_id(&mut self, doc: &Document, prefix: &str) -> String {
        loop {
            let suffix: String = (&mut self.rng)
                .sample_iter(&Alphanumeric)
                .take(ID_SUFFIX_LEN)
                .map(|b| (b as char).to_ascii_lowercase())
                .collect();
            let id = format!("{}-{}", prefix, suffix);
            if doc.get_element_by_id(&id).is_none() && self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    fn button(&mut self, doc: &mut Document, config: &ButtonConfig) -> NodeId {
        let button = doc.create_element("button");
        doc.add_class(button, "btn");
        add_classes(doc, button, config.variant.as_deref().unwrap_or("btn-primary"));
        if let Some(size) = &config.size {
            add_classes(doc, button, size);
        }
        doc.set_text_content(button, config.text.as_deref().unwrap_or("Button"));

        if let Some(icon) = &config.icon {
            prepend_icon(doc, button, icon);
        }
        if config.disabled {
            doc.set_flag(button, "disabled", true);
        }
        if config.loading {
            doc.add_class(button, "loading");
        }
        button
    }

    fn badge(&mut self, doc: &mut Document, config: &BadgeConfig) -> NodeId {
        let badge = doc.create_element("span");
        doc.add_class(badge, "badge");
        add_classes(doc, badge, config.variant.as_deref().unwrap_or("badge-primary"));
        doc.set_text_content(badge, config.text.as_deref().unwrap_or("Badge"));

        if let Some(icon) = &config.icon {
            prepend_icon(doc, badge, icon);
        }
        badge
    }

    /// Checkbox and radio share a structure; `kind` is the class prefix and
    /// the input type.
    fn choice(&mut self, doc: &mut Document, config: &ChoiceConfig, kind: &str) -> NodeId {
        let wrapper = doc.create_element("div");
        doc.add_class(wrapper, kind);

        let input = doc.create_element("input");
        doc.set_attr(input, "type", kind);
        doc.add_class(input, &format!("{}-input", kind));
        if kind == "radio" {
            doc.set_attr(input, "name", config.name.as_deref().unwrap_or("radio-group"));
        }
        let id = match &config.id {
            Some(id) => id.clone(),
            None => self.generate_id(doc, kind),
        };
        doc.set_attr(input, "id", &id);

        let content = doc.create_element("div");
        doc.add_class(content, &format!("{}-content", kind));

        let label = doc.create_element("label");
        doc.add_class(label, &format!("{}-label", kind));
        doc.set_attr(label, "for", &id);
        let default_label = if kind == "radio" { "Radio Label" } else { "Checkbox Label" };
        doc.set_text_content(label, config.label.as_deref().unwrap_or(default_label));
        doc.append_child(content, label);

        if let Some(description) = &config.description {
            let desc = doc.create_element("div");
            doc.add_class(desc, &format!("{}-description", kind));
            doc.set_text_content(desc, description);
            doc.append_child(content, desc);
        }

        doc.append_child(wrapper, input);
        doc.append_child(wrapper, content);
        wrapper
    }

    fn input(&mut self, doc: &mut Document, config: &InputConfig) -> NodeId {
        let wrapper = doc.create_element("div");
        doc.add_class(wrapper, "form-group");

        if let Some(text) = &config.label {
            let label = doc.create_element("label");
            doc.add_class(label, "form-label");
            doc.set_text_content(label, text);
            doc.append_child(wrapper, label);
        }

        let input = doc.create_element("input");
        doc.add_class(input, "form-input");
        doc.set_attr(input, "type", config.input_type.as_deref().unwrap_or("text"));
        doc.set_attr(input, "placeholder", config.placeholder.as_deref().unwrap_or(""));
        if config.disabled {
            doc.set_flag(input, "disabled", true);
        }
        doc.append_child(wrapper, input);
        wrapper
    }

    fn alert(&mut self, doc: &mut Document, config: &AlertConfig) -> NodeId {
        let alert = doc.create_element("div");
        doc.add_class(alert, "alert");
        add_classes(doc, alert, config.variant.as_deref().unwrap_or("alert-info"));
        doc.set_text_content(alert, config.message.as_deref().unwrap_or("This is an alert message."));
        alert
    }
}

fn add_classes(doc: &mut Document, node: NodeId, classes: &str) {
    for class in classes.split_whitespace() {
        doc.add_class(node, class);
    }
}

fn prepend_icon(doc: &mut Document, node: NodeId, icon_classes: &str) {
    let icon = doc.create_element("i");
    add_classes(doc, icon, icon_classes);
    doc.prepend_child(node, icon);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::to_html;

    fn config() -> ExampleConfig {
        ExampleConfig::default()
    }

    #[test]
    fn test_every_known_tag_builds() {
        let mut doc = Document::new("http://localhost/");
        let mut factory = ExampleFactory::with_seed(7);
        for kind in ExampleKind::ALL {
            assert_eq!(ExampleKind::from_tag(kind.tag()), Some(kind));
            assert!(factory.create(&mut doc, kind.tag(), config()).is_some());
        }
    }

    #[test]
    fn test_unknown_tag_yields_nothing() {
        let mut doc = Document::new("http://localhost/");
        let mut factory = ExampleFactory::with_seed(7);
        assert!(factory.create(&mut doc, "Button", config()).is_none());
        assert!(factory.create(&mut doc, "", config()).is_none());
    }

    #[test]
    fn test_button_with_icon_size_and_state() {
        let mut doc = Document::new("http://localhost/");
        let mut factory = ExampleFactory::with_seed(7);
        let button = factory
            .create(
                &mut doc,
                "button",
                ExampleConfig {
                    variant: Some("btn-secondary".into()),
                    size: Some("btn-sm".into()),
                    text: Some("Send".into()),
                    icon: Some("fas fa-paper-plane".into()),
                    disabled: true,
                    loading: true,
                    ..config()
                },
            )
            .unwrap();

        assert_eq!(
            to_html(&doc, button),
            r#"<button class="btn btn-secondary btn-sm loading" disabled><i class="fas fa-paper-plane"></i>Send</button>"#
        );
    }

    #[test]
    fn test_badge_defaults() {
        let mut doc = Document::new("http://localhost/");
        let mut factory = ExampleFactory::with_seed(7);
        let badge = factory.create(&mut doc, "badge", config()).unwrap();
        assert_eq!(to_html(&doc, badge), r#"<span class="badge badge-primary">Badge</span>"#);
    }

    #[test]
    fn test_checkbox_structure_and_generated_id() {
        let mut doc = Document::new("http://localhost/");
        let mut factory = ExampleFactory::with_seed(7);
        let wrapper = factory
            .create(
                &mut doc,
                "checkbox",
                ExampleConfig {
                    description: Some("We never spam".into()),
                    ..config()
                },
            )
            .unwrap();

        let input = doc.find_class(wrapper, "checkbox-input").unwrap();
        let id = doc.attr(input, "id").unwrap().to_string();
        assert!(id.starts_with("checkbox-"));
        assert_eq!(id.len(), "checkbox-".len() + ID_SUFFIX_LEN);
        assert!(id["checkbox-".len()..].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

        let label = doc.find_class(wrapper, "checkbox-label").unwrap();
        assert_eq!(doc.attr(label, "for"), Some(id.as_str()));
        assert_eq!(doc.text_content(label), "Checkbox Label");
        assert!(doc.find_class(wrapper, "checkbox-description").is_some());
    }

    #[test]
    fn test_radio_uses_name_and_explicit_id() {
        let mut doc = Document::new("http://localhost/");
        let mut factory = ExampleFactory::with_seed(7);
        let wrapper = factory
            .create(
                &mut doc,
                "radio",
                ExampleConfig {
                    id: Some("size-m".into()),
                    name: Some("size".into()),
                    label: Some("Medium".into()),
                    ..config()
                },
            )
            .unwrap();

        assert_eq!(
            to_html(&doc, wrapper),
            concat!(
                r#"<div class="radio"><input id="size-m" class="radio-input" type="radio" name="size">"#,
                r#"<div class="radio-content"><label class="radio-label" for="size-m">Medium</label></div></div>"#
            )
        );
    }

    #[test]
    fn test_input_and_alert() {
        let mut doc = Document::new("http://localhost/");
        let mut factory = ExampleFactory::with_seed(7);
        let input = factory
            .create(
                &mut doc,
                "input",
                ExampleConfig {
                    label: Some("Email".into()),
                    input_type: Some("email".into()),
                    placeholder: Some("you@example.com".into()),
                    ..config()
                },
            )
            .unwrap();
        assert_eq!(
            to_html(&doc, input),
            r#"<div class="form-group"><label class="form-label">Email</label><input class="form-input" type="email" placeholder="you@example.com"></div>"#
        );

        let alert = factory.create(&mut doc, "alert", config()).unwrap();
        assert_eq!(
            to_html(&doc, alert),
            r#"<div class="alert alert-info">This is an alert message.</div>"#
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let doc = Document::new("http://localhost/");
        let mut factory = ExampleFactory::with_seed(1);
        let ids: HashSet<String> = (0..500).map(|_| factory.generate_id(&doc, "radio")).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_config_deserializes_type_field() {
        let config: ExampleConfig =
            serde_json::from_str(r#"{ "type": "password", "disabled": true }"#).unwrap();
        assert_eq!(config.input_type.as_deref(), Some("password"));
        assert!(config.disabled);
        assert_eq!(Example::from_tag("input", config).map(|e| e.kind()), Some(ExampleKind::Input));
    }
}
