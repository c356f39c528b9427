//! Page description files.
//!
//! A page is described as JSON and built into a [`Document`]:
//!
//! ```json
//! {
//!   "location": "https://docs.pawablox.dev/components/buttons.html",
//!   "title": "Buttons",
//!   "body": [
//!     { "tag": "button", "id": "sidebarToggle", "text": "Menu" },
//!     { "tag": "input", "attrs": { "required": true, "value": "" } }
//!   ]
//! }
//! ```
//!
//! Boolean attributes are present when `true` and omitted when `false`.
//! Attribute order follows the file.

use crate::dom::{Document, NodeId};
use crate::error::PageError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    /// Absolute URL of the page, used to resolve navigation links
    pub location: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attrs: serde_json::Map<String, serde_json::Value>,
    /// Leading text, placed before `children`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl PageSpec {
    /// Builds a live document from this description.
    pub fn build(&self) -> Result<Document, PageError> {
        let mut doc = Document::new(self.location.clone());
        doc.set_title(self.title.clone());

        let mut seen_ids = HashSet::new();
        let body = doc.body();
        for node in &self.body {
            build_node(&mut doc, body, node, &mut seen_ids)?;
        }
        Ok(doc)
    }
}

fn build_node(
    doc: &mut Document,
    parent: NodeId,
    desc: &NodeSpec,
    seen_ids: &mut HashSet<String>,
) -> Result<NodeId, PageError> {
    if desc.tag.trim().is_empty() {
        return Err(PageError::EmptyTag);
    }

    let node = doc.create_element(desc.tag.trim());

    if let Some(id) = &desc.id {
        if !seen_ids.insert(id.clone()) {
            return Err(PageError::DuplicateId(id.clone()));
        }
        doc.set_attr(node, "id", id);
    }

    for class in &desc.class {
        doc.add_class(node, class);
    }

    for (name, value) in &desc.attrs {
        let value = match value {
            serde_json::Value::Bool(on) => {
                doc.set_flag(node, name, *on);
                continue;
            }
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if name == "id" && desc.id.as_ref() != Some(&value) && !seen_ids.insert(value.clone()) {
            return Err(PageError::DuplicateId(value));
        }
        doc.set_attr(node, name, &value);
    }

    if !desc.text.is_empty() {
        let text = doc.create_text(&desc.text);
        doc.append_child(node, text);
    }

    for child in &desc.children {
        build_node(doc, node, child, seen_ids)?;
    }

    doc.append_child(parent, node);
    Ok(node)
}

/// Parses a page description and builds its document.
pub fn parse_page(json: &str) -> Result<Document, PageError> {
    let page: PageSpec = serde_json::from_str(json)?;
    page.build()
}

/// Reads and builds a page description file.
pub fn load_page(path: &Path) -> Result<Document, PageError> {
    let json = std::fs::read_to_string(path).map_err(|source| PageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_page(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_simple_page() {
        let doc = parse_page(
            r#"{
                "location": "https://docs.example/buttons.html",
                "title": "Buttons",
                "body": [
                    { "tag": "DIV", "id": "sidebar", "class": ["sidebar"],
                      "children": [ { "tag": "a", "attrs": { "href": "/buttons.html" }, "text": "Buttons" } ] }
                ]
            }"#,
        )
        .unwrap();

        let sidebar = doc.get_element_by_id("sidebar").unwrap();
        assert_eq!(doc.tag(sidebar), Some("div"));
        assert!(doc.has_class(sidebar, "sidebar"));
        assert_eq!(doc.text_content(sidebar), "Buttons");
        assert_eq!(doc.title(), "Buttons");
    }

    #[test]
    fn test_attribute_values_are_normalized() {
        let doc = parse_page(
            r#"{ "location": "http://localhost/", "body": [
                { "tag": "input", "id": "f", "attrs": { "required": true, "disabled": false, "maxlength": 8, "value": "x" } }
            ] }"#,
        )
        .unwrap();

        let field = doc.get_element_by_id("f").unwrap();
        assert!(doc.has_attr(field, "required"));
        assert!(!doc.has_attr(field, "disabled"));
        assert_eq!(doc.attr(field, "maxlength"), Some("8"));
        assert_eq!(doc.value(field), "x");
        let names: Vec<&str> = doc.element(field).unwrap().attrs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["id", "required", "maxlength", "value"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = parse_page(
            r#"{ "location": "http://localhost/", "body": [
                { "tag": "div", "id": "x" }, { "tag": "div", "children": [ { "tag": "span", "id": "x" } ] }
            ] }"#,
        );
        assert!(matches!(result, Err(PageError::DuplicateId(id)) if id == "x"));
    }

    #[test]
    fn test_duplicate_id_in_attrs_rejected() {
        let result = parse_page(
            r#"{ "location": "http://localhost/", "body": [
                { "tag": "div", "id": "panel" },
                { "tag": "section", "attrs": { "id": "panel" } }
            ] }"#,
        );
        assert!(matches!(result, Err(PageError::DuplicateId(id)) if id == "panel"));

        let result = parse_page(
            r#"{ "location": "http://localhost/", "body": [
                { "tag": "section", "attrs": { "id": "panel" } },
                { "tag": "div", "id": "panel" }
            ] }"#,
        );
        assert!(matches!(result, Err(PageError::DuplicateId(id)) if id == "panel"));

        let doc = parse_page(
            r#"{ "location": "http://localhost/", "body": [ { "tag": "div", "id": "panel", "attrs": { "id": "panel" } } ] }"#,
        )
        .unwrap();
        assert!(doc.get_element_by_id("panel").is_some());
    }

    #[test]
    fn test_page_serializes_to_expected_html() {
        let doc = parse_page(
            r#"{ "location": "http://localhost/", "body": [
                { "tag": "form", "id": "signup", "class": ["card", "form"],
                  "attrs": { "action": "/join", "novalidate": true, "hidden": false },
                  "text": "Fish & <chips>",
                  "children": [
                    { "tag": "label", "attrs": { "for": "name" }, "text": "Name \"first\"" },
                    { "tag": "input", "id": "name", "class": ["form-input"],
                      "attrs": { "type": "text", "required": true, "maxlength": 40, "style": "border-color: red" } },
                    { "tag": "ul", "children": [ { "tag": "li", "text": "one" }, { "tag": "li", "text": "two" } ] }
                  ] }
            ] }"#,
        )
        .unwrap();

        let form = doc.get_element_by_id("signup").unwrap();
        assert_eq!(
            crate::dom::to_html(&doc, form),
            concat!(
                r#"<form id="signup" class="card form" action="/join" novalidate>Fish &amp; &lt;chips&gt;"#,
                r#"<label for="name">Name &quot;first&quot;</label>"#,
                r#"<input id="name" class="form-input" type="text" required maxlength="40" style="border-color: red">"#,
                r#"<ul><li>one</li><li>two</li></ul></form>"#,
            )
        );
    }

    #[test]
    fn test_empty_tag_rejected() {
        let result = parse_page(r#"{ "location": "http://localhost/", "body": [ { "tag": " " } ] }"#);
        assert!(matches!(result, Err(PageError::EmptyTag)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_page(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("here.json"));
    }
}
