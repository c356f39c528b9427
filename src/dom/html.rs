//! HTML serialization of document subtrees.

use crate::dom::{Document, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// Serializes `node` and its subtree to HTML markup.
///
/// Attribute order is `id`, `class`, the remaining attributes in insertion
/// order, then `style`. Boolean attributes (empty value) are written bare.
pub fn to_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    match doc.kind(node) {
        Some(NodeKind::Text(text)) => out.push_str(&escape(text)),
        Some(NodeKind::Element(data)) => {
            out.push('<');
            out.push_str(data.tag());

            if let Some(id) = doc.attr(node, "id") {
                write_attr(out, "id", id);
            }
            if !data.classes().is_empty() {
                write_attr(out, "class", &data.classes().join(" "));
            }
            for (name, value) in data.attrs().iter().filter(|(k, _)| k != "id") {
                if value.is_empty() {
                    out.push(' ');
                    out.push_str(name);
                } else {
                    write_attr(out, name, value);
                }
            }
            if !data.style().is_empty() {
                let style = data
                    .style()
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join("; ");
                write_attr(out, "style", &style);
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&data.tag()) {
                return;
            }

            for child in doc.children(node) {
                write_node(doc, *child, out);
            }

            out.push_str("</");
            out.push_str(data.tag());
            out.push('>');
        }
        None => {}
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
