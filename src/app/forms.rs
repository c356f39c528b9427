//! Form behaviour: mandatory-field validation and composite choice controls.
//!
//! Field errors are `div.field-error` elements appended to the field's parent
//! and tagged with `data-field` so that each field owns at most one of them,
//! even when several fields share a parent.

use crate::dom::{Document, NodeId};
use crate::theme::Token;

const FIELD_ERROR_CLASS: &str = "field-error";
const FIELD_KEY_ATTR: &str = "data-field";

/// Validates every `[required]` field under `form`.
///
/// Empty (after trimming) fields get a fresh field error; the others have any
/// existing one cleared. Returns true when all mandatory fields are filled.
/// Nothing is carried over from previous runs.
pub fn validate_form(doc: &mut Document, form: NodeId, message: &str) -> bool {
    let mut valid = true;

    let required: Vec<NodeId> = doc
        .descendants(form)
        .into_iter()
        .filter(|n| doc.has_attr(*n, "required"))
        .collect();

    for field in required {
        if doc.value(field).trim().is_empty() {
            show_field_error(doc, field, message);
            valid = false;
        } else {
            clear_field_error(doc, field);
        }
    }

    valid
}

/// Attaches `message` to `field`, replacing any previous error of that field.
pub fn show_field_error(doc: &mut Document, field: NodeId, message: &str) {
    clear_field_error(doc, field);

    let Some(parent) = doc.parent(field) else {
        return;
    };

    let error = doc.create_element("div");
    doc.add_class(error, FIELD_ERROR_CLASS);
    doc.set_attr(error, FIELD_KEY_ATTR, &field.raw().to_string());
    doc.set_text_content(error, message);
    doc.set_style(error, "color", Token::Red600.css_var());
    doc.set_style(error, "font-size", Token::FontSizeXs.css_var());
    doc.set_style(error, "margin-top", Token::Spacing1.css_var());
    doc.append_child(parent, error);

    doc.set_style(field, "border-color", Token::Red500.css_var());
}

/// Removes the error attached to `field`, if any, and resets its border.
pub fn clear_field_error(doc: &mut Document, field: NodeId) {
    if let Some(error) = field_error(doc, field) {
        doc.remove(error);
    }
    doc.set_style(field, "border-color", "");
}

/// The error element currently attached to `field`.
pub fn field_error(doc: &Document, field: NodeId) -> Option<NodeId> {
    let parent = doc.parent(field)?;
    let key = field.raw().to_string();
    doc.children(parent).iter().copied().find(|n| {
        doc.has_class(*n, FIELD_ERROR_CLASS) && doc.attr(*n, FIELD_KEY_ATTR) == Some(key.as_str())
    })
}

/// Native activation of a choice input, as a click on the input itself
/// performs it: checkboxes flip, radios become checked and uncheck the other
/// radios sharing their `name`. Returns the new checked state.
pub fn activate_choice(doc: &mut Document, input: NodeId) -> bool {
    match doc.attr(input, "type") {
        Some("radio") => {
            check_radio(doc, input);
            true
        }
        _ => {
            let checked = !doc.is_checked(input);
            doc.set_flag(input, "checked", checked);
            checked
        }
    }
}

/// Checks `input` and unchecks the rest of its radio group.
pub fn check_radio(doc: &mut Document, input: NodeId) {
    if let Some(name) = doc.attr(input, "name").map(str::to_string) {
        let body = doc.body();
        let group: Vec<NodeId> = doc
            .query_tag(body, "input")
            .into_iter()
            .filter(|n| *n != input && doc.attr(*n, "type") == Some("radio") && doc.attr(*n, "name") == Some(name.as_str()))
            .collect();
        for other in group {
            doc.set_flag(other, "checked", false);
        }
    }
    doc.set_flag(input, "checked", true);
}
