use anyhow::Result;
use pawablox::app::forms::field_error;
use pawablox::{
    parse_page, CopyOutcome, CoordinatorConfig, Document, Event, MemoryClipboard, NodeId,
    NotificationKind, UiStateCoordinator,
};
use std::time::Duration;

const PAGE: &str = r##"{
    "location": "https://docs.pawablox.dev/components/buttons.html",
    "title": "Buttons",
    "body": [
        { "tag": "button", "id": "sidebarToggle", "text": "Menu" },
        { "tag": "div", "id": "overlay", "class": ["overlay"] },
        { "tag": "aside", "id": "sidebar", "class": ["sidebar"], "children": [
            { "tag": "ul", "class": ["nav-menu"], "children": [
                { "tag": "li", "children": [ { "tag": "a", "attrs": { "href": "/index.html" }, "text": "Home" } ] },
                { "tag": "li", "id": "foundations", "class": ["nav-group"], "children": [
                    { "tag": "div", "class": ["nav-group-header"], "children": [ { "tag": "span", "text": "Foundations" } ] },
                    { "tag": "ul", "class": ["nav-submenu"], "children": [
                        { "tag": "li", "children": [ { "tag": "a", "attrs": { "href": "/foundations/colors.html" }, "text": "Colors" } ] }
                    ] }
                ] },
                { "tag": "li", "id": "components", "class": ["nav-group"], "children": [
                    { "tag": "div", "class": ["nav-group-header"], "text": "Components" },
                    { "tag": "ul", "class": ["nav-submenu"], "children": [
                        { "tag": "li", "children": [ { "tag": "a", "id": "buttons-link", "attrs": { "href": "buttons.html" }, "text": "Buttons" } ] },
                        { "tag": "li", "children": [ { "tag": "a", "attrs": { "href": "/components/buttons.html/extra" }, "text": "Extra" } ] }
                    ] }
                ] }
            ] }
        ] },
        { "tag": "main", "children": [
            { "tag": "div", "class": ["tabs"], "children": [
                { "tag": "button", "id": "tab-preview", "class": ["tab-button"], "attrs": { "data-tab": "preview" }, "text": "Preview" },
                { "tag": "button", "id": "tab-code", "class": ["tab-button"], "attrs": { "data-tab": "code" }, "text": "Code" },
                { "tag": "button", "id": "tab-missing", "class": ["tab-button"], "attrs": { "data-tab": "nowhere" }, "text": "Missing" },
                { "tag": "div", "id": "preview", "class": ["tab-content"], "text": "preview" },
                { "tag": "div", "id": "code", "class": ["tab-content"], "children": [
                    { "tag": "button", "id": "copy", "class": ["copy-btn"], "attrs": { "data-copy": "<button class=\"btn\">" },
                      "children": [ { "tag": "i", "class": ["fas", "fa-copy"] } ] }
                ] }
            ] },
            { "tag": "div", "id": "swatch", "class": ["color-swatch"], "children": [
                { "tag": "div", "class": ["color-preview"] },
                { "tag": "span", "class": ["color-value"], "text": " #FF0000 " }
            ] },
            { "tag": "div", "id": "terms", "class": ["checkbox"], "children": [
                { "tag": "input", "id": "terms-input", "class": ["checkbox-input"], "attrs": { "type": "checkbox" } },
                { "tag": "div", "class": ["checkbox-content"], "children": [
                    { "tag": "label", "id": "terms-label", "class": ["checkbox-label"], "text": "Accept" }
                ] }
            ] },
            { "tag": "div", "id": "size-s", "class": ["radio"], "children": [
                { "tag": "input", "id": "size-s-input", "class": ["radio-input"], "attrs": { "type": "radio", "name": "size", "checked": true } },
                { "tag": "label", "text": "Small" }
            ] },
            { "tag": "div", "id": "size-l", "class": ["radio"], "children": [
                { "tag": "input", "id": "size-l-input", "class": ["radio-input"], "attrs": { "type": "radio", "name": "size" } },
                { "tag": "label", "id": "size-l-label", "text": "Large" }
            ] },
            { "tag": "form", "id": "signup", "children": [
                { "tag": "div", "class": ["form-group"], "children": [
                    { "tag": "input", "id": "field-a", "attrs": { "required": true, "value": "" } }
                ] },
                { "tag": "div", "class": ["form-group"], "children": [
                    { "tag": "input", "id": "field-b", "attrs": { "value": "x" } }
                ] },
                { "tag": "button", "id": "submit", "attrs": { "type": "submit" }, "text": "Sign up" }
            ] }
        ] }
    ]
}"##;

fn coordinator_with(clipboard: MemoryClipboard, width: f32) -> Result<UiStateCoordinator<MemoryClipboard>> {
    let doc = parse_page(PAGE)?;
    let mut coordinator = UiStateCoordinator::new(doc, clipboard, CoordinatorConfig::default(), width);
    coordinator.bind();
    Ok(coordinator)
}

fn id(c: &UiStateCoordinator<MemoryClipboard>, element_id: &str) -> NodeId {
    c.document().get_element_by_id(element_id).unwrap()
}

fn toasts(doc: &Document) -> Vec<NodeId> {
    doc.query_class(doc.body(), "toast")
}

fn active_count(doc: &Document, nodes: &[NodeId]) -> usize {
    nodes.iter().filter(|n| doc.has_class(**n, "active")).count()
}

#[test]
fn test_bind_establishes_initial_state() -> Result<()> {
    let c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let doc = c.document();

    assert!(c.is_bound());
    assert!(!c.is_sidebar_open());
    assert!(!c.is_overlay_visible());
    assert!(doc.has_class(id(&c, "tab-preview"), "active"));
    assert!(doc.has_class(id(&c, "preview"), "active"));
    assert!(!doc.has_class(id(&c, "code"), "active"));
    for group in c.nav_groups() {
        assert!(doc.has_class(*group, "open"));
    }
    Ok(())
}

#[test]
fn test_narrow_bind_leaves_groups_collapsed_except_active_page() -> Result<()> {
    let c = coordinator_with(MemoryClipboard::new(), 500.0)?;
    let doc = c.document();

    assert!(!doc.has_class(id(&c, "foundations"), "open"));
    // The current page lives in this group, so it is forced open
    assert!(doc.has_class(id(&c, "components"), "open"));
    Ok(())
}

#[test]
fn test_second_bind_is_ignored() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let before = c.subscriptions().len();
    c.bind();
    assert_eq!(c.subscriptions().len(), before);
    Ok(())
}

#[test]
fn test_active_nav_link_is_exact_path_match() -> Result<()> {
    let c = coordinator_with(MemoryClipboard::new(), 500.0)?;
    let doc = c.document();

    let active: Vec<NodeId> = c
        .state()
        .nav
        .links()
        .iter()
        .copied()
        .filter(|l| doc.has_class(*l, "active"))
        .collect();
    assert_eq!(active, vec![id(&c, "buttons-link")]);
    assert_eq!(c.state().nav.active_link(), Some(id(&c, "buttons-link")));
    Ok(())
}

#[test]
fn test_select_tab_keeps_exactly_one_active() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let set = c.tab_sets()[0].clone();

    for target in ["tab-code", "tab-preview", "tab-code"] {
        let button = id(&c, target);
        c.dispatch(Event::click(button));
        let doc = c.document();
        assert_eq!(active_count(doc, set.buttons()), 1);
        assert!(doc.has_class(button, "active"));
        assert_eq!(active_count(doc, set.contents()), 1);
    }
    assert!(c.document().has_class(id(&c, "code"), "active"));
    Ok(())
}

#[test]
fn test_select_tab_without_content_shows_nothing() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let set = c.tab_sets()[0].clone();

    assert!(c.select_tab("nowhere"));
    let doc = c.document();
    assert_eq!(active_count(doc, set.buttons()), 1);
    assert!(doc.has_class(id(&c, "tab-missing"), "active"));
    assert_eq!(active_count(doc, set.contents()), 0);

    assert!(!c.select_tab("no-such-button"));
    Ok(())
}

#[test]
fn test_toggle_sidebar_keeps_overlay_in_lockstep() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 500.0)?;
    let toggle = id(&c, "sidebarToggle");

    for expected in [true, false, true] {
        c.dispatch(Event::click(toggle));
        assert_eq!(c.is_sidebar_open(), expected);
        assert_eq!(c.is_overlay_visible(), c.is_sidebar_open());
    }

    // Overlay always closes, never toggles
    let overlay = id(&c, "overlay");
    c.dispatch(Event::click(overlay));
    assert!(!c.is_sidebar_open());
    c.dispatch(Event::click(overlay));
    assert!(!c.is_sidebar_open());
    assert!(!c.is_overlay_visible());
    Ok(())
}

#[test]
fn test_nav_groups_toggle_independently() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 500.0)?;
    let foundations = id(&c, "foundations");
    let components = id(&c, "components");
    let header_label = c
        .document()
        .query_tag(foundations, "span")
        .first()
        .copied()
        .unwrap();

    // Click lands on the label inside the header and bubbles up
    c.dispatch(Event::click(header_label));
    assert!(c.document().has_class(foundations, "open"));
    assert!(c.document().has_class(components, "open"));

    assert!(!c.toggle_nav_group(components));
    assert!(c.document().has_class(foundations, "open"));
    Ok(())
}

#[test]
fn test_resize_to_wide_forces_reset() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 500.0)?;
    c.toggle_sidebar();
    let components = id(&c, "components");
    c.toggle_nav_group(components);
    assert!(c.is_sidebar_open());

    c.on_viewport_resize(900.0);

    assert!(!c.is_sidebar_open());
    assert!(!c.is_overlay_visible());
    for group in c.nav_groups() {
        assert!(c.document().has_class(*group, "open"));
    }
    Ok(())
}

#[test]
fn test_resize_below_breakpoint_changes_nothing() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 500.0)?;
    c.toggle_sidebar();
    let foundations = id(&c, "foundations");

    c.on_viewport_resize(600.0);
    c.on_viewport_resize(768.0);

    assert!(c.is_sidebar_open());
    assert!(c.is_overlay_visible());
    assert!(!c.document().has_class(foundations, "open"));
    Ok(())
}

#[test]
fn test_notify_twice_leaves_one_toast_with_second_message() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let first = c.notify("first", NotificationKind::Success);
    let second = c.notify("second", NotificationKind::Warning);

    let doc = c.document();
    assert_eq!(toasts(doc), vec![second]);
    assert!(!doc.contains(first));
    assert_eq!(doc.text_content(second), "second");
    assert!(doc.has_class(second, "toast-warning"));
    assert_eq!(doc.style(second, "background-color"), Some("var(--pw-orange-600)"));
    assert_eq!(c.current_notification(), Some(second));
    Ok(())
}

#[test]
fn test_toast_lifecycle_timings() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let toast = c.notify("hello", NotificationKind::Success);
    assert_eq!(c.document().style(toast, "transform"), Some("translateY(100px)"));

    c.advance(Duration::from_millis(99));
    assert_eq!(c.document().style(toast, "transform"), Some("translateY(100px)"));
    c.advance(Duration::from_millis(1));
    assert_eq!(c.document().style(toast, "transform"), Some("translateY(0)"));

    c.advance(Duration::from_millis(2900));
    assert_eq!(c.document().style(toast, "transform"), Some("translateY(100px)"));
    assert!(c.document().is_attached(toast));

    c.advance(Duration::from_millis(299));
    assert!(c.document().is_attached(toast));
    c.advance(Duration::from_millis(1));
    assert!(!c.document().contains(toast));
    assert_eq!(c.current_notification(), None);
    assert_eq!(c.pending_tasks(), 0);
    Ok(())
}

#[test]
fn test_superseded_toast_timers_are_harmless() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    c.notify("old", NotificationKind::Success);
    c.advance(Duration::from_secs(2));
    let fresh = c.notify("new", NotificationKind::Success);

    // The old toast's exit fires at 3s; the new one must survive it
    c.advance(Duration::from_millis(1500));
    assert!(c.document().is_attached(fresh));
    assert_eq!(c.current_notification(), Some(fresh));

    // The new toast leaves 3.3s after its own insertion
    c.advance(Duration::from_millis(1800));
    assert!(!c.document().contains(fresh));
    assert_eq!(c.current_notification(), None);
    Ok(())
}

#[test]
fn test_copy_without_clipboard_api_uses_legacy_path() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::legacy_only(), 1024.0)?;
    let swatch = id(&c, "swatch");
    let before = c.document().descendants(c.document().body()).len();

    c.dispatch(Event::click(swatch));

    assert_eq!(c.clipboard().contents(), Some("#FF0000"));
    assert_eq!(c.clipboard().legacy_copies(), 1);
    let toast = c.current_notification().unwrap();
    assert!(c.document().text_content(toast).contains("#FF0000"));

    // The off-screen text area is gone again; only the toast was added
    let doc = c.document();
    assert!(doc.query_tag(doc.body(), "textarea").is_empty());
    assert_eq!(doc.descendants(doc.body()).len(), before + 1);
    Ok(())
}

#[test]
fn test_copy_to_clipboard_primary_path() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    assert_eq!(c.copy_to_clipboard("#FF0000"), CopyOutcome::Primary);
    assert_eq!(c.clipboard().contents(), Some("#FF0000"));
    let toast = c.current_notification().unwrap();
    assert_eq!(c.document().text_content(toast), "Copied to clipboard!");
    Ok(())
}

#[test]
fn test_copy_failure_is_silent() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::unsupported(), 1024.0)?;
    let copy = id(&c, "copy");

    c.dispatch(Event::click(copy));

    assert_eq!(c.clipboard().contents(), None);
    assert_eq!(c.current_notification(), None);
    assert!(!c.document().has_class(copy, "copied"));
    assert_eq!(c.copy_to_clipboard("x"), CopyOutcome::Failed);
    Ok(())
}

#[test]
fn test_copy_button_pulse_restores_content() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let copy = id(&c, "copy");
    let original_icon = c.document().children(copy).to_vec();

    c.dispatch(Event::click(copy));
    assert_eq!(c.clipboard().contents(), Some("<button class=\"btn\">"));
    {
        let doc = c.document();
        assert!(doc.has_class(copy, "copied"));
        let shown = doc.children(copy);
        assert_eq!(shown.len(), 1);
        assert!(doc.has_class(shown[0], "fa-check"));
    }

    // A second click during the pulse copies again without nesting the swap
    c.advance(Duration::from_secs(1));
    c.dispatch(Event::click(copy));
    assert_eq!(c.clipboard().primary_writes(), 2);

    c.advance(Duration::from_secs(1));
    let doc = c.document();
    assert!(!doc.has_class(copy, "copied"));
    assert_eq!(doc.children(copy), original_icon.as_slice());
    assert!(doc.has_class(original_icon[0], "fa-copy"));
    Ok(())
}

#[test]
fn test_validate_form_annotates_only_empty_mandatory_fields() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let form = id(&c, "signup");
    let a = id(&c, "field-a");
    let b = id(&c, "field-b");

    assert!(!c.validate_form(form));
    {
        let doc = c.document();
        assert!(field_error(doc, a).is_some());
        assert!(field_error(doc, b).is_none());
        assert_eq!(doc.query_class(form, "field-error").len(), 1);
    }

    c.document_mut().set_value(a, "y");
    assert!(c.validate_form(form));
    let doc = c.document();
    assert!(field_error(doc, a).is_none());
    assert!(doc.query_class(form, "field-error").is_empty());
    assert_eq!(doc.style(a, "border-color"), None);
    Ok(())
}

#[test]
fn test_invalid_submit_is_prevented() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let form = id(&c, "signup");

    let outcome = c.dispatch(Event::submit(form));
    assert!(outcome.default_prevented);

    let a = id(&c, "field-a");
    c.document_mut().set_value(a, "filled");
    let outcome = c.dispatch(Event::submit(form));
    assert!(!outcome.default_prevented);
    assert_eq!(outcome.handled, 1);
    Ok(())
}

#[test]
fn test_textarea_with_text_satisfies_required() -> Result<()> {
    let doc = parse_page(
        r#"{ "location": "http://localhost/", "body": [
            { "tag": "form", "id": "feedback", "children": [
                { "tag": "textarea", "id": "notes", "attrs": { "required": true }, "text": "already filled" }
            ] }
        ] }"#,
    )?;
    let mut c = UiStateCoordinator::new(doc, MemoryClipboard::new(), CoordinatorConfig::default(), 1024.0);
    c.bind();
    let form = id(&c, "feedback");
    let notes = id(&c, "notes");

    let outcome = c.dispatch(Event::submit(form));
    assert!(!outcome.default_prevented);
    assert!(field_error(c.document(), notes).is_none());

    c.document_mut().set_value(notes, "  ");
    assert!(c.dispatch(Event::submit(form)).default_prevented);
    assert!(field_error(c.document(), notes).is_some());
    Ok(())
}

#[test]
fn test_composite_checkbox_toggles_unless_input_clicked() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let input = id(&c, "terms-input");
    let label = id(&c, "terms-label");

    c.dispatch(Event::click(label));
    assert!(c.document().is_checked(input));
    c.dispatch(Event::click(label));
    assert!(!c.document().is_checked(input));

    // The input handles its own clicks natively
    c.dispatch(Event::click(input));
    assert!(!c.document().is_checked(input));
    Ok(())
}

#[test]
fn test_composite_radio_checks_and_never_unchecks() -> Result<()> {
    let mut c = coordinator_with(MemoryClipboard::new(), 1024.0)?;
    let small = id(&c, "size-s-input");
    let large = id(&c, "size-l-input");
    let label = id(&c, "size-l-label");

    c.dispatch(Event::click(label));
    assert!(c.document().is_checked(large));
    assert!(!c.document().is_checked(small));

    c.dispatch(Event::click(label));
    assert!(c.document().is_checked(large));
    Ok(())
}

#[test]
fn test_page_without_regions_binds_inert() -> Result<()> {
    let doc = parse_page(r#"{ "location": "not a url", "body": [ { "tag": "p", "text": "plain" } ] }"#)?;
    let mut c = UiStateCoordinator::new(doc, MemoryClipboard::new(), CoordinatorConfig::default(), 1024.0);
    c.bind();

    assert!(c.subscriptions().is_empty());
    assert!(!c.toggle_sidebar());
    assert!(!c.is_overlay_visible());
    assert!(!c.select_tab("anything"));
    c.on_viewport_resize(2000.0);
    let p = c.document().query_tag(c.document().body(), "p")[0];
    assert_eq!(c.dispatch(Event::click(p)).handled, 0);
    Ok(())
}

#[test]
fn test_demo_page_binds() -> Result<()> {
    let doc = parse_page(include_str!("../assets/demo_page.json"))?;
    let mut c = UiStateCoordinator::new(doc, MemoryClipboard::new(), CoordinatorConfig::default(), 1200.0);
    c.bind();

    assert_eq!(c.tab_sets().len(), 1);
    assert_eq!(c.tab_sets()[0].contents().len(), 2);
    assert_eq!(c.nav_groups().len(), 2);
    let active = c.state().nav.active_link().unwrap();
    assert_eq!(c.document().text_content(active), "Buttons");

    let form = c.document().get_element_by_id("signup").unwrap();
    assert!(c.dispatch(Event::submit(form)).default_prevented);
    Ok(())
}
