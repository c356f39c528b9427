//! Live document tree.
//!
//! An arena of element and text nodes addressed by [`NodeId`]. Ids are never
//! reused, so a stale id held by a timer either points at the node it was
//! issued for or at nothing at all.

use std::borrow::Cow;
use std::collections::HashMap;

/// Handle of a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Raw numeric value, stable for the lifetime of the document.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Element payload: tag, classes, attributes and inline style.
///
/// Classes, attributes and style declarations keep insertion order so that
/// serialized markup is stable.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    style: Vec<(String, String)>,
}

impl ElementData {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn style(&self) -> &[(String, String)] {
        &self.style
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The page the coordinator binds to.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: HashMap<NodeId, Node>,
    body: NodeId,
    next_id: u64,
    location: String,
    title: String,
    focused: Option<NodeId>,
    selection: Option<NodeId>,
}

impl Document {
    /// Creates an empty document whose page URL is `location`.
    pub fn new(location: impl Into<String>) -> Self {
        let mut doc = Self {
            nodes: HashMap::new(),
            body: NodeId(0),
            next_id: 0,
            location: location.into(),
            title: String::new(),
            focused: None,
            selection: None,
        };
        doc.body = doc.create_element("body");
        doc
    }

    // ===== Document Queries =====

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Full URL of the page.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns true while `node` exists in the arena (attached or not).
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Returns true if `node` is reachable from the body.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.ancestors(node).any(|n| n == self.body)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(&node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(&node).map(|n| &n.kind)
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.kind(node) {
            Some(NodeKind::Element(data)) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(&node).map(|n| &mut n.kind) {
            Some(NodeKind::Element(data)) => Some(data),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    /// Tag name of an element, `None` for text nodes and unknown ids.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    /// Iterates from `node` up to the root, starting with `node` itself.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.contains(node).then_some(node);
        std::iter::successors(start, move |n| self.parent(*n))
    }

    /// Element descendants of `root` in document order, excluding `root`.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.is_element(node) {
                out.push(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    // ===== Selectors =====

    /// Attached element with the given `id` attribute (first in document order).
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    /// Elements under `root` carrying `class`.
    pub fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Elements under `root` with the given tag.
    pub fn query_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.tag(*n) == Some(tag))
            .collect()
    }

    /// First element under `root` carrying `class`.
    pub fn find_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|n| self.has_class(*n, class))
    }

    /// Nearest element carrying `class`, starting at `node` itself.
    pub fn closest_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.ancestors(node).find(|n| self.has_class(*n, class))
    }

    // ===== Tree Mutations =====

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                kind,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            ..ElementData::default()
        }))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    /// Appends `child` as the last child of `parent`, moving it if attached
    /// elsewhere. Ignored if either node is unknown or if it would create a
    /// cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_child(parent, child, None);
    }

    /// Inserts `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_child(parent, child, Some(0));
    }

    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if !self.contains(parent) || !self.contains(child) || self.ancestors(parent).any(|n| n == child) {
            return;
        }

        self.detach(child);

        if let Some(node) = self.nodes.get_mut(&parent) {
            match index {
                Some(i) => node.children.insert(i.min(node.children.len()), child),
                None => node.children.push(child),
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }

    /// Unlinks `node` from its parent. The node and its subtree stay in the
    /// arena and can be re-attached.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != node);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = None;
        }
    }

    /// Unlinks `node` and drops it together with its subtree. Removing an
    /// unknown id is a no-op; the body cannot be removed.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body || !self.contains(node) {
            return;
        }
        self.detach(node);

        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&n) {
                stack.extend(removed.children);
            }
            if self.focused == Some(n) {
                self.focused = None;
            }
            if self.selection == Some(n) {
                self.selection = None;
            }
        }
    }

    // ===== Classes =====

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|e| e.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.element_mut(node) {
            if !e.classes.iter().any(|c| c == class) {
                e.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.element_mut(node) {
            e.classes.retain(|c| c != class);
        }
    }

    /// Adds or removes `class` depending on `on`.
    pub fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Flips `class` and returns whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let on = !self.has_class(node, class);
        self.set_class(node, class, on);
        on
    }

    // ===== Attributes =====

    /// Attribute value. `class` and `style` live in their own lists and are
    /// never returned here.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| {
            e.attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        })
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    /// Sets an attribute. `class` replaces the class list and `style`
    /// replaces the inline declarations.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "class" {
            if let Some(e) = self.element_mut(node) {
                e.classes = value.split_whitespace().map(str::to_string).collect();
            }
            return;
        }
        if name == "style" {
            if let Some(e) = self.element_mut(node) {
                e.style = value
                    .split(';')
                    .filter_map(|decl| decl.split_once(':'))
                    .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                    .filter(|(k, v)| !k.is_empty() && !v.is_empty())
                    .collect();
            }
            return;
        }
        if let Some(e) = self.element_mut(node) {
            match e.attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => e.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(e) = self.element_mut(node) {
            e.attrs.retain(|(k, _)| k != name);
        }
    }

    /// Sets or clears a boolean attribute (`required`, `checked`, `disabled`).
    pub fn set_flag(&mut self, node: NodeId, name: &str, on: bool) {
        if on {
            self.set_attr(node, name, "");
        } else {
            self.remove_attr(node, name);
        }
    }

    /// Current value of a form control, empty when unset.
    ///
    /// A `textarea` without a `value` attribute reads its child text.
    pub fn value(&self, node: NodeId) -> Cow<'_, str> {
        match self.attr(node, "value") {
            Some(value) => Cow::Borrowed(value),
            None if self.tag(node) == Some("textarea") => Cow::Owned(self.text_content(node)),
            None => Cow::Borrowed(""),
        }
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.set_attr(node, "value", value);
    }

    pub fn is_checked(&self, node: NodeId) -> bool {
        self.has_attr(node, "checked")
    }

    // ===== Inline Style =====

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node).and_then(|e| {
            e.style
                .iter()
                .find(|(k, _)| k == property)
                .map(|(_, v)| v.as_str())
        })
    }

    /// Sets an inline style declaration; an empty value removes it.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(e) = self.element_mut(node) {
            if value.is_empty() {
                e.style.retain(|(k, _)| k != property);
                return;
            }
            match e.style.iter_mut().find(|(k, _)| k == property) {
                Some((_, v)) => *v = value.to_string(),
                None => e.style.push((property.to_string(), value.to_string())),
            }
        }
    }

    // ===== Text =====

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => out.push_str(text),
            Some(NodeKind::Element(_)) => {
                for child in self.children(node) {
                    self.collect_text(*child, out);
                }
            }
            None => {}
        }
    }

    /// Replaces all children of `node` with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        if !self.is_element(node) {
            return;
        }
        for child in self.children(node).to_vec() {
            self.remove(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(node, text_node);
        }
    }

    // ===== Focus and Selection =====

    pub fn focus(&mut self, node: NodeId) {
        if self.contains(node) {
            self.focused = Some(node);
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Selects the whole value of a text control.
    pub fn select(&mut self, node: NodeId) {
        if self.contains(node) {
            self.selection = Some(node);
        }
    }

    /// Text of the current selection, if a control is selected.
    pub fn selected_text(&self) -> Option<Cow<'_, str>> {
        self.selection.map(|n| self.value(n))
    }
}
