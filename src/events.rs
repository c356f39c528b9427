//! Event subscriptions.
//!
//! Each interactive region registers an [`Action`] against a node and an event
//! kind at bind time. Dispatch walks from the event target up through its
//! ancestors (bubbling) and collects the actions registered on that path, in
//! path order and then registration order.

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Submit,
}

/// A document event aimed at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Self { kind: EventKind::Click, target }
    }

    pub fn change(target: NodeId) -> Self {
        Self { kind: EventKind::Change, target }
    }

    pub fn submit(target: NodeId) -> Self {
        Self { kind: EventKind::Submit, target }
    }
}

/// Handler registered for a region. Payloads are read from the document when
/// the handler runs, not when it is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Sidebar toggle control clicked
    ToggleSidebar,
    /// Overlay clicked
    CloseSidebar,
    /// Header of a navigation group clicked
    ToggleNavGroup(NodeId),
    /// Tab button clicked
    SelectTab { set: usize, button: NodeId },
    /// Copy button clicked; payload in its `data-copy` attribute
    CopyText(NodeId),
    /// Color swatch clicked; payload in its `.color-value` element
    CopyColor(NodeId),
    /// Composite checkbox clicked
    ToggleCheckbox { input: NodeId },
    /// Composite radio clicked
    CheckRadio { input: NodeId },
    /// Form submitted
    SubmitForm(NodeId),
}

#[derive(Debug, Clone)]
struct Subscription {
    node: NodeId,
    kind: EventKind,
    action: Action,
}

/// Registry of handlers keyed by node and event kind.
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    entries: Vec<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, node: NodeId, kind: EventKind, action: Action) {
        self.entries.push(Subscription { node, kind, action });
    }

    /// Returns true if `node` has a handler for `kind`.
    pub fn has(&self, node: NodeId, kind: EventKind) -> bool {
        self.entries.iter().any(|s| s.node == node && s.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Actions triggered by `event`, following the bubbling path.
    pub fn route(&self, doc: &Document, event: &Event) -> Vec<Action> {
        doc.ancestors(event.target)
            .flat_map(|node| {
                self.entries
                    .iter()
                    .filter(move |s| s.node == node && s.kind == event.kind)
                    .map(|s| s.action)
            })
            .collect()
    }
}
