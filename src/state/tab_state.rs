//! Tab set state.
//!
//! A tab set is the group of `.tab-button` elements sharing the nearest
//! `.tabs` container (or the page, for buttons outside any container),
//! together with the `.tab-content` elements of that container.

use crate::dom::NodeId;

/// One mutually exclusive group of tab buttons and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSet {
    /// `.tabs` container, `None` for the page-level set
    container: Option<NodeId>,
    /// Buttons in document order
    buttons: Vec<NodeId>,
    /// Content regions in document order
    contents: Vec<NodeId>,
}

impl TabSet {
    pub fn new(container: Option<NodeId>) -> Self {
        Self {
            container,
            buttons: Vec::new(),
            contents: Vec::new(),
        }
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    pub fn buttons(&self) -> &[NodeId] {
        &self.buttons
    }

    pub fn contents(&self) -> &[NodeId] {
        &self.contents
    }

    /// First button, activated at bind time.
    pub fn first_button(&self) -> Option<NodeId> {
        self.buttons.first().copied()
    }

    pub fn push_button(&mut self, button: NodeId) {
        self.buttons.push(button);
    }

    pub fn push_content(&mut self, content: NodeId) {
        self.contents.push(content);
    }
}

/// All tab sets found on the page.
///
/// Responsibilities:
/// - Grouping buttons and contents by container
/// - Addressing sets by index for registered handlers
#[derive(Debug, Clone, Default)]
pub struct TabState {
    sets: Vec<TabSet>,
}

impl TabState {
    pub fn new() -> Self {
        Self { sets: Vec::new() }
    }

    pub fn sets(&self) -> &[TabSet] {
        &self.sets
    }

    pub fn get(&self, index: usize) -> Option<&TabSet> {
        self.sets.get(index)
    }

    /// Index of the set for `container`, creating it if needed.
    pub fn set_for(&mut self, container: Option<NodeId>) -> usize {
        if let Some(index) = self.position(container) {
            return index;
        }
        self.sets.push(TabSet::new(container));
        self.sets.len() - 1
    }

    pub fn set_mut(&mut self, index: usize) -> Option<&mut TabSet> {
        self.sets.get_mut(index)
    }

    /// Index of the existing set for `container`.
    pub fn position(&self, container: Option<NodeId>) -> Option<usize> {
        self.sets.iter().position(|s| s.container == container)
    }
}
