//! Navigation state.
//!
//! Holds the handles of the collapsible navigation groups and of the links
//! considered for active-page highlighting. Each group's open flag is the
//! `open` class on its element.

use crate::dom::NodeId;

/// State related to sidebar navigation.
#[derive(Debug, Clone, Default)]
pub struct NavState {
    /// `.nav-group` elements in document order
    groups: Vec<NodeId>,
    /// Links under `.nav-menu` and `.nav-submenu`, without duplicates
    links: Vec<NodeId>,
    /// Link matching the current page, if any
    active_link: Option<NodeId>,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[NodeId] {
        &self.groups
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    pub fn active_link(&self) -> Option<NodeId> {
        self.active_link
    }

    pub fn set_groups(&mut self, groups: Vec<NodeId>) {
        self.groups = groups;
    }

    pub fn set_links(&mut self, links: Vec<NodeId>) {
        self.links = links;
    }

    pub fn set_active_link(&mut self, link: Option<NodeId>) {
        self.active_link = link;
    }
}
