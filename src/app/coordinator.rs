//! The UI state coordinator.
//!
//! Binds once to a page and keeps its presentation invariants for the page's
//! lifetime:
//! - exactly one active tab per tab set
//! - at most one toast on screen
//! - at most one field error per form field
//! - sidebar open iff overlay visible, and both closed in wide layout
//!
//! Every handler runs to completion. Delayed work (toast transitions, copy
//! acknowledgments) is queued on the coordinator's scheduler as one-shot tasks
//! that re-check their target before touching it.

use crate::app::forms;
use crate::app::AppState;
use crate::clipboard::Clipboard;
use crate::config::CoordinatorConfig;
use crate::dom::{Document, NodeId};
use crate::error::ClipboardError;
use crate::events::{Action, Event, EventKind, Subscriptions};
use crate::state::{LayoutState, NotificationKind, TabSet};
use crate::theme::Token;
use crate::timers::Scheduler;
use std::time::Duration;
use url::Url;

const TOAST_HIDDEN: &str = "translateY(100px)";
const TOAST_SHOWN: &str = "translateY(0)";

/// Content taken out of a copy trigger while it shows the check icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedContent {
    children: Vec<NodeId>,
    icon: NodeId,
}

/// Delayed continuation run by [`UiStateCoordinator::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Slide a toast in
    ToastEnter(NodeId),
    /// Start sliding a toast out
    ToastExit(NodeId),
    /// Remove a toast once its exit transition is over
    ToastDetach(NodeId),
    /// End a copy acknowledgment on a trigger
    RestoreTrigger {
        trigger: NodeId,
        saved: Option<SavedContent>,
    },
}

/// Which clipboard path delivered a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Primary clipboard write succeeded
    Primary,
    /// Primary write failed, the legacy copy command succeeded
    Fallback,
    /// Both paths failed; logged only
    Failed,
}

impl CopyOutcome {
    pub fn is_success(self) -> bool {
        !matches!(self, CopyOutcome::Failed)
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Number of handlers that ran
    pub handled: usize,
    /// The event's default action must not happen (invalid form submit)
    pub default_prevented: bool,
}

/// Coordinates the interactive regions of one page.
pub struct UiStateCoordinator<C: Clipboard> {
    state: AppState,
    clipboard: C,
    config: CoordinatorConfig,
    subscriptions: Subscriptions,
    scheduler: Scheduler<Task>,
    bound: bool,
}

impl<C: Clipboard> UiStateCoordinator<C> {
    /// Creates a coordinator for `doc`. Nothing is wired until [`bind`].
    ///
    /// [`bind`]: UiStateCoordinator::bind
    pub fn new(doc: Document, clipboard: C, config: CoordinatorConfig, viewport_width: f32) -> Self {
        Self {
            state: AppState::new(doc, config.breakpoint, viewport_width),
            clipboard,
            config,
            subscriptions: Subscriptions::new(),
            scheduler: Scheduler::new(),
            bound: false,
        }
    }

    // ===== Queries =====

    pub fn document(&self) -> &Document {
        &self.state.doc
    }

    /// Mutable document access for the host (typed input, native control
    /// activation). Region handles found at bind time are not refreshed.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.state.doc
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn layout(&self) -> &LayoutState {
        &self.state.layout
    }

    pub fn tab_sets(&self) -> &[TabSet] {
        self.state.tabs.sets()
    }

    pub fn nav_groups(&self) -> &[NodeId] {
        self.state.nav.groups()
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Toast currently on screen.
    pub fn current_notification(&self) -> Option<NodeId> {
        self.state.notification.current()
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.state
            .layout
            .sidebar()
            .map(|s| self.state.doc.has_class(s, "open"))
            .unwrap_or(false)
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.state
            .layout
            .overlay()
            .map(|o| self.state.doc.has_class(o, "active"))
            .unwrap_or(false)
    }

    /// Current value of the coordinator's timer clock.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Time until the next delayed task is due.
    pub fn next_task_in(&self) -> Option<Duration> {
        self.scheduler
            .next_due()
            .map(|due| due.saturating_sub(self.scheduler.now()))
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    // ===== Binding =====

    /// Locates the page regions, registers their handlers and establishes the
    /// initial state. Regions that are missing leave their feature inert.
    pub fn bind(&mut self) {
        if self.bound {
            tracing::warn!("coordinator already bound; ignoring second bind");
            return;
        }
        self.bound = true;

        self.setup_sidebar();
        self.setup_tabs();
        self.setup_copy_buttons();
        self.setup_color_swatches();
        self.setup_form_components();
        self.highlight_active_nav_link();

        tracing::info!(
            subscriptions = self.subscriptions.len(),
            tab_sets = self.state.tabs.sets().len(),
            nav_groups = self.state.nav.groups().len(),
            wide = self.state.layout.is_wide(),
            "bound to page"
        );
    }

    fn setup_sidebar(&mut self) {
        let doc = &mut self.state.doc;
        let toggle = doc.get_element_by_id("sidebarToggle");
        let sidebar = doc.get_element_by_id("sidebar");
        let overlay = doc.get_element_by_id("overlay");
        self.state.layout.set_regions(sidebar, overlay, toggle);

        // Drawer starts closed
        if let Some(sidebar) = sidebar {
            doc.remove_class(sidebar, "open");
        }
        if let Some(overlay) = overlay {
            doc.remove_class(overlay, "active");
        }

        if let (Some(toggle), Some(_)) = (toggle, sidebar) {
            self.subscriptions.subscribe(toggle, EventKind::Click, Action::ToggleSidebar);
        }
        if let Some(overlay) = overlay {
            self.subscriptions.subscribe(overlay, EventKind::Click, Action::CloseSidebar);
        }

        let body = doc.body();
        for header in doc.query_class(body, "nav-group-header") {
            if let Some(group) = doc.parent(header) {
                self.subscriptions.subscribe(header, EventKind::Click, Action::ToggleNavGroup(group));
            }
        }

        let groups = doc.query_class(body, "nav-group");
        if self.state.layout.is_wide() {
            for group in &groups {
                doc.add_class(*group, "open");
            }
        }
        self.state.nav.set_groups(groups);
    }

    fn setup_tabs(&mut self) {
        let doc = &self.state.doc;
        let body = doc.body();

        for button in doc.query_class(body, "tab-button") {
            let container = doc.closest_class(button, "tabs");
            let set = self.state.tabs.set_for(container);
            if let Some(tab_set) = self.state.tabs.set_mut(set) {
                tab_set.push_button(button);
            }
            self.subscriptions
                .subscribe(button, EventKind::Click, Action::SelectTab { set, button });
        }

        for content in doc.query_class(body, "tab-content") {
            let container = doc.closest_class(content, "tabs");
            if let Some(set) = self.state.tabs.position(container) {
                if let Some(tab_set) = self.state.tabs.set_mut(set) {
                    tab_set.push_content(content);
                }
            }
        }

        // First tab of every set starts active
        let firsts: Vec<(usize, NodeId)> = self
            .state
            .tabs
            .sets()
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.first_button().map(|b| (i, b)))
            .collect();
        for (set, button) in firsts {
            self.activate_tab(set, button);
        }
    }

    fn setup_copy_buttons(&mut self) {
        let doc = &self.state.doc;
        for button in doc.query_class(doc.body(), "copy-btn") {
            self.subscriptions.subscribe(button, EventKind::Click, Action::CopyText(button));
        }
    }

    fn setup_color_swatches(&mut self) {
        let doc = &self.state.doc;
        for swatch in doc.query_class(doc.body(), "color-swatch") {
            self.subscriptions.subscribe(swatch, EventKind::Click, Action::CopyColor(swatch));
        }
    }

    fn setup_form_components(&mut self) {
        let doc = &self.state.doc;
        let body = doc.body();

        for wrapper in doc.query_class(body, "checkbox") {
            if let Some(input) = doc.find_class(wrapper, "checkbox-input") {
                self.subscriptions
                    .subscribe(wrapper, EventKind::Click, Action::ToggleCheckbox { input });
            }
        }

        for wrapper in doc.query_class(body, "radio") {
            if let Some(input) = doc.find_class(wrapper, "radio-input") {
                self.subscriptions
                    .subscribe(wrapper, EventKind::Click, Action::CheckRadio { input });
            }
        }

        for form in doc.query_tag(body, "form") {
            self.subscriptions.subscribe(form, EventKind::Submit, Action::SubmitForm(form));
        }
    }

    // ===== Event Dispatch =====

    /// Routes a document event to the handlers registered on its bubbling
    /// path.
    pub fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        let actions = self.subscriptions.route(&self.state.doc, &event);
        let mut outcome = DispatchOutcome {
            handled: actions.len(),
            default_prevented: false,
        };

        for action in actions {
            match action {
                Action::ToggleSidebar => {
                    self.toggle_sidebar();
                }
                Action::CloseSidebar => self.close_sidebar(),
                Action::ToggleNavGroup(group) => {
                    self.toggle_nav_group(group);
                }
                Action::SelectTab { set, button } => self.activate_tab(set, button),
                Action::CopyText(button) => {
                    self.copy_from_button(button);
                }
                Action::CopyColor(swatch) => {
                    self.copy_color(swatch);
                }
                Action::ToggleCheckbox { input } => {
                    if event.target != input {
                        self.toggle_checkbox(input);
                    }
                }
                Action::CheckRadio { input } => {
                    if event.target != input {
                        self.check_radio(input);
                    }
                }
                Action::SubmitForm(form) => {
                    if !self.validate_form(form) {
                        outcome.default_prevented = true;
                    }
                }
            }
        }

        outcome
    }

    // ===== Sidebar =====

    /// Flips the drawer; the overlay follows. Returns the new open state,
    /// always false on a page without a sidebar.
    pub fn toggle_sidebar(&mut self) -> bool {
        if self.state.layout.sidebar().is_none() {
            return false;
        }
        let open = !self.is_sidebar_open();
        self.set_sidebar_open(open);
        open
    }

    /// Closes the drawer and hides the overlay.
    pub fn close_sidebar(&mut self) {
        self.set_sidebar_open(false);
    }

    fn set_sidebar_open(&mut self, open: bool) {
        let Some(sidebar) = self.state.layout.sidebar() else {
            return;
        };
        let doc = &mut self.state.doc;
        doc.set_class(sidebar, "open", open);
        if let Some(overlay) = self.state.layout.overlay() {
            doc.set_class(overlay, "active", open);
        }
        tracing::debug!(open, "sidebar");
    }

    // ===== Navigation =====

    /// Flips one navigation group. Other groups are untouched. Returns the new
    /// open state.
    pub fn toggle_nav_group(&mut self, group: NodeId) -> bool {
        if !self.state.doc.contains(group) {
            return false;
        }
        let open = self.state.doc.toggle_class(group, "open");
        tracing::debug!(group = group.raw(), open, "nav group toggled");
        open
    }

    /// Marks the navigation link pointing at the current page and forces its
    /// group open. Paths must match exactly. Runs once during bind.
    pub fn highlight_active_nav_link(&mut self) -> Option<NodeId> {
        let doc = &mut self.state.doc;
        let body = doc.body();

        let mut links: Vec<NodeId> = Vec::new();
        for class in ["nav-menu", "nav-submenu"] {
            for root in doc.query_class(body, class) {
                for link in doc.query_tag(root, "a") {
                    if !links.contains(&link) {
                        links.push(link);
                    }
                }
            }
        }

        let base = match Url::parse(doc.location()) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(location = doc.location(), "cannot resolve nav links: {}", e);
                self.state.nav.set_links(links);
                return None;
            }
        };

        let mut active = None;
        for link in &links {
            let Some(href) = doc.attr(*link, "href") else {
                continue;
            };
            let Ok(target) = base.join(href) else {
                continue;
            };
            if target.path() == base.path() {
                doc.add_class(*link, "active");
                if let Some(group) = doc.closest_class(*link, "nav-group") {
                    doc.add_class(group, "open");
                }
                active.get_or_insert(*link);
            }
        }

        self.state.nav.set_links(links);
        self.state.nav.set_active_link(active);
        active
    }

    // ===== Tabs =====

    /// Activates the tab whose button targets `tab_id`. Returns false if no
    /// button carries that target.
    pub fn select_tab(&mut self, tab_id: &str) -> bool {
        let found = self.state.tabs.sets().iter().enumerate().find_map(|(set, s)| {
            s.buttons()
                .iter()
                .find(|b| self.state.doc.attr(**b, "data-tab") == Some(tab_id))
                .map(|b| (set, *b))
        });

        match found {
            Some((set, button)) => {
                self.activate_tab(set, button);
                true
            }
            None => false,
        }
    }

    /// Makes `button` the only active button of its set and shows the content
    /// it targets. A target without matching content leaves no content shown.
    pub fn activate_tab(&mut self, set: usize, button: NodeId) {
        let AppState { doc, tabs, .. } = &mut self.state;
        let Some(tab_set) = tabs.get(set) else {
            return;
        };

        for b in tab_set.buttons() {
            doc.remove_class(*b, "active");
        }
        for c in tab_set.contents() {
            doc.remove_class(*c, "active");
        }

        doc.add_class(button, "active");

        let target = doc.attr(button, "data-tab").map(str::to_string);
        let content = target.as_deref().and_then(|t| {
            tab_set
                .contents()
                .iter()
                .copied()
                .find(|c| doc.attr(*c, "id") == Some(t))
        });

        match content {
            Some(content) => doc.add_class(content, "active"),
            None => tracing::debug!(target = ?target, "tab has no matching content"),
        }
    }

    // ===== Clipboard =====

    /// Copies `text`, acknowledging success with the standard notification.
    pub fn copy_to_clipboard(&mut self, text: &str) -> CopyOutcome {
        let message = self.config.copied_message.clone();
        self.copy_and_acknowledge(text, None, &message)
    }

    /// Copies the payload of a `.copy-btn`. A button without payload is inert.
    pub fn copy_from_button(&mut self, button: NodeId) -> Option<CopyOutcome> {
        let text = self.state.doc.attr(button, "data-copy")?.to_string();
        let message = self.config.copied_message.clone();
        Some(self.copy_and_acknowledge(&text, Some((button, true)), &message))
    }

    /// Copies the displayed value of a `.color-swatch`.
    pub fn copy_color(&mut self, swatch: NodeId) -> Option<CopyOutcome> {
        let doc = &self.state.doc;
        let value_node = doc.find_class(swatch, "color-value")?;
        let value = doc.text_content(value_node).trim().to_string();
        let message = self.config.color_copied_message(&value);
        Some(self.copy_and_acknowledge(&value, Some((swatch, false)), &message))
    }

    fn copy_and_acknowledge(&mut self, text: &str, trigger: Option<(NodeId, bool)>, message: &str) -> CopyOutcome {
        let outcome = self.write_clipboard(text);
        if outcome.is_success() {
            if let Some((node, swap_icon)) = trigger {
                self.pulse_trigger(node, swap_icon);
            }
            self.notify(message, NotificationKind::Success);
        }
        outcome
    }

    fn write_clipboard(&mut self, text: &str) -> CopyOutcome {
        match self.clipboard.write_text(text) {
            Ok(()) => CopyOutcome::Primary,
            Err(e) => {
                tracing::debug!("clipboard write failed ({}); trying copy command", e);
                match self.legacy_copy(text) {
                    Ok(()) => CopyOutcome::Fallback,
                    Err(e) => {
                        tracing::error!("Fallback: unable to copy: {}", e);
                        CopyOutcome::Failed
                    }
                }
            }
        }
    }

    /// Off-screen text area, select, copy command, discard.
    fn legacy_copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let doc = &mut self.state.doc;
        let area = doc.create_element("textarea");
        doc.set_value(area, text);
        doc.set_style(area, "position", "fixed");
        doc.set_style(area, "left", "-999999px");
        doc.set_style(area, "top", "-999999px");
        let body = doc.body();
        doc.append_child(body, area);
        doc.focus(area);
        doc.select(area);

        let result = self.clipboard.exec_copy(self.state.doc.selected_text().as_deref());

        self.state.doc.remove(area);
        result
    }

    fn pulse_trigger(&mut self, trigger: NodeId, swap_icon: bool) {
        let doc = &mut self.state.doc;
        if !doc.contains(trigger) || doc.has_class(trigger, "copied") {
            return;
        }

        let saved = swap_icon.then(|| {
            let children = doc.children(trigger).to_vec();
            for child in &children {
                doc.detach(*child);
            }
            let icon = doc.create_element("i");
            doc.add_class(icon, "fas");
            doc.add_class(icon, "fa-check");
            doc.append_child(trigger, icon);
            SavedContent { children, icon }
        });

        doc.add_class(trigger, "copied");
        self.scheduler
            .schedule_in(self.config.copy_feedback(), Task::RestoreTrigger { trigger, saved });
    }

    // ===== Notifications =====

    /// Shows `message` as the only toast on screen. Any displayed toast is
    /// removed first, within this call. Returns the new toast element.
    pub fn notify(&mut self, message: &str, kind: NotificationKind) -> NodeId {
        let doc = &mut self.state.doc;
        let body = doc.body();

        if let Some(previous) = self.state.notification.current() {
            doc.remove(previous);
        }

        let toast = doc.create_element("div");
        doc.add_class(toast, "toast");
        doc.add_class(toast, &format!("toast-{}", kind.as_str()));
        doc.set_text_content(toast, message);

        let background = match kind {
            NotificationKind::Success => Token::Green600,
            NotificationKind::Warning => Token::Orange600,
        };
        let padding = format!("{} {}", Token::Spacing3.css_var(), Token::Spacing4.css_var());
        let transition = format!("transform {}s ease", self.config.toast_exit().as_secs_f32());
        for (property, value) in [
            ("position", "fixed"),
            ("bottom", "20px"),
            ("right", "20px"),
            ("background-color", background.css_var()),
            ("color", "white"),
            ("padding", padding.as_str()),
            ("border-radius", Token::RadiusLg.css_var()),
            ("box-shadow", Token::ShadowLg.css_var()),
            ("z-index", "9999"),
            ("font-size", Token::FontSizeSm.css_var()),
            ("font-weight", "500"),
            ("transform", TOAST_HIDDEN),
            ("transition", transition.as_str()),
        ] {
            doc.set_style(toast, property, value);
        }

        doc.append_child(body, toast);
        self.state.notification.replace(toast);

        self.scheduler
            .schedule_in(self.config.toast_enter_delay(), Task::ToastEnter(toast));
        self.scheduler
            .schedule_in(self.config.toast_display(), Task::ToastExit(toast));

        tracing::debug!(kind = kind.as_str(), message, "notification shown");
        toast
    }

    // ===== Forms =====

    /// Validates the mandatory fields of `form`, annotating the empty ones.
    pub fn validate_form(&mut self, form: NodeId) -> bool {
        let valid = forms::validate_form(&mut self.state.doc, form, &self.config.required_message);
        tracing::debug!(form = form.raw(), valid, "form validated");
        valid
    }

    fn toggle_checkbox(&mut self, input: NodeId) {
        if !self.state.doc.contains(input) {
            return;
        }
        forms::activate_choice(&mut self.state.doc, input);
        self.dispatch(Event::change(input));
    }

    fn check_radio(&mut self, input: NodeId) {
        if !self.state.doc.contains(input) {
            return;
        }
        forms::check_radio(&mut self.state.doc, input);
        self.dispatch(Event::change(input));
    }

    // ===== Viewport =====

    /// Applies a new viewport width. Above the breakpoint the drawer is
    /// closed and every navigation group opened, whatever their prior state;
    /// below it nothing changes.
    pub fn on_viewport_resize(&mut self, width: f32) {
        let previous = self.state.layout.set_viewport_width(width);
        if !self.bound || !self.state.layout.is_wide() {
            return;
        }

        self.set_sidebar_open(false);
        let AppState { doc, nav, .. } = &mut self.state;
        for group in nav.groups() {
            doc.add_class(*group, "open");
        }

        if previous != self.state.layout.mode() {
            tracing::debug!(width, "switched to wide layout");
        }
    }

    // ===== Timers =====

    /// Advances the timer clock by `elapsed`, running every task that falls
    /// due, including follow-ups scheduled along the way.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.settle(until);
    }

    fn run_task(&mut self, task: Task) {
        let doc = &mut self.state.doc;
        match task {
            Task::ToastEnter(toast) => {
                if doc.is_attached(toast) {
                    doc.set_style(toast, "transform", TOAST_SHOWN);
                }
            }
            Task::ToastExit(toast) => {
                if doc.is_attached(toast) {
                    doc.set_style(toast, "transform", TOAST_HIDDEN);
                    self.scheduler
                        .schedule_in(self.config.toast_exit(), Task::ToastDetach(toast));
                }
            }
            Task::ToastDetach(toast) => {
                doc.remove(toast);
                if self.state.notification.clear_if(toast) {
                    tracing::debug!("notification dismissed");
                }
            }
            Task::RestoreTrigger { trigger, saved } => {
                if !doc.contains(trigger) {
                    // The icon went with the trigger; the saved content is still detached
                    for child in saved.into_iter().flat_map(|saved| saved.children) {
                        if doc.parent(child).is_none() {
                            doc.remove(child);
                        }
                    }
                    return;
                }
                if let Some(saved) = saved {
                    doc.remove(saved.icon);
                    for child in saved.children {
                        if doc.contains(child) {
                            doc.append_child(trigger, child);
                        }
                    }
                }
                doc.remove_class(trigger, "copied");
            }
        }
    }
}
