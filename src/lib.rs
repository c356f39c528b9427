pub mod error;
pub mod config;
pub mod theme;
pub mod dom;
pub mod events;
pub mod timers;
pub mod clipboard;
pub mod state;
pub mod app;
pub mod factory;

// Export errors
pub use error::{ClipboardError, ConfigError, PageError};

// Export configuration
pub use config::CoordinatorConfig;

// Export the document model
pub use dom::{Document, NodeId, NodeSpec, PageSpec, load_page, parse_page, to_html};

// Export events and scheduling
pub use events::{Action, Event, EventKind, Subscriptions};
pub use timers::Scheduler;

// Export clipboard capabilities
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};

// Export the coordinator
pub use app::{AppState, CopyOutcome, DispatchOutcome, NotificationKind, Task, UiStateCoordinator};

// Export example generation
pub use factory::{Example, ExampleConfig, ExampleFactory, ExampleKind};

// Export theme support
pub use theme::{Token, hex_to_color32, resolve_color};
