//! Core logic for the notepad widget.
//! This crate is the single source of truth for widget invariants.

pub mod app;
pub mod config;
pub mod debounce;
pub mod dom;
pub mod element;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

pub use app::{App, AppError, Elements};
pub use config::{AppConfig, ConfigError};
pub use debounce::Debouncer;
pub use dom::{Action, Dom, MemoryDom, NodeId, Role};
pub use element::note_element::{Affordance, NoteElement, NoteMarkup, NoteSignal};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use state::{filter_notes, AppState, Operation, Patch, Store, Transition};
pub use view::RegionVisibility;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
