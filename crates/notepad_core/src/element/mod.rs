//! Self-rendering view units.
//!
//! # Responsibility
//! - Project one note into markup and re-derive it on every field write.
//! - Emit edit/delete signals to attached listeners.
//!
//! # Invariants
//! - Elements are leaves: they never reference the store or sibling elements.

pub mod note_element;
