//! UI Components
//!
//! Widgets for the entry table window.

pub mod form;
pub mod popup;
pub mod statusline;
pub mod table;

// Re-exports
pub use form::{EntryForm, EntryFormWidget};
pub use popup::{AboutScreen, ConfirmDialog};
pub use statusline::{HelpBar, MessageType, SearchBar, StatusLine, TitleBar};
pub use table::{EmptyState, EntryTable};
