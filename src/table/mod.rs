//! Entry Table Engine
//!
//! Column selection, field projection, password masking and the refresh
//! that rebuilds visible rows from the entry collection.

pub mod columns;
pub mod controller;
pub mod fields;
pub mod masking;
pub mod refresh;
pub mod rows;

// Re-exports
pub use columns::{ColumnConfiguration, DEFAULT_COLUMNS};
pub use controller::TableController;
pub use fields::{DatePattern, FieldKind, FieldProjector};
pub use masking::{MaskingRegistry, MASK};
pub use refresh::{RefreshSummary, SelectTarget};
pub use rows::{EditOutcome, EntryRowTable};
