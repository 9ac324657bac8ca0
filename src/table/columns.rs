//! Column Configuration
//!
//! Resolves the configured field names into the ordered set of columns.

use tracing::{debug, warn};

use super::fields::FieldKind;

pub const DEFAULT_COLUMNS: [FieldKind; 6] = FieldKind::ALL;

/// Ordered, de-duplicated, never empty list of shown fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfiguration {
    kinds: Vec<FieldKind>,
}

impl Default for ColumnConfiguration {
    fn default() -> Self {
        Self {
            kinds: DEFAULT_COLUMNS.to_vec(),
        }
    }
}

impl ColumnConfiguration {
    /// Unknown names are dropped and repeats keep their first position.
    /// When nothing usable is left, `defaults` is used as a whole.
    pub fn resolve<S: AsRef<str>>(names: &[S], defaults: &[FieldKind]) -> Self {
        let mut kinds: Vec<FieldKind> = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref().trim();
            match FieldKind::from_name(name) {
                Some(kind) if !kinds.contains(&kind) => kinds.push(kind),
                Some(_) => debug!(name, "duplicate column ignored"),
                None => debug!(name, "unknown column ignored"),
            }
        }

        if kinds.is_empty() {
            warn!("no usable columns configured, using defaults");
            kinds = dedup(defaults);
        }
        if kinds.is_empty() {
            kinds = DEFAULT_COLUMNS.to_vec();
        }

        Self { kinds }
    }

    pub fn kinds(&self) -> &[FieldKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn position(&self, kind: FieldKind) -> Option<usize> {
        self.kinds.iter().position(|&k| k == kind)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.kinds.iter().map(|k| k.label()).collect()
    }
}

fn dedup(kinds: &[FieldKind]) -> Vec<FieldKind> {
    let mut out = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        if !out.contains(&kind) {
            out.push(kind);
        }
    }
    out
}
