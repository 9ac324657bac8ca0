//! Masking Registry
//!
//! Titles whose password is currently revealed in the table.

use std::collections::HashSet;

/// Shown in place of every password that is not revealed.
pub const MASK: &str = "******";

/// Keyed by exact title text. Entries sharing a title share their state,
/// and titles of deleted or renamed entries stay until toggled off.
#[derive(Debug, Clone, Default)]
pub struct MaskingRegistry {
    revealed: HashSet<String>,
}

impl MaskingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reveal(&mut self, title: &str) {
        self.revealed.insert(title.to_string());
    }

    pub fn conceal(&mut self, title: &str) {
        self.revealed.remove(title);
    }

    pub fn is_revealed(&self, title: &str) -> bool {
        self.revealed.contains(title)
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self, title: &str) -> bool {
        let revealed = !self.is_revealed(title);
        if revealed {
            self.reveal(title);
        } else {
            self.conceal(title);
        }
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips() {
        let mut masking = MaskingRegistry::new();
        assert!(!masking.is_revealed("Bank"));
        assert!(masking.toggle("Bank"));
        assert!(masking.is_revealed("Bank"));
        assert!(!masking.toggle("Bank"));
        assert!(!masking.is_revealed("Bank"));
    }

    #[test]
    fn test_case_sensitive() {
        let mut masking = MaskingRegistry::new();
        masking.reveal("Bank");
        assert!(!masking.is_revealed("bank"));
        assert!(!masking.is_revealed("Bank "));
    }

    #[test]
    fn test_reveal_and_conceal_are_idempotent() {
        let mut masking = MaskingRegistry::new();
        masking.reveal("Mail");
        masking.reveal("Mail");
        assert_eq!(masking.revealed.len(), 1);
        masking.conceal("Mail");
        masking.conceal("Mail");
        assert!(masking.revealed.is_empty());
    }
}
