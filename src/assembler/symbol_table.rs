//! Symbol table: label definitions and `.entry` export requests.

use std::collections::HashMap;

/// `IC`-style address. Absolute code addresses start at 100.
pub type Address = u32;

/// A label and the address it was bound to when defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub address: Address,
}

/// A name marked with `.entry`, pending address resolution at the end of
/// pass 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRequest {
    pub name: String,
    pub address: Address,
}

/// Labels and entry requests collected while assembling one source file.
#[derive(Debug, Default)]
pub struct SymbolTable {
    labels: HashMap<String, Address>,
    entry_order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `address`.
    ///
    /// Returns `false` (and leaves the table unchanged) if `name` is
    /// already bound; the caller is expected to raise `DuplicateLabel`.
    pub fn insert_label(&mut self, name: &str, address: Address) -> bool {
        if self.labels.contains_key(name) {
            return false;
        }
        self.labels.insert(name.to_string(), address);
        true
    }

    pub fn resolve_label(&self, name: &str) -> Option<Address> {
        self.labels.get(name).copied()
    }

    /// Records an `.entry` request. Duplicate requests for the same name
    /// are collapsed, matching the reference.
    pub fn request_entry(&mut self, name: &str) {
        if !self.entry_order.contains(&name.to_string()) {
            self.entry_order.push(name.to_string());
        }
    }

    /// Every requested entry, with addresses resolved from the label
    /// table (unresolved names are left at address 0 — see the design
    /// notes on undefined `.entry` targets), sorted by ascending address.
    pub fn resolved_entries(&self) -> Vec<EntryRequest> {
        let mut entries: Vec<EntryRequest> = self
            .entry_order
            .iter()
            .map(|name| EntryRequest {
                name: name.clone(),
                address: self.resolve_label(name).unwrap_or(0),
            })
            .collect();
        entries.sort_by_key(|entry| entry.address);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_unique() {
        let mut table = SymbolTable::new();
        assert!(table.insert_label("LOOP", 100));
        assert!(!table.insert_label("LOOP", 105));
        assert_eq!(table.resolve_label("LOOP"), Some(100));
    }

    #[test]
    fn unresolved_entry_defaults_to_zero() {
        let mut table = SymbolTable::new();
        table.request_entry("MISSING");
        assert_eq!(table.resolved_entries(), vec![EntryRequest { name: "MISSING".to_string(), address: 0 }]);
    }

    #[test]
    fn entries_sorted_ascending_by_address() {
        let mut table = SymbolTable::new();
        table.insert_label("B", 200);
        table.insert_label("A", 100);
        table.request_entry("B");
        table.request_entry("A");

        let entries = table.resolved_entries();
        assert_eq!(entries[0].name, "A");
        assert_eq!(entries[1].name, "B");
    }
}
