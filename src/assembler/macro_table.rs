//! Macro table
//!
//! A macro is a named, ordered list of raw source lines captured between a
//! `macr <name>` line and a matching `endmacr` line. Invoking the macro by
//! name later splices those lines back into the expanded stream verbatim.

use std::collections::HashMap;

/// A macro definition: its name and the raw lines recorded between
/// `macr <name>` and `endmacr`, in encounter order.
#[derive(Debug, Clone, Default)]
pub struct Macro {
    pub name: String,
    pub lines: Vec<String>,
}

impl Macro {
    fn new(name: &str) -> Self {
        Macro { name: name.to_string(), lines: Vec::new() }
    }
}

/// Opaque handle to a macro currently being recorded.
///
/// Indexes into the owning [`MacroTable`]; kept separate from `&mut Macro`
/// so the preprocessor can hold a handle across calls that also need to
/// read other parts of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroHandle(usize);

/// Stores every macro defined so far in a source file.
#[derive(Debug, Default)]
pub struct MacroTable {
    macros: Vec<Macro>,
    by_name: HashMap<String, usize>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts recording a new macro named `name`.
    ///
    /// Returns `None` if a macro by that name already exists; the caller
    /// is expected to report `DuplicateMacro` and treat the file as no
    /// longer recording anything.
    pub fn define(&mut self, name: &str) -> Option<MacroHandle> {
        if self.by_name.contains_key(name) {
            return None;
        }
        let index = self.macros.len();
        self.macros.push(Macro::new(name));
        self.by_name.insert(name.to_string(), index);
        Some(MacroHandle(index))
    }

    /// Appends a raw source line (including its trailing newline, if any)
    /// to the macro recorded at `handle`.
    pub fn append(&mut self, handle: MacroHandle, line: &str) {
        self.macros[handle.0].lines.push(line.to_string());
    }

    /// Looks up a macro by name.
    pub fn lookup(&self, name: &str) -> Option<&Macro> {
        self.by_name.get(name).map(|&index| &self.macros[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_lookup() {
        let mut table = MacroTable::new();
        let handle = table.define("GREET").unwrap();
        table.append(handle, "prn #1\n");
        table.append(handle, "prn #2\n");

        let found = table.lookup("GREET").unwrap();
        assert_eq!(found.lines, vec!["prn #1\n", "prn #2\n"]);
    }

    #[test]
    fn duplicate_definition_fails() {
        let mut table = MacroTable::new();
        table.define("GREET").unwrap();
        assert!(table.define("GREET").is_none());
    }

    #[test]
    fn unknown_name_is_not_found() {
        let table = MacroTable::new();
        assert!(table.lookup("NOPE").is_none());
    }
}
