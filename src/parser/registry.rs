//! Script id and code address resolution tables.
//!
//! Built once per parse from `code-creation` and `script-details` lines and
//! then only read. Each binding remembers the line that created it, so a
//! reference logged before its script was announced still resolves to the
//! Unknown position even though the whole table is built up front.
//!
//! Logs written by V8 itself carry no script ids on IC and deopt lines.
//! They reference code by address instead, so the registry also keeps the
//! address range of every located code object.

use super::schema::{Diagnostic, Position};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScriptBinding {
    file: String,
    bound_at: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CodeRange {
    end: u64,
    file: String,
    function_name: String,
    bound_at: usize,
}

/// The located code object covering an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeOwner<'r> {
    pub file: &'r str,
    pub function_name: &'r str,
}

/// Append-only mapping from script id to absolute path or URL
#[derive(Debug, Clone, Default)]
pub struct ScriptRegistry {
    scripts: HashMap<i64, ScriptBinding>,
    // Keyed by start address; every start keeps its creations in log order
    code: BTreeMap<u64, Vec<CodeRange>>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `script_id` to `file`, first binding wins
    ///
    /// Returns `Ok(true)` for a new binding and `Ok(false)` when the id was
    /// already bound to the same path or the input is not bindable (negative
    /// id, empty path). A rebind to a different path is rejected with a
    /// `Diagnostic::RegistryConflict`.
    pub fn register(
        &mut self,
        script_id: i64,
        file: &str,
        ordinal: usize,
    ) -> Result<bool, Diagnostic> {
        if script_id < 0 || file.is_empty() {
            return Ok(false);
        }

        match self.scripts.get(&script_id) {
            Some(existing) if existing.file == file => Ok(false),
            Some(existing) => Err(Diagnostic::RegistryConflict {
                script_id,
                kept: existing.file.clone(),
                rejected: file.to_string(),
                line: ordinal,
            }),
            None => {
                self.scripts.insert(
                    script_id,
                    ScriptBinding {
                        file: file.to_string(),
                        bound_at: ordinal,
                    },
                );
                Ok(true)
            }
        }
    }

    /// Record a code object occupying `[start, start + size)` from line
    /// `ordinal` on
    ///
    /// The collector reuses addresses, so a later object at the same start
    /// shadows the earlier one for lines after it. Callers register in log
    /// order.
    pub fn register_code(
        &mut self,
        start: u64,
        size: u64,
        file: &str,
        function_name: &str,
        ordinal: usize,
    ) {
        if size == 0 || file.is_empty() {
            return;
        }

        self.code.entry(start).or_default().push(CodeRange {
            end: start.saturating_add(size),
            file: file.to_string(),
            function_name: function_name.to_string(),
            bound_at: ordinal,
        });
    }

    /// Path bound to `script_id` as seen from line `at`
    pub fn file_at(&self, script_id: i64, at: usize) -> Option<&str> {
        self.scripts
            .get(&script_id)
            .filter(|binding| binding.bound_at <= at)
            .map(|binding| binding.file.as_str())
    }

    /// Code object containing `address` as seen from line `at`
    ///
    /// Only the nearest start at or below `address` that already had an
    /// object at line `at` is considered.
    pub fn code_at(&self, address: u64, at: usize) -> Option<CodeOwner<'_>> {
        for ranges in self.code.range(..=address).rev().map(|(_, ranges)| ranges) {
            let Some(range) = ranges.iter().rev().find(|range| range.bound_at <= at) else {
                continue;
            };
            return (address < range.end).then(|| CodeOwner {
                file: &range.file,
                function_name: &range.function_name,
            });
        }
        None
    }

    /// Resolve a script-relative location logged on line `at`
    ///
    /// Falls back to `Position::unknown` when the id was never bound or was
    /// bound by a later line.
    pub fn resolve(&self, script_id: i64, line: u32, column: u32, at: usize) -> Position {
        match self.file_at(script_id, at) {
            Some(file) => Position::new(file, line, column),
            None => Position::unknown(line, column),
        }
    }

    /// Resolve a location inside the code object at `address`
    pub fn resolve_address(&self, address: u64, line: u32, column: u32, at: usize) -> Position {
        match self.code_at(address, at) {
            Some(owner) => Position::new(owner.file, line, column),
            None => Position::unknown(line, column),
        }
    }

    /// Number of bound script ids
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}
