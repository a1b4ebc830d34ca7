//! Filtering of entries that live in the runtime's own scripts.

use crate::parser::schema::{LogEvent, Position};
use crate::utils::config::ParseOptions;
use log::debug;

/// True when `file` follows the runtime-internal naming convention
///
/// The Unknown sentinel (empty path) is never internal.
pub fn is_internal_path(file: &str, prefixes: &[String]) -> bool {
    !file.is_empty() && prefixes.iter().any(|prefix| file.starts_with(prefix.as_str()))
}

/// Drops runtime-internal entries unless internals are kept
#[derive(Debug, Clone)]
pub struct InternalFilter<'a> {
    keep_internals: bool,
    prefixes: &'a [String],
}

impl<'a> InternalFilter<'a> {
    pub fn new(options: &'a ParseOptions) -> Self {
        Self {
            keep_internals: options.keep_internals,
            prefixes: &options.internal_prefixes,
        }
    }

    pub fn retains(&self, position: &Position) -> bool {
        self.keep_internals || !is_internal_path(&position.file, self.prefixes)
    }

    /// Apply the filter, returning the kept events and how many were dropped
    pub fn apply(&self, events: Vec<LogEvent>) -> (Vec<LogEvent>, usize) {
        let before = events.len();
        let kept: Vec<LogEvent> = events
            .into_iter()
            .filter(|event| self.retains(event.position()))
            .collect();

        let dropped = before - kept.len();
        if dropped > 0 {
            debug!("Dropped {} entries located in internal scripts", dropped);
        }
        (kept, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        ParseOptions::default().internal_prefixes
    }

    #[test]
    fn test_internal_paths() {
        let prefixes = prefixes();
        assert!(is_internal_path("node:internal/modules/cjs/loader", &prefixes));
        assert!(is_internal_path("internal/bootstrap/node.js", &prefixes));
        assert!(!is_internal_path("/app/internal/foo.js", &prefixes));
        assert!(!is_internal_path("https://example.com/node:x.js", &prefixes));
        assert!(!is_internal_path("", &prefixes));
    }

    #[test]
    fn test_filter_respects_keep_internals() {
        let options = ParseOptions::default();
        let filter = InternalFilter::new(&options);
        assert!(!filter.retains(&Position::new("node:fs", 1, 0)));
        assert!(filter.retains(&Position::new("/app/a.js", 1, 0)));
        assert!(filter.retains(&Position::unknown(1, 0)));

        let options = ParseOptions::default().with_keep_internals(true);
        let filter = InternalFilter::new(&options);
        assert!(filter.retains(&Position::new("node:fs", 1, 0)));
    }
}
