//! Group classified events by the file they resolved to.
//!
//! Unknown positions carry an empty file path and therefore land under the
//! reserved `UNKNOWN_FILE_KEY` (`""`) instead of disappearing.

use crate::parser::schema::{DeoptInfo, LogEvent};
use log::debug;

/// Bucket events by resolved file path in a single pass
///
/// **Public** - final stage of the engine
///
/// Within each file, every category keeps the order events arrive in.
pub fn group_by_file(events: impl IntoIterator<Item = LogEvent>) -> DeoptInfo {
    let mut files = DeoptInfo::new();
    let mut total = 0usize;

    for event in events {
        total += 1;
        let info = files.entry(event.position().file.clone()).or_default();
        match event {
            LogEvent::Code(entry) => info.codes.push(entry),
            LogEvent::Deopt(entry) => info.deopts.push(entry),
            LogEvent::Ic(entry) => info.ics.push(entry),
        }
    }

    debug!("Grouped {} entries into {} files", total, files.len());
    files
}
