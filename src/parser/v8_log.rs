//! Two-pass parser for V8 `--trace-ic` logs.
//!
//! Pass 1 walks every classified line and builds the script registry.
//! Pass 2 decodes lines against the now read-only registry, optionally on
//! several scoped worker threads over contiguous line ranges. The decoded
//! events are then folded in log order into per-function code histories,
//! classified, filtered and grouped by file.

use super::decoder::{
    decode_line, registry_binding, Binding, CodeOrigin, CodeSighting, Decoded, UNCLASSIFIED,
};
use super::registry::ScriptRegistry;
use super::schema::{
    CodeEntry, CodeState, CodeUpdate, DeoptInfo, Diagnostic, LogEvent, ParseStats, Position,
    Severity,
};
use super::tokenizer::{classify, lines, ClassifiedLine, LineKind};
use crate::aggregator::grouper::group_by_file;
use crate::classify::internals::InternalFilter;
use crate::classify::severity::classify as classify_event;
use crate::utils::config::{ParseOptions, MIN_LINES_PER_WORKER};
use log::{debug, warn};
use std::collections::HashMap;

/// Result of parsing one log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    /// Entries grouped by resolved file path
    pub files: DeoptInfo,

    /// Non-fatal findings, in log order
    pub diagnostics: Vec<Diagnostic>,

    pub stats: ParseStats,
}

/// Parse a V8 trace log into per-file entries
///
/// **Public** - main entry point of the engine
///
/// Never fails: unrecognized and malformed lines are skipped and counted in
/// `stats`, registry conflicts are recorded in `diagnostics`, and an empty
/// log yields an empty result.
pub fn parse_v8_log(text: &str, options: &ParseOptions) -> ParsedLog {
    let mut stats = ParseStats::default();
    let mut classified = Vec::new();

    for line in lines(text) {
        stats.total_lines += 1;
        match classify(line) {
            Some(line) => classified.push(line),
            None if line.text.trim().is_empty() => {}
            None => stats.unrecognized_lines += 1,
        }
    }

    debug!(
        "Classified {} of {} lines ({} unrecognized)",
        classified.len(),
        stats.total_lines,
        stats.unrecognized_lines
    );

    // Pass 1: script registry
    let (registry, diagnostics, malformed_details) = build_registry(&classified);
    stats.scripts = registry.len();
    debug!("Registered {} scripts", registry.len());

    // Pass 2: decode against the frozen registry
    let batch = decode_all(&classified, &registry, options.workers);
    stats.malformed_lines = malformed_details + batch.malformed;

    let mut events = assemble(batch.decoded);
    for event in &mut events {
        classify_event(event);
    }
    debug!(
        "Classified {} entries ({} at severity 3)",
        events.len(),
        events
            .iter()
            .filter(|event| event.severity() == Severity::High)
            .count()
    );

    let (events, dropped) = InternalFilter::new(options).apply(events);
    stats.filtered_internal = dropped;

    let files = group_by_file(events);
    debug!(
        "Grouped entries into {} files ({} malformed lines skipped)",
        files.len(),
        stats.malformed_lines
    );

    ParsedLog {
        files,
        diagnostics,
        stats,
    }
}

/// Parse raw log bytes; input that is not UTF-8 text yields an empty result
pub fn parse_v8_log_bytes(bytes: &[u8], options: &ParseOptions) -> ParsedLog {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse_v8_log(text, options),
        Err(e) => {
            warn!("Log is not valid UTF-8 text ({}), nothing to parse", e);
            ParsedLog::default()
        }
    }
}

/// Build the registry from every binding line
///
/// Returns the registry, the conflicts it rejected, and the number of
/// malformed `script-details` lines. Malformed `code-creation` lines bind
/// nothing here and are counted by pass 2, which sees them again.
fn build_registry(lines: &[ClassifiedLine<'_>]) -> (ScriptRegistry, Vec<Diagnostic>, usize) {
    let mut registry = ScriptRegistry::new();
    let mut diagnostics = Vec::new();
    let mut malformed = 0;

    for line in lines {
        let binding = match registry_binding(line) {
            Ok(Some(binding)) => binding,
            Ok(None) => continue,
            Err(e) => {
                if line.kind == LineKind::ScriptDetails {
                    debug!("Skipping line {}: {}", line.ordinal + 1, e);
                    malformed += 1;
                }
                continue;
            }
        };

        match binding {
            Binding::Script { script_id, file } => {
                if let Err(conflict) = registry.register(script_id, &file, line.ordinal) {
                    warn!("{}", conflict);
                    diagnostics.push(conflict);
                }
            }
            Binding::Code {
                start,
                size,
                file,
                function_name,
            } => registry.register_code(start, size, &file, &function_name, line.ordinal),
        }
    }

    (registry, diagnostics, malformed)
}

#[derive(Debug, Default)]
struct DecodedBatch {
    decoded: Vec<Decoded>,
    malformed: usize,
}

fn decode_range(lines: &[ClassifiedLine<'_>], registry: &ScriptRegistry) -> DecodedBatch {
    let mut batch = DecodedBatch::default();
    for line in lines {
        match decode_line(line, registry) {
            Ok(Some(decoded)) => batch.decoded.push(decoded),
            Ok(None) => {}
            Err(e) => {
                debug!("Skipping line {}: {}", line.ordinal + 1, e);
                batch.malformed += 1;
            }
        }
    }
    batch
}

/// Decode all lines, splitting them into contiguous ranges across workers
///
/// Range results are concatenated in range order, so the output matches a
/// single-worker run exactly.
fn decode_all(
    lines: &[ClassifiedLine<'_>],
    registry: &ScriptRegistry,
    workers: usize,
) -> DecodedBatch {
    let workers = workers.min(lines.len() / MIN_LINES_PER_WORKER).max(1);
    if workers == 1 {
        return decode_range(lines, registry);
    }

    debug!("Decoding {} lines on {} workers", lines.len(), workers);
    let chunk_size = lines.len().div_ceil(workers);

    let batches: Vec<DecodedBatch> = std::thread::scope(|scope| {
        let handles: Vec<_> = lines
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || decode_range(chunk, registry)))
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    let mut merged = DecodedBatch::default();
    for batch in batches {
        merged.decoded.extend(batch.decoded);
        merged.malformed += batch.malformed;
    }
    merged
}

/// Identity of a function across code-creation lines
type CodeKey = (CodeOrigin, Position, String);

/// Fold decoded lines into events
///
/// Code sightings of the same function merge into one `CodeEntry`; a deopt
/// appends a `Deoptimized` step to the most recently created code for its
/// function name from the same origin. Codes come first in order of first
/// sighting, followed by deopts and ICs in log order.
fn assemble(decoded: Vec<Decoded>) -> Vec<LogEvent> {
    let mut codes: Vec<CodeEntry> = Vec::new();
    let mut by_identity: HashMap<CodeKey, usize> = HashMap::new();
    let mut latest_by_name: HashMap<(CodeOrigin, String), usize> = HashMap::new();
    let mut events = Vec::new();

    for item in decoded {
        match item {
            Decoded::Code(sighting) => {
                let index = record_sighting(&mut codes, &mut by_identity, &sighting);
                latest_by_name.insert((sighting.origin, sighting.function_name), index);
            }
            Decoded::Deopt(deopt) => {
                let name_key = (deopt.origin, deopt.entry.function_name.clone());
                if let Some(&index) = latest_by_name.get(&name_key) {
                    codes[index].updates.push(CodeUpdate {
                        timestamp: deopt.entry.timestamp,
                        state: CodeState::Deoptimized,
                    });
                }
                events.push(LogEvent::Deopt(deopt.entry));
            }
            Decoded::Ic(ic) => events.push(LogEvent::Ic(ic)),
        }
    }

    codes.into_iter().map(LogEvent::Code).chain(events).collect()
}

fn record_sighting(
    codes: &mut Vec<CodeEntry>,
    by_identity: &mut HashMap<CodeKey, usize>,
    sighting: &CodeSighting,
) -> usize {
    let update = CodeUpdate {
        timestamp: sighting.timestamp,
        state: sighting.kind.into(),
    };
    let key = (
        sighting.origin.clone(),
        sighting.position.clone(),
        sighting.function_name.clone(),
    );

    if let Some(&index) = by_identity.get(&key) {
        let entry = &mut codes[index];
        entry.updates.push(update);
        entry.kind = sighting.kind;
        return index;
    }

    codes.push(CodeEntry {
        position: sighting.position.clone(),
        function_name: sighting.function_name.clone(),
        kind: sighting.kind,
        updates: vec![update],
        severity: UNCLASSIFIED,
    });
    by_identity.insert(key, codes.len() - 1);
    codes.len() - 1
}
