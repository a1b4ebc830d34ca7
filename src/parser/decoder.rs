//! Field extraction for classified log lines.
//!
//! Two record layouts are accepted. Logs written by V8 (`--trace-ic`)
//! reference code by address; pre-resolved logs reference scripts by id.
//! Fields after the tag:
//!
//! ```text
//! V8 layout
//! code-creation   codeType, kind, timestamp, start, size, "<name> <url>:<line>:<column>"[, sfi, state]
//! <Kind>IC        pc, timestamp, line, column, oldState, newState, map, key, modifier, slowReason
//! code-deopt      timestamp, size, code, inliningId, scriptOffset, bailoutType, "<url:line:column>", reason...
//!
//! Script id layout
//! script-details  scriptId, url, ...
//! code-creation   codeType, timestamp, scriptId, "<name> <url>:<line>:<column>", state
//! <Kind>IC        timestamp, scriptId, line, column, oldState, newState, map, key, modifier, slowReason
//! code-deopt      timestamp, scriptId, line, column, bailoutType, functionName, inliningChain, reason...
//! ```
//!
//! The layout is told apart by the `0x` address in a fixed field. Decoding
//! never aborts a parse: a malformed line yields a `DecodeError` that the
//! driver logs and skips. Entries leave the decoder with a placeholder
//! severity; the classify stage assigns the real one.

use super::registry::ScriptRegistry;
use super::schema::{
    BailoutType, CodeKind, DeoptEntry, IcEntry, IcState, IcType, Position, Severity,
};
use super::tokenizer::{ClassifiedLine, LineKind};
use crate::utils::config::BUILTIN_CODE_TYPES;
use crate::utils::error::DecodeError;
use std::str::FromStr;

/// Severity carried by entries until the classify stage runs
pub(crate) const UNCLASSIFIED: Severity = Severity::Low;

/// Which script a function's code objects and deopts belong to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodeOrigin {
    /// Script id of a script id layout line
    Script(i64),
    /// Path of an address-referenced code object
    Url(String),
}

/// A code object announced by a `code-creation` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSighting {
    pub origin: CodeOrigin,
    pub position: Position,
    pub function_name: String,
    pub kind: CodeKind,
    pub timestamp: u64,
}

/// A deopt plus the origin needed to find the function's code history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeoptEvent {
    pub origin: CodeOrigin,
    pub entry: DeoptEntry,
}

/// Outcome of decoding one line against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Code(CodeSighting),
    Deopt(DeoptEvent),
    Ic(IcEntry),
}

/// What a line contributes to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Script {
        script_id: i64,
        file: String,
    },
    Code {
        start: u64,
        size: u64,
        file: String,
        function_name: String,
    },
}

/// How a `code-creation` line places its code object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeTarget {
    Script(i64),
    Address { start: u64, size: u64 },
}

/// Every field of a `code-creation` line, validated
#[derive(Debug, Clone, Copy)]
struct CodeCreation<'l> {
    target: CodeTarget,
    timestamp: u64,
    function_name: &'l str,
    location: Option<(&'l str, u32, u32)>,
    kind: CodeKind,
}

/// Extract the registry binding a line announces, if any
///
/// Used by the registry pass. A `code-creation` line binds only when the
/// whole line decodes, so a line the decode pass rejects never claims a
/// script id. Lines without a source location (builtins, stubs) bind
/// nothing.
pub fn registry_binding(line: &ClassifiedLine<'_>) -> Result<Option<Binding>, DecodeError> {
    match line.kind {
        LineKind::ScriptDetails => {
            let tag = line.kind.tag();
            let script_id = parse_number(tag, "scriptId", required(line, 0, tag, "scriptId")?)?;
            let url = required(line, 1, tag, "url")?;
            Ok(Some(Binding::Script {
                script_id,
                file: url.to_string(),
            }))
        }
        LineKind::CodeCreation => {
            let code = parse_code_creation(line)?;
            let Some((url, _, _)) = code.location else {
                return Ok(None);
            };
            Ok(Some(match code.target {
                CodeTarget::Script(script_id) => Binding::Script {
                    script_id,
                    file: url.to_string(),
                },
                CodeTarget::Address { start, size } => Binding::Code {
                    start,
                    size,
                    file: url.to_string(),
                    function_name: code.function_name.to_string(),
                },
            }))
        }
        LineKind::CodeDeopt | LineKind::Ic(_) => Ok(None),
    }
}

/// Decode an event line, resolving its script through `registry`
///
/// Returns `Ok(None)` for lines that are well-formed but carry no entry
/// (`script-details`, position-less code objects).
pub fn decode_line(
    line: &ClassifiedLine<'_>,
    registry: &ScriptRegistry,
) -> Result<Option<Decoded>, DecodeError> {
    match line.kind {
        LineKind::ScriptDetails => Ok(None),
        LineKind::CodeCreation => Ok(decode_code_creation(line, registry)?.map(Decoded::Code)),
        LineKind::CodeDeopt => decode_deopt(line, registry).map(|d| Some(Decoded::Deopt(d))),
        LineKind::Ic(ic_type) => decode_ic(line, ic_type, registry).map(|ic| Some(Decoded::Ic(ic))),
    }
}

fn parse_code_creation<'l>(line: &'l ClassifiedLine<'_>) -> Result<CodeCreation<'l>, DecodeError> {
    let tag = line.kind.tag();
    let code_type = required(line, 0, tag, "codeType")?;

    let (target, timestamp, name, state) = if line.field(3).is_some_and(is_address) {
        let timestamp = parse_number(tag, "timestamp", required(line, 2, tag, "timestamp")?)?;
        let start = parse_address(tag, "start", required(line, 3, tag, "start")?)?;
        let size = parse_number(tag, "size", required(line, 4, tag, "size")?)?;
        let name = required(line, 5, tag, "name")?;
        let state = line.field(7).unwrap_or("");
        (CodeTarget::Address { start, size }, timestamp, name, state)
    } else {
        let timestamp = parse_number(tag, "timestamp", required(line, 1, tag, "timestamp")?)?;
        let script_id = parse_number(tag, "scriptId", required(line, 2, tag, "scriptId")?)?;
        let name = required(line, 3, tag, "name")?;
        let state = line.field(4).unwrap_or("");
        (CodeTarget::Script(script_id), timestamp, name, state)
    };

    let (function_name, location) = split_name_field(name);
    Ok(CodeCreation {
        target,
        timestamp,
        function_name,
        location,
        kind: parse_code_kind(code_type, state)?,
    })
}

fn decode_code_creation(
    line: &ClassifiedLine<'_>,
    registry: &ScriptRegistry,
) -> Result<Option<CodeSighting>, DecodeError> {
    let code = parse_code_creation(line)?;
    let Some((url, source_line, column)) = code.location else {
        return Ok(None);
    };

    let (origin, position) = match code.target {
        // Negative ids never enter the registry; the line's own url is all we have.
        CodeTarget::Script(script_id) if script_id < 0 => (
            CodeOrigin::Script(script_id),
            Position::new(url, source_line, column),
        ),
        CodeTarget::Script(script_id) => (
            CodeOrigin::Script(script_id),
            registry.resolve(script_id, source_line, column, line.ordinal),
        ),
        CodeTarget::Address { .. } => (
            CodeOrigin::Url(url.to_string()),
            Position::new(url, source_line, column),
        ),
    };

    Ok(Some(CodeSighting {
        origin,
        position,
        function_name: code.function_name.to_string(),
        kind: code.kind,
        timestamp: code.timestamp,
    }))
}

fn decode_ic(
    line: &ClassifiedLine<'_>,
    ic_type: IcType,
    registry: &ScriptRegistry,
) -> Result<IcEntry, DecodeError> {
    let tag = line.kind.tag();
    let first = required(line, 0, tag, "timestamp")?;
    let second = required(line, 1, tag, "scriptId")?;
    let source_line = parse_line_number(tag, required(line, 2, tag, "line")?)?;
    let column = parse_number(tag, "column", required(line, 3, tag, "column")?)?;
    let old_state = IcState::from_str(required(line, 4, tag, "oldState")?)?;
    let new_state = IcState::from_str(required(line, 5, tag, "newState")?)?;

    let (timestamp, position) = if is_address(first) {
        let pc = parse_address(tag, "pc", first)?;
        let timestamp = parse_number(tag, "timestamp", second)?;
        (
            timestamp,
            registry.resolve_address(pc, source_line, column, line.ordinal),
        )
    } else {
        let timestamp = parse_number(tag, "timestamp", first)?;
        let script_id = parse_number(tag, "scriptId", second)?;
        (
            timestamp,
            registry.resolve(script_id, source_line, column, line.ordinal),
        )
    };

    Ok(IcEntry {
        position,
        ic_type,
        old_state,
        new_state,
        map: optional(line, 6),
        key: optional(line, 7),
        modifier: optional(line, 8),
        slow_reason: optional(line, 9),
        timestamp,
        severity: UNCLASSIFIED,
    })
}

fn decode_deopt(
    line: &ClassifiedLine<'_>,
    registry: &ScriptRegistry,
) -> Result<DeoptEvent, DecodeError> {
    if line.field(2).is_some_and(is_address) {
        return decode_v8_deopt(line, registry);
    }

    let tag = line.kind.tag();
    let timestamp = parse_number(tag, "timestamp", required(line, 0, tag, "timestamp")?)?;
    let script_id = parse_number(tag, "scriptId", required(line, 1, tag, "scriptId")?)?;
    let source_line = parse_line_number(tag, required(line, 2, tag, "line")?)?;
    let column = parse_number(tag, "column", required(line, 3, tag, "column")?)?;
    let bailout_type = BailoutType::from_str(required(line, 4, tag, "bailoutType")?)?;
    let function_name = required(line, 5, tag, "functionName")?.to_string();
    let inlining_chain = required(line, 6, tag, "inliningChain")?
        .split(';')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    Ok(DeoptEvent {
        origin: CodeOrigin::Script(script_id),
        entry: DeoptEntry {
            position: registry.resolve(script_id, source_line, column, line.ordinal),
            function_name,
            bailout_type,
            deopt_reason: deopt_reason(line, tag)?,
            inlining_chain,
            timestamp,
            severity: UNCLASSIFIED,
        },
    })
}

/// V8 names the deoptimized code by address and the source by location
fn decode_v8_deopt(
    line: &ClassifiedLine<'_>,
    registry: &ScriptRegistry,
) -> Result<DeoptEvent, DecodeError> {
    let tag = line.kind.tag();
    let timestamp = parse_number(tag, "timestamp", required(line, 0, tag, "timestamp")?)?;
    let code = parse_address(tag, "code", required(line, 2, tag, "code")?)?;
    let bailout_type = BailoutType::from_str(required(line, 5, tag, "bailoutType")?)?;
    let location = required(line, 6, tag, "deoptLocation")?;
    let (url, source_line, column) = parse_deopt_location(location).ok_or_else(|| {
        DecodeError::InvalidLocation {
            tag,
            value: location.to_string(),
        }
    })?;

    // The location may sit in an inlined callee; the history belongs to the
    // function whose code was thrown away.
    let (origin, function_name) = match registry.code_at(code, line.ordinal) {
        Some(owner) => (
            CodeOrigin::Url(owner.file.to_string()),
            owner.function_name.to_string(),
        ),
        None => (CodeOrigin::Url(url.to_string()), String::new()),
    };

    Ok(DeoptEvent {
        origin,
        entry: DeoptEntry {
            position: Position::new(url, source_line, column),
            function_name,
            bailout_type,
            deopt_reason: deopt_reason(line, tag)?,
            inlining_chain: Vec::new(),
            timestamp,
            severity: UNCLASSIFIED,
        },
    })
}

/// The reason is free text; rejoin anything the comma split tore apart
fn deopt_reason(line: &ClassifiedLine<'_>, tag: &'static str) -> Result<String, DecodeError> {
    if line.fields.len() < 8 {
        return Err(DecodeError::MissingField {
            tag,
            field: "deoptReason",
        });
    }
    Ok(line.fields[7..].join(","))
}

/// Split `"<name> <url>:<line>:<column>"` into the name and location
///
/// The name may be empty (anonymous functions) and may itself contain
/// spaces (`get foo`), so the url starts after the last space. A field
/// without a numeric `:line:column` suffix has no location.
pub fn split_name_field(field: &str) -> (&str, Option<(&str, u32, u32)>) {
    match split_location(field) {
        Some((head, line, column)) => {
            let (name, url) = head.rsplit_once(' ').unwrap_or(("", head));
            if url.is_empty() {
                (field, None)
            } else {
                (name, Some((url, line, column)))
            }
        }
        None => (field, None),
    }
}

/// Parse the first `<url:line:column>` of a deopt location
///
/// Inlined frames append ` inlined at <...>`; only the innermost position
/// is kept.
pub fn parse_deopt_location(field: &str) -> Option<(&str, u32, u32)> {
    let inner = field.trim().strip_prefix('<')?;
    let inner = &inner[..inner.find('>')?];
    split_location(inner).filter(|(url, _, _)| !url.is_empty())
}

/// Split a trailing `:<line>:<column>` off `text`; lines are 1-based
fn split_location(text: &str) -> Option<(&str, u32, u32)> {
    let (rest, column) = text.rsplit_once(':')?;
    let column = column.parse::<u32>().ok()?;
    let (head, line) = rest.rsplit_once(':')?;
    let line = line.parse::<u32>().ok().filter(|l| *l >= 1)?;
    Some((head, line, column))
}

/// Map a code type and tier marker to a `CodeKind`
///
/// `~` interpreted, `^` baseline, `+` mid-tier optimized, `*` optimized.
/// An empty marker is a builtin for runtime code types and unoptimized
/// otherwise.
pub fn parse_code_kind(code_type: &str, state: &str) -> Result<CodeKind, DecodeError> {
    match state {
        "~" => Ok(CodeKind::Unoptimized),
        "^" => Ok(CodeKind::Baseline),
        "+" => Ok(CodeKind::MidTier),
        "*" => Ok(CodeKind::Optimized),
        "" if BUILTIN_CODE_TYPES.contains(&code_type) => Ok(CodeKind::Builtin),
        "" => Ok(CodeKind::Unoptimized),
        other => Err(DecodeError::UnknownCodeState(other.to_string())),
    }
}

fn is_address(field: &str) -> bool {
    field.starts_with("0x")
}

fn required<'l>(
    line: &'l ClassifiedLine<'_>,
    index: usize,
    tag: &'static str,
    field: &'static str,
) -> Result<&'l str, DecodeError> {
    line.field(index)
        .ok_or(DecodeError::MissingField { tag, field })
}

fn optional(line: &ClassifiedLine<'_>, index: usize) -> Option<String> {
    line.field(index)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_number<T: FromStr>(
    tag: &'static str,
    field: &'static str,
    value: &str,
) -> Result<T, DecodeError> {
    value.trim().parse::<T>().map_err(|_| DecodeError::InvalidNumber {
        tag,
        field,
        value: value.to_string(),
    })
}

fn parse_address(tag: &'static str, field: &'static str, value: &str) -> Result<u64, DecodeError> {
    value
        .trim()
        .strip_prefix("0x")
        .and_then(|hex| u64::from_str_radix(hex, 16).ok())
        .ok_or_else(|| DecodeError::InvalidNumber {
            tag,
            field,
            value: value.to_string(),
        })
}

/// Source lines are 1-based
fn parse_line_number(tag: &'static str, value: &str) -> Result<u32, DecodeError> {
    match parse_number::<u32>(tag, "line", value)? {
        0 => Err(DecodeError::InvalidNumber {
            tag,
            field: "line",
            value: value.to_string(),
        }),
        line => Ok(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenizer::tokenize;

    fn single(text: &str) -> ClassifiedLine<'_> {
        tokenize(text).next().expect("line should classify")
    }

    fn registry_with(id: i64, file: &str) -> ScriptRegistry {
        let mut registry = ScriptRegistry::new();
        registry.register(id, file, 0).unwrap();
        registry
    }

    #[test]
    fn test_split_name_field() {
        assert_eq!(
            split_name_field("foo /app/foo.js:3:14"),
            ("foo", Some(("/app/foo.js", 3, 14)))
        );
        assert_eq!(
            split_name_field(" file:///app/foo.js:1:1"),
            ("", Some(("file:///app/foo.js", 1, 1)))
        );
        assert_eq!(
            split_name_field("get size /app/foo.js:9:5"),
            ("get size", Some(("/app/foo.js", 9, 5)))
        );
        assert_eq!(split_name_field("ArrayPrototypePush"), ("ArrayPrototypePush", None));
        assert_eq!(split_name_field("weird:x:1"), ("weird:x:1", None));
    }

    #[test]
    fn test_parse_deopt_location() {
        assert_eq!(
            parse_deopt_location("<file:///app/foo.js:12:3>"),
            Some(("file:///app/foo.js", 12, 3))
        );
        assert_eq!(
            parse_deopt_location("</app/a.js:4:1> inlined at </app/b.js:9:2>"),
            Some(("/app/a.js", 4, 1))
        );
        assert_eq!(parse_deopt_location("<unknown>"), None);
        assert_eq!(parse_deopt_location("/app/a.js:4:1"), None);
    }

    #[test]
    fn test_registry_binding_from_code_creation() {
        let line = single("code-creation,LazyCompile,100,7,foo /app/foo.js:1:10,~");
        assert_eq!(
            registry_binding(&line).unwrap(),
            Some(Binding::Script {
                script_id: 7,
                file: "/app/foo.js".to_string()
            })
        );

        let builtin = single("code-creation,Builtin,100,-1,ArrayPush,");
        assert_eq!(registry_binding(&builtin).unwrap(), None);
    }

    #[test]
    fn test_registry_binding_requires_whole_line() {
        for text in [
            "code-creation,LazyCompile,notanumber,7,foo /wrong.js:1:1,~",
            "code-creation,LazyCompile,5,7,foo /wrong.js:1:1,?",
            "code-creation,LazyCompile,0,zz,0x10,16,foo /wrong.js:1:1,0x20,~",
            "code-creation,LazyCompile,0,5,0x10,big,foo /wrong.js:1:1,0x20,~",
            "script-details,seven,/wrong.js",
        ] {
            assert!(registry_binding(&single(text)).is_err(), "{}", text);
        }
    }

    #[test]
    fn test_registry_binding_from_v8_code_creation() {
        let line = single("code-creation,LazyCompile,0,2300,0x1a2b3c,120,foo /app/foo.js:1:10,0x4d5e6f,~");
        assert_eq!(
            registry_binding(&line).unwrap(),
            Some(Binding::Code {
                start: 0x1a2b3c,
                size: 120,
                file: "/app/foo.js".to_string(),
                function_name: "foo".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_ic() {
        let registry = registry_with(7, "/app/foo.js");
        let line = single("KeyedStoreIC,55,7,10,4,1,N,0x1234,idx,,slow stub");

        let Some(Decoded::Ic(ic)) = decode_line(&line, &registry).unwrap() else {
            panic!("expected IC entry");
        };
        assert_eq!(ic.position, Position::new("/app/foo.js", 10, 4));
        assert_eq!(ic.ic_type, IcType::KeyedStore);
        assert_eq!(ic.old_state, IcState::Monomorphic);
        assert_eq!(ic.new_state, IcState::Megamorphic);
        assert_eq!(ic.map.as_deref(), Some("0x1234"));
        assert_eq!(ic.key.as_deref(), Some("idx"));
        assert_eq!(ic.modifier, None);
        assert_eq!(ic.slow_reason.as_deref(), Some("slow stub"));
        assert_eq!(ic.timestamp, 55);
    }

    #[test]
    fn test_decode_v8_ic_resolves_by_pc() {
        let mut registry = ScriptRegistry::new();
        registry.register_code(0x1a2b3c, 120, "/app/foo.js", "foo", 0);
        let line = single("KeyedHasIC,0x1a2b40,2310,10,4,0,1,0x9,x,,");

        let Some(Decoded::Ic(ic)) = decode_line(&line, &registry).unwrap() else {
            panic!("expected IC entry");
        };
        assert_eq!(ic.ic_type, IcType::KeyedHas);
        assert_eq!(ic.position, Position::new("/app/foo.js", 10, 4));
        assert_eq!(ic.timestamp, 2310);

        let stray = single("LoadIC,0x90,2311,3,1,0,1,0x9,x,,");
        let Some(Decoded::Ic(ic)) = decode_line(&stray, &registry).unwrap() else {
            panic!("expected IC entry");
        };
        assert!(ic.position.is_unknown());
    }

    #[test]
    fn test_decode_ic_missing_fields() {
        let registry = ScriptRegistry::new();
        let line = single("LoadIC,55,7,10");
        assert_eq!(
            decode_line(&line, &registry),
            Err(DecodeError::MissingField {
                tag: "LoadIC",
                field: "column"
            })
        );
    }

    #[test]
    fn test_decode_deopt_keeps_commas_in_reason() {
        let registry = registry_with(2, "/app/bar.js");
        let line = single("code-deopt,900,2,5,12,eager,render,inner;leaf,wrong map, or so");

        let Some(Decoded::Deopt(deopt)) = decode_line(&line, &registry).unwrap() else {
            panic!("expected deopt");
        };
        assert_eq!(deopt.origin, CodeOrigin::Script(2));
        assert_eq!(deopt.entry.position, Position::new("/app/bar.js", 5, 12));
        assert_eq!(deopt.entry.function_name, "render");
        assert_eq!(deopt.entry.inlining_chain, vec!["inner", "leaf"]);
        assert_eq!(deopt.entry.deopt_reason, "wrong map, or so");
        assert_eq!(deopt.entry.bailout_type, BailoutType::Eager);
    }

    #[test]
    fn test_decode_v8_deopt() {
        let mut registry = ScriptRegistry::new();
        registry.register_code(0x2000, 300, "/app/foo.js", "foo", 0);
        let line = single("code-deopt,2500,300,0x2000,0,40,deopt-eager,</app/util.js:12:3>,wrong map");

        let Some(Decoded::Deopt(deopt)) = decode_line(&line, &registry).unwrap() else {
            panic!("expected deopt");
        };
        assert_eq!(deopt.origin, CodeOrigin::Url("/app/foo.js".to_string()));
        assert_eq!(deopt.entry.function_name, "foo");
        assert_eq!(deopt.entry.position, Position::new("/app/util.js", 12, 3));
        assert_eq!(deopt.entry.bailout_type, BailoutType::Eager);
        assert_eq!(deopt.entry.deopt_reason, "wrong map");
        assert_eq!(deopt.entry.timestamp, 2500);
    }

    #[test]
    fn test_decode_v8_deopt_rejects_bad_location() {
        let registry = ScriptRegistry::new();
        let line = single("code-deopt,2500,300,0x2000,0,40,deopt-soft,<unknown>,reason");
        assert!(matches!(
            decode_line(&line, &registry),
            Err(DecodeError::InvalidLocation { .. })
        ));
    }

    #[test]
    fn test_decode_deopt_rejects_unknown_bailout() {
        let registry = ScriptRegistry::new();
        let line = single("code-deopt,900,2,5,12,sideways,render,,reason");
        assert!(matches!(
            decode_line(&line, &registry),
            Err(DecodeError::UnknownBailoutType(_))
        ));
    }

    #[test]
    fn test_decode_code_creation() {
        let registry = registry_with(7, "/app/foo.js");
        let line = single("code-creation,JS,120,7,foo /app/foo.js:1:10,*");

        let Some(Decoded::Code(code)) = decode_line(&line, &registry).unwrap() else {
            panic!("expected code sighting");
        };
        assert_eq!(code.origin, CodeOrigin::Script(7));
        assert_eq!(code.function_name, "foo");
        assert_eq!(code.kind, CodeKind::Optimized);
        assert_eq!(code.position, Position::new("/app/foo.js", 1, 10));
    }

    #[test]
    fn test_decode_v8_code_creation() {
        let registry = ScriptRegistry::new();
        let line = single("code-creation,JS,0,2400,0x2000,300,foo /app/foo.js:1:10,0x4d5e6f,+");

        let Some(Decoded::Code(code)) = decode_line(&line, &registry).unwrap() else {
            panic!("expected code sighting");
        };
        assert_eq!(code.origin, CodeOrigin::Url("/app/foo.js".to_string()));
        assert_eq!(code.kind, CodeKind::MidTier);
        assert_eq!(code.timestamp, 2400);
        assert_eq!(code.position, Position::new("/app/foo.js", 1, 10));
    }

    #[test]
    fn test_code_creation_without_location_yields_nothing() {
        let registry = ScriptRegistry::new();
        let line = single("code-creation,Builtin,3,-1,ArrayPush,");
        assert_eq!(decode_line(&line, &registry), Ok(None));

        let v8 = single("code-creation,Builtin,2,100,0x7f00,64,ArrayPush");
        assert_eq!(decode_line(&v8, &registry), Ok(None));
    }

    #[test]
    fn test_parse_code_kind() {
        assert_eq!(parse_code_kind("JS", "~").unwrap(), CodeKind::Unoptimized);
        assert_eq!(parse_code_kind("JS", "^").unwrap(), CodeKind::Baseline);
        assert_eq!(parse_code_kind("JS", "+").unwrap(), CodeKind::MidTier);
        assert_eq!(parse_code_kind("Builtin", "").unwrap(), CodeKind::Builtin);
        assert_eq!(parse_code_kind("Script", "").unwrap(), CodeKind::Unoptimized);
        assert!(parse_code_kind("JS", "?").is_err());
    }

    #[test]
    fn test_zero_line_is_malformed() {
        let registry = ScriptRegistry::new();
        let line = single("LoadIC,1,1,0,0,0,1");
        assert!(matches!(
            decode_line(&line, &registry),
            Err(DecodeError::InvalidNumber { field: "line", .. })
        ));
    }
}
