//! Event record definitions for decoded trace-log lines.
//!
//! These are the structures the rest of the crate passes around and the
//! shape the JSON report exposes to the web viewer. Field names are
//! camelCase on the wire because the viewer is a JavaScript app.

use crate::utils::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How performance-significant an entry is, 1 (informational) to 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Severity {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Zero-based histogram bucket for this severity
    pub fn bucket(self) -> usize {
        self as usize - 1
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> u8 {
        severity as u8
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Severity::Low),
            2 => Ok(Severity::Medium),
            3 => Ok(Severity::High),
            other => Err(format!("severity must be 1, 2 or 3, got {}", other)),
        }
    }
}

/// Resolved source location of an entry
///
/// An empty `file` marks the Unknown sentinel: the script id never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Sentinel for a location whose script could not be resolved
    pub fn unknown(line: u32, column: u32) -> Self {
        Self::new(String::new(), line, column)
    }

    pub fn is_unknown(&self) -> bool {
        self.file.is_empty()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = if self.is_unknown() { "<unknown>" } else { &self.file };
        write!(f, "{}:{}:{}", file, self.line, self.column)
    }
}

/// Inline cache kinds, named after their log tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IcType {
    #[serde(rename = "LoadIC")]
    Load,
    #[serde(rename = "StoreIC")]
    Store,
    #[serde(rename = "KeyedLoadIC")]
    KeyedLoad,
    #[serde(rename = "KeyedStoreIC")]
    KeyedStore,
    #[serde(rename = "KeyedHasIC")]
    KeyedHas,
    #[serde(rename = "LoadGlobalIC")]
    LoadGlobal,
    #[serde(rename = "StoreGlobalIC")]
    StoreGlobal,
    #[serde(rename = "StoreInArrayLiteralIC")]
    StoreInArrayLiteral,
    #[serde(rename = "DefineNamedOwnIC")]
    DefineNamedOwn,
    #[serde(rename = "DefineKeyedOwnIC")]
    DefineKeyedOwn,
}

impl IcType {
    pub const ALL: [IcType; 10] = [
        IcType::Load,
        IcType::Store,
        IcType::KeyedLoad,
        IcType::KeyedStore,
        IcType::KeyedHas,
        IcType::LoadGlobal,
        IcType::StoreGlobal,
        IcType::StoreInArrayLiteral,
        IcType::DefineNamedOwn,
        IcType::DefineKeyedOwn,
    ];

    /// The leading tag V8 writes for this IC kind
    pub fn tag(self) -> &'static str {
        match self {
            IcType::Load => "LoadIC",
            IcType::Store => "StoreIC",
            IcType::KeyedLoad => "KeyedLoadIC",
            IcType::KeyedStore => "KeyedStoreIC",
            IcType::KeyedHas => "KeyedHasIC",
            IcType::LoadGlobal => "LoadGlobalIC",
            IcType::StoreGlobal => "StoreGlobalIC",
            IcType::StoreInArrayLiteral => "StoreInArrayLiteralIC",
            IcType::DefineNamedOwn => "DefineNamedOwnIC",
            IcType::DefineKeyedOwn => "DefineKeyedOwnIC",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ic| ic.tag() == tag)
    }
}

/// Inline cache state as printed by `--trace-ic`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IcState {
    Uninitialized,
    Premonomorphic,
    Monomorphic,
    RecomputeHandler,
    Polymorphic,
    Megamorphic,
    Megadom,
    Generic,
    NoFeedback,
}

impl FromStr for IcState {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "0" => Self::Uninitialized,
            "." => Self::Premonomorphic,
            "1" => Self::Monomorphic,
            "^" => Self::RecomputeHandler,
            "P" => Self::Polymorphic,
            "N" => Self::Megamorphic,
            "D" => Self::Megadom,
            "G" => Self::Generic,
            "X" => Self::NoFeedback,
            long => match long.to_lowercase().as_str() {
                "uninitialized" => Self::Uninitialized,
                "premonomorphic" => Self::Premonomorphic,
                "monomorphic" => Self::Monomorphic,
                "recompute_handler" => Self::RecomputeHandler,
                "polymorphic" => Self::Polymorphic,
                "megamorphic" => Self::Megamorphic,
                "megadom" => Self::Megadom,
                "generic" => Self::Generic,
                "no_feedback" => Self::NoFeedback,
                _ => return Err(DecodeError::UnknownIcState(s.to_string())),
            },
        })
    }
}

/// How a deoptimization was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BailoutType {
    Soft,
    Lazy,
    Eager,
}

impl FromStr for BailoutType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = s.strip_prefix("deopt-").unwrap_or(s);
        match kind.to_lowercase().as_str() {
            "soft" => Ok(Self::Soft),
            "lazy" => Ok(Self::Lazy),
            "eager" => Ok(Self::Eager),
            _ => Err(DecodeError::UnknownBailoutType(s.to_string())),
        }
    }
}

/// Compilation tier of a code object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    Builtin,
    Unoptimized,
    Baseline,
    MidTier,
    Optimized,
}

/// One step in a function's code history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeState {
    Builtin,
    Unoptimized,
    Baseline,
    MidTier,
    Optimized,
    Deoptimized,
}

impl CodeState {
    /// True for tiers produced by an optimizing compiler
    pub fn is_optimized(self) -> bool {
        matches!(self, CodeState::MidTier | CodeState::Optimized)
    }
}

impl From<CodeKind> for CodeState {
    fn from(kind: CodeKind) -> Self {
        match kind {
            CodeKind::Builtin => CodeState::Builtin,
            CodeKind::Unoptimized => CodeState::Unoptimized,
            CodeKind::Baseline => CodeState::Baseline,
            CodeKind::MidTier => CodeState::MidTier,
            CodeKind::Optimized => CodeState::Optimized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeUpdate {
    pub timestamp: u64,
    pub state: CodeState,
}

/// An inline cache state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcEntry {
    #[serde(flatten)]
    pub position: Position,
    pub ic_type: IcType,
    pub old_state: IcState,
    pub new_state: IcState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow_reason: Option<String>,
    pub timestamp: u64,
    pub severity: Severity,
}

/// A deoptimization of a compiled function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeoptEntry {
    #[serde(flatten)]
    pub position: Position,
    pub function_name: String,
    pub bailout_type: BailoutType,
    pub deopt_reason: String,
    #[serde(default)]
    pub inlining_chain: Vec<String>,
    pub timestamp: u64,
    pub severity: Severity,
}

/// A function's code objects over the life of the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeEntry {
    #[serde(flatten)]
    pub position: Position,
    pub function_name: String,
    /// Tier of the most recent code object
    pub kind: CodeKind,
    pub updates: Vec<CodeUpdate>,
    pub severity: Severity,
}

/// A decoded, classified event of one of the three record kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Code(CodeEntry),
    Deopt(DeoptEntry),
    Ic(IcEntry),
}

impl LogEvent {
    pub fn position(&self) -> &Position {
        match self {
            LogEvent::Code(entry) => &entry.position,
            LogEvent::Deopt(entry) => &entry.position,
            LogEvent::Ic(entry) => &entry.position,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            LogEvent::Code(entry) => entry.severity,
            LogEvent::Deopt(entry) => entry.severity,
            LogEvent::Ic(entry) => entry.severity,
        }
    }
}

/// All entries located in one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerFileDeoptInfo {
    pub codes: Vec<CodeEntry>,
    pub deopts: Vec<DeoptEntry>,
    pub ics: Vec<IcEntry>,
}

impl PerFileDeoptInfo {
    pub fn len(&self) -> usize {
        self.codes.len() + self.deopts.len() + self.ics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolved file path -> entries; `""` holds unresolved entries
pub type DeoptInfo = BTreeMap<String, PerFileDeoptInfo>;

/// Non-fatal findings recorded while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A script id was bound again to a different path; the first binding won
    #[serde(rename_all = "camelCase")]
    RegistryConflict {
        script_id: i64,
        kept: String,
        rejected: String,
        line: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RegistryConflict {
                script_id,
                kept,
                rejected,
                line,
            } => write!(
                f,
                "line {}: script {} rebound to {:?}, keeping {:?}",
                line + 1,
                script_id,
                rejected,
                kept
            ),
        }
    }
}

/// Line counters for a parse run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    pub total_lines: usize,
    pub unrecognized_lines: usize,
    pub malformed_lines: usize,
    pub scripts: usize,
    pub filtered_internal: usize,
}
