//! Line splitting and classification for V8 trace logs.
//!
//! A log is a sequence of comma-separated records whose first field is a
//! tag. Only a handful of tags matter here; everything else (ticks, code
//! moves, heap events, ...) is noise and is dropped.
//!
//! V8 escapes characters that would break the format: `,` is written as
//! `\x2C`, a backslash as `\\`, a newline as `\n` and non-ASCII characters
//! as `\uXXXX`. Fields are unescaped here so the decoder sees plain text.

use super::schema::IcType;
use crate::utils::config::{TAG_CODE_CREATION, TAG_CODE_DEOPT, TAG_SCRIPT_DETAILS};
use std::borrow::Cow;

/// A raw line and its zero-based position in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub ordinal: usize,
    pub text: &'a str,
}

/// Event kind selected by a line's leading tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    ScriptDetails,
    CodeCreation,
    CodeDeopt,
    Ic(IcType),
}

impl LineKind {
    /// Classify a leading tag, `None` for tags we do not consume
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            TAG_SCRIPT_DETAILS => Some(Self::ScriptDetails),
            TAG_CODE_CREATION => Some(Self::CodeCreation),
            TAG_CODE_DEOPT => Some(Self::CodeDeopt),
            other => IcType::from_tag(other).map(Self::Ic),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::ScriptDetails => TAG_SCRIPT_DETAILS,
            Self::CodeCreation => TAG_CODE_CREATION,
            Self::CodeDeopt => TAG_CODE_DEOPT,
            Self::Ic(ic) => ic.tag(),
        }
    }
}

/// A line with a recognized tag, split into unescaped fields
///
/// `fields` excludes the tag itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub ordinal: usize,
    pub kind: LineKind,
    pub fields: Vec<Cow<'a, str>>,
}

impl ClassifiedLine<'_> {
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|f| f.as_ref())
    }
}

/// Split log text into numbered lines
///
/// Handles both `\n` and `\r\n` endings. Blank lines keep their ordinal so
/// diagnostics can point at the real line number.
pub fn lines(text: &str) -> impl Iterator<Item = LogLine<'_>> {
    text.lines()
        .enumerate()
        .map(|(ordinal, text)| LogLine { ordinal, text })
}

/// Classify a single line, `None` if blank or its tag is not one we consume
pub fn classify(line: LogLine<'_>) -> Option<ClassifiedLine<'_>> {
    let text = line.text.trim_end();
    if text.is_empty() {
        return None;
    }

    let (tag, rest) = match text.split_once(',') {
        Some((tag, rest)) => (tag, Some(rest)),
        None => (text, None),
    };
    let kind = LineKind::from_tag(tag)?;

    let fields = rest.map(split_fields).unwrap_or_default();
    Some(ClassifiedLine {
        ordinal: line.ordinal,
        kind,
        fields,
    })
}

/// Lazily classify every line, silently dropping the ones we do not consume
pub fn tokenize(text: &str) -> impl Iterator<Item = ClassifiedLine<'_>> {
    lines(text).filter_map(classify)
}

/// Split a record body on commas and unescape each field
pub fn split_fields(body: &str) -> Vec<Cow<'_, str>> {
    body.split(',').map(unescape).collect()
}

/// Undo V8 log escaping; borrows when the field has nothing to unescape
pub fn unescape(field: &str) -> Cow<'_, str> {
    if !field.contains('\\') {
        return Cow::Borrowed(field);
    }

    let mut out = String::with_capacity(field.len());
    let mut rest = field;
    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);
        let escape = &rest[idx + 1..];
        let consumed = match escape.chars().next() {
            Some('\\') => {
                out.push('\\');
                1
            }
            Some('n') => {
                out.push('\n');
                1
            }
            Some('x') => push_hex(&mut out, &escape[1..], 2),
            Some('u') => push_hex(&mut out, &escape[1..], 4),
            _ => {
                // Unknown escape, keep it verbatim
                out.push('\\');
                0
            }
        };
        rest = &escape[consumed..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode `digits` hex digits into a char, returning how many bytes of the
/// escape (including its letter) were consumed
fn push_hex(out: &mut String, after_letter: &str, digits: usize) -> usize {
    let decoded = after_letter
        .get(..digits)
        .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .and_then(char::from_u32);

    match decoded {
        Some(c) => {
            out.push(c);
            digits + 1
        }
        None => {
            out.push('\\');
            0
        }
    }
}
