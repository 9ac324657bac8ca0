//! Field Registry
//!
//! The six entry fields a column can show, each bound once to a label and
//! an extraction function.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::warn;

use crate::vault::Entry;

pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Title,
    Url,
    User,
    Password,
    Created,
    Modified,
}

impl FieldKind {
    pub const ALL: [FieldKind; 6] = [
        Self::Title,
        Self::Url,
        Self::User,
        Self::Password,
        Self::Created,
        Self::Modified,
    ];

    /// Identifier used in the `entry.details` setting.
    pub fn name(self) -> &'static str {
        spec(self).name
    }

    pub fn label(self) -> &'static str {
        spec(self).label
    }

    pub fn from_name(name: &str) -> Option<Self> {
        REGISTRY.iter().find(|s| s.name == name).map(|s| s.kind)
    }
}

type Extractor = fn(&Entry, &DatePattern) -> String;

struct FieldSpec {
    kind: FieldKind,
    name: &'static str,
    label: &'static str,
    extract: Extractor,
}

// Indexed by `FieldKind as usize`.
static REGISTRY: [FieldSpec; 6] = [
    FieldSpec { kind: FieldKind::Title, name: "TITLE", label: "Title", extract: title },
    FieldSpec { kind: FieldKind::Url, name: "URL", label: "URL", extract: url },
    FieldSpec { kind: FieldKind::User, name: "USER", label: "User", extract: user },
    FieldSpec { kind: FieldKind::Password, name: "PASSWORD", label: "Password", extract: password },
    FieldSpec { kind: FieldKind::Created, name: "CREATED", label: "Created", extract: created },
    FieldSpec { kind: FieldKind::Modified, name: "MODIFIED", label: "Modified", extract: modified },
];

fn spec(kind: FieldKind) -> &'static FieldSpec {
    &REGISTRY[kind as usize]
}

fn title(entry: &Entry, _: &DatePattern) -> String {
    entry.title.clone()
}

fn url(entry: &Entry, _: &DatePattern) -> String {
    entry.url.clone()
}

fn user(entry: &Entry, _: &DatePattern) -> String {
    entry.user.clone()
}

fn password(entry: &Entry, _: &DatePattern) -> String {
    entry.password.clone()
}

fn created(entry: &Entry, pattern: &DatePattern) -> String {
    pattern.format(entry.creation_date)
}

fn modified(entry: &Entry, pattern: &DatePattern) -> String {
    pattern.format(entry.last_modification)
}

/// Turns entries into the formatted text shown in each column.
#[derive(Debug, Clone)]
pub struct FieldProjector {
    pattern: DatePattern,
}

impl Default for FieldProjector {
    fn default() -> Self {
        Self::new(DatePattern::default())
    }
}

impl FieldProjector {
    pub fn new(pattern: DatePattern) -> Self {
        Self { pattern }
    }

    /// Never fails: an absent entry projects to an empty string.
    pub fn extract(&self, kind: FieldKind, entry: Option<&Entry>) -> String {
        entry.map_or_else(String::new, |e| (spec(kind).extract)(e, &self.pattern))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("unsupported pattern letter '{0}'")]
    UnsupportedLetter(char),

    #[error("pattern letter '{0}' repeated {1} times")]
    BadWidth(char, usize),

    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// A `yyyy-MM-dd` style date pattern, translated once to a chrono format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    strftime: String,
}

impl Default for DatePattern {
    fn default() -> Self {
        Self {
            strftime: "%Y-%m-%d".to_string(),
        }
    }
}

impl DatePattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let strftime = translate(pattern)?;
        // translate() only emits known specifiers
        debug_assert!(!StrftimeItems::new(&strftime).any(|i| matches!(i, Item::Error)));
        Ok(Self { strftime })
    }

    /// Parse a configured pattern, falling back to the default when invalid.
    pub fn from_config(pattern: &str) -> Self {
        Self::parse(pattern).unwrap_or_else(|e| {
            warn!(pattern, error = %e, "invalid date.format, using {}", DEFAULT_DATE_FORMAT);
            Self::default()
        })
    }

    /// Missing timestamps are shown as the epoch.
    pub fn format(&self, value: Option<NaiveDateTime>) -> String {
        let value = value.unwrap_or_default();
        value.format(&self.strftime).to_string()
    }
}

fn translate(pattern: &str) -> Result<String, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            i = copy_quoted(&chars, i, &mut out)?;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            if c == '%' {
                out.push_str("%%");
            } else {
                out.push(c);
            }
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        out.push_str(specifier(c, run)?);
        i += run;
    }

    Ok(out)
}

/// Copies a quoted literal starting at `start`, returning the index after it.
fn copy_quoted(chars: &[char], start: usize, out: &mut String) -> Result<usize, PatternError> {
    if chars.get(start + 1) == Some(&'\'') {
        out.push('\'');
        return Ok(start + 2);
    }

    let mut i = start + 1;
    loop {
        match chars.get(i) {
            None => return Err(PatternError::UnterminatedQuote),
            Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                out.push('\'');
                i += 2;
            }
            Some('\'') => return Ok(i + 1),
            Some('%') => {
                out.push_str("%%");
                i += 1;
            }
            Some(&c) => {
                out.push(c);
                i += 1;
            }
        }
    }
}

fn specifier(letter: char, run: usize) -> Result<&'static str, PatternError> {
    let spec = match (letter, run) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('H', 1) => "%-H",
        ('H', 2) => "%H",
        ('h', 1) => "%-I",
        ('h', 2) => "%I",
        ('m', 1) => "%-M",
        ('m', 2) => "%M",
        ('s', 1) => "%-S",
        ('s', 2) => "%S",
        ('a', 1) => "%p",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('d' | 'H' | 'h' | 'm' | 's' | 'a', n) => return Err(PatternError::BadWidth(letter, n)),
        _ => return Err(PatternError::UnsupportedLetter(letter)),
    };
    Ok(spec)
}
