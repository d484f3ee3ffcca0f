//! Flag declarations.
//!
//! A [`Flag`] describes one switch: long name, optional short name, usage
//! text and its kind. Parsed values are keyed by [`FlagId`], not by name, so
//! one flag shared between global and command scope always resolves to the
//! same entry while two flags that merely share a name stay distinct.

use std::sync::atomic::{AtomicU64, Ordering};

/// Raw value recorded for a boolean flag when it shows up in argv.
pub(crate) const PRESENT: &str = "true";

// 0 is taken by the implicit help flag.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a flag declaration.
///
/// Assigned once at construction; clones of a [`Flag`] keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlagId(u64);

impl FlagId {
    pub(crate) const HELP: FlagId = FlagId(0);

    fn next() -> Self {
        FlagId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Presence-only switch, `false` unless given.
    Bool,
    /// Takes the next token as its value, absent unless given.
    String,
}

impl FlagKind {
    /// Turn a raw token recorded for this kind into a value.
    ///
    /// The engine only ever records [`PRESENT`] for boolean flags, so the
    /// boolean conversion ignores its input.
    pub fn convert(self, raw: &str) -> FlagValue {
        match self {
            Self::Bool => FlagValue::Bool(true),
            Self::String => FlagValue::String(Some(raw.to_string())),
        }
    }

    pub fn default_value(self) -> FlagValue {
        match self {
            Self::Bool => FlagValue::Bool(false),
            Self::String => FlagValue::String(None),
        }
    }

    pub fn takes_value(self) -> bool {
        matches!(self, Self::String)
    }
}

/// Resolved value of a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    String(Option<String>),
}

#[derive(Debug, Clone)]
pub struct Flag {
    id: FlagId,
    name: String,
    short: Option<String>,
    usage: String,
    kind: FlagKind,
}

impl Flag {
    /// Declare a presence-only flag such as `--verbose`.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::with_id(FlagId::next(), name, FlagKind::Bool)
    }

    /// Declare a flag that takes the following token as its value.
    pub fn string(name: impl Into<String>) -> Self {
        Self::with_id(FlagId::next(), name, FlagKind::String)
    }

    /// The implicit `--help`/`-h` flag every program carries.
    pub fn help() -> Self {
        Self::with_id(FlagId::HELP, "help", FlagKind::Bool)
            .short("h")
            .usage("Display this message")
    }

    fn with_id(id: FlagId, name: impl Into<String>, kind: FlagKind) -> Self {
        Self {
            id,
            name: normalize(name.into()),
            short: None,
            usage: String::new(),
            kind,
        }
    }

    /// Set the short form. Leading dashes are dropped, so `"v"` and `"-v"`
    /// are the same.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        let short = normalize(short.into());
        self.short = (!short.is_empty()).then_some(short);
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn id(&self) -> FlagId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    pub fn default_value(&self) -> FlagValue {
        self.kind.default_value()
    }

    pub fn convert(&self, raw: &str) -> FlagValue {
        self.kind.convert(raw)
    }

    /// Exact match against `--name` or `-short`. No prefixes, no `=value`.
    pub fn matches(&self, token: &str) -> bool {
        if token.strip_prefix("--") == Some(self.name.as_str()) {
            return true;
        }
        match (&self.short, token.strip_prefix('-')) {
            (Some(short), Some(rest)) => rest == short,
            _ => false,
        }
    }

    /// `-h,--help` style listing used by help output and diagnostics.
    pub fn display_names(&self) -> String {
        let mut names = Vec::with_capacity(2);
        if let Some(short) = &self.short {
            names.push(format!("-{short}"));
        }
        names.push(format!("--{}", self.name));
        names.join(",")
    }

    /// Whether `other` would answer to one of this flag's names.
    pub(crate) fn collides_with(&self, other: &Flag) -> bool {
        self.name == other.name
            || self
                .short
                .as_ref()
                .is_some_and(|s| other.short.as_ref() == Some(s))
    }
}

/// Anything starting with a dash is flag-shaped, including a lone `-`.
pub fn is_flag_token(token: &str) -> bool {
    token.starts_with('-')
}

fn normalize(name: String) -> String {
    name.trim().trim_start_matches('-').to_string()
}
