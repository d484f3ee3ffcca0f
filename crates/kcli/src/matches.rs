use indexmap::IndexMap;
use serde::Serialize;

use crate::command::Command;
use crate::flag::{Flag, FlagId, FlagKind, FlagValue};
use crate::program::Program;

/// Result of one successful parse.
///
/// Built fresh for each call and never mutated after the engine hands it
/// out. Raw tokens are stored per [`FlagId`]; typed values are produced on
/// read through the flag's own conversion.
#[derive(Debug, Clone)]
pub struct Matches<'p> {
    program: &'p Program,
    command: Option<&'p Command>,
    arg: Option<String>,
    values: IndexMap<FlagId, Entry<'p>>,
}

#[derive(Debug, Clone)]
struct Entry<'p> {
    flag: &'p Flag,
    raw: String,
}

impl<'p> Matches<'p> {
    pub(crate) fn new(program: &'p Program) -> Self {
        Self {
            program,
            command: None,
            arg: None,
            values: IndexMap::new(),
        }
    }

    pub(crate) fn set_command(&mut self, command: &'p Command) {
        self.command = Some(command);
    }

    /// Last one wins.
    pub(crate) fn set_arg(&mut self, value: &str) {
        self.arg = Some(value.to_string());
    }

    /// Last one wins, keeping the position of the first occurrence.
    pub(crate) fn insert(&mut self, flag: &'p Flag, raw: &str) {
        self.values.insert(
            flag.id(),
            Entry {
                flag,
                raw: raw.to_string(),
            },
        );
    }

    /// Resolved value: converted raw token if seen, the flag's default otherwise.
    pub fn value(&self, flag: &Flag) -> FlagValue {
        match self.values.get(&flag.id()) {
            Some(entry) => flag.convert(&entry.raw),
            None => flag.default_value(),
        }
    }

    /// `true` for a boolean flag that was given, or a string flag that
    /// received a value.
    pub fn is_set(&self, flag: &Flag) -> bool {
        match self.value(flag) {
            FlagValue::Bool(b) => b,
            FlagValue::String(s) => s.is_some(),
        }
    }

    /// Value of a string flag, `None` when absent or when `flag` is boolean.
    pub fn string(&self, flag: &Flag) -> Option<&str> {
        if flag.kind() != FlagKind::String {
            return None;
        }
        self.raw(flag)
    }

    /// The raw token recorded for `flag`.
    pub fn raw(&self, flag: &Flag) -> Option<&str> {
        self.values.get(&flag.id()).map(|e| e.raw.as_str())
    }

    /// Captured positional argument.
    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    pub fn command(&self) -> Option<&'p Command> {
        self.command
    }

    pub fn has_command(&self) -> bool {
        self.command.is_some()
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn help_requested(&self) -> bool {
        self.values.contains_key(&FlagId::HELP)
    }

    /// Raw values keyed by flag name in first-seen order.
    ///
    /// Distinct flags sharing a name collapse into one entry here, the later
    /// one winning.
    pub fn flag_values(&self) -> IndexMap<&str, &str> {
        self.values
            .values()
            .map(|e| (e.flag.name(), e.raw.as_str()))
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            program: self.program.name().to_string(),
            command: self.command.map(|c| c.name().to_string()),
            arg: self.arg.clone(),
            flags: self
                .flag_values()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Owned, serializable view of a [`Matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub program: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    pub flags: IndexMap<String, String>,
}
