use std::fmt;
use std::sync::Arc;

use crate::command::Command;
use crate::error::{ParseError, Result};
use crate::flag::Flag;
use crate::help::{DefaultHelp, HelpRenderer};

/// Root declaration: global flags, commands and the help renderer.
///
/// The help flag is always the first global flag. Declarations are
/// immutable once assembled and can be shared across threads and parses.
#[derive(Clone)]
pub struct Program {
    name: String,
    usage: String,
    flags: Vec<Flag>,
    commands: Vec<Command>,
    renderer: Arc<dyn HelpRenderer + Send + Sync>,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: String::new(),
            flags: vec![Flag::help()],
            commands: Vec::new(),
            renderer: Arc::new(DefaultHelp::default()),
        }
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Add a global flag.
    ///
    /// A name clash with an earlier flag is logged but kept: lookup goes in
    /// declaration order, so the earlier flag wins.
    pub fn flag(mut self, flag: Flag) -> Self {
        if let Some(existing) = self.flags.iter().find(|f| f.collides_with(&flag)) {
            tracing::warn!(
                program = %self.name,
                flag = %flag.display_names(),
                shadowed_by = %existing.display_names(),
                "duplicate global flag name"
            );
        }
        self.flags.push(flag);
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        if let Some(existing) = self.commands.iter().find(|c| c.collides_with(&command)) {
            tracing::warn!(
                program = %self.name,
                command = %command.name(),
                shadowed_by = %existing.name(),
                "duplicate command name"
            );
        }
        for flag in command.flags() {
            if let Some(global) = self.flags.iter().find(|f| f.collides_with(flag)) {
                tracing::warn!(
                    command = %command.name(),
                    flag = %flag.display_names(),
                    shadowed_by = %global.display_names(),
                    "command flag shadowed by global flag"
                );
            }
        }
        self.commands.push(command);
        self
    }

    /// Replace the default help layout.
    pub fn renderer(mut self, renderer: impl HelpRenderer + Send + Sync + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn help_renderer(&self) -> &(dyn HelpRenderer + Send + Sync) {
        self.renderer.as_ref()
    }

    /// First command answering to `token`.
    pub fn find_command(&self, token: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(token))
    }

    /// Check the declaration for empty names and for names that would shadow
    /// each other during lookup.
    ///
    /// Parsing never calls this; shadowed entries are simply unreachable.
    pub fn validate(&self) -> Result<()> {
        check_flags(&format!("program `{}`", self.name), &self.flags)?;

        for (i, command) in self.commands.iter().enumerate() {
            if command.name().is_empty() {
                return Err(ParseError::Declaration(format!(
                    "command #{i} in program `{}` has an empty name",
                    self.name
                )));
            }
            if let Some(prev) = self.commands[..i].iter().find(|c| c.collides_with(command)) {
                return Err(ParseError::Declaration(format!(
                    "command `{}` clashes with `{}`",
                    command.name(),
                    prev.name()
                )));
            }

            let scope = format!("command `{}`", command.name());
            check_flags(&scope, command.flags())?;
            for flag in command.flags() {
                if let Some(global) = self.flags.iter().find(|g| g.collides_with(flag)) {
                    return Err(ParseError::Declaration(format!(
                        "{scope}: flag {} is shadowed by global flag {}",
                        flag.display_names(),
                        global.display_names()
                    )));
                }
            }
        }
        Ok(())
    }
}

fn check_flags(scope: &str, flags: &[Flag]) -> Result<()> {
    for (i, flag) in flags.iter().enumerate() {
        if flag.name().is_empty() {
            return Err(ParseError::Declaration(format!(
                "{scope}: flag #{i} has an empty name"
            )));
        }
        if let Some(prev) = flags[..i].iter().find(|f| f.collides_with(flag)) {
            return Err(ParseError::Declaration(format!(
                "{scope}: flag {} clashes with {}",
                flag.display_names(),
                prev.display_names()
            )));
        }
    }
    Ok(())
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("flags", &self.flags)
            .field("commands", &self.commands)
            .finish_non_exhaustive()
    }
}
