use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::flag::Flag;
use crate::help::HelpRenderer;
use crate::matches::Matches;

/// Callback invoked with the parse result once a command's region is read.
pub type Handler = Arc<dyn Fn(&Matches<'_>) -> Result<(), BoxError> + Send + Sync>;

/// A sub-command: its own flags, an optional positional slot and a handler.
#[derive(Clone)]
pub struct Command {
    name: String,
    short: Option<String>,
    usage: String,
    flags: Vec<Flag>,
    arg: Option<Flag>,
    handler: Option<Handler>,
    renderer: Option<Arc<dyn HelpRenderer + Send + Sync>>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            short: None,
            usage: String::new(),
            flags: Vec::new(),
            arg: None,
            handler: None,
            renderer: None,
        }
    }

    pub fn short(mut self, short: impl Into<String>) -> Self {
        let short = short.into().trim().to_string();
        self.short = (!short.is_empty()).then_some(short);
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Add a command-scoped flag. Global flags stay visible inside the
    /// command and are searched first.
    pub fn flag(mut self, flag: Flag) -> Self {
        if let Some(existing) = self.flags.iter().find(|f| f.collides_with(&flag)) {
            tracing::warn!(
                command = %self.name,
                flag = %flag.display_names(),
                shadowed_by = %existing.display_names(),
                "duplicate flag name in command"
            );
        }
        self.flags.push(flag);
        self
    }

    /// Let the command capture one free-standing token.
    ///
    /// The flag only marks the slot; the token is read back with
    /// [`Matches::arg`].
    pub fn arg(mut self, flag: Flag) -> Self {
        self.arg = Some(flag);
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Matches<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Render this command's help with `renderer` instead of the program's.
    pub fn renderer(mut self, renderer: impl HelpRenderer + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
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

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Override set with [`Command::renderer`], if any.
    pub fn help_renderer(&self) -> Option<&(dyn HelpRenderer + Send + Sync)> {
        self.renderer.as_deref()
    }

    pub fn positional(&self) -> Option<&Flag> {
        self.arg.as_ref()
    }

    /// Exact match on the name or short name.
    pub fn matches(&self, token: &str) -> bool {
        token == self.name || self.short.as_deref() == Some(token)
    }

    pub(crate) fn collides_with(&self, other: &Command) -> bool {
        other.matches(&self.name) || self.short.as_deref().is_some_and(|s| other.matches(s))
    }

    /// Run the handler. A command without one does nothing.
    pub(crate) fn run(&self, matches: &Matches<'_>) -> Result<(), BoxError> {
        match &self.handler {
            Some(handler) => handler(matches),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("usage", &self.usage)
            .field("flags", &self.flags)
            .field("arg", &self.arg)
            .field("handler", &self.handler.is_some())
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
