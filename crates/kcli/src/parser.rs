//! The parsing engine.
//!
//! Tokens are read left to right against the global flags until the first
//! non-flag token, which must name a command. From there on the command owns
//! every remaining token: flags resolve against global and command flags
//! (globals first), anything else is the command's positional argument.

use std::io::{self, Write};

use crate::command::Command;
use crate::error::{ParseError, Result};
use crate::flag::{Flag, PRESENT, is_flag_token};
use crate::help::{HelpRenderer, HelpTarget};
use crate::matches::Matches;
use crate::program::Program;
use crate::scanner::Scanner;

/// What `execute` ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Program help was rendered: empty argv, or `--help` with no command.
    ProgramHelp,
    /// `--help` was given for this command; its handler did not run.
    CommandHelp(String),
    /// This command's handler ran and returned `Ok`.
    Dispatched(String),
    /// Flags parsed but no command was named.
    NoCommand,
}

impl Program {
    /// Parse `argv` without dispatching or rendering anything.
    pub fn parse<'p, S: AsRef<str>>(&'p self, argv: &[S]) -> Result<Matches<'p>> {
        let mut tokens = Scanner::new(argv);
        let mut matches = Matches::new(self);
        let globals = [self.flags()];

        while tokens.has_next() {
            let token = tokens.pop()?;
            if resolve_flag(token, &mut tokens, &globals, &mut matches)? {
                continue;
            }
            let command = self
                .find_command(token)
                .ok_or_else(|| ParseError::UnknownArgument {
                    token: token.to_string(),
                })?;
            tracing::debug!(command = command.name(), "matched command");
            matches.set_command(command);
            parse_command(self, command, &mut tokens, &mut matches)?;
        }

        Ok(matches)
    }

    /// Parse `argv` and act on it, writing any help to stdout.
    ///
    /// Stdout is only locked while help is written, never while a handler
    /// runs.
    pub fn execute<S: AsRef<str>>(&self, argv: &[S]) -> Result<Outcome> {
        self.execute_to(argv, &mut io::stdout())
    }

    /// Like [`Program::execute`] with an explicit help sink.
    ///
    /// Any error stops the call before a handler runs, except a handler's
    /// own failure, which is reported as [`ParseError::Handler`]. The sink
    /// is flushed after help is written and left untouched otherwise.
    pub fn execute_to<S: AsRef<str>>(&self, argv: &[S], out: &mut dyn Write) -> Result<Outcome> {
        if argv.is_empty() {
            render(self.help_renderer(), HelpTarget::Program(self), out)?;
            return Ok(Outcome::ProgramHelp);
        }

        let matches = self.parse(argv)?;
        match matches.command() {
            Some(command) if matches.help_requested() => {
                let renderer = command.help_renderer().unwrap_or(self.help_renderer());
                render(renderer, HelpTarget::Command(command), out)?;
                Ok(Outcome::CommandHelp(command.name().to_string()))
            }
            Some(command) => {
                tracing::debug!(command = command.name(), "dispatching");
                command.run(&matches).map_err(|source| ParseError::Handler {
                    command: command.name().to_string(),
                    source,
                })?;
                Ok(Outcome::Dispatched(command.name().to_string()))
            }
            None if matches.help_requested() => {
                render(self.help_renderer(), HelpTarget::Program(self), out)?;
                Ok(Outcome::ProgramHelp)
            }
            None => Ok(Outcome::NoCommand),
        }
    }
}

fn render(renderer: &dyn HelpRenderer, target: HelpTarget<'_>, out: &mut dyn Write) -> Result<()> {
    renderer.render(target, out)?;
    out.flush()?;
    Ok(())
}

/// Read the rest of argv inside `command`'s region.
fn parse_command<'p, S: AsRef<str>>(
    program: &'p Program,
    command: &'p Command,
    tokens: &mut Scanner<'_, S>,
    matches: &mut Matches<'p>,
) -> Result<()> {
    let scope = [program.flags(), command.flags()];

    while tokens.has_next() {
        let token = tokens.pop()?;
        if resolve_flag(token, tokens, &scope, matches)? {
            continue;
        }
        if command.positional().is_none() {
            return Err(ParseError::UnexpectedArgument {
                token: token.to_string(),
            });
        }
        tracing::debug!(command = command.name(), arg = token, "captured argument");
        matches.set_arg(token);
    }
    Ok(())
}

/// Try `token` as a flag against `scope`, searched in order.
///
/// `Ok(false)` means the token is not flag-shaped and the caller decides
/// what it is. A valued flag takes the next token unless that one is
/// flag-shaped too.
fn resolve_flag<'p, S: AsRef<str>>(
    token: &str,
    tokens: &mut Scanner<'_, S>,
    scope: &[&'p [Flag]],
    matches: &mut Matches<'p>,
) -> Result<bool> {
    if !is_flag_token(token) {
        return Ok(false);
    }

    let flag = scope
        .iter()
        .copied()
        .flat_map(|flags| flags.iter())
        .find(|f| f.matches(token))
        .ok_or_else(|| ParseError::UnknownFlag {
            token: token.to_string(),
        })?;

    if !flag.kind().takes_value() {
        matches.insert(flag, PRESENT);
    } else if tokens.has_next() && !is_flag_token(tokens.peek()?) {
        let value = tokens.pop()?;
        matches.insert(flag, value);
    } else {
        return Err(ParseError::MissingFlagValue {
            token: token.to_string(),
        });
    }

    tracing::debug!(flag = flag.name(), "resolved flag");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::FlagValue;

    fn program() -> (Program, Flag, Flag, Flag) {
        let verbose = Flag::boolean("verbose").short("v");
        let msg = Flag::string("msg").short("m");
        let name = Flag::string("name");
        let program = Program::new("my-cli")
            .usage("My great cli application.")
            .flag(verbose.clone())
            .flag(name.clone())
            .command(
                Command::new("first")
                    .short("f")
                    .flag(msg.clone())
                    .arg(Flag::string("arg")),
            )
            .command(Command::new("second"));
        (program, verbose, msg, name)
    }

    #[test]
    fn empty_argv_parses_to_nothing() {
        let (program, verbose, ..) = program();
        let argv: [&str; 0] = [];
        let m = program.parse(&argv).unwrap();
        assert!(!m.has_command());
        assert!(!m.is_set(&verbose));
        assert!(m.flag_values().is_empty());
    }

    #[test]
    fn global_flags_before_command() {
        let (program, verbose, msg, name) = program();
        let m = program
            .parse(&["-v", "--name", "bob", "first", "--msg", "hi"])
            .unwrap();
        assert_eq!(m.command().map(|c| c.name()), Some("first"));
        assert!(m.is_set(&verbose));
        assert_eq!(m.string(&name), Some("bob"));
        assert_eq!(m.string(&msg), Some("hi"));
    }

    #[test]
    fn global_flags_resolve_inside_command() {
        let (program, verbose, msg, _) = program();
        let m = program.parse(&["f", "-m", "hi", "--verbose"]).unwrap();
        assert!(m.is_set(&verbose));
        assert_eq!(m.value(&msg), FlagValue::String(Some("hi".to_string())));
    }

    #[test]
    fn command_flags_are_not_global() {
        let (program, ..) = program();
        let err = program.parse(&["--msg", "hi", "first"]).unwrap_err();
        assert!(matches!(err, ParseError::UnknownFlag { ref token } if token == "--msg"));
    }

    #[test]
    fn boolean_flag_never_takes_a_value() {
        let (program, verbose, ..) = program();
        let m = program.parse(&["first", "-v", "value"]).unwrap();
        assert!(m.is_set(&verbose));
        assert_eq!(m.arg(), Some("value"));

        let err = program.parse(&["-v", "value"]).unwrap_err();
        assert!(matches!(err, ParseError::UnknownArgument { ref token } if token == "value"));
    }

    #[test]
    fn valued_flag_needs_a_non_flag_value() {
        let (program, ..) = program();
        let err = program.parse(&["first", "--msg"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingFlagValue { ref token } if token == "--msg"));

        let err = program.parse(&["first", "--msg", "-v"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingFlagValue { ref token } if token == "--msg"));

        let err = program.parse(&["--name"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingFlagValue { ref token } if token == "--name"));
    }

    #[test]
    fn value_that_names_a_command_is_still_a_value() {
        let (program, _, _, name) = program();
        let m = program.parse(&["--name", "first"]).unwrap();
        assert!(!m.has_command());
        assert_eq!(m.string(&name), Some("first"));
    }

    #[test]
    fn last_occurrence_wins() {
        let (program, _, msg, _) = program();
        let m = program
            .parse(&["first", "--msg", "a", "one", "-m", "b", "two"])
            .unwrap();
        assert_eq!(m.string(&msg), Some("b"));
        assert_eq!(m.arg(), Some("two"));
    }

    #[test]
    fn no_prefix_matching() {
        let (program, ..) = program();
        let err = program.parse(&["--verb"]).unwrap_err();
        assert_eq!(err.token(), Some("--verb"));
        let err = program.parse(&["fir"]).unwrap_err();
        assert!(matches!(err, ParseError::UnknownArgument { .. }));
    }

    #[test]
    fn command_owns_the_rest_of_argv() {
        let (program, ..) = program();
        // `second` after `first` is a positional, not another command.
        let m = program.parse(&["first", "second"]).unwrap();
        assert_eq!(m.command().map(|c| c.name()), Some("first"));
        assert_eq!(m.arg(), Some("second"));

        let err = program.parse(&["second", "first"]).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedArgument { ref token } if token == "first"));
    }

    #[test]
    fn shadowed_flag_is_found_in_scan_order() {
        let global = Flag::string("out");
        let local = Flag::string("out");
        let program = Program::new("app")
            .flag(global.clone())
            .command(Command::new("run").flag(local.clone()));
        let m = program.parse(&["run", "--out", "x"]).unwrap();
        assert_eq!(m.string(&global), Some("x"));
        assert_eq!(m.string(&local), None);
    }

    #[test]
    fn execute_renders_help_on_empty_argv() {
        let (program, ..) = program();
        let argv: Vec<String> = Vec::new();
        let mut out = Vec::new();
        let outcome = program.execute_to(&argv, &mut out).unwrap();
        assert_eq!(outcome, Outcome::ProgramHelp);
        assert!(String::from_utf8(out).unwrap().starts_with("My great cli application.\n"));
    }

    #[test]
    fn execute_without_command() {
        let (program, ..) = program();
        let mut out = Vec::new();
        assert_eq!(program.execute_to(&["-v"], &mut out).unwrap(), Outcome::NoCommand);
        assert!(out.is_empty());

        assert_eq!(
            program.execute_to(&["-h", "-v"], &mut out).unwrap(),
            Outcome::ProgramHelp
        );
        assert!(String::from_utf8(out).unwrap().contains("Commands:"));
    }

    #[test]
    fn handler_errors_are_wrapped() {
        let program =
            Program::new("app").command(Command::new("fail").handler(|_| Err("nope".into())));
        let err = program.execute_to(&["fail"], &mut io::sink()).unwrap_err();
        match err {
            ParseError::Handler { command, source } => {
                assert_eq!(command, "fail");
                assert_eq!(source.to_string(), "nope");
            }
            other => panic!("expected Handler, got: {other:?}"),
        }
    }
}
