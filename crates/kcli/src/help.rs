//! Help rendering.
//!
//! The engine calls the program's [`HelpRenderer`] on empty input, when
//! `--help` is given without a command, and when `--help` is given inside a
//! command's region. [`DefaultHelp`] produces the stock layout; any
//! `Fn(HelpTarget, &mut dyn Write) -> io::Result<()>` can stand in for it.

use std::io::{self, Write};

use crate::command::Command;
use crate::flag::Flag;
use crate::program::Program;

/// What to describe.
#[derive(Debug, Clone, Copy)]
pub enum HelpTarget<'a> {
    Program(&'a Program),
    Command(&'a Command),
}

pub trait HelpRenderer {
    fn render(&self, target: HelpTarget<'_>, out: &mut dyn Write) -> io::Result<()>;
}

impl<F> HelpRenderer for F
where
    F: Fn(HelpTarget<'_>, &mut dyn Write) -> io::Result<()>,
{
    fn render(&self, target: HelpTarget<'_>, out: &mut dyn Write) -> io::Result<()> {
        self(target, out)
    }
}

/// Tab-indented layout with names padded to a fixed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultHelp {
    /// Width of the name column in option and command listings.
    pub column: usize,
}

impl Default for DefaultHelp {
    fn default() -> Self {
        Self { column: 20 }
    }
}

impl DefaultHelp {
    fn program(&self, program: &Program, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", program.usage_text())?;
        writeln!(out)?;
        writeln!(out, "Usage:")?;
        writeln!(out, "\t{} [options]", program.name())?;
        writeln!(out)?;
        writeln!(out, "Options:")?;
        self.flag_rows(program.flags(), out)?;
        writeln!(out)?;
        writeln!(out, "Commands:")?;
        for command in program.commands() {
            let names = match command.short_name() {
                Some(short) => format!("{short},{}", command.name()),
                None => command.name().to_string(),
            };
            self.row(&names, command.usage_text(), out)?;
        }
        Ok(())
    }

    fn command(&self, command: &Command, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Name:")?;
        writeln!(out, "\t{} - {}", command.name(), command.usage_text())?;
        writeln!(out, "Usage:")?;
        if command.flags().is_empty() {
            writeln!(out, "\t{} [arguments...]", command.name())?;
        } else {
            writeln!(out, "\t{} [command options] [arguments...]", command.name())?;
            writeln!(out, "Options:")?;
            self.flag_rows(command.flags(), out)?;
        }
        Ok(())
    }

    fn flag_rows(&self, flags: &[Flag], out: &mut dyn Write) -> io::Result<()> {
        for flag in flags {
            self.row(&flag.display_names(), flag.usage_text(), out)?;
        }
        Ok(())
    }

    fn row(&self, names: &str, usage: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\t{names:<width$}{usage}", width = self.column)
    }
}

impl HelpRenderer for DefaultHelp {
    fn render(&self, target: HelpTarget<'_>, out: &mut dyn Write) -> io::Result<()> {
        match target {
            HelpTarget::Program(program) => self.program(program, out),
            HelpTarget::Command(command) => self.command(command, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(renderer: &dyn HelpRenderer, target: HelpTarget<'_>) -> String {
        let mut buf = Vec::new();
        renderer.render(target, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> Program {
        Program::new("my-cli")
            .usage("My great cli application.")
            .flag(Flag::boolean("verbose").short("v").usage("Verbose output"))
            .command(
                Command::new("first")
                    .short("f")
                    .usage("First command usage message")
                    .flag(Flag::string("msg").usage("Message to print")),
            )
            .command(Command::new("second").usage("Second command usage message"))
    }

    #[test]
    fn program_help_layout() {
        let program = sample();
        let text = render_to_string(&DefaultHelp::default(), HelpTarget::Program(&program));
        let expected = "My great cli application.\n\
            \n\
            Usage:\n\
            \tmy-cli [options]\n\
            \n\
            Options:\n\
            \t-h,--help           Display this message\n\
            \t-v,--verbose        Verbose output\n\
            \n\
            Commands:\n\
            \tf,first             First command usage message\n\
            \tsecond              Second command usage message\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn command_help_with_flags() {
        let program = sample();
        let first = program.find_command("first").unwrap();
        let text = render_to_string(&DefaultHelp::default(), HelpTarget::Command(first));
        let expected = "Name:\n\
            \tfirst - First command usage message\n\
            Usage:\n\
            \tfirst [command options] [arguments...]\n\
            Options:\n\
            \t--msg               Message to print\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn command_help_without_flags() {
        let program = sample();
        let second = program.find_command("second").unwrap();
        let text = render_to_string(&DefaultHelp::default(), HelpTarget::Command(second));
        assert!(text.contains("\tsecond [arguments...]\n"));
        assert!(!text.contains("Options:"));
    }

    #[test]
    fn long_names_overflow_the_column() {
        let help = DefaultHelp { column: 4 };
        let flag = Flag::boolean("verbose").usage("x");
        let mut out = Vec::new();
        help.row(&flag.display_names(), flag.usage_text(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\t--verbosex\n");
    }

    #[test]
    fn closures_are_renderers() {
        let renderer = |target: HelpTarget<'_>, out: &mut dyn Write| -> io::Result<()> {
            match target {
                HelpTarget::Program(p) => write!(out, "program {}", p.name()),
                HelpTarget::Command(c) => write!(out, "command {}", c.name()),
            }
        };
        let program = sample();
        assert_eq!(
            render_to_string(&renderer, HelpTarget::Program(&program)),
            "program my-cli"
        );
    }
}
