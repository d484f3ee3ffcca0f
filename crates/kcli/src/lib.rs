//! Declare a command-line surface and parse argv against it.
//!
//! A [`Program`] holds global flags (the help flag always first) and
//! [`Command`]s. Each command may add its own flags, reserve one positional
//! slot and install a handler. [`Program::execute`] scans argv once,
//! resolves flags and at most one command, and then either runs the
//! command's handler or renders help.
//!
//! ```
//! use kcli::{Command, Flag, Outcome, Program};
//!
//! let verbose = Flag::boolean("verbose").short("v").usage("Verbose output");
//! let msg = Flag::string("msg").usage("Message to print");
//!
//! let program = Program::new("my-cli")
//!     .usage("My great cli application.")
//!     .flag(verbose.clone())
//!     .command(
//!         Command::new("first")
//!             .usage("First command usage message")
//!             .flag(msg.clone())
//!             .handler(move |m| {
//!                 assert!(m.is_set(&verbose));
//!                 assert_eq!(m.string(&msg), Some("hi"));
//!                 Ok(())
//!             }),
//!     );
//!
//! let outcome = program.execute(&["-v", "first", "--msg", "hi"]).unwrap();
//! assert_eq!(outcome, Outcome::Dispatched("first".to_string()));
//! ```
//!
//! Grammar: `--name`/`-short` only, exact match, no clustering and no
//! `--name=value`. Boolean flags never consume the next token; valued flags
//! consume it unless it is flag-shaped. Once a command token is seen the
//! command owns the rest of argv.

mod command;
mod error;
mod flag;
pub mod help;
mod matches;
mod parser;
mod program;
pub mod scanner;

pub use command::{Command, Handler};
pub use error::{BoxError, ParseError, Result};
pub use flag::{Flag, FlagId, FlagKind, FlagValue, is_flag_token};
pub use help::{DefaultHelp, HelpRenderer, HelpTarget};
pub use matches::{Matches, Snapshot};
pub use parser::Outcome;
pub use program::Program;
