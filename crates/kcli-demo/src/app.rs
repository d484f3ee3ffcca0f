use std::sync::LazyLock;

use kcli::{BoxError, Command, Flag, Matches, Program};

pub static VERBOSE: LazyLock<Flag> =
    LazyLock::new(|| Flag::boolean("verbose").short("v").usage("Print the parse result to stderr"));

pub static MSG: LazyLock<Flag> =
    LazyLock::new(|| Flag::string("msg").short("m").usage("Message to print"));

/// The demo program declaration.
pub fn program() -> Program {
    Program::new("my-cli")
        .usage("My great cli application.")
        .flag(VERBOSE.clone())
        .command(
            Command::new("first")
                .short("f")
                .usage("First command usage message")
                .flag(MSG.clone())
                .arg(Flag::string("text"))
                .handler(first),
        )
        .command(
            Command::new("second")
                .short("s")
                .usage("Second command usage message")
                .handler(second),
        )
}

fn first(m: &Matches<'_>) -> Result<(), BoxError> {
    trace_matches(m)?;
    println!("---First---");
    // `--msg` takes precedence over the bare argument.
    match m.string(&MSG).or(m.arg()) {
        Some(text) => println!("{text}"),
        None => return Err("nothing to print, pass --msg or an argument".into()),
    }
    Ok(())
}

fn second(m: &Matches<'_>) -> Result<(), BoxError> {
    trace_matches(m)?;
    println!("---Second---");
    println!("{}", serde_json::to_string_pretty(&m.snapshot())?);
    Ok(())
}

fn trace_matches(m: &Matches<'_>) -> Result<(), BoxError> {
    if m.is_set(&VERBOSE) {
        eprintln!("{}", serde_json::to_string(&m.snapshot())?);
    }
    tracing::debug!(flags = ?m.flag_values(), arg = ?m.arg(), "handler invoked");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_is_valid() {
        program().validate().unwrap();
    }

    #[test]
    fn shared_flags_resolve_from_statics() {
        let program = program();
        let m = program.parse(&["-v", "f", "-m", "hello"]).unwrap();
        assert!(m.is_set(&VERBOSE));
        assert_eq!(m.string(&MSG), Some("hello"));
    }
}
