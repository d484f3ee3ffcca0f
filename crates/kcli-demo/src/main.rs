mod app;

use anyhow::Result;
use kcli::ParseError;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    // Optional: lets a checkout pin RUST_LOG without touching the shell.
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let program = app::program();

    match program.execute(&args) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "done");
            Ok(())
        }
        Err(err @ ParseError::Handler { .. }) => Err(err.into()),
        Err(err) if err.is_usage() => {
            eprintln!("error: {err}");
            eprintln!("Run `{} --help` for usage.", program.name());
            std::process::exit(2);
        }
        Err(err) => Err(err.into()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
