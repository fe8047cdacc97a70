//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use lunchpick_cli::CliError;

fn main() {
    lunchpick_cli::init_logging();
    match lunchpick_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    }
}

fn report(err: &CliError) {
    eprintln!("lunchpick: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
