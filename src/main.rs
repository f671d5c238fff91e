use clap::Parser;
use metafiles::cli::{Cli, Output};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = Output::new(false, false);
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

/// Log level follows `-v`; `RUST_LOG` wins when set
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "metafiles=warn",
        1 => "metafiles=debug",
        _ => "metafiles=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
