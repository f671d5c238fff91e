//! Command-line interface for metafiles
//!
//! A thin host around the plugin: it loads a directory into an in-memory
//! file set, runs one resolution pass and prints the result.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod output;

pub use output::Output;

/// metafiles - merge metadata sidecar files into their main files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true, env = "METAFILES_CONFIG")]
    pub config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format for printed data
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run one metadata pass over a source directory and print the file set
    Build {
        /// Directory to load files from
        source: PathBuf,
    },
    /// Show the effective plugin options
    Config,
    /// Show version information
    Version,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = Output::new(self.verbose > 0, self.quiet);
        let config = self.config.as_deref();

        match self.command {
            Some(Commands::Build { source }) => commands::build::execute(&source, config, self.format, &output),
            Some(Commands::Config) => commands::config::execute(config, self.format, &output),
            Some(Commands::Version) => commands::version::execute(&output),
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}
