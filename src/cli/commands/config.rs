//! Config command implementation
//!
//! Prints the options the plugin would run with, after every config layer
//! has been applied, and checks that they build valid matchers.

use crate::cli::{Output, OutputFormat};
use crate::config::MetafilesConfig;
use crate::plugin::Metafiles;
use anyhow::{Context, Result};

pub fn execute(custom_config: Option<&str>, format: OutputFormat, output: &Output) -> Result<()> {
    let options = MetafilesConfig::load_with_custom_config(custom_config)?.options()?;

    println!("{}", super::render(&options, format)?);

    let plugin = Metafiles::new(options).context("Configuration is invalid")?;
    output.success(&format!("{} matcher(s) registered", plugin.matchers().len()));
    for matcher in plugin.matchers() {
        output.list_item(&format!("{}*{}", matcher.prefix(), matcher.full_postfix()));
    }

    Ok(())
}
