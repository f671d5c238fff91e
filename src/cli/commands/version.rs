//! Version command implementation

use crate::cli::Output;
use anyhow::Result;

/// Execute the version command
pub fn execute(output: &Output) -> Result<()> {
    println!("{} {}", crate::PKG_NAME, crate::VERSION);

    output.key_value("Description:", crate::PKG_DESCRIPTION);
    output.key_value("Repository:", env!("CARGO_PKG_REPOSITORY"));
    output.key_value(
        "Parsers:",
        &crate::BuiltinParser::ALL.map(|p| p.name()).join(", "),
    );

    Ok(())
}
