//! Command implementations for the metafiles CLI

pub mod build;
pub mod config;
pub mod version;

use crate::cli::OutputFormat;
use anyhow::Result;
use serde::Serialize;

/// Render `value` in the requested format
pub(crate) fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yml::to_string(value)?,
    })
}
