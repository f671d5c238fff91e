//! Build command implementation
//!
//! Loads every file under a source directory into a file set, runs one
//! metadata pass and prints the resulting paths with their metadata.

use crate::cli::{Output, OutputFormat};
use crate::config::MetafilesConfig;
use crate::files::{FileRecord, FileSet, normalize_path};
use crate::plugin::Metafiles;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub fn execute(source: &Path, custom_config: Option<&str>, format: OutputFormat, output: &Output) -> Result<()> {
    let options = MetafilesConfig::load_with_custom_config(custom_config)?.options()?;
    let plugin = Metafiles::new(options).context("Configuration is invalid")?;

    let mut files = load_source(source)?;
    output.verbose(&format!("Loaded {} file(s) from {}", files.len(), source.display()));

    let stats = plugin.run(&mut files).context("Metadata pass failed")?;

    println!("{}", super::render(&files, format)?);

    output.success(&format!(
        "Merged {} metadata file(s), removed {}",
        stats.metafiles_merged, stats.metafiles_deleted
    ));
    if stats.metafiles_ignored > 0 {
        output.warning(&format!(
            "{} metadata file(s) without a main file were left in place",
            stats.metafiles_ignored
        ));
    }

    Ok(())
}

/// Read every file under `source` into a file set keyed by relative path
pub fn load_source(source: &Path) -> Result<FileSet> {
    if !source.is_dir() {
        bail!("Source directory not found: {}", source.display());
    }

    let mut files = FileSet::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(source)?;
        let key = normalize_path(&relative.to_string_lossy());
        let contents = fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        tracing::trace!("Loaded {} ({} bytes)", key, contents.len());
        files.insert(key, FileRecord::new(contents));
    }

    Ok(files)
}
