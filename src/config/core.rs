use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::{Path, PathBuf};

use super::smart_load::{self, ConfigFormat};
use super::{MetafilesOptions, ParserTable};

/// Repository config file names, lowest priority first
const REPO_CONFIG_FILES: [(&str, ConfigFormat); 4] = [
    ("metafiles.toml", ConfigFormat::Toml),
    ("metafiles.json", ConfigFormat::Json),
    ("metafiles.yaml", ConfigFormat::Yaml),
    ("metafiles.yml", ConfigFormat::Yaml),
];

/// Layered plugin configuration
///
/// Priority, lowest first: repository config files in the working directory,
/// an explicit config file, `METAFILES_` environment variables. Fields that no
/// layer sets take the defaults of [`MetafilesOptions`].
pub struct MetafilesConfig {
    figment: Figment,
    /// Config files that exist, lowest priority first
    files: Vec<(PathBuf, ConfigFormat)>,
}

impl MetafilesConfig {
    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        Self::load_from(Path::new("."), custom_config)
    }

    /// Load with repository config files looked up in `base_dir`
    pub fn load_from(base_dir: &Path, custom_config: Option<&str>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting in {}", base_dir.display());

        let mut figment = Figment::new();
        let mut files = Vec::new();

        for (name, format) in REPO_CONFIG_FILES {
            let path = base_dir.join(name);
            if !path.is_file() {
                continue;
            }
            tracing::debug!("CONFIG LOAD: Found {}", path.display());
            figment = match format {
                ConfigFormat::Toml => figment.merge(Toml::file(&path)),
                ConfigFormat::Json => figment.merge(Json::file(&path)),
                ConfigFormat::Yaml => figment.merge(Yaml::file(&path)),
            };
            files.push((path, format));
        }

        if let Some(custom_path) = custom_config {
            let path = Path::new(custom_path);
            if !path.is_file() {
                bail!("Config file not found: {}", custom_path);
            }
            tracing::debug!("CONFIG LOAD: Using custom config {}", custom_path);
            figment = figment.merge(smart_load::auto(path));
            files.push((path.to_path_buf(), smart_load::detect_format(path)));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("METAFILES_"));

        Ok(MetafilesConfig { figment, files })
    }

    /// Extract the effective plugin options
    ///
    /// The `parsers` table comes back in the order extensions were first
    /// declared across the config files; entries only set through the
    /// environment follow in sorted order.
    pub fn options(&self) -> Result<MetafilesOptions> {
        let mut options: MetafilesOptions = self
            .figment
            .extract()
            .context("Failed to read metafiles options")?;
        options.parsers = self.in_declared_order(&options.parsers)?;
        Ok(options)
    }

    fn in_declared_order(&self, merged: &ParserTable) -> Result<ParserTable> {
        let mut ordered = ParserTable::new();
        for (path, format) in &self.files {
            let declared = smart_load::parser_order(path, *format)
                .with_context(|| format!("Failed to read parsers table from {}", path.display()))?;
            for extension in declared {
                if ordered.get(&extension).is_some() {
                    continue;
                }
                if let Some(setting) = merged.get(&extension) {
                    ordered.insert(extension, setting.clone());
                }
            }
        }
        for (extension, setting) in merged.iter() {
            if ordered.get(extension).is_none() {
                ordered.insert(extension, setting.clone());
            }
        }
        Ok(ordered)
    }

    /// Get a nested section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        Ok(self.figment.extract_inner(path)?)
    }
}
