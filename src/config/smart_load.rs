use anyhow::{Context, Result};
use figment::providers::{Format, Json, Toml, Yaml};
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Config file formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

/// Pick a provider for `path` from its extension, sniffing the content when
/// the extension is not recognised
pub fn auto<P: AsRef<Path>>(path: P) -> impl figment::Provider {
    let path = path.as_ref();
    match detect_format(path) {
        ConfigFormat::Toml => FormatProvider::Toml(Toml::file(path)),
        ConfigFormat::Json => FormatProvider::Json(Json::file(path)),
        ConfigFormat::Yaml => FormatProvider::Yaml(Yaml::file(path)),
    }
}

/// Format of the config file at `path`, TOML when nothing else fits
pub fn detect_format(path: &Path) -> ConfigFormat {
    format_from_extension(path).unwrap_or_else(|| {
        let detected = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| detect_format_from_content(&content));
        match detected {
            Some(format) => {
                tracing::debug!("Detected {:?} config format for {}", format, path.display());
                format
            }
            None => {
                tracing::debug!("Could not detect config format for {}, assuming TOML", path.display());
                ConfigFormat::Toml
            }
        }
    })
}

/// Extensions in the `parsers` table of a config file, in the order written
///
/// Figment keeps dictionaries sorted, which loses the registration order of
/// matchers. The table keys are read again straight from the file.
pub fn parser_order(path: &Path, format: ConfigFormat) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let declared: DeclaredParsers = match format {
        ConfigFormat::Toml => toml::from_str(&content)?,
        ConfigFormat::Json => serde_json::from_str(&content)?,
        ConfigFormat::Yaml => serde_yml::from_str(&content)?,
    };
    Ok(declared.parsers.0)
}

#[derive(Default, Deserialize)]
struct DeclaredParsers {
    #[serde(default)]
    parsers: TableKeys,
}

#[derive(Default)]
struct TableKeys(Vec<String>);

impl<'de> Deserialize<'de> for TableKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct KeysVisitor;

        impl<'de> Visitor<'de> for KeysVisitor {
            type Value = TableKeys;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a table of file extensions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut keys = Vec::new();
                while let Some((key, IgnoredAny)) = access.next_entry::<String, IgnoredAny>()? {
                    keys.push(key);
                }
                Ok(TableKeys(keys))
            }
        }

        deserializer.deserialize_map(KeysVisitor)
    }
}

fn format_from_extension(path: &Path) -> Option<ConfigFormat> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "toml" => Some(ConfigFormat::Toml),
        "json" => Some(ConfigFormat::Json),
        "yaml" | "yml" => Some(ConfigFormat::Yaml),
        _ => None,
    }
}

enum FormatProvider {
    Toml(figment::providers::Data<Toml>),
    Json(figment::providers::Data<Json>),
    Yaml(figment::providers::Data<Yaml>),
}

impl figment::Provider for FormatProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            FormatProvider::Toml(p) => p.metadata(),
            FormatProvider::Json(p) => p.metadata(),
            FormatProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(&self) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            FormatProvider::Toml(p) => p.data(),
            FormatProvider::Json(p) => p.data(),
            FormatProvider::Yaml(p) => p.data(),
        }
    }
}

/// Guess a config format from file content
pub fn detect_format_from_content(content: &str) -> Option<ConfigFormat> {
    let trimmed = content.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(ConfigFormat::Json);
    }

    // TOML before YAML: quoted table keys like `".yaml" = true` contain no colon
    if trimmed.lines().any(|line| {
        let line = line.trim();
        (line.starts_with('[') && line.ends_with(']')) || (line.contains('=') && !line.contains(':'))
    }) {
        return Some(ConfigFormat::Toml);
    }

    if trimmed.starts_with("---") || trimmed.lines().any(|line| line.contains(':')) {
        return Some(ConfigFormat::Yaml);
    }

    None
}
