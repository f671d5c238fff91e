//! Built-in metadata parsers for JSON, YAML and TOML sidecars

use serde_json::Value;

use super::ParseContext;
use crate::error::ParserError;
use crate::files::Metadata;

/// Named parsers shipped with the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinParser {
    Json,
    Yaml,
    Toml,
}

impl BuiltinParser {
    pub const ALL: [BuiltinParser; 3] = [BuiltinParser::Json, BuiltinParser::Yaml, BuiltinParser::Toml];

    /// Look up a parser by exact name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "JSON.parse" | "json" => Some(BuiltinParser::Json),
            "js-yaml" | "yaml" => Some(BuiltinParser::Yaml),
            "toml" => Some(BuiltinParser::Toml),
            _ => None,
        }
    }

    /// Default parser for a metadata file extension such as `.yaml`
    pub fn for_extension(extension: &str) -> Option<Self> {
        match extension {
            ".json" => Some(BuiltinParser::Json),
            ".yaml" | ".yml" => Some(BuiltinParser::Yaml),
            ".toml" => Some(BuiltinParser::Toml),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinParser::Json => "JSON.parse",
            BuiltinParser::Yaml => "js-yaml",
            BuiltinParser::Toml => "toml",
        }
    }

    pub fn parse(&self, contents: &[u8], context: &ParseContext<'_>) -> Result<Metadata, ParserError> {
        let text = std::str::from_utf8(contents)?;
        tracing::trace!("Parsing {} with {}", context.path, self.name());

        match self {
            BuiltinParser::Json => {
                let value: Value = serde_json::from_str(text)?;
                into_mapping(value, "JSON")
            }
            BuiltinParser::Yaml => {
                let value: Value = serde_yml::from_str(text)?;
                // An empty YAML document carries no metadata
                if value.is_null() {
                    return Ok(Metadata::new());
                }
                into_mapping(value, "YAML")
            }
            BuiltinParser::Toml => {
                let table: toml::Table = toml::from_str(text)?;
                toml_table_to_metadata(table)
            }
        }
    }
}

fn into_mapping(value: Value, format: &str) -> Result<Metadata, ParserError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!(
            "expected a {} mapping at the top level, found {}",
            format,
            value_kind(&other)
        )
        .into()),
    }
}

// Datetimes become their RFC 3339 text
fn toml_table_to_metadata(table: toml::Table) -> Result<Metadata, ParserError> {
    table
        .into_iter()
        .map(|(key, value)| toml_to_json(value).map(|value| (key, value)))
        .collect()
}

fn toml_to_json(value: toml::Value) -> Result<Value, ParserError> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("TOML float {} has no metadata representation", f))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<Vec<_>, ParserError>>()?,
        ),
        toml::Value::Table(table) => Value::Object(toml_table_to_metadata(table)?),
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(parser: BuiltinParser, contents: &str) -> Result<Metadata, ParserError> {
        parser.parse(contents.as_bytes(), &ParseContext { path: "file.md.meta.custom" })
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(BuiltinParser::from_name("JSON.parse"), Some(BuiltinParser::Json));
        assert_eq!(BuiltinParser::from_name("js-yaml"), Some(BuiltinParser::Yaml));
        assert_eq!(BuiltinParser::from_name("toml"), Some(BuiltinParser::Toml));
        assert_eq!(BuiltinParser::from_name("eval"), None);
        assert_eq!(BuiltinParser::from_name("coffee-script"), None);
        assert_eq!(BuiltinParser::from_name("Json"), None);
    }

    #[test]
    fn test_lookup_by_extension() {
        assert_eq!(BuiltinParser::for_extension(".json"), Some(BuiltinParser::Json));
        assert_eq!(BuiltinParser::for_extension(".yml"), Some(BuiltinParser::Yaml));
        assert_eq!(BuiltinParser::for_extension(".toml"), Some(BuiltinParser::Toml));
        assert_eq!(BuiltinParser::for_extension(".js"), None);
        assert_eq!(BuiltinParser::for_extension(".custom"), None);
    }

    #[test]
    fn test_every_builtin_round_trips_its_name() {
        for parser in BuiltinParser::ALL {
            assert_eq!(BuiltinParser::from_name(parser.name()), Some(parser));
        }
    }

    #[test]
    fn test_json() {
        let metadata = parse(BuiltinParser::Json, r#"{"testKey": "Test value", "n": 3}"#).unwrap();
        assert_eq!(metadata["testKey"], json!("Test value"));
        assert_eq!(metadata["n"], json!(3));

        assert!(parse(BuiltinParser::Json, "{not json").is_err());
        assert!(parse(BuiltinParser::Json, "[1, 2]").is_err());
    }

    #[test]
    fn test_yaml() {
        let metadata = parse(BuiltinParser::Yaml, "testKey: Test value\ntags:\n  - a\n  - b\n").unwrap();
        assert_eq!(metadata["testKey"], json!("Test value"));
        assert_eq!(metadata["tags"], json!(["a", "b"]));

        assert!(parse(BuiltinParser::Yaml, "").unwrap().is_empty());
        assert!(parse(BuiltinParser::Yaml, "- just\n- a list\n").is_err());
    }

    #[test]
    fn test_toml() {
        let metadata = parse(BuiltinParser::Toml, "testKey = \"Test value\"\n[nested]\nweight = 2\n").unwrap();
        assert_eq!(metadata["testKey"], json!("Test value"));
        assert_eq!(metadata["nested"]["weight"], json!(2));

        assert!(parse(BuiltinParser::Toml, "testKey = ").is_err());
    }

    #[test]
    fn test_toml_dates_become_strings() {
        let metadata = parse(
            BuiltinParser::Toml,
            "date = 2024-01-15\nupdated = 2024-01-15T10:30:00Z\n[[events]]\nat = 09:15:00\n",
        )
        .unwrap();
        assert_eq!(metadata["date"], json!("2024-01-15"));
        assert_eq!(metadata["updated"], json!("2024-01-15T10:30:00Z"));
        assert_eq!(metadata["events"][0]["at"], json!("09:15:00"));
    }

    #[test]
    fn test_toml_non_finite_float_is_rejected() {
        assert!(parse(BuiltinParser::Toml, "weight = nan\n").is_err());
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let context = ParseContext { path: "file.md.meta.json" };
        assert!(BuiltinParser::Json.parse(&[0xff, 0xfe], &context).is_err());
    }
}
