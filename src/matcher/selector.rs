use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::parsers::CustomParser;

/// How a matcher's parser is chosen
///
/// In configuration files a selector is written as `true` (the extension's
/// default parser), `false` (disabled) or a built-in parser name. Custom
/// parser functions can only be supplied programmatically.
#[derive(Debug, Clone, Default)]
pub enum ParserSelector {
    #[default]
    Disabled,
    ExtensionDefault,
    Named(String),
    Custom(CustomParser),
}

impl ParserSelector {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ParserSelector::Disabled)
    }
}

impl From<bool> for ParserSelector {
    fn from(enabled: bool) -> Self {
        if enabled {
            ParserSelector::ExtensionDefault
        } else {
            ParserSelector::Disabled
        }
    }
}

impl From<&str> for ParserSelector {
    fn from(name: &str) -> Self {
        ParserSelector::Named(name.to_string())
    }
}

impl From<CustomParser> for ParserSelector {
    fn from(parser: CustomParser) -> Self {
        ParserSelector::Custom(parser)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelector {
    Flag(bool),
    Name(String),
}

impl<'de> Deserialize<'de> for ParserSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawSelector::deserialize(deserializer)? {
            RawSelector::Flag(enabled) => enabled.into(),
            RawSelector::Name(name) => ParserSelector::Named(name),
        })
    }
}

impl Serialize for ParserSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParserSelector::Disabled => serializer.serialize_bool(false),
            ParserSelector::ExtensionDefault => serializer.serialize_bool(true),
            ParserSelector::Named(name) => serializer.serialize_str(name),
            ParserSelector::Custom(_) => serializer.serialize_str("<custom>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_flags_and_names() {
        let enabled: ParserSelector = serde_json::from_str("true").unwrap();
        assert!(matches!(enabled, ParserSelector::ExtensionDefault));

        let disabled: ParserSelector = serde_json::from_str("false").unwrap();
        assert!(!disabled.is_enabled());

        let named: ParserSelector = serde_json::from_str(r#""js-yaml""#).unwrap();
        assert!(matches!(named, ParserSelector::Named(name) if name == "js-yaml"));

        assert!(serde_json::from_str::<ParserSelector>("42").is_err());
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&ParserSelector::ExtensionDefault).unwrap(), "true");
        assert_eq!(serde_json::to_string(&ParserSelector::Disabled).unwrap(), "false");
        assert_eq!(serde_json::to_string(&ParserSelector::from("toml")).unwrap(), r#""toml""#);
    }
}
