//! Plugin options for metafiles
//!
//! This module holds the host-facing option types, the ordered parser table
//! and the layered loader used by the command line tool. Options are turned
//! into one [`MatcherOptions`] per enabled extension.

use serde::{Deserialize, Serialize};

use crate::matcher::{
    DEFAULT_EXTENSION, DEFAULT_POSTFIX, DEFAULT_PREFIX, MatcherOptions, MissingMainFilePolicy,
    ParserSelector,
};
use crate::parsers::CustomParser;

pub mod core;
pub mod smart_load;
mod table;

#[cfg(test)]
mod tests;

pub use self::core::MetafilesConfig;
pub use table::ParserTable;

/// Options shared by every matcher, plus the per-extension parser table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetafilesOptions {
    /// Suffix segment placed before the extension (e.g. `.meta` in `index.md.meta.json`)
    pub postfix: String,

    /// Filename prefix required on metadata files
    pub prefix: String,

    /// Remove matched metadata files from the output set
    #[serde(alias = "deleteMetaFiles")]
    pub delete_meta_files: bool,

    /// Policy when a metadata file's main file is missing: throw, ignore or delete
    #[serde(alias = "onMissingMainFile")]
    pub on_missing_main_file: String,

    /// Parser setting per metadata file extension, in registration order
    pub parsers: ParserTable,
}

impl Default for MetafilesOptions {
    fn default() -> Self {
        Self {
            postfix: DEFAULT_POSTFIX.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            delete_meta_files: true,
            on_missing_main_file: MissingMainFilePolicy::default().to_string(),
            parsers: ParserTable::new(),
        }
    }
}

impl MetafilesOptions {
    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn delete_meta_files(mut self, delete: bool) -> Self {
        self.delete_meta_files = delete;
        self
    }

    pub fn on_missing_main_file(mut self, policy: impl Into<String>) -> Self {
        self.on_missing_main_file = policy.into();
        self
    }

    /// Add or replace the parser setting for `extension`
    pub fn parser(mut self, extension: impl Into<String>, setting: impl Into<ParserSetting>) -> Self {
        self.parsers.insert(extension, setting.into());
        self
    }

    /// The effective parser table: `.json` enabled and first unless overridden
    pub fn effective_parsers(&self) -> ParserTable {
        let mut table = ParserTable::new();
        table.insert(DEFAULT_EXTENSION, ParserSetting::from(true));
        for (extension, setting) in self.parsers.iter() {
            table.insert(extension, setting.clone());
        }
        table
    }

    /// One set of matcher options per enabled extension, in registration order
    pub fn matcher_options(&self) -> Vec<MatcherOptions> {
        self.effective_parsers()
            .iter()
            .filter(|(_, setting)| setting.is_enabled())
            .map(|(extension, setting)| self.options_for(extension, setting))
            .collect()
    }

    fn options_for(&self, extension: &str, setting: &ParserSetting) -> MatcherOptions {
        let mut options = MatcherOptions {
            postfix: Some(self.postfix.clone()),
            prefix: Some(self.prefix.clone()),
            extension: Some(extension.to_string()),
            parser: ParserSelector::ExtensionDefault,
            delete_meta_files: Some(self.delete_meta_files),
            on_missing_main_file: Some(self.on_missing_main_file.clone()),
        };

        match setting {
            ParserSetting::Selector(selector) => options.parser = selector.clone(),
            ParserSetting::Overrides(overrides) => {
                if let Some(postfix) = &overrides.postfix {
                    options.postfix = Some(postfix.clone());
                }
                if let Some(prefix) = &overrides.prefix {
                    options.prefix = Some(prefix.clone());
                }
                if let Some(delete) = overrides.delete_meta_files {
                    options.delete_meta_files = Some(delete);
                }
                if let Some(policy) = &overrides.on_missing_main_file {
                    options.on_missing_main_file = Some(policy.clone());
                }
                if let Some(parser) = &overrides.parser {
                    options.parser = parser.clone();
                }
            }
        }

        options
    }
}

/// The value of one entry in the `parsers` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParserSetting {
    /// `true`, `false` or a parser name (or a custom function in code)
    Selector(ParserSelector),
    /// Per-extension overrides of the shared options
    Overrides(MatcherOverrides),
}

impl ParserSetting {
    /// Whether this entry registers a matcher at all
    pub fn is_enabled(&self) -> bool {
        match self {
            ParserSetting::Selector(selector) => selector.is_enabled(),
            ParserSetting::Overrides(overrides) => {
                overrides.parser.as_ref().is_none_or(ParserSelector::is_enabled)
            }
        }
    }
}

impl From<ParserSelector> for ParserSetting {
    fn from(selector: ParserSelector) -> Self {
        ParserSetting::Selector(selector)
    }
}

impl From<bool> for ParserSetting {
    fn from(enabled: bool) -> Self {
        ParserSetting::Selector(enabled.into())
    }
}

impl From<&str> for ParserSetting {
    fn from(name: &str) -> Self {
        ParserSetting::Selector(name.into())
    }
}

impl From<CustomParser> for ParserSetting {
    fn from(parser: CustomParser) -> Self {
        ParserSetting::Selector(parser.into())
    }
}

impl From<MatcherOverrides> for ParserSetting {
    fn from(overrides: MatcherOverrides) -> Self {
        ParserSetting::Overrides(overrides)
    }
}

/// Options that one extension overrides; unset fields fall back to the shared options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatcherOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postfix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, alias = "deleteMetaFiles", skip_serializing_if = "Option::is_none")]
    pub delete_meta_files: Option<bool>,

    #[serde(default, alias = "onMissingMainFile", skip_serializing_if = "Option::is_none")]
    pub on_missing_main_file: Option<String>,

    /// Parser for this extension; the extension's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<ParserSelector>,
}

impl MatcherOverrides {
    pub fn with_parser(parser: impl Into<ParserSelector>) -> Self {
        Self {
            parser: Some(parser.into()),
            ..Default::default()
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = Some(postfix.into());
        self
    }

    pub fn delete_meta_files(mut self, delete: bool) -> Self {
        self.delete_meta_files = Some(delete);
        self
    }

    pub fn on_missing_main_file(mut self, policy: impl Into<String>) -> Self {
        self.on_missing_main_file = Some(policy.into());
        self
    }
}
