//! Matcher configuration
//!
//! A [`MatcherConfig`] is one fully resolved rule: which file names count as
//! metadata files for one extension, how they are parsed, and what happens
//! to them afterwards. It is validated once and never changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MetafilesError, Result};
use crate::parsers::{BuiltinParser, ParserRef};

mod candidate;
mod selector;

pub use candidate::CandidateFile;
pub use selector::ParserSelector;

pub const DEFAULT_POSTFIX: &str = ".meta";
pub const DEFAULT_PREFIX: &str = "";
pub const DEFAULT_EXTENSION: &str = ".json";

/// What to do with a metadata file whose main file does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMainFilePolicy {
    /// Abort the whole pass
    #[default]
    Throw,
    /// Leave the metadata file where it is
    Ignore,
    /// Drop the metadata file from the file set
    Delete,
}

impl MissingMainFilePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingMainFilePolicy::Throw => "throw",
            MissingMainFilePolicy::Ignore => "ignore",
            MissingMainFilePolicy::Delete => "delete",
        }
    }
}

impl FromStr for MissingMainFilePolicy {
    type Err = MetafilesError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "throw" => Ok(MissingMainFilePolicy::Throw),
            "ignore" => Ok(MissingMainFilePolicy::Ignore),
            "delete" => Ok(MissingMainFilePolicy::Delete),
            other => Err(MetafilesError::InvalidConfiguration(format!(
                "on_missing_main_file must be one of 'throw', 'ignore' or 'delete', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for MissingMainFilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated options for a single matcher; `None` fields take the defaults
#[derive(Debug, Clone, Default)]
pub struct MatcherOptions {
    pub postfix: Option<String>,
    pub prefix: Option<String>,
    pub extension: Option<String>,
    pub parser: ParserSelector,
    pub delete_meta_files: Option<bool>,
    pub on_missing_main_file: Option<String>,
}

/// A validated, immutable matching rule
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    postfix: String,
    prefix: String,
    extension: String,
    full_postfix: String,
    parser: Option<ParserRef>,
    delete_meta_files: bool,
    on_missing_main_file: MissingMainFilePolicy,
}

impl MatcherConfig {
    /// Validate `options` and resolve the parser selector
    pub fn new(options: MatcherOptions) -> Result<Self> {
        let on_missing_main_file = match options.on_missing_main_file.as_deref() {
            Some(policy) => policy.parse()?,
            None => MissingMainFilePolicy::default(),
        };

        let postfix = options.postfix.unwrap_or_else(|| DEFAULT_POSTFIX.to_string());
        let prefix = options.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let extension = options.extension.unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        let full_postfix = format!("{}{}", postfix, extension);

        if full_postfix.is_empty() {
            return Err(MetafilesError::InvalidConfiguration(
                "postfix and extension cannot both be empty".to_string(),
            ));
        }
        if prefix.contains('/') {
            return Err(MetafilesError::InvalidConfiguration(format!(
                "prefix '{}' cannot contain a path separator",
                prefix
            )));
        }

        let parser = resolve_parser(options.parser, &extension)?;

        Ok(Self {
            postfix,
            prefix,
            extension,
            full_postfix,
            parser,
            delete_meta_files: options.delete_meta_files.unwrap_or(true),
            on_missing_main_file,
        })
    }

    /// A view of `path` as a potential metadata file under this matcher
    pub fn candidate<'a>(&'a self, path: &'a str, contents: &'a [u8]) -> CandidateFile<'a> {
        CandidateFile::new(path, contents, self)
    }

    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `postfix` followed by `extension`
    pub fn full_postfix(&self) -> &str {
        &self.full_postfix
    }

    pub fn parser(&self) -> Option<&ParserRef> {
        self.parser.as_ref()
    }

    /// Inert matchers have no parser and never match
    pub fn is_inert(&self) -> bool {
        self.parser.is_none()
    }

    pub fn delete_meta_files(&self) -> bool {
        self.delete_meta_files
    }

    pub fn on_missing_main_file(&self) -> MissingMainFilePolicy {
        self.on_missing_main_file
    }
}

fn resolve_parser(selector: ParserSelector, extension: &str) -> Result<Option<ParserRef>> {
    match selector {
        ParserSelector::Disabled => Ok(None),
        ParserSelector::ExtensionDefault => BuiltinParser::for_extension(extension)
            .map(|parser| Some(parser.into()))
            .ok_or_else(|| MetafilesError::UnknownExtension(extension.to_string())),
        ParserSelector::Named(name) => BuiltinParser::from_name(&name)
            .map(|parser| Some(parser.into()))
            .ok_or(MetafilesError::UnknownParserName(name)),
        ParserSelector::Custom(parser) => Ok(Some(parser.into())),
    }
}
