//! Error types for matcher construction and resolution passes.
//!
//! Configuration errors are raised while matchers are built, before any file
//! is touched. Pass errors abort the pass that raised them.

use thiserror::Error;

/// Boxed error returned by parser capabilities
pub type ParserError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for metafile operations
pub type Result<T> = std::result::Result<T, MetafilesError>;

#[derive(Error, Debug)]
pub enum MetafilesError {
    /// Matcher options that can never produce a valid rule
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `true` was given as the parser for an extension without a built-in default
    #[error("No default parser registered for extension '{0}'")]
    UnknownExtension(String),

    /// A parser was selected by a name that is not a built-in
    #[error("Unknown parser name '{0}'")]
    UnknownParserName(String),

    /// The parser failed on a metadata file's contents
    #[error("Failed to parse metadata file '{path}': {source}")]
    ParseFailure {
        path: String,
        #[source]
        source: ParserError,
    },

    /// A metadata file's main file is absent and the policy is `throw`
    #[error("Main file '{main_file}' for metadata file '{path}' does not exist")]
    MissingMainFile { path: String, main_file: String },
}

impl MetafilesError {
    /// Whether the error was raised while building matchers
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MetafilesError::InvalidConfiguration(_)
                | MetafilesError::UnknownExtension(_)
                | MetafilesError::UnknownParserName(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_classified() {
        assert!(MetafilesError::InvalidConfiguration("x".into()).is_configuration_error());
        assert!(MetafilesError::UnknownExtension(".js".into()).is_configuration_error());
        assert!(MetafilesError::UnknownParserName("eval".into()).is_configuration_error());

        let missing = MetafilesError::MissingMainFile {
            path: "a.md.meta.json".into(),
            main_file: "a.md".into(),
        };
        assert!(!missing.is_configuration_error());
    }

    #[test]
    fn test_parse_failure_keeps_source() {
        let err = MetafilesError::ParseFailure {
            path: "index.md.meta.json".into(),
            source: "unexpected token".into(),
        };
        let message = err.to_string();
        assert!(message.contains("index.md.meta.json"));
        assert!(message.contains("unexpected token"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
