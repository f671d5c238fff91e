//! Parser capabilities used to decode metadata files
//!
//! A parser is resolved once, when its matcher is built. It is either one of
//! the named built-ins or a caller-supplied function.

use std::fmt;
use std::sync::Arc;

use crate::error::ParserError;
use crate::files::Metadata;

mod builtin;

pub use builtin::BuiltinParser;

/// Context passed to every parser invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext<'a> {
    /// Path of the metadata file being parsed (not its main file)
    pub path: &'a str,
}

type ParserFn = dyn Fn(&[u8], &ParseContext<'_>) -> Result<Metadata, ParserError> + Send + Sync;

/// Caller-supplied parser function
#[derive(Clone)]
pub struct CustomParser(Arc<ParserFn>);

impl CustomParser {
    pub fn new<F>(parse: F) -> Self
    where
        F: Fn(&[u8], &ParseContext<'_>) -> Result<Metadata, ParserError> + Send + Sync + 'static,
    {
        Self(Arc::new(parse))
    }

    pub fn parse(&self, contents: &[u8], context: &ParseContext<'_>) -> Result<Metadata, ParserError> {
        (self.0)(contents, context)
    }
}

impl fmt::Debug for CustomParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomParser(..)")
    }
}

/// A resolved parser
#[derive(Debug, Clone)]
pub enum ParserRef {
    Builtin(BuiltinParser),
    Custom(CustomParser),
}

impl ParserRef {
    pub fn parse(&self, contents: &[u8], context: &ParseContext<'_>) -> Result<Metadata, ParserError> {
        match self {
            ParserRef::Builtin(parser) => parser.parse(contents, context),
            ParserRef::Custom(parser) => parser.parse(contents, context),
        }
    }

    /// Short label used in log output
    pub fn label(&self) -> &'static str {
        match self {
            ParserRef::Builtin(parser) => parser.name(),
            ParserRef::Custom(_) => "custom",
        }
    }
}

impl From<BuiltinParser> for ParserRef {
    fn from(parser: BuiltinParser) -> Self {
        ParserRef::Builtin(parser)
    }
}

impl From<CustomParser> for ParserRef {
    fn from(parser: CustomParser) -> Self {
        ParserRef::Custom(parser)
    }
}
