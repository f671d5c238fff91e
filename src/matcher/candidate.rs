use super::MatcherConfig;
use crate::error::{MetafilesError, Result};
use crate::files::Metadata;
use crate::parsers::ParseContext;

/// One path looked at through one matcher
///
/// Nothing is computed up front; each accessor answers from the path and the
/// matcher's rule.
#[derive(Debug, Clone, Copy)]
pub struct CandidateFile<'a> {
    path: &'a str,
    contents: &'a [u8],
    matcher: &'a MatcherConfig,
}

impl<'a> CandidateFile<'a> {
    pub fn new(path: &'a str, contents: &'a [u8], matcher: &'a MatcherConfig) -> Self {
        Self { path, contents, matcher }
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    /// Byte offset where the basename starts
    fn basename_start(&self) -> usize {
        self.path.rfind('/').map(|idx| idx + 1).unwrap_or(0)
    }

    /// Whether the path is a metadata file under this matcher
    pub fn is_metafile(&self) -> bool {
        if self.matcher.is_inert() {
            return false;
        }

        let full_postfix = self.matcher.full_postfix();
        let prefix = self.matcher.prefix();

        // A shorter path can never carry the postfix, even when slicing would
        // produce an empty suffix
        if self.path.len() < full_postfix.len() || !self.path.ends_with(full_postfix) {
            return false;
        }

        let basename = &self.path[self.basename_start()..];
        if !basename.starts_with(prefix) {
            return false;
        }

        // Prefix and postfix must not overlap, and something has to be left
        // over to name the main file
        basename.len() > prefix.len() + full_postfix.len()
    }

    /// Path of the file this metadata file belongs to
    pub fn main_file_path(&self) -> Option<String> {
        if !self.is_metafile() {
            return None;
        }

        let dir_end = self.basename_start();
        let stem_start = dir_end + self.matcher.prefix().len();
        let stem_end = self.path.len() - self.matcher.full_postfix().len();

        Some(format!("{}{}", &self.path[..dir_end], &self.path[stem_start..stem_end]))
    }

    /// Parse the contents with the matcher's parser
    pub fn metadata(&self) -> Option<Result<Metadata>> {
        if !self.is_metafile() {
            return None;
        }
        let parser = self.matcher.parser()?;
        let context = ParseContext { path: self.path };

        Some(
            parser
                .parse(self.contents, &context)
                .map_err(|source| MetafilesError::ParseFailure {
                    path: self.path.to_string(),
                    source,
                }),
        )
    }
}
