//! Host-facing plugin entry point

use crate::config::MetafilesOptions;
use crate::error::Result;
use crate::files::FileSet;
use crate::matcher::MatcherConfig;
use crate::resolver::{MetafileResolver, ResolveStats};

/// The metafiles build plugin
///
/// Built once per build from [`MetafilesOptions`]; every matcher is validated
/// here, so a bad configuration fails before any file is looked at.
///
/// ```
/// use metafiles::{FileRecord, FileSet, Metafiles, MetafilesOptions};
///
/// let plugin = Metafiles::new(MetafilesOptions::default()).unwrap();
///
/// let mut files = FileSet::new();
/// files.insert("index.md".into(), FileRecord::new("# Hello"));
/// files.insert("index.md.meta.json".into(), FileRecord::new(r#"{"title": "Hello"}"#));
/// plugin.run(&mut files).unwrap();
///
/// assert_eq!(files["index.md"].metadata["title"], "Hello");
/// assert!(!files.contains_key("index.md.meta.json"));
/// ```
#[derive(Debug, Clone)]
pub struct Metafiles {
    resolver: MetafileResolver,
}

impl Metafiles {
    pub fn new(options: MetafilesOptions) -> Result<Self> {
        let matchers = options
            .matcher_options()
            .into_iter()
            .map(MatcherConfig::new)
            .collect::<Result<Vec<_>>>()?;

        for matcher in &matchers {
            tracing::debug!(
                "Registered matcher {}*{} (parser: {}, delete: {}, missing main file: {})",
                matcher.prefix(),
                matcher.full_postfix(),
                matcher.parser().map(|p| p.label()).unwrap_or("none"),
                matcher.delete_meta_files(),
                matcher.on_missing_main_file()
            );
        }

        Ok(Self {
            resolver: MetafileResolver::new(matchers),
        })
    }

    /// Run one resolution pass over the build's file set
    pub fn run(&self, files: &mut FileSet) -> Result<ResolveStats> {
        self.resolver.resolve(files)
    }

    pub fn matchers(&self) -> &[MatcherConfig] {
        self.resolver.matchers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetafilesError;

    #[test]
    fn test_default_plugin_has_one_json_matcher() {
        let plugin = Metafiles::new(MetafilesOptions::default()).unwrap();
        assert_eq!(plugin.matchers().len(), 1);
        assert_eq!(plugin.matchers()[0].full_postfix(), ".meta.json");
    }

    #[test]
    fn test_configuration_errors_surface_at_construction() {
        let err = Metafiles::new(MetafilesOptions::default().parser(".js", true)).unwrap_err();
        assert!(matches!(err, MetafilesError::UnknownExtension(_)));

        let err = Metafiles::new(MetafilesOptions::default().parser(".custom", "eval")).unwrap_err();
        assert!(matches!(err, MetafilesError::UnknownParserName(_)));

        let err = Metafiles::new(MetafilesOptions::default().on_missing_main_file("asdf")).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
