//! Resolution pass over a file set
//!
//! Every path is checked against the matchers in registration order. The
//! first matcher that recognises the path as a metadata file decides what
//! happens to it; later matchers never see it.

use crate::error::{MetafilesError, Result};
use crate::files::FileSet;
use crate::matcher::{MatcherConfig, MissingMainFilePolicy};
use crate::parsers::{ParseContext, ParserRef};

/// Counters from one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub files_examined: usize,
    pub metafiles_merged: usize,
    pub metafiles_deleted: usize,
    pub metafiles_ignored: usize,
}

struct MetafileMatch<'s> {
    matcher: &'s MatcherConfig,
    parser: &'s ParserRef,
    main_file: String,
}

/// Runs resolution passes with a fixed, ordered list of matchers
#[derive(Debug, Clone, Default)]
pub struct MetafileResolver {
    matchers: Vec<MatcherConfig>,
}

impl MetafileResolver {
    pub fn new(matchers: Vec<MatcherConfig>) -> Self {
        Self { matchers }
    }

    pub fn matchers(&self) -> &[MatcherConfig] {
        &self.matchers
    }

    /// Merge every metadata file in `files` into its main file
    ///
    /// Stops at the first parse failure or missing main file under the
    /// `throw` policy. Changes made before the failure are kept.
    pub fn resolve(&self, files: &mut FileSet) -> Result<ResolveStats> {
        let mut stats = ResolveStats::default();
        let paths: Vec<String> = files.keys().cloned().collect();

        for path in paths {
            // Removed earlier in this pass
            let Some(record) = files.get(&path) else {
                continue;
            };
            stats.files_examined += 1;

            let Some(MetafileMatch { matcher, parser, main_file }) = self.match_path(&path, &record.contents)
            else {
                continue;
            };

            if files.contains_key(&main_file) {
                let metadata = parser
                    .parse(&record.contents, &ParseContext { path: &path })
                    .map_err(|source| MetafilesError::ParseFailure {
                        path: path.clone(),
                        source,
                    })?;
                tracing::debug!(
                    "Merging {} key(s) from {} into {}",
                    metadata.len(),
                    path,
                    main_file
                );
                if let Some(main) = files.get_mut(&main_file) {
                    main.merge_metadata(metadata);
                }
                stats.metafiles_merged += 1;

                if matcher.delete_meta_files() {
                    files.remove(&path);
                    stats.metafiles_deleted += 1;
                }
                continue;
            }

            match matcher.on_missing_main_file() {
                MissingMainFilePolicy::Throw => {
                    return Err(MetafilesError::MissingMainFile { path, main_file });
                }
                MissingMainFilePolicy::Ignore => {
                    tracing::debug!("Ignoring {}: main file {} does not exist", path, main_file);
                    stats.metafiles_ignored += 1;
                }
                MissingMainFilePolicy::Delete => {
                    tracing::debug!("Deleting {}: main file {} does not exist", path, main_file);
                    files.remove(&path);
                    stats.metafiles_deleted += 1;
                }
            }
        }

        tracing::info!(
            "Resolved metadata files: {} merged, {} deleted, {} ignored ({} files examined)",
            stats.metafiles_merged,
            stats.metafiles_deleted,
            stats.metafiles_ignored,
            stats.files_examined
        );
        Ok(stats)
    }

    /// First matcher that treats `path` as a metadata file
    fn match_path<'s>(&'s self, path: &str, contents: &[u8]) -> Option<MetafileMatch<'s>> {
        self.matchers.iter().find_map(|matcher| {
            let main_file = matcher.candidate(path, contents).main_file_path()?;
            let parser = matcher.parser()?;
            Some(MetafileMatch {
                matcher,
                parser,
                main_file,
            })
        })
    }
}

/// Run one pass over `files` with `matchers`
pub fn resolve(files: &mut FileSet, matchers: &[MatcherConfig]) -> Result<ResolveStats> {
    MetafileResolver::new(matchers.to_vec()).resolve(files)
}
