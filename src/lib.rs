//! # metafiles - metadata sidecar files for static-site builds
//!
//! A build plugin that looks through a set of in-memory files for metadata
//! sidecars (`index.md.meta.json`, `m-post.md.meta.yaml`, ...), parses them
//! and merges the result into the metadata of the file they belong to.
//!
//! ## Features
//!
//! - **Several matchers**: one per enabled extension, each with its own
//!   prefix, postfix, parser and policies
//! - **Pluggable parsers**: built-in JSON, YAML and TOML, or any function
//! - **Fail fast**: bad configuration is rejected before any file is touched
//!
//! ## Quick Start
//!
//! ```
//! use metafiles::{FileRecord, FileSet, MatcherOverrides, Metafiles, MetafilesOptions};
//!
//! let options = MetafilesOptions::default()
//!     .parser(".yaml", true)
//!     .parser(".custom", MatcherOverrides::with_parser("js-yaml").prefix("m-"));
//! let plugin = Metafiles::new(options).unwrap();
//!
//! let mut files = FileSet::new();
//! files.insert("post.md".into(), FileRecord::new("# Post"));
//! files.insert("post.md.meta.yaml".into(), FileRecord::new("title: Post"));
//! plugin.run(&mut files).unwrap();
//!
//! assert_eq!(files["post.md"].metadata["title"], "Post");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod matcher;
pub mod parsers;
pub mod plugin;
pub mod resolver;

pub use config::{MatcherOverrides, MetafilesConfig, MetafilesOptions, ParserSetting, ParserTable};
pub use error::{MetafilesError, ParserError, Result};
pub use files::{FileRecord, FileSet, Metadata};
pub use matcher::{CandidateFile, MatcherConfig, MatcherOptions, MissingMainFilePolicy, ParserSelector};
pub use parsers::{BuiltinParser, CustomParser, ParseContext, ParserRef};
pub use plugin::Metafiles;
pub use resolver::{MetafileResolver, ResolveStats, resolve};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
