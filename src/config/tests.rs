use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_when_no_files_present() {
    let dir = TempDir::new().unwrap();
    let config = MetafilesConfig::load_from(dir.path(), None).unwrap();
    let options = config.options().unwrap();

    assert_eq!(options.postfix, ".meta");
    assert_eq!(options.prefix, "");
    assert!(options.delete_meta_files);
    assert_eq!(options.on_missing_main_file, "throw");
    assert!(options.parsers.is_empty());
    assert_eq!(options.effective_parsers().extensions(), vec![".json"]);
}

#[test]
fn test_repo_config_file_is_merged() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("metafiles.toml"),
        r#"
prefix = "m-"
delete_meta_files = false

[parsers]
".yaml" = true
".custom" = { parser = "js-yaml", prefix = "x-" }
"#,
    )
    .unwrap();

    let options = MetafilesConfig::load_from(dir.path(), None).unwrap().options().unwrap();
    assert_eq!(options.prefix, "m-");
    assert!(!options.delete_meta_files);
    assert!(options.parsers.get(".yaml").unwrap().is_enabled());

    let matchers = options.matcher_options();
    assert_eq!(matchers.len(), 3);
    let custom = matchers
        .iter()
        .find(|m| m.extension.as_deref() == Some(".custom"))
        .unwrap();
    assert_eq!(custom.prefix.as_deref(), Some("x-"));
    assert!(matches!(&custom.parser, ParserSelector::Named(name) if name == "js-yaml"));
}

#[test]
fn test_custom_config_overrides_repo_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("metafiles.yaml"), "postfix: .meta\nprefix: repo-\n").unwrap();
    let custom = dir.path().join("custom.json");
    fs::write(&custom, r#"{"prefix": "custom-", "onMissingMainFile": "ignore"}"#).unwrap();

    let config = MetafilesConfig::load_from(dir.path(), custom.to_str()).unwrap();
    let options = config.options().unwrap();
    assert_eq!(options.prefix, "custom-");
    assert_eq!(options.on_missing_main_file, "ignore");
    assert_eq!(config.get_section("postfix").unwrap(), serde_json::json!(".meta"));
}

#[test]
fn test_missing_custom_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = MetafilesConfig::load_from(dir.path(), Some("definitely/not/here.toml"));
    assert!(result.is_err());
}

#[test]
fn test_json_options_accept_camel_case() {
    let options: MetafilesOptions = serde_json::from_str(
        r#"{
            "deleteMetaFiles": false,
            "onMissingMainFile": "delete",
            "parsers": {".json": false, ".yml": true}
        }"#,
    )
    .unwrap();

    assert!(!options.delete_meta_files);
    assert_eq!(options.on_missing_main_file, "delete");
    // Shared defaults still apply to fields that were not given
    assert_eq!(options.postfix, ".meta");

    let matchers = options.matcher_options();
    assert_eq!(matchers.len(), 1);
    assert_eq!(matchers[0].extension.as_deref(), Some(".yml"));
    assert_eq!(matchers[0].on_missing_main_file.as_deref(), Some("delete"));
}

#[test]
fn test_json_stays_first_unless_disabled() {
    let options = MetafilesOptions::default()
        .parser(".yaml", true)
        .parser(".toml", true)
        .parser(".json", MatcherOverrides::default().prefix("j-"));

    let extensions: Vec<String> = options
        .matcher_options()
        .into_iter()
        .filter_map(|m| m.extension)
        .collect();
    assert_eq!(extensions, vec![".json", ".yaml", ".toml"]);

    let json = &options.matcher_options()[0];
    assert_eq!(json.prefix.as_deref(), Some("j-"));
    assert!(matches!(json.parser, ParserSelector::ExtensionDefault));
}

#[test]
fn test_override_with_disabled_parser_registers_nothing() {
    let options = MetafilesOptions::default()
        .parser(".yaml", MatcherOverrides::with_parser(false).prefix("m-"));
    assert_eq!(options.matcher_options().len(), 1);
}

fn registered_extensions(options: MetafilesOptions) -> Vec<String> {
    crate::plugin::Metafiles::new(options)
        .unwrap()
        .matchers()
        .iter()
        .map(|matcher| matcher.extension().to_string())
        .collect()
}

#[test]
fn test_config_file_keeps_declared_parser_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("metafiles.json"),
        r#"{"parsers": {".yaml": true, ".custom": "js-yaml", ".bz": "toml"}}"#,
    )
    .unwrap();

    let options = MetafilesConfig::load_from(dir.path(), None).unwrap().options().unwrap();
    assert_eq!(registered_extensions(options), vec![".json", ".yaml", ".custom", ".bz"]);
}

#[test]
fn test_toml_config_keeps_declared_parser_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("metafiles.toml"),
        "[parsers]\n\".yaml\" = true\n\".custom\" = { parser = \"js-yaml\", prefix = \"x-\" }\n",
    )
    .unwrap();

    let options = MetafilesConfig::load_from(dir.path(), None).unwrap().options().unwrap();
    assert_eq!(registered_extensions(options), vec![".json", ".yaml", ".custom"]);
}

#[test]
fn test_layered_parser_order_uses_first_declaration() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("metafiles.yaml"),
        "parsers:\n  .toml: true\n  .yaml: true\n",
    )
    .unwrap();
    let custom = dir.path().join("custom.json");
    fs::write(&custom, r#"{"parsers": {".custom": "toml", ".toml": false}}"#).unwrap();

    let options = MetafilesConfig::load_from(dir.path(), custom.to_str())
        .unwrap()
        .options()
        .unwrap();
    assert_eq!(options.parsers.extensions(), vec![".toml", ".yaml", ".custom"]);
    // The later layer still decides the setting
    assert!(!options.parsers.get(".toml").unwrap().is_enabled());
    assert_eq!(registered_extensions(options), vec![".json", ".yaml", ".custom"]);
}

#[test]
fn test_config_order_decides_overlapping_matchers() {
    use crate::files::{FileRecord, FileSet};

    // Both matchers accept `post.md.meta.yaml`: `.yaml` reads it as the
    // sidecar of `post.md`, `.md.meta.yaml` as the sidecar of `post`
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("metafiles.json"),
        r#"{"parsers": {
            ".yaml": true,
            ".md.meta.yaml": {"postfix": "", "parser": "js-yaml"}
        }}"#,
    )
    .unwrap();

    let options = MetafilesConfig::load_from(dir.path(), None).unwrap().options().unwrap();
    let plugin = crate::plugin::Metafiles::new(options).unwrap();

    let mut files = FileSet::new();
    files.insert("post.md".into(), FileRecord::new("# Post"));
    files.insert("post".into(), FileRecord::new(""));
    files.insert("post.md.meta.yaml".into(), FileRecord::new("owner: yaml\n"));
    plugin.run(&mut files).unwrap();

    assert_eq!(files["post.md"].metadata["owner"], serde_json::json!("yaml"));
    assert!(files["post"].metadata.is_empty());
    assert!(!files.contains_key("post.md.meta.yaml"));
}
