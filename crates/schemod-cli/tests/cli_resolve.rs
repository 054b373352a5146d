//! End-to-end tests of the resolve handler over on-disk fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use schemod_cli::resolve::{
    build_config, load_schema, render, resolve_document, run_resolve, OutputFormat, ResolveArgs,
};
use schemod_cli::tags::tag_table;
use schemod_core::PropertyTag;
use tempfile::TempDir;

const FEED_YAML: &str = r##"
type: object
required: [title]
properties:
  title:
    type: string
    description: Feed title
  entries:
    type: array
    items:
      $ref: "#/definitions/entry"
definitions:
  entry:
    type: object
    required: [published_at]
    properties:
      published_at:
        type: integer
        minimum: 0
"##;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn args(schema: &Path) -> ResolveArgs {
    ResolveArgs {
        schema: schema.to_path_buf(),
        config: None,
        prefix: None,
        root_name: None,
        format: OutputFormat::Json,
        output: None,
    }
}

#[test]
fn yaml_schema_resolves_to_ordered_models() {
    let dir = TempDir::new().unwrap();
    let schema_path = write(&dir, "feed.yaml", FEED_YAML);

    let schema = load_schema(&schema_path).unwrap();
    let mut resolve_args = args(&schema_path);
    resolve_args.prefix = Some("TS".into());
    let config = build_config(&resolve_args).unwrap();
    let models = resolve_document(&schema, &config).unwrap();

    assert_eq!(models.names().collect::<Vec<_>>(), vec!["TSModel", "TSEntryModel"]);
    let root = models.get("TSModel").unwrap();
    assert_eq!(root.properties[0].description.as_deref(), Some("Feed title"));
    assert_eq!(root.property("entries").unwrap().collection_element_types, vec!["TSEntryModel"]);
    let published = &models.get("TSEntryModel").unwrap().properties[0];
    assert_eq!(published.name, "publishedAt");
    assert_eq!(published.tag, PropertyTag::UnsignedInt);
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let schema_path = write(&dir, "feed.yaml", FEED_YAML);
    let config_path = write(
        &dir,
        "naming.yml",
        "class_prefix: AB\nroot_name: feed\n",
    );

    let mut resolve_args = args(&schema_path);
    resolve_args.config = Some(config_path);
    let config = build_config(&resolve_args).unwrap();
    assert_eq!(config.class_prefix, "AB");
    assert_eq!(config.root_name, "feed");

    resolve_args.prefix = Some("XY".into());
    let config = build_config(&resolve_args).unwrap();
    assert_eq!(config.class_prefix, "XY");
    assert_eq!(config.root_name, "feed");
    assert_eq!(config.name_override_key, "nameOverride");
}

#[test]
fn run_writes_json_output_file() {
    let dir = TempDir::new().unwrap();
    let schema_path = write(
        &dir,
        "point.json",
        r#"{"type": "object", "required": ["x"], "properties": {"x": {"type": "number"}, "y": {"type": ["number", "null"]}}}"#,
    );
    let output = dir.path().join("models.json");

    let mut resolve_args = args(&schema_path);
    resolve_args.root_name = Some("point".into());
    resolve_args.output = Some(output.clone());
    run_resolve(&resolve_args).unwrap();

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let props = &written["PointModel"]["properties"];
    assert_eq!(props[0]["name"], "x");
    assert_eq!(props[0]["tag"], "number");
    assert_eq!(props[0]["optional"], false);
    assert_eq!(props[1]["tag"], "boxedNumber");
    assert_eq!(props[1]["optional"], true);
}

#[test]
fn yaml_rendering_keeps_discovery_order() {
    let dir = TempDir::new().unwrap();
    let schema_path = write(&dir, "feed.yml", FEED_YAML);
    let schema = load_schema(&schema_path).unwrap();
    let models = resolve_document(&schema, &Default::default()).unwrap();

    let text = render(&models, OutputFormat::Yaml).unwrap();
    let root_at = text.find("Model:").unwrap();
    let entry_at = text.find("EntryModel:").unwrap();
    assert!(root_at < entry_at);
    assert!(text.ends_with('\n'));
}

#[test]
fn resolution_errors_name_the_schema_file() {
    let dir = TempDir::new().unwrap();
    let schema_path = write(
        &dir,
        "broken.json",
        r##"{"type": "object", "properties": {"a": {"$ref": "#/definitions/missing"}}}"##,
    );
    let err = run_resolve(&args(&schema_path)).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
    assert!(format!("{err:#}").contains("missing"));
}

#[test]
fn unknown_extensions_and_bad_text_are_rejected() {
    let dir = TempDir::new().unwrap();
    let txt = write(&dir, "schema.txt", "{}");
    assert!(load_schema(&txt).is_err());

    let bad = write(&dir, "schema.json", "{not json");
    let err = load_schema(&bad).unwrap_err();
    assert!(err.to_string().contains("invalid JSON"));

    assert!(load_schema(&dir.path().join("absent.json")).is_err());
}

#[test]
fn tag_table_lists_every_tag() {
    let table = tag_table();
    assert_eq!(table.len(), PropertyTag::all_tags().len());
    let boxed = table.iter().find(|row| row.tag == PropertyTag::BoxedNumber).unwrap();
    assert!(boxed.reference_like);
    let signed = table.iter().find(|row| row.tag == PropertyTag::SignedInt).unwrap();
    assert!(!signed.reference_like);
}
