//! Manifest loading and command execution through the public driver API.

use clap::Parser;
use gqlmap_cli::args::{CliArgs, Command, OutputFormat};
use gqlmap_cli::driver::{self, execute};
use gqlmap_cli::manifest::{load_manifest, parse_manifest};
use gqlmap_cli::tracing_config::LogFormat;
use std::io::Write;
use tempfile::NamedTempFile;

const REGISTERED_INTERFACE: &str = r#"{
  "classes": [
    { "name": "ClassA", "kind": "interface" },
    { "name": "ClassB", "implements": ["ClassA"] },
    { "name": "ClassC", "extends": "ClassB" }
  ],
  "types": [
    { "kind": "object", "name": "ClassB", "fields": [
      { "name": "foo", "type": "String!" },
      { "name": "bar", "type": "String!" }
    ] },
    { "kind": "interface", "name": "ClassAInterface", "fields": [
      { "name": "foo", "type": "String!" }
    ] },
    { "kind": "input", "name": "ClassBInput", "fields": [
      { "name": "bar", "type": "String" }
    ] }
  ],
  "objects": { "ClassB": "ClassB" },
  "inputs": { "ClassB": "ClassBInput" },
  "interfaces": { "ClassA": "ClassAInterface" }
}"#;

const SHARED_ANIMAL: &str = r#"{
  "classes": [
    { "name": "Walks", "kind": "interface" },
    { "name": "Swims", "kind": "interface" },
    { "name": "Animal" },
    { "name": "Dog", "extends": "Animal", "implements": ["Walks"] },
    { "name": "Fish", "extends": "Animal", "implements": ["Swims"] }
  ],
  "types": [
    { "kind": "interface", "name": "Walker" },
    { "kind": "interface", "name": "Swimmer" },
    { "kind": "object", "name": "Animal", "fields": [{ "name": "name", "type": "String!" }] }
  ],
  "objects": { "Animal": "Animal" },
  "interfaces": { "Walks": "Walker", "Swims": "Swimmer" }
}"#;

const DERIVED_INTERFACE: &str = r#"{
  "deriveInterfaces": true,
  "classes": [
    { "name": "ClassA" },
    { "name": "ClassB", "extends": "ClassA" },
    { "name": "ClassC", "extends": "ClassB" }
  ],
  "types": [
    { "kind": "object", "name": "ClassA", "fields": [{ "name": "foo", "type": "String!" }] },
    { "kind": "object", "name": "ClassB", "fields": [
      { "name": "foo", "type": "String!" },
      { "name": "bar", "type": "String!" }
    ] }
  ],
  "objects": { "ClassA": "ClassA", "ClassB": "ClassB" }
}"#;

fn write_manifest(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run(file: &NamedTempFile, extra: &[&str]) -> anyhow::Result<String> {
    let path = file.path().to_str().unwrap();
    let mut argv = vec!["gqlmap", "--manifest", path];
    argv.extend_from_slice(extra);
    let args = CliArgs::try_parse_from(argv).unwrap();
    driver::run(&args)
}

#[test]
fn test_parse_arguments() {
    let args =
        CliArgs::try_parse_from(["gqlmap", "-m", "m.json", "--format", "json", "resolve", "X"])
            .unwrap();
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(
        args.command,
        Command::Resolve {
            class: "X".to_string()
        }
    );

    let args = CliArgs::try_parse_from(["gqlmap", "-m", "m.json", "interface-or-type", "Y"]).unwrap();
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(
        args.command,
        Command::InterfaceOrType {
            class: "Y".to_string()
        }
    );

    assert_eq!(args.log_format, None);

    let args =
        CliArgs::try_parse_from(["gqlmap", "--log-format", "tree", "-m", "m.json", "schema"])
            .unwrap();
    assert_eq!(args.log_format, Some(LogFormat::Tree));

    assert!(CliArgs::try_parse_from(["gqlmap", "schema"]).is_err());
}

#[test]
fn test_resolve_falls_back_to_mapped_superclass() {
    let file = write_manifest(REGISTERED_INTERFACE);
    let output = run(&file, &["resolve", "ClassC"]).unwrap();
    assert_eq!(
        output,
        "type ClassB implements ClassAInterface {\n  foo: String!\n  bar: String!\n}\n"
    );
}

#[test]
fn test_resolve_json_reports_source_class() {
    let file = write_manifest(REGISTERED_INTERFACE);
    let output = run(&file, &["--format", "json", "resolve", "ClassC"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["class"], "ClassC");
    assert_eq!(value["source"], "ClassB");
    assert_eq!(value["type"]["name"], "ClassB");
    assert_eq!(value["type"]["interfaces"][0], "ClassAInterface");
    assert_eq!(value["type"]["fields"][1]["type"], "String!");
}

#[test]
fn test_interface_or_type_with_registered_interface() {
    let file = write_manifest(REGISTERED_INTERFACE);

    let output = run(&file, &["interface-or-type", "ClassA"]).unwrap();
    assert_eq!(output, "interface ClassAInterface {\n  foo: String!\n}\n");

    let output = run(&file, &["interface-or-type", "ClassC"]).unwrap();
    assert!(output.starts_with("type ClassB implements ClassAInterface"));
}

#[test]
fn test_interfaces_command() {
    let file = write_manifest(REGISTERED_INTERFACE);
    let output = run(&file, &["--format", "json", "interfaces", "ClassC"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let interfaces = value["interfaces"].as_array().unwrap();
    assert_eq!(interfaces.len(), 1);
    assert_eq!(interfaces[0]["name"], "ClassAInterface");
    assert_eq!(interfaces[0]["derived"], false);
}

#[test]
fn test_input_is_exact_match_only() {
    let file = write_manifest(REGISTERED_INTERFACE);

    let output = run(&file, &["input", "ClassB"]).unwrap();
    assert_eq!(output, "input ClassBInput {\n  bar: String\n}\n");

    let err = run(&file, &["input", "ClassC"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot map class \"ClassC\" to a GraphQL input type: no mapping found"
    );
}

#[test]
fn test_unknown_class_is_reported() {
    let file = write_manifest(REGISTERED_INTERFACE);
    let err = run(&file, &["resolve", "Missing"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot map class \"Missing\" to a GraphQL output type: class does not exist"
    );
}

#[test]
fn test_schema_lists_interfaces_before_objects() {
    let file = write_manifest(REGISTERED_INTERFACE);
    let output = run(&file, &["schema"]).unwrap();
    assert_eq!(
        output,
        "interface ClassAInterface {\n  foo: String!\n}\n\
         \n\
         type ClassB implements ClassAInterface {\n  foo: String!\n  bar: String!\n}\n\
         \n\
         input ClassBInput {\n  bar: String\n}\n"
    );
}

#[test]
fn test_derived_interfaces() {
    let file = write_manifest(DERIVED_INTERFACE);

    let output = run(&file, &["interface-or-type", "ClassA"]).unwrap();
    assert_eq!(output, "interface ClassAInterface {\n  foo: String!\n}\n");

    let output = run(&file, &["interface-or-type", "ClassC"]).unwrap();
    assert!(output.starts_with("type ClassB implements ClassAInterface {"));

    let output = run(&file, &["schema"]).unwrap();
    assert!(output.starts_with("interface ClassAInterface {"));
    assert!(output.contains("type ClassA implements ClassAInterface {"));
    assert!(output.contains("type ClassB implements ClassAInterface {"));
}

#[test]
fn test_interface_suffix() {
    let source = DERIVED_INTERFACE.replacen(
        "\"deriveInterfaces\": true,",
        "\"deriveInterfaces\": true, \"interfaceSuffix\": \"Contract\",",
        1,
    );
    let file = write_manifest(&source);
    let output = run(&file, &["interface-or-type", "ClassA"]).unwrap();
    assert!(output.starts_with("interface ClassAContract {"));
}

#[test]
fn test_derivation_disabled_by_default() {
    let source = DERIVED_INTERFACE.replacen("\"deriveInterfaces\": true,", "", 1);
    let file = write_manifest(&source);
    let output = run(&file, &["interface-or-type", "ClassA"]).unwrap();
    assert_eq!(output, "type ClassA {\n  foo: String!\n}\n");
}

#[test]
fn test_manifest_errors() {
    let unknown_type = parse_manifest(
        r#"{ "classes": [{ "name": "A" }], "objects": { "A": "Nope" } }"#,
    )
    .unwrap()
    .load()
    .unwrap_err();
    assert!(format!("{unknown_type:#}").contains("maps to unknown object type 'Nope'"));

    let unknown_class = parse_manifest(
        r#"{ "types": [{ "kind": "object", "name": "A" }], "objects": { "A": "A" } }"#,
    )
    .unwrap()
    .load()
    .unwrap_err();
    assert!(format!("{unknown_class:#}").contains("undeclared class 'A'"));

    let cycle = parse_manifest(
        r#"{ "classes": [{ "name": "A", "extends": "B" }, { "name": "B", "extends": "A" }] }"#,
    )
    .unwrap()
    .load()
    .unwrap_err();
    let message = format!("{cycle:#}");
    assert!(message.starts_with("invalid class hierarchy"));
    assert!(message.contains("inheritance cycle detected"));

    let duplicate = parse_manifest(
        r#"{ "types": [{ "kind": "object", "name": "A" }, { "kind": "input", "name": "A" }] }"#,
    )
    .unwrap()
    .load()
    .unwrap_err();
    assert!(format!("{duplicate:#}").contains("already registered"));

    assert!(parse_manifest("{ not json").is_err());
}

#[test]
fn test_missing_manifest_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_manifest(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().starts_with("failed to read manifest"));
}

#[test]
fn test_classes_sharing_a_type_report_their_own_interfaces() {
    let loaded = parse_manifest(SHARED_ANIMAL).unwrap().load().unwrap();
    let resolve = |class: &str| {
        execute(
            &loaded,
            &Command::Resolve {
                class: class.to_string(),
            },
            OutputFormat::Text,
        )
        .unwrap()
    };

    assert_eq!(
        resolve("Dog"),
        "type Animal implements Walker {\n  name: String!\n}\n"
    );
    assert_eq!(
        resolve("Fish"),
        "type Animal implements Swimmer {\n  name: String!\n}\n"
    );
    assert_eq!(resolve("Animal"), "type Animal {\n  name: String!\n}\n");
    assert_eq!(
        resolve("Dog"),
        "type Animal implements Walker {\n  name: String!\n}\n"
    );

    let schema = execute(&loaded, &Command::Schema, OutputFormat::Text).unwrap();
    assert_eq!(
        schema,
        "interface Walker\n\ninterface Swimmer\n\ntype Animal {\n  name: String!\n}\n"
    );
}
