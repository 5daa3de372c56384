use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn shape() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shape");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn json_file(contents: &str) -> NamedTempFile {
    temp_file(".json", contents)
}

fn yaml_file(contents: &str) -> NamedTempFile {
    temp_file(".yaml", contents)
}

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_lists_subcommands() {
    shape()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("enums"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("bind"));
}

// ============================================================================
// Catalog Listings
// ============================================================================

#[test]
fn test_enum_values_keep_declaration_order() {
    shape()
        .args(["enums", "CrossConnectGroupLifecycleState"])
        .assert()
        .success()
        .stdout("PROVISIONING\nPROVISIONED\nINACTIVE\nTERMINATING\nTERMINATED\n");
}

#[test]
fn test_generated_sort_enums_are_listed() {
    shape()
        .args(["enums"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ListBootVolumeReplicasSortBy"))
        .stdout(predicate::str::contains("ListBootVolumeReplicasSortOrder"));
}

#[test]
fn test_enums_as_json() {
    let output = shape()
        .args(["enums", "MacsecState", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, serde_json::json!({ "MacsecState": ["ENABLED", "DISABLED"] }));
}

#[test]
fn test_unknown_enum_fails() {
    shape()
        .args(["enums", "NoSuchEnum"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown enum: NoSuchEnum"));
}

#[test]
fn test_model_fields_show_location() {
    shape()
        .args(["models", "ListBootVolumeReplicasRequest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(request)"))
        .stdout(predicate::str::contains("opc-request-id"))
        .stdout(predicate::str::contains("header"));
}

#[test]
fn test_models_mark_unions() {
    shape()
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("TopologyEntityRelationship (union)"));
}

#[test]
fn test_operations_show_method_and_path() {
    shape()
        .arg("operations")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"DeleteNatGateway\s+DELETE\s+/natGateways/\{natGatewayId\}").unwrap());
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn test_validate_reports_every_violation() {
    let input = json_file(
        r#"{
            "id": "ocid1.crossconnectgroup.oc1..aaaa",
            "lifecycleState": "BOGUS",
            "macsecProperties": { "state": "HALF_ON" }
        }"#,
    );

    shape()
        .args(["validate", "CrossConnectGroup"])
        .arg(input.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "unsupported enum value for LifecycleState: BOGUS. Supported values are: PROVISIONING,PROVISIONED,INACTIVE,TERMINATING,TERMINATED",
        ))
        .stdout(predicate::str::contains(
            "unsupported enum value for MacsecProperties.State: HALF_ON. Supported values are: ENABLED,DISABLED",
        ));
}

#[test]
fn test_validate_accepts_lowercase_values() {
    shape()
        .args(["validate", "MacsecProperties", "-"])
        .write_stdin(r#"{"state": "enabled"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("MacsecProperties is valid"));
}

#[test]
fn test_validate_missing_required_field() {
    shape()
        .args(["validate", "MacsecProperties"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing required field State on MacsecProperties"));
}

// ============================================================================
// Bind
// ============================================================================

#[test]
fn test_bind_list_request_query_order() {
    let input = json_file(
        r#"{
            "availabilityDomain": "Uocm:PHX-AD-1",
            "limit": 50,
            "sortBy": "TIMECREATED",
            "sortOrder": "DESC",
            "lifecycleState": "AVAILABLE"
        }"#,
    );

    let output = shape()
        .args(["bind", "ListBootVolumeReplicas"])
        .arg(input.path())
        .args(["-H", "opc-request-id:req-1"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["method"], "GET");
    assert_eq!(
        json["path_and_query"],
        "/bootVolumeReplicas?availabilityDomain=Uocm%3APHX-AD-1&limit=50&sortBy=TIMECREATED&sortOrder=DESC&lifecycleState=AVAILABLE"
    );
    assert_eq!(json["headers"][0], serde_json::json!(["opc-request-id", "req-1"]));
    assert!(json["body"].is_null());
}

#[test]
fn test_bind_rejects_bad_enum_before_sending() {
    shape()
        .args(["bind", "ListBootVolumeReplicas"])
        .write_stdin(r#"{"sortBy": "SIZE"}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported enum value for SortBy: SIZE"));
}

#[test]
fn test_bind_rejects_malformed_header_argument() {
    shape()
        .args(["bind", "ListVcns", "-H", "no-colon"])
        .write_stdin(r#"{"compartmentId": "ocid1.compartment.oc1..aaaa"}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected NAME:VALUE"));
}

#[test]
fn test_extra_catalog_is_merged() {
    let catalog = json_file(
        r#"{
            "name": "extra",
            "enums": [{ "name": "PaintColor", "values": ["RED", "GREEN"] }]
        }"#,
    );

    shape()
        .arg("--catalog")
        .arg(catalog.path())
        .args(["enums", "PaintColor"])
        .assert()
        .success()
        .stdout("RED\nGREEN\n");
}

const PAINT_CATALOG_YAML: &str = r#"
name: paint
enums:
  - name: PaintColor
    values: [RED, GREEN]
models:
  - name: Paint
    fields:
      - name: Color
        wire_name: color
        type: { enum: PaintColor }
      - name: Id
        wire_name: id
        type: string
"#;

#[test]
fn test_yaml_catalog_is_merged() {
    let catalog = yaml_file(PAINT_CATALOG_YAML);

    shape()
        .arg("--catalog")
        .arg(catalog.path())
        .args(["enums", "PaintColor"])
        .assert()
        .success()
        .stdout("RED\nGREEN\n");
}

#[test]
fn test_yaml_catalog_enum_fields_resolve() {
    let catalog = yaml_file(PAINT_CATALOG_YAML);

    shape()
        .arg("--catalog")
        .arg(catalog.path())
        .args(["validate", "Paint"])
        .write_stdin(r#"{"color": "green", "id": "p1"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Paint is valid"));
}

#[test]
fn test_duplicate_catalog_definition_is_rejected() {
    let catalog = json_file(
        r#"{
            "name": "clash",
            "enums": [{ "name": "MacsecState", "values": ["ON"] }]
        }"#,
    );

    shape()
        .arg("--catalog")
        .arg(catalog.path())
        .arg("operations")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Duplicate"));
}
