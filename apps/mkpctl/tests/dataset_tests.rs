//! End-to-end tests over on-disk datasets.

use clap::Parser;
use mkp_core::{Report, ReportStatus, ValidationConfig};
use mkpctl::cli::{self, Cli, ValidateArgs, run_validate, validate_dataset};
use mkpctl::source::DatasetSource;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =============================================================================
// FIXTURES
// =============================================================================

const CORE_ENTITIES: &str = "\
id,type,name
urn:mkp:actor:apt28,Actor,APT28
urn:mkp:tool:nmap,Tool,Nmap
urn:mkp:tool:mimikatz,Tool,Mimikatz
urn:mkp:sector:energy,Sector,Energy
";

const CORE_RELATIONSHIPS: &str = "\
source,relation,target
urn:mkp:actor:apt28,USES,urn:mkp:tool:nmap
urn:mkp:actor:apt28,USES,urn:mkp:tool:mimikatz
urn:mkp:actor:apt28,TARGETS,urn:mkp:sector:energy
";

fn write_scope(dir: &Path, entities: &str, relationships: &str) {
    fs::create_dir_all(dir).expect("mkdir");
    fs::write(dir.join("entities.csv"), entities).expect("write");
    fs::write(dir.join("relationships.csv"), relationships).expect("write");
}

fn core_dataset() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    write_scope(&tmp.path().join("core"), CORE_ENTITIES, CORE_RELATIONSHIPS);
    tmp
}

fn add_module(root: &Path, name: &str, entities: &str, relationships: &str) {
    write_scope(&root.join("modules").join(name), entities, relationships);
}

fn args(root: &Path) -> ValidateArgs {
    ValidateArgs {
        root: root.to_path_buf(),
        config: None,
        limit: None,
        helper: None,
    }
}

fn exit_code(root: &Path, extra: &[&str]) -> i32 {
    let root = root.to_string_lossy().into_owned();
    let mut argv = vec!["mkpctl", "--quiet", "validate", "--root", root.as_str()];
    argv.extend_from_slice(extra);
    cli::execute(Cli::try_parse_from(argv).expect("args"))
}

// =============================================================================
// SUCCESS PATHS
// =============================================================================

#[test]
fn core_only_dataset() {
    let tmp = core_dataset();
    let stats = validate_dataset(tmp.path(), &ValidationConfig::default()).expect("valid");

    assert_eq!(stats.entity_count, 4);
    assert_eq!(stats.relationship_count, 3);
    assert_eq!(stats.module_count, 0);
    assert_eq!(stats.top_predicates[0].predicate, "USES");
}

#[test]
fn modules_are_discovered_in_name_order() {
    let tmp = core_dataset();
    add_module(tmp.path(), "02_second", "id,type\n", "source,relation,target\n");
    add_module(
        tmp.path(),
        "01_Module_DarkWeb",
        "id,type\nurn:mkp:forum:xss,Forum\n",
        "source,relation,target\nurn:mkp:forum:xss,MENTIONS,urn:mkp:actor:apt28\n",
    );
    fs::write(tmp.path().join("modules").join("README"), "not a module").expect("write");

    let names = DatasetSource::new(tmp.path()).module_names().expect("names");
    assert_eq!(names, vec!["01_Module_DarkWeb", "02_second"]);

    let stats = validate_dataset(tmp.path(), &ValidationConfig::default()).expect("valid");
    assert_eq!(stats.module_count, 2);
    assert_eq!(stats.entity_count, 5);
}

#[test]
fn limit_flag_overrides_config() {
    let tmp = core_dataset();
    fs::write(tmp.path().join("mkp.toml"), "[validation]\ntop_limit = 1\n").expect("write");

    let report = run_validate(&args(tmp.path())).expect("valid");
    assert_eq!(report.stats.as_ref().map(|s| s.top_predicates.len()), Some(1));

    let mut with_limit = args(tmp.path());
    with_limit.limit = Some(5);
    let report = run_validate(&with_limit).expect("valid");
    assert_eq!(report.stats.as_ref().map(|s| s.top_predicates.len()), Some(2));
}

#[test]
fn execute_returns_zero_on_success() {
    let tmp = core_dataset();
    assert_eq!(exit_code(tmp.path(), &[]), 0);
}

// =============================================================================
// FAILURE PATHS
// =============================================================================

#[test]
fn missing_core_is_load_missing() {
    let tmp = TempDir::new().expect("tempdir");
    assert_eq!(exit_code(tmp.path(), &[]), 31);
}

#[test]
fn missing_relationships_file_is_load_missing() {
    let tmp = TempDir::new().expect("tempdir");
    let core = tmp.path().join("core");
    fs::create_dir_all(&core).expect("mkdir");
    fs::write(core.join("entities.csv"), CORE_ENTITIES).expect("write");

    let err = validate_dataset(tmp.path(), &ValidationConfig::default()).expect_err("missing");
    assert_eq!(err.exit_code(), 31);
}

#[test]
fn empty_entities_file_is_schema_failure() {
    let tmp = TempDir::new().expect("tempdir");
    write_scope(&tmp.path().join("core"), "", CORE_RELATIONSHIPS);

    let err = validate_dataset(tmp.path(), &ValidationConfig::default()).expect_err("empty");
    assert_eq!(err.to_string(), "Core validation failed: entities.csv is empty");
    assert_eq!(err.exit_code(), 21);
}

#[test]
fn module_mutating_core_exits_25() {
    let tmp = core_dataset();
    add_module(
        tmp.path(),
        "01_Module_DarkWeb",
        "id,type\nurn:mkp:tool:nmap,Tool\n",
        "source,relation,target\n",
    );

    let report = run_validate(&args(tmp.path())).unwrap_or_else(|e| Report::failure(&e));
    assert_eq!(report.status, ReportStatus::Error);
    assert_eq!(report.exit_code, 25);
    assert_eq!(
        report.message.as_deref(),
        Some("Module validation failed (01_Module_DarkWeb): Module attempts to mutate Core entity: urn:mkp:tool:nmap")
    );
}

#[test]
fn dangling_reference_exits_24() {
    let tmp = core_dataset();
    add_module(
        tmp.path(),
        "m1",
        "id,type\nurn:mkp:tool:zmap,Tool\n",
        "source,relation,target\nurn:mkp:tool:zmap,USES,urn:mkp:tool:ghost\n",
    );
    assert_eq!(exit_code(tmp.path(), &[]), 24);
}

#[test]
fn unparsable_config_exits_32() {
    let tmp = core_dataset();
    fs::write(tmp.path().join("mkp.toml"), "[validation\n").expect("write");
    assert_eq!(exit_code(tmp.path(), &[]), 32);
}

#[test]
fn missing_explicit_config_exits_31() {
    let tmp = core_dataset();
    let mut missing = args(tmp.path());
    missing.config = Some(tmp.path().join("absent.toml"));

    let err = run_validate(&missing).expect_err("missing config");
    assert_eq!(err.exit_code(), 31);
}

// =============================================================================
// HELPER
// =============================================================================

#[test]
fn missing_helper_exits_41() {
    let tmp = core_dataset();
    assert_eq!(
        exit_code(tmp.path(), &["--helper", "mkpctl-helper-that-does-not-exist"]),
        41
    );
}

#[cfg(unix)]
#[test]
fn failing_configured_helper_exits_42() {
    let tmp = core_dataset();
    fs::write(
        tmp.path().join("mkp.toml"),
        "[helper]\nprogram = \"sh\"\nargs = [\"-c\", \"cat > /dev/null; exit 1\"]\n",
    )
    .expect("write");
    assert_eq!(exit_code(tmp.path(), &[]), 42);
}

#[cfg(unix)]
#[test]
fn helper_receives_json_report() {
    let tmp = core_dataset();
    let out = tmp.path().join("received.json");
    let script = format!("cat > '{}'", out.display());
    fs::write(
        tmp.path().join("mkp.toml"),
        format!("[helper]\nprogram = \"sh\"\nargs = [\"-c\", {:?}]\n", script),
    )
    .expect("write");

    assert_eq!(exit_code(tmp.path(), &[]), 0);

    let received = fs::read_to_string(&out).expect("read");
    let value: serde_json::Value = serde_json::from_str(&received).expect("json");
    assert_eq!(value["status"], "ok");
    assert_eq!(value["stats"]["entity_count"], 4);
}

#[test]
fn helper_is_skipped_on_failure() {
    let tmp = TempDir::new().expect("tempdir");
    assert_eq!(
        exit_code(tmp.path(), &["--helper", "mkpctl-helper-that-does-not-exist"]),
        31
    );
}
