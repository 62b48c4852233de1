//! Integration tests for the `rehome` binary

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

fn rehome_cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rehome").unwrap();
    cmd.arg("--root").arg(root).env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative)).unwrap()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "rehome.toml",
        "[registry.folders]\ncommon = [\"Button\", \"Logo\"]\nview = [\"SideNavigation\"]\n",
    );
    write(
        dir.path(),
        "src/routes/index.tsx",
        "import Button from \"@/components/Button\nimport Logo from '../components/Logo';\nimport React from 'react';\n",
    );
    write(
        dir.path(),
        "src/components/view/SideNavigation.tsx",
        "import Button from '../Button';\n",
    );
    dir
}

#[test]
fn test_fix_rewrites_files() {
    let dir = project();

    rehome_cmd(dir.path())
        .arg("fix")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 changed"));

    assert_eq!(
        read(dir.path(), "src/routes/index.tsx"),
        "import Button from \"@/components/common/Button\"\nimport Logo from '../components/common/Logo';\nimport React from 'react';\n"
    );
    assert_eq!(
        read(dir.path(), "src/components/view/SideNavigation.tsx"),
        "import Button from '../common/Button';\n"
    );
}

#[test]
fn test_check_reports_pending_changes_without_writing() {
    let dir = project();
    let before = read(dir.path(), "src/routes/index.tsx");

    rehome_cmd(dir.path())
        .args(["fix", "--check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would change"));

    assert_eq!(read(dir.path(), "src/routes/index.tsx"), before);

    rehome_cmd(dir.path()).arg("fix").assert().success();
    rehome_cmd(dir.path()).args(["fix", "--check"]).assert().success();
}

#[test]
fn test_fix_json_output() {
    let dir = project();

    let output = rehome_cmd(dir.path())
        .args(["fix", "--dry-run", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["filesScanned"], 2);
    let files = report["files"].as_array().unwrap();
    assert!(files
        .iter()
        .all(|f| f["status"] == "changed" && f["written"] == false));
}

#[test]
fn test_repair_only_closes_quotes() {
    let dir = project();

    rehome_cmd(dir.path()).arg("repair").assert().success();

    assert_eq!(
        read(dir.path(), "src/routes/index.tsx"),
        "import Button from \"@/components/Button\"\nimport Logo from '../components/Logo';\nimport React from 'react';\n"
    );
}

#[test]
fn test_audit_lists_cross_folder_imports() {
    let dir = project();

    rehome_cmd(dir.path())
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "src/components/view/SideNavigation.tsx:1:21",
        ))
        .stdout(predicate::str::contains("canonical: ../common/Button"));

    assert_eq!(
        read(dir.path(), "src/components/view/SideNavigation.tsx"),
        "import Button from '../Button';\n"
    );
}

#[test]
fn test_registry_collision_is_fatal() {
    let dir = project();
    write(
        dir.path(),
        "rehome.toml",
        "[registry.folders]\ncommon = [\"Button\"]\nview = [\"Button\"]\n",
    );
    let before = read(dir.path(), "src/routes/index.tsx");

    rehome_cmd(dir.path())
        .arg("fix")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Button"));

    assert_eq!(read(dir.path(), "src/routes/index.tsx"), before);
}

#[test]
fn test_init_writes_preset_and_refuses_overwrite() {
    let dir = TempDir::new().unwrap();

    rehome_cmd(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("rehome.toml"));

    let written = read(dir.path(), "rehome.toml");
    assert!(written.contains("SideNavigation"));
    assert!(written.contains("GeoLocation"));

    rehome_cmd(dir.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    rehome_cmd(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_config_prints_effective_configuration() {
    let dir = project();

    rehome_cmd(dir.path())
        .arg("config")
        .env("REHOME__SCAN__CONCURRENCY", "3")
        .assert()
        .success()
        .stdout(predicate::str::contains("concurrency = 3"))
        .stdout(predicate::str::contains("alias_prefix = \"@/components\""));
}
