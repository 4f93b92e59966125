//! Integration tests for configuration loading.

use std::fs;

use predicates::prelude::*;

use cross_run::config::{load_config, PROJECT_CONFIG_FILE};

use crate::integration::fixtures::{create_empty_project, cross_run};

#[test]
fn test_missing_config_files_use_defaults() {
    let project = create_empty_project();
    let config = load_config(None, project.path()).unwrap();

    assert_eq!(config.general.strict, None);
    assert_eq!(config.output.raw, None);
}

#[test]
fn test_project_config_is_loaded() {
    let project = create_empty_project();
    fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "[output]\nraw = true\n",
    )
    .unwrap();

    let config = load_config(None, project.path()).unwrap();
    assert_eq!(config.output.raw, Some(true));
}

#[cfg(unix)]
#[test]
fn test_project_config_strict_applies() {
    let project = create_empty_project();
    fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "[general]\nstrict = true\n",
    )
    .unwrap();

    cross_run(project.path())
        .env_remove("CROSS_RUN_UNSET")
        .args(["echo", "$CROSS_RUN_UNSET"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CROSS_RUN_UNSET"));
}

#[cfg(unix)]
#[test]
fn test_no_config_ignores_project_config() {
    let project = create_empty_project();
    fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "[general]\nstrict = true\n",
    )
    .unwrap();

    cross_run(project.path())
        .env_remove("CROSS_RUN_UNSET")
        .args(["--no-config", "echo", "[$CROSS_RUN_UNSET]"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_user_config_is_loaded() {
    let project = create_empty_project();
    let user_dir = project.path().join(".xdg").join("cross-run");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(user_dir.join("config.toml"), "[output]\nverbose = true\n").unwrap();

    cross_run(project.path())
        .args(["echo", "hi"])
        .assert()
        .success()
        .stderr(predicate::str::contains("echo hi"));
}

#[cfg(unix)]
#[test]
fn test_broken_project_config_warns_and_continues() {
    let project = create_empty_project();
    fs::write(project.path().join(PROJECT_CONFIG_FILE), "not [valid").unwrap();

    cross_run(project.path())
        .args(["echo", "hi"])
        .assert()
        .success()
        .stdout("hi\n")
        .stderr(predicate::str::contains("ignoring config file"));
}

#[test]
fn test_broken_cli_config_is_an_error() {
    let project = create_empty_project();
    let path = project.path().join("broken.toml");
    fs::write(&path, "not [valid").unwrap();

    cross_run(project.path())
        .arg("--config")
        .arg(&path)
        .args(["echo", "hi"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_invalid_package_manager_in_config() {
    let project = create_empty_project();
    fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "[general]\npackage_manager = \"bun\"\n",
    )
    .unwrap();

    cross_run(project.path())
        .args(["echo", "hi"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid package manager bun"));
}
