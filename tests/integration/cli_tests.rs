//! CLI integration tests for cross-run.
//!
//! These tests verify the command-line interface behavior using assert_cmd.

use predicates::prelude::*;

use crate::integration::fixtures::{create_empty_project, cross_run};

// ==================== Help and Version ====================

#[test]
fn test_help_output() {
    let project = create_empty_project();

    cross_run(project.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--multiple"))
        .stdout(predicate::str::contains("--parallel"))
        .stdout(predicate::str::contains("--override-pm"));
}

#[test]
fn test_version_output() {
    let project = create_empty_project();

    cross_run(project.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cross-run"))
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

#[test]
fn test_completions_bash() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cross-run"));
}

#[test]
fn test_example_config() {
    let project = create_empty_project();

    cross_run(project.path())
        .arg("--example-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[general]"))
        .stdout(predicate::str::contains("[output]"));
}

// ==================== Argument errors ====================

#[test]
fn test_multiple_and_parallel_conflict() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["-m", "-p", "touch should-not-exist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Cannot use both --multiple and --parallel",
        ));

    assert!(!project.path().join("should-not-exist").exists());
}

#[test]
fn test_mode_conflict_is_reported_before_config_is_read() {
    let project = create_empty_project();
    std::fs::write(project.path().join("broken.toml"), "[general\nstrict = ").unwrap();

    cross_run(project.path())
        .args(["-m", "-p", "--config", "broken.toml", "echo", "hi"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Cannot use both --multiple and --parallel",
        ))
        .stderr(predicate::str::contains("broken.toml").not());
}

#[test]
fn test_invalid_package_manager() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["-o", "bun", "echo", "hi"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid package manager bun"));
}

#[test]
fn test_no_commands_is_success() {
    let project = create_empty_project();

    cross_run(project.path()).assert().success().stdout("");
}

#[test]
fn test_only_assignments_is_success() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["FOO=bar", "BAZ=qux"])
        .assert()
        .success()
        .stdout("");
}

// ==================== Single command ====================

#[cfg(unix)]
#[test]
fn test_single_command_output_is_unlabelled() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["echo", "hello"])
        .assert()
        .success()
        .stdout("hello\n");
}

#[cfg(unix)]
#[test]
fn test_hyphen_arguments_pass_through() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["echo", "x", "-p", "--raw"])
        .assert()
        .success()
        .stdout("x -p --raw\n");
}

#[cfg(unix)]
#[test]
fn test_inline_assignment_is_expanded() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["GREETING=hello world", "echo", "$GREETING", "${GREETING}", "%GREETING%"])
        .assert()
        .success()
        .stdout("hello world hello world hello world\n");
}

#[cfg(unix)]
#[test]
fn test_inline_assignment_reaches_child_environment() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["CROSS_RUN_TEST_VALUE=42", "printenv", "CROSS_RUN_TEST_VALUE"])
        .assert()
        .success()
        .stdout("42\n");
}

#[cfg(unix)]
#[test]
fn test_hyphenated_reference_uses_defined_prefix() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["A=1", "B=2", "echo", "$A-$B"])
        .assert()
        .success()
        .stdout("1-2\n");
}

#[cfg(unix)]
#[test]
fn test_unknown_variable_expands_to_empty() {
    let project = create_empty_project();

    cross_run(project.path())
        .env_remove("CROSS_RUN_UNSET")
        .args(["echo", "[${CROSS_RUN_UNSET}]"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[cfg(unix)]
#[test]
fn test_strict_unknown_variable_fails() {
    let project = create_empty_project();

    cross_run(project.path())
        .env_remove("CROSS_RUN_UNSET")
        .args(["--strict", "touch", "$CROSS_RUN_UNSET"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CROSS_RUN_UNSET"));
}

#[cfg(unix)]
#[test]
fn test_non_zero_exit_reports_code() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["exit", "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Command exited with code 3."))
        .stderr(predicate::str::contains("Error:").not());
}

#[cfg(unix)]
#[test]
fn test_raw_failure_still_reports_error() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["--raw", "exit", "4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Command exited with code 4."));
}

#[cfg(unix)]
#[test]
fn test_dry_run_does_not_spawn() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["--dry-run", "touch", "created"])
        .assert()
        .success()
        .stdout("Would run: touch created\n");

    assert!(!project.path().join("created").exists());
}

#[cfg(unix)]
#[test]
fn test_verbose_echoes_command_line() {
    let project = create_empty_project();

    cross_run(project.path())
        .args(["--verbose", "echo", "hi"])
        .assert()
        .success()
        .stdout("hi\n")
        .stderr(predicate::str::contains("echo hi"));
}

// ==================== Env files ====================

#[cfg(unix)]
#[test]
fn test_env_flag_loads_dotenv() {
    let project = create_empty_project();
    std::fs::write(project.path().join(".env"), "CROSS_RUN_DOTENV=from-file\n").unwrap();

    cross_run(project.path())
        .env_remove("NODE_ENV")
        .args(["-e", "echo", "$CROSS_RUN_DOTENV"])
        .assert()
        .success()
        .stdout("from-file\n");
}

#[cfg(unix)]
#[test]
fn test_env_files_are_ignored_without_flag() {
    let project = create_empty_project();
    std::fs::write(project.path().join(".env"), "CROSS_RUN_DOTENV=from-file\n").unwrap();

    cross_run(project.path())
        .args(["echo", "x${CROSS_RUN_DOTENV}y"])
        .assert()
        .success()
        .stdout("xy\n");
}

#[cfg(unix)]
#[test]
fn test_env_file_precedence() {
    let project = create_empty_project();
    std::fs::write(project.path().join(".env"), "CROSS_RUN_A=env\n").unwrap();
    std::fs::write(
        project.path().join(".env.local"),
        "CROSS_RUN_A=local\nCROSS_RUN_B=local\n",
    )
    .unwrap();
    std::fs::write(
        project.path().join(".env.test"),
        "CROSS_RUN_B=test\nCROSS_RUN_C=test\n",
    )
    .unwrap();

    cross_run(project.path())
        .env("NODE_ENV", "test")
        .args(["--env", "echo", "$CROSS_RUN_A", "$CROSS_RUN_B", "$CROSS_RUN_C"])
        .assert()
        .success()
        .stdout("env local test\n");
}

#[cfg(unix)]
#[test]
fn test_inline_assignment_overrides_env_file() {
    let project = create_empty_project();
    std::fs::write(project.path().join(".env"), "CROSS_RUN_DOTENV=from-file\n").unwrap();

    cross_run(project.path())
        .args(["-e", "CROSS_RUN_DOTENV=inline", "printenv", "CROSS_RUN_DOTENV"])
        .assert()
        .success()
        .stdout("inline\n");
}
