//! Integration tests for package.json script parsing.

use std::fs;

use cross_run::error::CrossRunError;
use cross_run::package::{parse_manifest, read_declared_scripts};

use crate::integration::fixtures::{create_empty_project, create_project, standard_scripts};

#[test]
fn test_scripts_keep_declaration_order() {
    let project = create_project(&[("zeta", "z"), ("alpha", "a"), ("mid", "m")]);

    let names = read_declared_scripts(project.path()).unwrap();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_standard_scripts() {
    let project = create_project(&standard_scripts());

    let names = read_declared_scripts(project.path()).unwrap();
    assert_eq!(names, vec!["build:css", "build:js", "test", "lint"]);
}

#[test]
fn test_missing_scripts_field() {
    let manifest = parse_manifest(r#"{"name": "no-scripts", "version": "1.0.0"}"#).unwrap();
    assert!(manifest.script_names().is_empty());
}

#[test]
fn test_null_scripts_field() {
    let project = create_empty_project();
    fs::write(
        project.path().join("package.json"),
        r#"{"name": "null-scripts", "scripts": null}"#,
    )
    .unwrap();

    let names = read_declared_scripts(project.path()).unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_non_string_script_values_are_still_declared() {
    let manifest = parse_manifest(r#"{"scripts": {"weird": 42, "ok": "true"}}"#).unwrap();
    assert_eq!(manifest.script_names(), vec!["weird", "ok"]);
}

#[test]
fn test_missing_manifest() {
    let project = create_empty_project();

    let err = read_declared_scripts(project.path()).unwrap_err();
    assert!(matches!(err, CrossRunError::ManifestRead { .. }));
}

#[test]
fn test_malformed_manifest() {
    let project = create_empty_project();
    fs::write(project.path().join("package.json"), "{ \"scripts\": { \"dev\": }").unwrap();

    let err = read_declared_scripts(project.path()).unwrap_err();
    assert!(matches!(err, CrossRunError::ManifestParse { .. }));
    assert!(err.to_string().contains("package.json"));
}
