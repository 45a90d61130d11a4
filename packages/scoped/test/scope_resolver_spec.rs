//! Scope Resolver Tests

mod utils;
use std::fs;

use single_spa_scoped::scope_resolver::{read_package_json, resolve};
use single_spa_scoped::{ConfigurationError, ProjectMetadata, ScopeOptions, Scoper};
use tempfile::TempDir;

fn project_with_manifest(manifest: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), manifest).unwrap();
    dir
}

#[test]
fn should_escape_the_explicit_name() {
    assert_eq!(
        resolve(Some("my-app"), || None).unwrap(),
        utils::PREFIX
    );
    assert_eq!(
        resolve(Some("shop.cart"), || None).unwrap(),
        r"#single-spa-application\:shop\.cart"
    );
}

#[test]
fn should_fall_back_to_the_package_name() {
    let dir = project_with_manifest(r#"{ "name": "@org/app-name", "version": "1.0.0" }"#);
    let scoper = Scoper::with_metadata(&ScopeOptions::default(), || read_package_json(dir.path()))
        .unwrap();
    assert_eq!(
        scoper.context().prefix(),
        r"#single-spa-application\:\@org\/app-name"
    );
    assert_eq!(
        scoper.process_css("a {}", None).unwrap(),
        r"#single-spa-application\:\@org\/app-name a {}"
    );
}

#[test]
fn should_prefer_the_explicit_name_over_the_manifest() {
    let dir = project_with_manifest(r#"{ "name": "from-manifest" }"#);
    let options = ScopeOptions::default().with_app_name("my-app");
    let scoper = Scoper::with_metadata(&options, || read_package_json(dir.path())).unwrap();
    assert_eq!(scoper.context().prefix(), utils::PREFIX);
}

#[test]
fn should_fail_without_a_manifest() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(read_package_json(dir.path()), None);

    let err = Scoper::with_metadata(&ScopeOptions::default(), || read_package_json(dir.path()))
        .unwrap_err();
    assert_eq!(err, ConfigurationError::MissingScopeName);
    assert_eq!(
        err.to_string(),
        "Could not generate prefix. Please provide an appName in the options or ensure your project has a package.json with a name property."
    );
}

#[test]
fn should_fail_with_a_nameless_or_broken_manifest() {
    let nameless = project_with_manifest(r#"{ "version": "1.0.0" }"#);
    assert_eq!(
        read_package_json(nameless.path()),
        Some(ProjectMetadata::default())
    );
    assert!(Scoper::with_metadata(&ScopeOptions::default(), || read_package_json(
        nameless.path()
    ))
    .is_err());

    let broken = project_with_manifest("{ name: ");
    assert_eq!(read_package_json(broken.path()), None);
}

#[test]
fn should_fail_with_an_empty_name() {
    let options = ScopeOptions::default().with_app_name("");
    assert_eq!(
        Scoper::with_metadata(&options, || Some(ProjectMetadata::named(""))).unwrap_err(),
        ConfigurationError::MissingScopeName
    );
}
