//! Shared helpers for the scoping specs.

#![allow(dead_code)]

use regex::Regex;
use single_spa_scoped::{ScopeOptions, Scoper};

/// Prefix of an application named `my-app`.
pub const PREFIX: &str = r"#single-spa-application\:my-app";

/// `:not(...)` clause that keeps a selector out of parcels.
pub fn exclusion(selector: &str) -> String {
    format!(r#":not([id^="single-spa-application\:parcel"] {})"#, selector)
}

/// Options for `my-app` with a fixed keyframe suffix.
pub fn options() -> ScopeOptions {
    ScopeOptions::default()
        .with_app_name("my-app")
        .with_keyframe_suffix("-b8f36a64")
}

pub fn scoper(options: &ScopeOptions) -> Scoper {
    Scoper::with_metadata(options, || None).expect("valid options")
}

pub fn scope(css: &str) -> String {
    scope_with(css, &options())
}

pub fn scope_with(css: &str, options: &ScopeOptions) -> String {
    scoper(options).process_css(css, None).expect("parsable css")
}

pub fn scope_file(css: &str, file: &str, options: &ScopeOptions) -> String {
    scoper(options)
        .process_css(css, Some(file))
        .expect("parsable css")
}

pub fn extract_css_content(css: &str) -> String {
    let whitespace = Regex::new(r"\s+").unwrap();
    let open = Regex::new(r"\{\s+").unwrap();
    let close = Regex::new(r"\s+\}").unwrap();

    let mut result = whitespace.replace_all(css.trim(), " ").to_string();
    result = open.replace_all(&result, "{").to_string();
    result = close.replace_all(&result, "}").to_string();
    result
}

pub fn assert_equal_css(actual: &str, expected: &str) {
    let actual_css = extract_css_content(actual);
    let expected_css = extract_css_content(expected);
    assert_eq!(
        actual_css, expected_css,
        "Expected '{}' to equal '{}'",
        actual_css, expected_css
    );
}

pub fn assert_contains(actual: &str, expected: &str) {
    assert!(
        actual.contains(expected),
        "Expected '{}' to contain '{}'",
        actual,
        expected
    );
}

pub fn assert_not_contains(actual: &str, expected: &str) {
    assert!(
        !actual.contains(expected),
        "Expected '{}' to not contain '{}'",
        actual,
        expected
    );
}
