//! Scope Resolver
//!
//! Turns an application name into the id selector every rule is scoped
//! under: `#single-spa-application\:<escaped name>`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::css_escape::escape_identifier;
use crate::error::ConfigurationError;

/// Prefix of the id single-spa gives every application container.
pub const APPLICATION_ID_PREFIX: &str = "single-spa-application:";

/// The part of a project manifest the resolver reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

impl ProjectMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        ProjectMetadata {
            name: Some(name.into()),
        }
    }
}

/// Read `package.json` from `dir`. A missing or unreadable manifest is
/// "no metadata", not an error.
pub fn read_package_json(dir: &Path) -> Option<ProjectMetadata> {
    let path = dir.join("package.json");
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "no readable package.json");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(metadata) => Some(metadata),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "package.json is not valid JSON");
            None
        }
    }
}

/// `package.json` of the current working directory.
pub fn current_dir_metadata() -> Option<ProjectMetadata> {
    let cwd = std::env::current_dir().ok()?;
    read_package_json(&cwd)
}

/// Compute the scope prefix.
///
/// A non-empty `explicit_name` wins; otherwise `fallback` is asked for
/// project metadata and its `name` is used.
pub fn resolve<F>(explicit_name: Option<&str>, fallback: F) -> Result<String, ConfigurationError>
where
    F: FnOnce() -> Option<ProjectMetadata>,
{
    let name = match explicit_name.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => fallback()
            .and_then(|metadata| metadata.name)
            .filter(|name| !name.is_empty())
            .ok_or(ConfigurationError::MissingScopeName)?,
    };

    let body = format!("{}{}", APPLICATION_ID_PREFIX, name);
    Ok(format!("#{}", escape_identifier(&body)))
}
