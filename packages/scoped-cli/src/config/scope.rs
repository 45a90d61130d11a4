use anyhow::Context;
use single_spa_scoped::ScopeOptions;
use std::fs;
use std::path::Path;

/// Read a JSON options file (`appName`, `additionalSelectors`, ...).
pub fn load(path: &Path) -> anyhow::Result<ScopeOptions> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let options = ScopeOptions::from_json(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(options)
}

/// Values given on the command line. Anything set here wins over the
/// config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeOverrides {
    pub app_name: Option<String>,
    pub additional_selectors: Vec<String>,
    pub exclude_parcels: bool,
    pub keyframe_suffix: Option<String>,
}

impl ScopeOverrides {
    pub fn apply(self, mut options: ScopeOptions) -> ScopeOptions {
        if let Some(app_name) = self.app_name {
            options.app_name = Some(app_name);
        }
        if !self.additional_selectors.is_empty() {
            options.additional_selectors = self.additional_selectors;
        }
        if self.exclude_parcels {
            options.exclude_parcels = true;
        }
        if let Some(suffix) = self.keyframe_suffix {
            options.keyframe_suffix = Some(suffix);
        }
        options
    }
}

/// The config file (if any) with `overrides` applied on top.
pub fn resolve_options(
    config: Option<&Path>,
    overrides: ScopeOverrides,
) -> anyhow::Result<ScopeOptions> {
    let base = match config {
        Some(path) => load(path)?,
        None => ScopeOptions::default(),
    };
    Ok(overrides.apply(base))
}
