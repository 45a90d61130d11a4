//! Scoping options
//!
//! The user-facing option set, as it appears in a JSON configuration file,
//! and the validated framework policy derived from it.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::ConfigurationError;

/// Options recognised when building a [`crate::Scoper`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeOptions {
    /// Explicit scope name; when set, the project manifest is not consulted
    pub app_name: Option<String>,

    /// Extra selectors every scoped selector is also placed under
    #[serde(deserialize_with = "deserialize_selector_list")]
    pub additional_selectors: Vec<String>,

    /// Keep host styles out of nested parcel containers
    pub exclude_parcels: bool,

    /// Leave rules alone that a framework has already scoped
    pub skip_scoped_styles: SkipScopedStylesConfig,

    /// Fixed keyframe suffix; generated per run when absent
    pub keyframe_suffix: Option<String>,

    /// Pseudo-elements recognised on top of the standard table
    #[serde(deserialize_with = "deserialize_selector_list")]
    pub additional_pseudo_elements: Vec<String>,
}

impl ScopeOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::InvalidOptions(e.to_string()))
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_additional_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_parcels(mut self, exclude_parcels: bool) -> Self {
        self.exclude_parcels = exclude_parcels;
        self
    }

    pub fn with_skip_scoped_styles(mut self, skip: SkipScopedStylesConfig) -> Self {
        self.skip_scoped_styles = skip;
        self
    }

    pub fn with_keyframe_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.keyframe_suffix = Some(suffix.into());
        self
    }

    /// Trimmed additional selectors with empty entries removed, in order.
    pub fn sanitized_additional_selectors(&self) -> Vec<String> {
        self.additional_selectors
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Accepts `null`, or a list whose entries may be `null`; `null` entries
/// are dropped.
fn deserialize_selector_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

/// `skipScopedStyles` as written by the user: `false`, `true` (rejected) or
/// a framework description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkipScopedStylesConfig {
    Flag(bool),
    Framework(FrameworkConfig),
}

impl Default for SkipScopedStylesConfig {
    fn default() -> Self {
        SkipScopedStylesConfig::Flag(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkConfig {
    pub framework: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooling: Option<String>,
}

impl FrameworkConfig {
    pub fn new(framework: impl Into<String>) -> Self {
        FrameworkConfig {
            framework: framework.into(),
            ..FrameworkConfig::default()
        }
    }

    pub fn with_scope_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.scope_strategy = Some(strategy.into());
        self
    }

    pub fn with_tooling(mut self, tooling: impl Into<String>) -> Self {
        self.tooling = Some(tooling.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactScopeStrategy {
    CssModules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvelteTooling {
    Vite,
}

/// The validated pre-scoping policy. Exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipScopedStyles {
    #[default]
    Disabled,
    Vue,
    React(ReactScopeStrategy),
    Svelte(SvelteTooling),
}

const VUE_SCOPED_MARKER: &str = "&scoped=";
const CSS_MODULE_SUFFIX: &str = ".module.css";
const SVELTE_VITE_MARKER: &str = "svelte&type=style";
const SVELTE_CLASS_MARKER: &str = ".svelte-";

impl TryFrom<&SkipScopedStylesConfig> for SkipScopedStyles {
    type Error = ConfigurationError;

    fn try_from(config: &SkipScopedStylesConfig) -> Result<Self, Self::Error> {
        let framework = match config {
            SkipScopedStylesConfig::Flag(false) => return Ok(SkipScopedStyles::Disabled),
            SkipScopedStylesConfig::Flag(true) => {
                return Err(ConfigurationError::BareSkipScopedStyles)
            }
            SkipScopedStylesConfig::Framework(framework) => framework,
        };

        match framework.framework.as_str() {
            "vue" => Ok(SkipScopedStyles::Vue),
            "react" => match framework.scope_strategy.as_deref() {
                Some("css-modules") => Ok(SkipScopedStyles::React(ReactScopeStrategy::CssModules)),
                Some(other) => Err(ConfigurationError::InvalidSkipScopedStyles(format!(
                    "unsupported react scopeStrategy `{}` (supported: css-modules)",
                    other
                ))),
                None => Err(ConfigurationError::InvalidSkipScopedStyles(
                    "react requires a scopeStrategy".to_string(),
                )),
            },
            "svelte" => match framework.tooling.as_deref() {
                Some("vite") => Ok(SkipScopedStyles::Svelte(SvelteTooling::Vite)),
                Some(other) => Err(ConfigurationError::InvalidSkipScopedStyles(format!(
                    "unsupported svelte tooling `{}` (supported: vite)",
                    other
                ))),
                None => Err(ConfigurationError::InvalidSkipScopedStyles(
                    "svelte requires a tooling".to_string(),
                )),
            },
            "" => Err(ConfigurationError::InvalidSkipScopedStyles(
                "framework is required".to_string(),
            )),
            other => Err(ConfigurationError::InvalidSkipScopedStyles(format!(
                "unsupported framework `{}` (supported: vue, react, svelte)",
                other
            ))),
        }
    }
}

impl SkipScopedStyles {
    /// Whether a rule read from `source_file` with `selector` was already
    /// scoped by the framework's own tooling.
    pub fn is_pre_scoped(&self, source_file: Option<&str>, selector: &str) -> bool {
        let file_name = source_file.map(|file| {
            Path::new(file)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.to_string())
        });
        let file_name = file_name.as_deref();

        match self {
            SkipScopedStyles::Disabled => false,
            SkipScopedStyles::Vue => file_name.is_some_and(|name| name.contains(VUE_SCOPED_MARKER)),
            SkipScopedStyles::React(ReactScopeStrategy::CssModules) => {
                file_name.is_some_and(|name| name.ends_with(CSS_MODULE_SUFFIX))
            }
            SkipScopedStyles::Svelte(SvelteTooling::Vite) => {
                file_name.is_some_and(|name| name.contains(SVELTE_VITE_MARKER))
                    || selector.contains(SVELTE_CLASS_MARKER)
            }
        }
    }
}
