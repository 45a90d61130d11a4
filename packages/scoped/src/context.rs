//! Scope context
//!
//! Everything a rewrite run needs to know, resolved once before the first
//! node is visited and never changed afterwards.

use std::collections::HashSet;

use crate::ast::NodeId;
use crate::error::ConfigurationError;
use crate::options::{ScopeOptions, SkipScopedStyles};
use crate::scope_resolver::{self, ProjectMetadata};
use crate::selector::PseudoElementTable;
use crate::suffix::generate_keyframe_suffix;

#[derive(Debug, Clone)]
pub struct ScopeContext {
    prefix: String,
    keyframe_suffix: String,
    additional_selectors: Vec<String>,
    exclude_parcels: bool,
    skip_scoped_styles: SkipScopedStyles,
    pseudo_elements: PseudoElementTable,
}

impl ScopeContext {
    /// Validate `options` and resolve the prefix, asking `fallback` for
    /// project metadata when no `appName` is given.
    pub fn from_options<F>(options: &ScopeOptions, fallback: F) -> Result<Self, ConfigurationError>
    where
        F: FnOnce() -> Option<ProjectMetadata>,
    {
        let skip_scoped_styles = SkipScopedStyles::try_from(&options.skip_scoped_styles)?;
        let prefix = scope_resolver::resolve(options.app_name.as_deref(), fallback)?;
        let keyframe_suffix = options
            .keyframe_suffix
            .clone()
            .unwrap_or_else(|| generate_keyframe_suffix(&prefix));

        let mut pseudo_elements = PseudoElementTable::standard();
        pseudo_elements.extend(&options.additional_pseudo_elements);

        let context = ScopeContext {
            prefix,
            keyframe_suffix,
            additional_selectors: options.sanitized_additional_selectors(),
            exclude_parcels: options.exclude_parcels,
            skip_scoped_styles,
            pseudo_elements,
        };
        tracing::debug!(
            prefix = %context.prefix,
            keyframe_suffix = %context.keyframe_suffix,
            additional_selectors = ?context.additional_selectors,
            exclude_parcels = context.exclude_parcels,
            skip_scoped_styles = ?context.skip_scoped_styles,
            "resolved scope context"
        );
        Ok(context)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn keyframe_suffix(&self) -> &str {
        &self.keyframe_suffix
    }

    pub fn additional_selectors(&self) -> &[String] {
        &self.additional_selectors
    }

    pub fn exclude_parcels(&self) -> bool {
        self.exclude_parcels
    }

    pub fn skip_scoped_styles(&self) -> SkipScopedStyles {
        self.skip_scoped_styles
    }

    pub fn pseudo_elements(&self) -> &PseudoElementTable {
        &self.pseudo_elements
    }
}

/// The processed marker of one run: a side table of node ids, never stored
/// on the nodes themselves.
#[derive(Debug, Default)]
pub struct ProcessedNodes {
    ids: HashSet<NodeId>,
}

impl ProcessedNodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn mark(&mut self, id: NodeId) {
        self.ids.insert(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
