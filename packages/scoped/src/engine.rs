//! Rewrite Engine
//!
//! Binds a resolved [`ScopeContext`] to the node handlers. One [`Scoper`]
//! can serve any number of sheets; each run gets its own [`ScopeVisitor`]
//! and with it its own processed marker.

use crate::ast::{NodeId, Stylesheet};
use crate::context::{ProcessedNodes, ScopeContext};
use crate::error::{ConfigurationError, ParseError};
use crate::keyframes;
use crate::options::ScopeOptions;
use crate::parser;
use crate::printer;
use crate::scope_resolver::{self, ProjectMetadata};
use crate::selector;
use crate::visitor::{walk, Visitor};

#[derive(Debug, Clone)]
pub struct Scoper {
    context: ScopeContext,
}

impl Scoper {
    /// Build from options, falling back to `package.json` in the current
    /// working directory when `appName` is not set.
    pub fn new(options: &ScopeOptions) -> Result<Self, ConfigurationError> {
        Self::with_metadata(options, scope_resolver::current_dir_metadata)
    }

    pub fn with_metadata<F>(options: &ScopeOptions, fallback: F) -> Result<Self, ConfigurationError>
    where
        F: FnOnce() -> Option<ProjectMetadata>,
    {
        Ok(Scoper {
            context: ScopeContext::from_options(options, fallback)?,
        })
    }

    pub fn context(&self) -> &ScopeContext {
        &self.context
    }

    /// A fresh run over one or more trees.
    pub fn visitor(&self) -> ScopeVisitor<'_> {
        ScopeVisitor::new(&self.context)
    }

    pub fn process(&self, sheet: &mut Stylesheet) {
        let mut visitor = self.visitor();
        walk(sheet, &mut visitor);
        tracing::debug!(
            file = sheet.file().unwrap_or("<input css>"),
            processed = visitor.processed().len(),
            "scoped style sheet"
        );
    }

    /// Parse, scope and print `css`.
    pub fn process_css(&self, css: &str, from: Option<&str>) -> Result<String, ParseError> {
        let mut sheet = parser::parse(css, from)?;
        self.process(&mut sheet);
        Ok(printer::stringify(&sheet))
    }
}

/// The handlers of one run.
#[derive(Debug)]
pub struct ScopeVisitor<'a> {
    context: &'a ScopeContext,
    processed: ProcessedNodes,
}

impl<'a> ScopeVisitor<'a> {
    pub fn new(context: &'a ScopeContext) -> Self {
        ScopeVisitor {
            context,
            processed: ProcessedNodes::new(),
        }
    }

    pub fn processed(&self) -> &ProcessedNodes {
        &self.processed
    }
}

impl Visitor for ScopeVisitor<'_> {
    fn visit_at_rule(&mut self, sheet: &mut Stylesheet, id: NodeId) {
        keyframes::rename_keyframes(self.context, sheet, id, &mut self.processed);
    }

    fn visit_rule(&mut self, sheet: &mut Stylesheet, id: NodeId) {
        selector::rewrite_rule(self.context, sheet, id, &mut self.processed);
    }

    fn visit_declaration(&mut self, sheet: &mut Stylesheet, id: NodeId) {
        keyframes::rename_animation_name(self.context, sheet, id, &mut self.processed);
    }
}
