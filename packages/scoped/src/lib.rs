#![deny(clippy::all)]

/**
 * single-spa scoped styles
 *
 * Rewrites CSS so that every rule only applies inside one single-spa
 * application's container, and renames keyframes so that applications
 * sharing a page cannot clobber each other's animations.
 */

// Style-sheet model
pub mod ast;
pub mod chars;
pub mod css_escape;
pub mod parser;
pub mod printer;
pub mod visitor;

// Scoping
pub mod context;
pub mod engine;
pub mod error;
pub mod keyframes;
pub mod options;
pub mod scope_resolver;
pub mod selector;
pub mod suffix;

pub use ast::{Node, NodeId, NodeKind, NodeType, Stylesheet};
pub use context::{ProcessedNodes, ScopeContext};
pub use engine::{ScopeVisitor, Scoper};
pub use error::{ConfigurationError, ParseError, ParseErrorKind, ScopeError};
pub use options::{FrameworkConfig, ScopeOptions, SkipScopedStyles, SkipScopedStylesConfig};
pub use scope_resolver::ProjectMetadata;
pub use visitor::{walk, Visitor};

/// Scope `css` in one call, resolving the prefix from `options` or the
/// current directory's `package.json`.
pub fn scope_css(css: &str, from: Option<&str>, options: &ScopeOptions) -> error::Result<String> {
    let scoper = Scoper::new(options)?;
    Ok(scoper.process_css(css, from)?)
}
