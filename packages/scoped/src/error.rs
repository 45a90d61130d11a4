//! Error types for style-sheet scoping.

use std::fmt;
use thiserror::Error;

/// Raised while building a scope context, before any node is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Neither `appName` nor a usable project manifest was available
    #[error("Could not generate prefix. Please provide an appName in the options or ensure your project has a package.json with a name property.")]
    MissingScopeName,

    /// `skipScopedStyles: true` names no framework
    #[error("skipScopedStyles must be false or an object naming the framework, e.g. {{ \"framework\": \"vue\" }}")]
    BareSkipScopedStyles,

    /// A framework configuration object that cannot be honored
    #[error("Invalid skipScopedStyles configuration: {0}")]
    InvalidSkipScopedStyles(String),

    /// The options document itself could not be read
    #[error("Invalid scoping options: {0}")]
    InvalidOptions(String),
}

/// What went wrong while scanning a style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnclosedComment,
    UnclosedBlock,
    UnexpectedCloseBrace,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnclosedComment => write!(f, "Unclosed comment"),
            ParseErrorKind::UnclosedBlock => write!(f, "Unclosed block"),
            ParseErrorKind::UnexpectedCloseBrace => write!(f, "Unexpected }}"),
        }
    }
}

/// A syntax error with a 1-based source location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}:{line}:{column}: {kind}", .file.as_deref().unwrap_or("<input css>"))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
    pub file: Option<String>,
}

impl ParseError {
    /// Locate `offset` inside `source` and build the error there.
    pub fn at(kind: ParseErrorKind, source: &str, offset: usize, file: Option<&str>) -> Self {
        let before = &source.as_bytes()[..offset.min(source.len())];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = match before.iter().rposition(|&b| b == b'\n') {
            Some(newline) => offset - newline,
            None => offset + 1,
        };
        ParseError {
            kind,
            line,
            column,
            file: file.map(str::to_string),
        }
    }
}

/// Any failure of [`crate::Scoper::process_css`] style entry points.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, ScopeError>;
