//! Style-sheet parser
//!
//! Reads CSS text into a [`Stylesheet`]. The scanner is deliberately
//! forgiving: it only needs to find where comments, statements and blocks
//! start and end, and it keeps every bit of whitespace in [`Raws`] so that
//! [`crate::printer::stringify`] can reproduce untouched input exactly.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::ast::{AtRule, Comment, Declaration, Node, NodeId, NodeKind, Raws, Rule, Stylesheet};
use crate::chars;
use crate::error::{ParseError, ParseErrorKind};

static IMPORTANT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*!\s*important$").unwrap());

/// How a statement scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    OpenBrace,
    Semicolon,
    CloseBrace,
    Eof,
}

/// Parse `css`. `from` is recorded as the source file of every node.
pub fn parse(css: &str, from: Option<&str>) -> Result<Stylesheet, ParseError> {
    let sheet = match from {
        Some(file) => Stylesheet::with_source(file),
        None => Stylesheet::new(),
    };
    let mut parser = Parser {
        src: css,
        bytes: css.as_bytes(),
        pos: 0,
        sheet,
        from: from.map(Arc::from),
        open: Vec::new(),
    };
    parser.parse()?;
    Ok(parser.sheet)
}

struct Parser<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    sheet: Stylesheet,
    from: Option<Arc<str>>,
    /// Containers whose `}` has not been seen yet, with the offset of their `{`
    open: Vec<(NodeId, usize)>,
}

impl<'s> Parser<'s> {
    fn parse(&mut self) -> Result<(), ParseError> {
        let mut pending = String::new();

        loop {
            let ws_start = self.pos;
            self.skip_whitespace();
            pending.push_str(&self.src[ws_start..self.pos]);

            let Some(&code) = self.bytes.get(self.pos) else {
                if let Some(&(_, brace)) = self.open.last() {
                    return Err(self.error(ParseErrorKind::UnclosedBlock, brace));
                }
                self.sheet.after = pending;
                return Ok(());
            };

            match code {
                chars::SLASH if self.bytes.get(self.pos + 1) == Some(&chars::STAR) => {
                    let before = std::mem::take(&mut pending);
                    self.comment(before)?;
                }
                chars::RBRACE => {
                    let Some((container, _)) = self.open.pop() else {
                        return Err(self.error(ParseErrorKind::UnexpectedCloseBrace, self.pos));
                    };
                    self.sheet.get_mut(container).raws.after = std::mem::take(&mut pending);
                    self.pos += 1;
                }
                chars::AT => {
                    let before = std::mem::take(&mut pending);
                    self.at_rule(before);
                }
                _ => {
                    let src = self.src;
                    let start = self.pos;
                    let (end, terminator) = self.scan_statement(start);
                    let text = &src[start..end];
                    if terminator == Terminator::Semicolon && text.trim().is_empty() {
                        // A stray `;` carries no meaning; keep it as text.
                        pending.push_str(text);
                        pending.push(';');
                        self.pos = end + 1;
                        continue;
                    }
                    let before = std::mem::take(&mut pending);
                    self.statement(before, text, terminator);
                    self.pos = match terminator {
                        Terminator::OpenBrace | Terminator::Semicolon => end + 1,
                        Terminator::CloseBrace | Terminator::Eof => end,
                    };
                }
            }
        }
    }

    fn comment(&mut self, before: String) -> Result<(), ParseError> {
        let src = self.src;
        let start = self.pos;
        let inner_start = start + 2;
        let Some(length) = src[inner_start..].find("*/") else {
            return Err(self.error(ParseErrorKind::UnclosedComment, start));
        };
        let inner = &src[inner_start..inner_start + length];
        let text = inner.trim();
        let (left, right) = surrounding_whitespace(inner, text);
        let raws = Raws {
            before,
            left: left.to_string(),
            right: right.to_string(),
            ..Raws::default()
        };
        self.add(
            NodeKind::Comment(Comment {
                text: text.to_string(),
            }),
            raws,
        );
        self.pos = inner_start + length + 2;
        Ok(())
    }

    fn at_rule(&mut self, before: String) {
        let src = self.src;
        let name_start = self.pos + 1;
        let mut name_end = name_start;
        while name_end < self.bytes.len() && chars::is_name_char(self.bytes[name_end]) {
            name_end += 1;
        }
        let name = src[name_start..name_end].to_string();

        let (end, terminator) = self.scan_statement(name_end);
        let raw_params = &src[name_end..end];
        let params = raw_params.trim();
        let (after_name, between) = surrounding_whitespace(raw_params, params);

        let block = terminator == Terminator::OpenBrace;
        let raws = Raws {
            before,
            after_name: after_name.to_string(),
            between: between.to_string(),
            semicolon: terminator == Terminator::Semicolon,
            ..Raws::default()
        };
        let id = self.add(
            NodeKind::AtRule(AtRule {
                name,
                params: params.to_string(),
                nodes: block.then(Vec::new),
            }),
            raws,
        );
        if block {
            self.open.push((id, end));
        }
        self.pos = match terminator {
            Terminator::OpenBrace | Terminator::Semicolon => end + 1,
            Terminator::CloseBrace | Terminator::Eof => end,
        };
    }

    /// A rule (when followed by `{`) or a declaration.
    fn statement(&mut self, before: String, text: &str, terminator: Terminator) {
        if terminator == Terminator::OpenBrace {
            let selector = text.trim_end();
            let raws = Raws {
                before,
                between: text[selector.len()..].to_string(),
                ..Raws::default()
            };
            let id = self.add(
                NodeKind::Rule(Rule {
                    selector: selector.to_string(),
                    nodes: Vec::new(),
                }),
                raws,
            );
            let brace = self.pos + text.len();
            self.open.push((id, brace));
            return;
        }

        let semicolon = terminator == Terminator::Semicolon;
        let (prop, between, rest) = match find_top_level(text, chars::COLON) {
            Some(colon) => {
                let prop = text[..colon].trim_end();
                let value_part = &text[colon + 1..];
                let value_start = value_part.len() - value_part.trim_start().len();
                let between = format!(
                    "{}:{}",
                    &text[prop.len()..colon],
                    &value_part[..value_start]
                );
                (prop, between, &value_part[value_start..])
            }
            None => (text.trim_end(), String::new(), ""),
        };

        let value_trimmed = rest.trim_end();
        let mut after = rest[value_trimmed.len()..].to_string();
        if prop.len() == text.trim_end().len() {
            // No colon: the whitespace after the bare word still needs a home.
            after = text[prop.len()..].to_string();
        }
        let (value, important) = match IMPORTANT_RE.find(value_trimmed) {
            Some(found) => (
                &value_trimmed[..found.start()],
                Some(found.as_str().to_string()),
            ),
            None => (value_trimmed, None),
        };

        let raws = Raws {
            before,
            between,
            after,
            important: important.clone(),
            semicolon,
            ..Raws::default()
        };
        self.add(
            NodeKind::Declaration(Declaration {
                prop: prop.to_string(),
                value: value.to_string(),
                important: important.is_some(),
            }),
            raws,
        );
    }

    fn add(&mut self, kind: NodeKind, raws: Raws) -> NodeId {
        let parent = self.open.last().map(|&(id, _)| id);
        let node = Node {
            kind,
            parent: None,
            source: self.from.clone(),
            raws,
        };
        self.sheet.push(parent, node)
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && chars::is_whitespace(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }

    /// Find the end of the statement starting at `start`: the first `{`,
    /// `;` or `}` outside strings, comments, parentheses and brackets.
    fn scan_statement(&self, start: usize) -> (usize, Terminator) {
        let bytes = self.bytes;
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;
        let mut i = start;

        while i < bytes.len() {
            let code = bytes[i];
            if code == chars::BACKSLASH {
                i += 2;
                continue;
            }
            if let Some(q) = quote {
                if code == q || code == chars::LF {
                    quote = None;
                }
                i += 1;
                continue;
            }
            match code {
                chars::DQ | chars::SQ => quote = Some(code),
                chars::SLASH if bytes.get(i + 1) == Some(&chars::STAR) => {
                    match self.src[i + 2..].find("*/") {
                        Some(length) => i += length + 3,
                        None => return (bytes.len(), Terminator::Eof),
                    }
                }
                chars::LPAREN | chars::LBRACKET => depth += 1,
                chars::RPAREN | chars::RBRACKET => depth = depth.saturating_sub(1),
                chars::LBRACE if depth == 0 => return (i, Terminator::OpenBrace),
                chars::SEMICOLON if depth == 0 => return (i, Terminator::Semicolon),
                chars::RBRACE if depth == 0 => return (i, Terminator::CloseBrace),
                _ => {}
            }
            i += 1;
        }

        (bytes.len(), Terminator::Eof)
    }

    fn error(&self, kind: ParseErrorKind, offset: usize) -> ParseError {
        ParseError::at(kind, self.src, offset, self.from.as_deref())
    }
}

/// The whitespace `outer` has around its trimmed core `inner`.
fn surrounding_whitespace<'a>(outer: &'a str, inner: &str) -> (&'a str, &'a str) {
    let leading = outer.len() - outer.trim_start().len();
    (&outer[..leading], &outer[leading + inner.len()..])
}

/// Byte offset of the first `target` outside strings and parentheses.
fn find_top_level(text: &str, target: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let code = bytes[i];
        if code == chars::BACKSLASH {
            i += 2;
            continue;
        }
        if let Some(q) = quote {
            if code == q {
                quote = None;
            }
        } else if code == chars::DQ || code == chars::SQ {
            quote = Some(code);
        } else if code == chars::LPAREN || code == chars::LBRACKET {
            depth += 1;
        } else if code == chars::RPAREN || code == chars::RBRACKET {
            depth = depth.saturating_sub(1);
        } else if code == target && depth == 0 {
            return Some(i);
        }
        i += 1;
    }
    None
}
