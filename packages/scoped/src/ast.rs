//! Style-sheet tree
//!
//! A style sheet is an arena of nodes. Containers (the root, rules and
//! block at-rules) hold ordered lists of child ids; every node knows its
//! parent, so handlers can look at siblings and ancestors without owning
//! them.

use smallvec::SmallVec;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::chars;

static NEXT_SHEET_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a node, unique across all style sheets alive in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    sheet: u32,
    index: u32,
}

/// The whitespace and punctuation around a node, kept so that an untouched
/// tree prints back exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raws {
    /// Text printed before the node (whitespace, stray `;`)
    pub before: String,
    /// Rule: before `{`. At-rule: after params. Declaration: the colon and
    /// the whitespace around it.
    pub between: String,
    /// At-rule: whitespace between the name and the params
    pub after_name: String,
    /// Containers: before the closing `}`. Declarations: after the value.
    pub after: String,
    /// Declaration: the raw `!important` text, including leading whitespace
    pub important: Option<String>,
    /// Declaration or block-less at-rule terminated by `;`
    pub semicolon: bool,
    /// Comment: whitespace inside `/*` and `*/`
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    /// `None` for statement at-rules such as `@import url(a.css);`
    pub nodes: Option<Vec<NodeId>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<NodeId>,
}

impl Rule {
    /// The selector list split on top-level commas.
    pub fn selectors(&self) -> SmallVec<[String; 4]> {
        split_selector_list(&self.selector)
    }

    /// Replace the selector with `selectors`, joined by `, `.
    pub fn set_selectors<S: AsRef<str>>(&mut self, selectors: &[S]) {
        self.selector = selectors
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub important: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    AtRule(AtRule),
    Rule(Rule),
    Declaration(Declaration),
    Comment(Comment),
}

/// Kind of a node without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    AtRule,
    Rule,
    Declaration,
    Comment,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub source: Option<Arc<str>>,
    pub raws: Raws,
}

impl Node {
    fn with_kind(kind: NodeKind, raws: Raws) -> Self {
        Node {
            kind,
            parent: None,
            source: None,
            raws,
        }
    }

    pub fn rule(selector: impl Into<String>) -> Self {
        let raws = Raws {
            between: " ".to_string(),
            ..Raws::default()
        };
        Node::with_kind(
            NodeKind::Rule(Rule {
                selector: selector.into(),
                nodes: Vec::new(),
            }),
            raws,
        )
    }

    pub fn at_rule(name: impl Into<String>, params: impl Into<String>, block: bool) -> Self {
        let params = params.into();
        let raws = Raws {
            after_name: if params.is_empty() { String::new() } else { " ".to_string() },
            between: if block { " ".to_string() } else { String::new() },
            semicolon: !block,
            ..Raws::default()
        };
        Node::with_kind(
            NodeKind::AtRule(AtRule {
                name: name.into(),
                params,
                nodes: block.then(Vec::new),
            }),
            raws,
        )
    }

    pub fn declaration(prop: impl Into<String>, value: impl Into<String>) -> Self {
        let raws = Raws {
            between: ": ".to_string(),
            semicolon: true,
            ..Raws::default()
        };
        Node::with_kind(
            NodeKind::Declaration(Declaration {
                prop: prop.into(),
                value: value.into(),
                important: false,
            }),
            raws,
        )
    }

    pub fn comment(text: impl Into<String>) -> Self {
        let raws = Raws {
            left: " ".to_string(),
            right: " ".to_string(),
            ..Raws::default()
        };
        Node::with_kind(NodeKind::Comment(Comment { text: text.into() }), raws)
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.raws.before = before.into();
        self
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::AtRule(_) => NodeType::AtRule,
            NodeKind::Rule(_) => NodeType::Rule,
            NodeKind::Declaration(_) => NodeType::Declaration,
            NodeKind::Comment(_) => NodeType::Comment,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match &self.kind {
            NodeKind::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match &self.kind {
            NodeKind::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match &self.kind {
            NodeKind::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match &self.kind {
            NodeKind::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    fn child_ids(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Rule(rule) => &rule.nodes,
            NodeKind::AtRule(AtRule {
                nodes: Some(nodes), ..
            }) => nodes,
            _ => &[],
        }
    }

    fn child_ids_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Rule(rule) => Some(&mut rule.nodes),
            NodeKind::AtRule(at_rule) => at_rule.nodes.as_mut(),
            _ => None,
        }
    }
}

/// A parsed (or hand-built) style sheet.
#[derive(Debug)]
pub struct Stylesheet {
    id: u32,
    arena: Vec<Node>,
    nodes: Vec<NodeId>,
    source: Option<Arc<str>>,
    /// Whitespace after the last top-level node
    pub after: String,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Stylesheet {
    pub fn new() -> Self {
        Stylesheet {
            id: NEXT_SHEET_ID.fetch_add(1, Ordering::Relaxed),
            arena: Vec::new(),
            nodes: Vec::new(),
            source: None,
            after: String::new(),
        }
    }

    /// A sheet whose nodes all report `file` as their origin.
    pub fn with_source(file: impl AsRef<str>) -> Self {
        let mut sheet = Stylesheet::new();
        sheet.source = Some(Arc::from(file.as_ref()));
        sheet
    }

    /// The file this sheet was read from, if any.
    pub fn file(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Append `node` as the last child of `parent`, or of the root when
    /// `parent` is `None`.
    ///
    /// Panics if `parent` belongs to another sheet or cannot hold children.
    pub fn push(&mut self, parent: Option<NodeId>, mut node: Node) -> NodeId {
        let id = NodeId {
            sheet: self.id,
            index: self.arena.len() as u32,
        };
        node.parent = parent;
        if node.source.is_none() {
            node.source = self.source.clone();
        }
        match parent {
            Some(parent_id) => {
                let parent_node = self.get_mut(parent_id);
                match parent_node.child_ids_mut() {
                    Some(children) => children.push(id),
                    None => panic!("node {:?} cannot contain children", parent_id),
                }
            }
            None => self.nodes.push(id),
        }
        self.arena.push(node);
        id
    }

    /// Top-level node ids in document order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.sheet == self.id && (id.index as usize) < self.arena.len()
    }

    pub fn get(&self, id: NodeId) -> &Node {
        assert!(self.contains(id), "node {:?} does not belong to this sheet", id);
        &self.arena[id.index as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        assert!(self.contains(id), "node {:?} does not belong to this sheet", id);
        &mut self.arena[id.index as usize]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).child_ids()
    }

    fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => &self.nodes,
        }
    }

    /// The sibling immediately before `id`, if any.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(id);
        let position = siblings.iter().position(|&sibling| sibling == id)?;
        position.checked_sub(1).map(|before| siblings[before])
    }

    /// Path of the file the node was read from.
    pub fn source_file(&self, id: NodeId) -> Option<&str> {
        self.get(id).source.as_deref()
    }

    /// Every node, parents before their children, in document order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.arena.len());
        let mut stack: Vec<NodeId> = self.nodes.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Whether any ancestor of `id` satisfies `predicate`.
    pub fn has_ancestor(&self, id: NodeId, predicate: impl Fn(&Node) -> bool) -> bool {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            let node = self.get(ancestor);
            if predicate(node) {
                return true;
            }
            current = node.parent;
        }
        false
    }
}

/// Split a selector list on top-level commas. Commas inside parentheses,
/// attribute brackets, strings or after a backslash do not separate
/// selectors. Entries are trimmed and empty entries dropped.
pub fn split_selector_list(text: &str) -> SmallVec<[String; 4]> {
    let bytes = text.as_bytes();
    let mut result = SmallVec::new();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut prev = 0;
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
        } else {
            match code {
                chars::DQ | chars::SQ => quote = Some(code),
                chars::LPAREN | chars::LBRACKET => depth += 1,
                chars::RPAREN | chars::RBRACKET => depth = depth.saturating_sub(1),
                chars::COMMA if depth == 0 => {
                    push_trimmed(&mut result, &text[prev..i]);
                    prev = i + 1;
                }
                _ => {}
            }
        }
        i += 1;
    }

    push_trimmed(&mut result, &text[prev.min(text.len())..]);
    result
}

fn push_trimmed(result: &mut SmallVec<[String; 4]>, part: &str) {
    let trimmed = part.trim();
    if !trimmed.is_empty() {
        result.push(trimmed.to_string());
    }
}
