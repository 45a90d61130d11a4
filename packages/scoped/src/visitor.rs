//! Visitor
//!
//! Dispatches every node of a style sheet to a handler chosen by node kind.

use crate::ast::{NodeId, NodeType, Stylesheet};

/// Handlers for each node kind. A handler may mutate the node it is given
/// and nothing else.
pub trait Visitor {
    fn visit_at_rule(&mut self, _sheet: &mut Stylesheet, _id: NodeId) {}
    fn visit_rule(&mut self, _sheet: &mut Stylesheet, _id: NodeId) {}
    fn visit_declaration(&mut self, _sheet: &mut Stylesheet, _id: NodeId) {}
    fn visit_comment(&mut self, _sheet: &mut Stylesheet, _id: NodeId) {}
}

/// Visit every node once, parents before children, in document order.
pub fn walk<V: Visitor + ?Sized>(sheet: &mut Stylesheet, visitor: &mut V) {
    for id in sheet.descendants() {
        match sheet.get(id).node_type() {
            NodeType::AtRule => visitor.visit_at_rule(sheet, id),
            NodeType::Rule => visitor.visit_rule(sheet, id),
            NodeType::Declaration => visitor.visit_declaration(sheet, id),
            NodeType::Comment => visitor.visit_comment(sheet, id),
        }
    }
}
