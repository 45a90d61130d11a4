//! Style-sheet printer

use crate::ast::{NodeId, NodeKind, Stylesheet};

/// Serialize `sheet` back to CSS text.
pub fn stringify(sheet: &Stylesheet) -> String {
    let mut out = String::new();
    for &id in sheet.nodes() {
        print_node(sheet, id, &mut out);
    }
    out.push_str(&sheet.after);
    out
}

fn print_node(sheet: &Stylesheet, id: NodeId, out: &mut String) {
    let node = sheet.get(id);
    let raws = &node.raws;
    out.push_str(&raws.before);

    match &node.kind {
        NodeKind::Comment(comment) => {
            out.push_str("/*");
            out.push_str(&raws.left);
            out.push_str(&comment.text);
            out.push_str(&raws.right);
            out.push_str("*/");
        }
        NodeKind::Declaration(decl) => {
            out.push_str(&decl.prop);
            out.push_str(&raws.between);
            out.push_str(&decl.value);
            match (&raws.important, decl.important) {
                (Some(important), true) => out.push_str(important),
                (None, true) => out.push_str(" !important"),
                _ => {}
            }
            out.push_str(&raws.after);
            if raws.semicolon {
                out.push(';');
            }
        }
        NodeKind::Rule(rule) => {
            out.push_str(&rule.selector);
            out.push_str(&raws.between);
            print_block(sheet, &rule.nodes, &raws.after, out);
        }
        NodeKind::AtRule(at_rule) => {
            out.push('@');
            out.push_str(&at_rule.name);
            out.push_str(&raws.after_name);
            out.push_str(&at_rule.params);
            out.push_str(&raws.between);
            match &at_rule.nodes {
                Some(nodes) => print_block(sheet, nodes, &raws.after, out),
                None if raws.semicolon => out.push(';'),
                None => {}
            }
        }
    }
}

fn print_block(sheet: &Stylesheet, nodes: &[NodeId], after: &str, out: &mut String) {
    out.push('{');
    for &child in nodes {
        print_node(sheet, child, out);
    }
    out.push_str(after);
    out.push('}');
}
