//! Evaluation-ready expression trees built from parse trees.
//!
//! The parse tree keeps every surface detail (escapes, literal regions,
//! argument and key/value node boundaries). Building flattens all of that:
//! escapes and literal regions become plain text, adjacent text runs merge,
//! and at-expression children are paired up into entries.

use crate::entities;
use weft_parser::{SyntaxKind, SyntaxNode, SyntaxTree};

/// One node of the evaluation-ready tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal text. Adjacent runs are merged during building, so two `Text`
    /// nodes are never siblings.
    Text(String),
    /// A token reference, resolved against the token map at evaluation time.
    Token(String),
    /// A function call. Each argument is a sequence of nodes that evaluates
    /// to a single value.
    Call { name: String, args: Vec<Vec<Expr>> },
    /// An at-expression, evaluating to a collection.
    At { entries: Vec<AtEntry> },
}

/// One entry of an at-expression. A bare entry (no `:` in the source)
/// carries no key; its value determines both key and value at evaluation
/// time.
#[derive(Debug, Clone, PartialEq)]
pub struct AtEntry {
    pub key: Option<Vec<Expr>>,
    pub value: Vec<Expr>,
}

/// Build the evaluation-ready tree for a parse tree. A tree carrying errors
/// builds to nothing, which in turn evaluates to empty output.
pub fn build(tree: &SyntaxTree) -> Vec<Expr> {
    if tree.has_errors() {
        return Vec::new();
    }
    build_list(tree.root().children())
}

fn build_list<'a>(children: impl Iterator<Item = SyntaxNode<'a>>) -> Vec<Expr> {
    let mut out = Vec::new();
    for child in children {
        match child.kind() {
            SyntaxKind::Text | SyntaxKind::Escape => {
                push_text(&mut out, child.value().unwrap_or_default());
            }
            SyntaxKind::StringLit => {
                let text: String = child.children().filter_map(|c| c.value()).collect();
                push_text(&mut out, &text);
            }
            SyntaxKind::Token => {
                out.push(Expr::Token(child.value().unwrap_or_default().to_string()));
            }
            SyntaxKind::Call => {
                let name = child.value().unwrap_or_default().to_string();
                let args = child
                    .children()
                    .filter(|c| c.kind() == SyntaxKind::Argument)
                    .map(|argument| build_list(argument.children()))
                    .collect();
                out.push(Expr::Call { name, args });
            }
            SyntaxKind::AtExpr => out.push(build_at(child)),
            SyntaxKind::Root
            | SyntaxKind::Argument
            | SyntaxKind::AtKey
            | SyntaxKind::AtValue => {}
        }
    }
    out
}

fn push_text(out: &mut Vec<Expr>, text: &str) {
    if let Some(Expr::Text(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Expr::Text(text.to_string()));
    }
}

fn build_at(node: SyntaxNode<'_>) -> Expr {
    let mut entries = Vec::new();
    let mut pending: Option<(Vec<Expr>, Option<Vec<Expr>>)> = None;
    for child in node.children() {
        match child.kind() {
            SyntaxKind::AtKey => {
                if let Some(p) = pending.take() {
                    entries.push(entry(p));
                }
                pending = Some((build_list(child.children()), None));
            }
            SyntaxKind::AtValue => {
                let value = build_list(child.children());
                match pending.as_mut() {
                    Some(p) if p.1.is_none() => p.1 = Some(value),
                    _ => {
                        if let Some(p) = pending.take() {
                            entries.push(entry(p));
                        }
                        pending = Some((Vec::new(), Some(value)));
                    }
                }
            }
            _ => {}
        }
    }
    if let Some(p) = pending.take() {
        entries.push(entry(p));
    }
    Expr::At { entries }
}

fn entry((key, value): (Vec<Expr>, Option<Vec<Expr>>)) -> AtEntry {
    match value {
        Some(value) => AtEntry {
            key: Some(key),
            value,
        },
        // A bare entry promotes its key expressions to the value side.
        None => AtEntry { key: None, value: key },
    }
}

/// Decode character references in every literal text node, in place.
pub(crate) fn decode_entities(exprs: &mut [Expr]) {
    for expr in exprs {
        match expr {
            Expr::Text(text) => *text = entities::decode(text),
            Expr::Token(_) => {}
            Expr::Call { args, .. } => {
                for arg in args {
                    decode_entities(arg);
                }
            }
            Expr::At { entries } => {
                for entry in entries {
                    if let Some(key) = &mut entry.key {
                        decode_entities(key);
                    }
                    decode_entities(&mut entry.value);
                }
            }
        }
    }
}
