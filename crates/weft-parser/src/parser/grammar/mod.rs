pub(crate) mod at;
pub(crate) mod call;
pub(crate) mod string;

use crate::parser::Parser;
use crate::syntax::SyntaxKind;

/// A byte that may follow `$` in an escape sequence. The same set is
/// surfaced by [`special_text`] when no richer construct matched.
pub(crate) fn is_special(b: u8) -> bool {
    matches!(b, b'$' | b'@' | b'(' | b')' | b':' | b';')
}

pub(crate) fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// ```txt
/// Expression
///     Escape | Call | Token | AtExpression | Text | SpecialText
/// ```
///
/// The first reader to match wins.
pub(crate) fn expression(p: &mut Parser) -> bool {
    escape(p)
        || call::call(p)
        || variable(p)
        || at::at_expression(p)
        || text(p)
        || special_text(p)
}

/// ```txt
/// Escape
///     '$' ( '$' | '@' | '(' | ')' | ':' | ';' )
/// ```
pub(crate) fn escape(p: &mut Parser) -> bool {
    if p.peek() != Some(b'$') {
        return false;
    }
    let Some(c) = p.peek_at(1).filter(|&b| is_special(b)) else {
        return false;
    };
    let start = p.pos() + 1;
    p.advance(2);
    p.leaf_value(SyntaxKind::Escape, start, p.pos(), (c as char).to_string());
    true
}

/// ```txt
/// Token
///     '$' [A-Za-z0-9_]+
/// ```
pub(crate) fn variable(p: &mut Parser) -> bool {
    if !p.allow_tokens || p.peek() != Some(b'$') {
        return false;
    }
    let len = p.ident_len(1);
    if len == 0 {
        return false;
    }
    let start = p.pos() + 1;
    let name = p.slice(p.pos() + 1, p.pos() + 1 + len).to_string();
    p.advance(1 + len);
    p.leaf_value(SyntaxKind::Token, start, p.pos(), name);
    true
}

/// A maximal run of bytes outside the stop set of the current context.
/// Which bytes stop a run depends on the node being read into: argument
/// splitting makes the space byte significant inside calls, and the
/// at-expression delimiters are significant inside keys and values.
pub(crate) fn text(p: &mut Parser) -> bool {
    let stops: &[u8] = match p.context() {
        SyntaxKind::Argument => &[b' ', b'$', b'(', b')'],
        SyntaxKind::AtKey | SyntaxKind::AtValue => &[b'$', b'@', b':', b';', b'(', b')'],
        SyntaxKind::StringLit => &[b'$', b')'],
        _ => &[b'$', b'@'],
    };
    let start = p.pos();
    let mut end = start;
    while let Some(b) = p.byte_at(end) {
        if stops.contains(&b) {
            break;
        }
        end += 1;
    }
    if end == start {
        return false;
    }
    let value = p.slice(start, end).to_string();
    p.set_pos(end);
    p.leaf_value(SyntaxKind::Text, start + 1, end, value);
    true
}

/// A single special character accepted as literal text when no richer
/// construct matched at this position.
pub(crate) fn special_text(p: &mut Parser) -> bool {
    let Some(b) = p.peek().filter(|&b| is_special(b)) else {
        return false;
    };
    let start = p.pos() + 1;
    p.advance(1);
    p.leaf_value(SyntaxKind::Text, start, p.pos(), (b as char).to_string());
    true
}

/// Consume a run of space bytes. Returns the number of bytes consumed.
pub(crate) fn spaces(p: &mut Parser) -> usize {
    let mut n = 0;
    while p.peek() == Some(b' ') {
        p.advance(1);
        n += 1;
    }
    n
}
