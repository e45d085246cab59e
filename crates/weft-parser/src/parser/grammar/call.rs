use super::{expression, spaces, string, variable};
use crate::error;
use crate::nesting::Nesting;
use crate::parser::Parser;
use crate::syntax::SyntaxKind;
use crate::Error;

/// ```txt
/// Call
///     '$' Name '(' ( Argument ( ' '+ Argument )* )? ')'
/// ```
///
/// Arguments are split on runs of spaces; an empty argument is dropped
/// rather than attached. When the input ends before the closing paren, the
/// whole span is re-read: the `$name` part becomes a plain token reference
/// (flagged with a warning) and the rest is left for the caller to read as
/// literal text.
pub(crate) fn call(p: &mut Parser) -> bool {
    if !p.allow_functions || p.peek() != Some(b'$') {
        return false;
    }
    let len = p.ident_len(1);
    if len == 0 || p.byte_at(p.pos() + 1 + len) != Some(b'(') {
        return false;
    }
    if !p.enter_nested(Nesting::Call) {
        return false;
    }

    let mark = p.mark();
    let name = p.slice(p.pos() + 1, p.pos() + 1 + len).to_string();
    p.start_node_named(SyntaxKind::Call, name.clone());
    p.advance(1 + len + 1);
    p.start_node(SyntaxKind::Argument);

    loop {
        if p.halted() {
            let end = p.pos();
            p.finish_node_nonempty(end);
            p.finish_node(end);
            p.exit_nested(Nesting::Call);
            return true;
        }
        let before = p.pos();
        if spaces(p) > 0 && p.peek() != Some(b')') {
            p.finish_node_nonempty(before);
            p.start_node(SyntaxKind::Argument);
        }
        match p.peek() {
            None => {
                p.restore(mark);
                p.exit_nested(Nesting::Call);
                if variable(p) {
                    let end = p.pos();
                    p.push_warn(Error::with_range(
                        error::UNTERMINATED_CALL,
                        name,
                        mark.pos() + 1,
                        end,
                    ));
                    return true;
                }
                p.push_err(Error::with_range(
                    error::UNTERMINATED_CALL,
                    name,
                    mark.pos() + 1,
                    p.source_len(),
                ));
                return false;
            }
            Some(b')') => {
                p.finish_node_nonempty(before);
                p.advance(1);
                p.finish_node(p.pos());
                p.exit_nested(Nesting::Call);
                return true;
            }
            _ => {
                if !(string::string_literal(p) || expression(p)) {
                    let (data, dlen) = p.current_char();
                    p.push_err(Error::with_range(
                        error::UNEXPECTED_CHARACTER,
                        data,
                        p.pos() + 1,
                        p.pos() + dlen,
                    ));
                    let end = p.pos();
                    p.finish_node_nonempty(end);
                    p.finish_node(end);
                    p.exit_nested(Nesting::Call);
                    return true;
                }
            }
        }
    }
}
