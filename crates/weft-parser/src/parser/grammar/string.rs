use super::{escape, special_text, text};
use crate::parser::Parser;
use crate::syntax::SyntaxKind;

/// ```txt
/// StringLit
///     '(' ( Escape | Text | SpecialText )* ')'
/// ```
///
/// A literal region: every byte up to the closing paren is kept verbatim,
/// apart from escape sequences. On end of input without a closing paren the
/// region is re-read as a literal `(` and reading resumes right after it.
pub(crate) fn string_literal(p: &mut Parser) -> bool {
    if p.peek() != Some(b'(') {
        return false;
    }
    let mark = p.mark();
    p.start_node(SyntaxKind::StringLit);
    p.advance(1);
    loop {
        match p.peek() {
            None => {
                p.restore(mark);
                let start = mark.pos() + 1;
                p.leaf_value(SyntaxKind::Text, start, start, "(".to_string());
                p.set_pos(mark.pos() + 1);
                return true;
            }
            Some(b')') => {
                p.advance(1);
                p.finish_node(p.pos());
                return true;
            }
            _ => {
                if !(escape(p) || text(p) || special_text(p)) {
                    // Every byte is either a stop handled above or part of a
                    // text run; nothing else to do but move on.
                    p.advance(1);
                }
            }
        }
    }
}
