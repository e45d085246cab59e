use super::{expression, spaces, string};
use crate::error;
use crate::nesting::Nesting;
use crate::parser::Parser;
use crate::syntax::SyntaxKind;
use crate::Error;

/// ```txt
/// AtExpression
///     '@' '(' ( Entry ( ';' Entry )* )? ')'
/// Entry
///     Key? ( ':'+ Value? )?
/// ```
///
/// Children of the expression alternate `AtKey` and `AtValue` nodes. A `:`
/// with no key before it (or one that follows another value) inserts an
/// empty key, so every value is preceded by a key node. Leading spaces of a
/// key or value are skipped once; later spaces are content.
///
/// On end of input without a closing paren the `@` is re-read as literal
/// text, with a warning, and reading resumes right after it.
pub(crate) fn at_expression(p: &mut Parser) -> bool {
    if !p.allow_at_expressions || p.peek() != Some(b'@') || p.peek_at(1) != Some(b'(') {
        return false;
    }
    if !p.enter_nested(Nesting::At) {
        return false;
    }

    let mark = p.mark();
    p.start_node(SyntaxKind::AtExpr);
    p.advance(2);
    let mut key_open = false;
    let mut value_open = false;

    loop {
        if p.halted() {
            close_open(p, &mut key_open, &mut value_open);
            p.finish_node(p.pos());
            p.exit_nested(Nesting::At);
            return true;
        }
        match p.peek() {
            None => {
                p.restore(mark);
                p.exit_nested(Nesting::At);
                let start = mark.pos() + 1;
                p.leaf_value(SyntaxKind::Text, start, start, "@".to_string());
                p.set_pos(mark.pos() + 1);
                p.push_warn(Error::with_range(
                    error::UNTERMINATED_AT,
                    "@".to_string(),
                    start,
                    start,
                ));
                return true;
            }
            Some(b';') => {
                close_open(p, &mut key_open, &mut value_open);
                p.advance(1);
            }
            Some(b':') => {
                if value_open {
                    p.finish_node(p.pos());
                    value_open = false;
                    p.empty_leaf(SyntaxKind::AtKey);
                } else if key_open {
                    p.finish_node(p.pos());
                    key_open = false;
                } else {
                    p.empty_leaf(SyntaxKind::AtKey);
                }
                while p.peek() == Some(b':') {
                    p.advance(1);
                }
                p.start_node(SyntaxKind::AtValue);
                value_open = true;
                spaces(p);
            }
            Some(b')') => {
                close_open(p, &mut key_open, &mut value_open);
                p.advance(1);
                p.finish_node(p.pos());
                p.exit_nested(Nesting::At);
                return true;
            }
            _ => {
                if !key_open && !value_open {
                    p.start_node(SyntaxKind::AtKey);
                    key_open = true;
                    spaces(p);
                    continue;
                }
                if !(string::string_literal(p) || expression(p)) {
                    let (data, dlen) = p.current_char();
                    p.push_err(Error::with_range(
                        error::UNEXPECTED_CHARACTER,
                        data,
                        p.pos() + 1,
                        p.pos() + dlen,
                    ));
                    close_open(p, &mut key_open, &mut value_open);
                    p.finish_node(p.pos());
                    p.exit_nested(Nesting::At);
                    return true;
                }
            }
        }
    }
}

fn close_open(p: &mut Parser, key_open: &mut bool, value_open: &mut bool) {
    if *value_open {
        p.finish_node(p.pos());
        *value_open = false;
    }
    if *key_open {
        p.finish_node(p.pos());
        *key_open = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::Parser;
    use expect_test::expect;

    #[test]
    fn it_alternates_keys_and_values() {
        let tree = Parser::new("@(a:1;b:2)").parse();
        assert!(tree.errors().is_empty());
        let expected = expect![[r#"
            ROOT@1..10
              AT_EXPRESSION@1..10
                AT_KEY@3..3
                  TEXT@3..3 "a"
                AT_VALUE@5..5
                  TEXT@5..5 "1"
                AT_KEY@7..7
                  TEXT@7..7 "b"
                AT_VALUE@9..9
                  TEXT@9..9 "2"
        "#]];
        expected.assert_eq(&format!("{tree:?}"));
    }

    #[test]
    fn it_inserts_an_empty_key_between_two_values() {
        let tree = Parser::new("@(a:b:c)").parse();
        assert!(tree.errors().is_empty());
        let expected = expect![[r#"
            ROOT@1..8
              AT_EXPRESSION@1..8
                AT_KEY@3..3
                  TEXT@3..3 "a"
                AT_VALUE@5..5
                  TEXT@5..5 "b"
                AT_KEY@6..5
                AT_VALUE@7..7
                  TEXT@7..7 "c"
        "#]];
        expected.assert_eq(&format!("{tree:?}"));
    }

    #[test]
    fn it_collapses_colon_runs() {
        let tree = Parser::new("@(a::b)").parse();
        assert!(tree.errors().is_empty());
        let expected = expect![[r#"
            ROOT@1..7
              AT_EXPRESSION@1..7
                AT_KEY@3..3
                  TEXT@3..3 "a"
                AT_VALUE@6..6
                  TEXT@6..6 "b"
        "#]];
        expected.assert_eq(&format!("{tree:?}"));
    }

    #[test]
    fn it_skips_leading_spaces_once() {
        let tree = Parser::new("@( a b : c )").parse();
        assert!(tree.errors().is_empty());
        let expected = expect![[r#"
            ROOT@1..12
              AT_EXPRESSION@1..12
                AT_KEY@3..7
                  TEXT@4..7 "a b "
                AT_VALUE@9..11
                  TEXT@10..11 "c "
        "#]];
        expected.assert_eq(&format!("{tree:?}"));
    }

    #[test]
    fn it_rereads_unterminated_at_as_text() {
        let tree = Parser::new("@(a:1").parse();
        assert!(tree.errors().is_empty());
        assert_eq!(tree.warnings().len(), 1);
        let expected = expect![[r#"
            ROOT@1..5
              TEXT@1..1 "@"
              TEXT@2..5 "(a:1"
            WARNING@1:1 "unterminated at-expression" @
        "#]];
        expected.assert_eq(&format!("{tree:?}"));
    }

    #[test]
    fn it_nests_inside_keys() {
        let tree = Parser::new("@(@(A;B):C)").parse();
        assert!(tree.errors().is_empty());
        let expected = expect![[r#"
            ROOT@1..11
              AT_EXPRESSION@1..11
                AT_KEY@3..8
                  AT_EXPRESSION@3..8
                    AT_KEY@5..5
                      TEXT@5..5 "A"
                    AT_KEY@7..7
                      TEXT@7..7 "B"
                AT_VALUE@10..10
                  TEXT@10..10 "C"
        "#]];
        expected.assert_eq(&format!("{tree:?}"));
    }
}
