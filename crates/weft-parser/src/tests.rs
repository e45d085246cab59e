use crate::Parser;
use expect_test::expect;
use pretty_assertions::assert_eq;

#[test]
fn mixed_template() {
    let tree = Parser::new("hello $name!").parse();
    assert!(tree.errors().is_empty());
    let expected = expect![[r#"
        ROOT@1..12
          TEXT@1..6 "hello "
          TOKEN@7..11 "name"
          TEXT@12..12 "!"
    "#]];
    expected.assert_eq(&format!("{tree:?}"));
}

#[test]
fn empty_template() {
    let tree = Parser::new("").parse();
    assert!(tree.errors().is_empty());
    let expected = expect![[r#"
        ROOT@1..0
    "#]];
    expected.assert_eq(&format!("{tree:?}"));
}

#[test]
fn every_escape() {
    let tree = Parser::new("$$ $@ $) $( $: $;").parse();
    assert!(tree.errors().is_empty());
    let expected = expect![[r#"
        ROOT@1..17
          ESCAPE@1..2 "$"
          TEXT@3..3 " "
          ESCAPE@4..5 "@"
          TEXT@6..6 " "
          ESCAPE@7..8 ")"
          TEXT@9..9 " "
          ESCAPE@10..11 "("
          TEXT@12..12 " "
          ESCAPE@13..14 ":"
          TEXT@15..15 " "
          ESCAPE@16..17 ";"
    "#]];
    expected.assert_eq(&format!("{tree:?}"));
}

#[test]
fn bare_specials_are_literal_text() {
    let tree = Parser::new("a $ b @ c").parse();
    assert!(tree.errors().is_empty());
    let expected = expect![[r#"
        ROOT@1..9
          TEXT@1..2 "a "
          TEXT@3..3 "$"
          TEXT@4..6 " b "
          TEXT@7..7 "@"
          TEXT@8..9 " c"
    "#]];
    expected.assert_eq(&format!("{tree:?}"));
}

#[test]
fn functions_off_reads_name_as_token() {
    let tree = Parser::new("$upper(x)").allow_functions(false).parse();
    assert!(tree.errors().is_empty());
    let expected = expect![[r#"
        ROOT@1..9
          TOKEN@1..6 "upper"
          TEXT@7..9 "(x)"
    "#]];
    expected.assert_eq(&format!("{tree:?}"));
}

#[test]
fn tokens_off_reads_dollar_as_text() {
    let tree = Parser::new("$name x").allow_tokens(false).parse();
    assert!(tree.errors().is_empty());
    let expected = expect![[r#"
        ROOT@1..7
          TEXT@1..1 "$"
          TEXT@2..7 "name x"
    "#]];
    expected.assert_eq(&format!("{tree:?}"));
}

#[test]
fn at_expressions_off_reads_at_as_text() {
    let tree = Parser::new("@(a;b)").allow_at_expressions(false).parse();
    assert!(tree.errors().is_empty());
    let expected = expect![[r#"
        ROOT@1..6
          TEXT@1..1 "@"
          TEXT@2..6 "(a;b)"
    "#]];
    expected.assert_eq(&format!("{tree:?}"));
}

#[test]
fn nesting_limit_degrades_to_token() {
    let tree = Parser::new("$a($b($c(x)))").nesting_limit(2).parse();
    assert_eq!(tree.errors().len(), 1);
    assert_eq!(tree.errors()[0].message(), "nesting limit reached");
    // The innermost call is read as a token followed by a literal region.
    assert_eq!(tree.nesting().call_high(), 2);
    assert_eq!(tree.nesting().at_high(), 0);
}

#[test]
fn strict_mode_stops_at_first_error() {
    let tree = Parser::new("$a($b($c(x)))")
        .nesting_limit(1)
        .strict(true)
        .parse();
    assert_eq!(tree.errors().len(), 1);
}

#[test]
fn strict_mode_matches_lenient_on_well_formed_input() {
    let source = "a $tok $f(x (y z)) @(k:v;w) $$";
    let lenient = Parser::new(source).parse();
    let strict = Parser::new(source).strict(true).parse();
    assert!(lenient.errors().is_empty());
    assert_eq!(format!("{lenient:?}"), format!("{strict:?}"));
}

#[test]
fn multibyte_text_is_kept_whole() {
    let tree = Parser::new("héllo $name 🚀").parse();
    assert!(tree.errors().is_empty());
    let root = tree.root();
    let values: Vec<_> = root.children().filter_map(|n| n.value()).collect();
    assert_eq!(values, ["héllo ", "name", " 🚀"]);
}
