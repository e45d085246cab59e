use pretty_assertions::assert_eq;
use std::collections::HashMap;
use weft_engine::{
    interpolate, Interpolator, InterpolatorOptions, RandomSource, Translator,
};

fn run(pattern: &str) -> String {
    interpolate(pattern, [("token", "value")], InterpolatorOptions::default())
}

#[test]
fn math_basics() {
    assert_eq!(run("$add(2 3)"), "5");
    assert_eq!(run("$subtract(2 3)"), "-1");
    assert_eq!(run("$mul(4 2.5)"), "10");
    assert_eq!(run("$div(7 2)"), "3.5");
    assert_eq!(run("$pow(2 10)"), "1024");
    assert_eq!(run("$sqrt(9)"), "3");
    assert_eq!(run("$abs(-3)"), "3");
    assert_eq!(run("$floor(3.7)"), "3");
    assert_eq!(run("$ceil(3.2)"), "4");
    assert_eq!(run("$int(-3.7)"), "-3");
    assert_eq!(run("$num(007)"), "7");
}

#[test]
fn math_remainders_differ_in_sign() {
    assert_eq!(run("$mod(-3 2)"), "1");
    assert_eq!(run("$fmod(-3 2)"), "-1");
    assert_eq!(run("$mod(7 3)"), "1");
}

#[test]
fn math_non_numeric_input_is_absent() {
    assert_eq!(run("a$sqrt(x)b"), "ab");
    assert_eq!(run("a$add(1)b"), "ab");
}

#[test]
fn math_nan_flows_as_text() {
    assert_eq!(run("$div(0 0)"), "nan");
    assert_eq!(run("$isnan($div(0 0))"), "true");
    assert_eq!(run("$isnan(5)"), "");
}

#[test]
fn math_multi_results_are_listed() {
    assert_eq!(run("$nthvalue($frexp(1) 1)"), "0.5");
    assert_eq!(run("$nthvalue($frexp(1) 2)"), "1");
    assert_eq!(run("$nthvalue($modf(3.5) 1)"), "3");
    assert_eq!(run("$nthvalue($modf(3.5) 2)"), "0.5");
}

#[test]
fn math_extrema_pick_numeric_or_text_order() {
    assert_eq!(run("$max(2 10 9)"), "10");
    assert_eq!(run("$min(2 10 9)"), "2");
    // One non-number switches the whole comparison to text order.
    assert_eq!(run("$max(2 10 x)"), "x");
    assert_eq!(run("$min(b a c)"), "a");
}

#[test]
fn boolean_comparisons() {
    assert_eq!(run("$eq(5 05)"), "true");
    assert_eq!(run("$eq(a b)"), "");
    assert_eq!(run("$neq(a b)"), "true");
    assert_eq!(run("$gt(10 9)"), "true");
    assert_eq!(run("$lt(10 9)"), "");
    assert_eq!(run("$gte(10 10)"), "true");
    assert_eq!(run("$lte(9 10)"), "true");
    // Text comparison applies when either side is not a number.
    assert_eq!(run("$gt(10 9a)"), "");
}

#[test]
fn boolean_combinators() {
    assert_eq!(run("$not(())"), "true");
    assert_eq!(run("$not(x)"), "");
    assert_eq!(run("$any($missing b c)"), "b");
    assert_eq!(run("$all(a b c)"), "c");
    assert_eq!(run("$all(a () c)"), "");
}

#[test]
fn string_case_and_shape() {
    assert_eq!(run("$upper(hello)"), "HELLO");
    assert_eq!(run("$lower(A B)"), "ab");
    assert_eq!(run("$reverse(abc)"), "cba");
    assert_eq!(run("$capitalize(ada)"), "Ada");
    assert_eq!(run("$trim( (  x  ) )"), "x");
    assert_eq!(run("$len(hello)"), "5");
    assert_eq!(run("$first(hello)"), "h");
    assert_eq!(run("$last(hello)"), "o");
    assert_eq!(run("$rep(ab 3)"), "ababab");
}

#[test]
fn string_predicates() {
    assert_eq!(run("$contains(hello ell)"), "true");
    assert_eq!(run("$startswith(hello he)"), "true");
    assert_eq!(run("$endswith(hello lo)"), "true");
    assert_eq!(run("$contains(hello xyz)"), "");
}

#[test]
fn string_indexing_is_one_based_and_wraps() {
    assert_eq!(run("$sub(hello 2 4)"), "ell");
    assert_eq!(run("$sub(hello -3)"), "llo");
    assert_eq!(run("$sub(hello 4 2)"), "");
    assert_eq!(run("$index(hello l)"), "3");
    assert_eq!(run("$char(104 105)"), "hi");
    assert_eq!(run("$byte(A)"), "65");
    assert_eq!(run("$byte(hello -1)"), "111");
}

#[test]
fn string_regex_builtins() {
    assert_eq!(run("$gsub(banana a o)"), "bonono");
    assert_eq!(run("$gsub(banana a o 2)"), "bonona");
    assert_eq!(run("$match(foo123 [0-9]+)"), "123");
    // Escaped parens reach the pattern as a capture group.
    assert_eq!(run("$match(foo123 f$(o+$))"), "oo");
    // An invalid pattern is absent, not an error.
    assert_eq!(run("a$match(x [)b"), "ab");
}

#[test]
fn string_concatenation() {
    assert_eq!(run("$concat(a b c)"), "abc");
    assert_eq!(run("$concats(- a b)"), "a-b");
    assert_eq!(run("$str((a b))"), "a b");
}

#[test]
fn string_punctuate() {
    assert_eq!(run("$punctuate(hi)"), "hi.");
    assert_eq!(run("$punctuate(hi!)"), "hi!");
    assert_eq!(run("$punctuate(hi ?)"), "hi?");
    assert_eq!(run("$punctuate(hi. ! .)"), "hi.");
}

#[test]
fn map_builtins() {
    assert_eq!(run("$len(@(a;b))"), "2");
    assert_eq!(run("$concat(@(A;B) -)"), "A-B");
    assert_eq!(run("$concats((, ) @(A;B))"), "A, B");
    assert_eq!(run("$nthvalue(@(A;B) 2)"), "B");
    assert_eq!(run("$first(@(A;B))"), "A");
    assert_eq!(run("$last(@(A;B))"), "B");
    assert_eq!(run("$has(@(a:1) a)"), "true");
    assert_eq!(run("$has(@(a:1) b)"), "");
    assert_eq!(run("$get(@(a:1;b:2) b)"), "2");
    assert_eq!(run("$get(@(a:1) c fallback)"), "fallback");
    assert_eq!(run("$concat($unique(@(a:x;b:y;c:x)))"), "xy");
}

#[test]
fn map_list_wraps_or_renumbers() {
    assert_eq!(run("$concat($list(a b c))"), "abc");
    assert_eq!(run("$get($list(a b c) 2)"), "b");
    assert_eq!(run("$get($list(@(x:A;y:B)) 2)"), "B");
}

#[test]
fn map_map_applies_a_builtin_per_value() {
    assert_eq!(run("$concat($map(upper @(a;b)))"), "AB");
    assert_eq!(run("$get($map(add @(x:1;y:2) 10) y)"), "12");
}

#[test]
fn polymorphic_functions_fall_back_to_text() {
    assert_eq!(run("$len(abc)"), "3");
    assert_eq!(run("$concat(a b)"), "ab");
    assert_eq!(run("$first(abc)"), "a");
    assert_eq!(run("$last(abc)"), "c");
    assert_eq!(run("$index(hello l)"), "3");
}

/// Replays a fixed script instead of drawing randomness.
struct ScriptedSource {
    floats: Vec<f64>,
    at: usize,
}

impl ScriptedSource {
    fn new(floats: Vec<f64>) -> Self {
        Self { floats, at: 0 }
    }

    fn next(&mut self) -> f64 {
        let value = self.floats[self.at % self.floats.len()];
        self.at += 1;
        value
    }
}

impl RandomSource for ScriptedSource {
    fn seed(&mut self, _seed: u64) {
        self.at = 0;
    }

    fn next_f64(&mut self) -> f64 {
        self.next()
    }

    fn next_range(&mut self, lo: i64, hi: i64) -> i64 {
        let f = self.next();
        lo + (f * (hi - lo + 1) as f64) as i64
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (self.next() * len as f64) as usize
    }
}

fn scripted(floats: Vec<f64>) -> Interpolator {
    Interpolator::default().with_rng(Box::new(ScriptedSource::new(floats)))
}

#[test]
fn random_follows_the_injected_source() {
    let mut interpolator = scripted(vec![0.25]);
    interpolator.set_pattern("$random()").unwrap();
    assert_eq!(interpolator.interpolate(), "0.25");

    let mut interpolator = scripted(vec![0.0, 0.999]);
    interpolator.set_pattern("$random(6) $random(6)").unwrap();
    assert_eq!(interpolator.interpolate(), "1 6");

    let mut interpolator = scripted(vec![0.5]);
    interpolator.set_pattern("$random(10 20)").unwrap();
    assert_eq!(interpolator.interpolate(), "15");
}

#[test]
fn random_rejects_inverted_ranges() {
    let mut interpolator = scripted(vec![0.5]);
    interpolator.set_pattern("a$random(9 5)b").unwrap();
    assert_eq!(interpolator.interpolate(), "ab");
}

#[test]
fn choose_picks_among_arguments_or_collection_values() {
    let mut interpolator = scripted(vec![0.5]);
    interpolator.set_pattern("$choose(a b c)").unwrap();
    assert_eq!(interpolator.interpolate(), "b");

    let mut interpolator = scripted(vec![0.5]);
    interpolator.set_pattern("$choose(@(x;y))").unwrap();
    assert_eq!(interpolator.interpolate(), "y");
}

#[test]
fn randomseed_makes_the_default_stream_deterministic() {
    let mut a = Interpolator::default();
    let mut b = Interpolator::default();
    a.set_pattern("$randomseed(42)$random(1000000)").unwrap();
    b.set_pattern("$randomseed(42)$random(1000000)").unwrap();
    assert_eq!(a.interpolate(), b.interpolate());
}

struct MapTranslator(HashMap<String, String>);

impl Translator for MapTranslator {
    fn lookup(&self, key: &str, _args: &[String]) -> Option<String> {
        self.0.get(key).cloned()
    }
}

#[test]
fn gettext_without_a_backend_is_absent() {
    assert_eq!(run("a$gettext(greeting)b"), "ab");
    assert_eq!(run("a$gettextornull(greeting)b"), "ab");
}

#[test]
fn gettext_falls_back_to_the_key() {
    let translations: HashMap<String, String> =
        [("greeting".to_string(), "hello".to_string())].into();
    let mut interpolator = Interpolator::default()
        .with_translator(Box::new(MapTranslator(translations)));

    interpolator.set_pattern("$gettext(greeting)").unwrap();
    assert_eq!(interpolator.interpolate(), "hello");

    interpolator.set_pattern("$gettext(missing)").unwrap();
    assert_eq!(interpolator.interpolate(), "missing");

    interpolator.set_pattern("a$gettextornull(missing)b").unwrap();
    assert_eq!(interpolator.interpolate(), "ab");
}
