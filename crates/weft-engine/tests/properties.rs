//! Quantified invariants of the engine, exercised over small input spaces.

use pretty_assertions::assert_eq;
use weft_engine::{interpolate, InterpolatorOptions, MultiMap};

fn run(pattern: &str) -> String {
    interpolate(pattern, [("token", "value")], InterpolatorOptions::default())
}

#[test]
fn every_escape_is_idempotent() {
    for c in ['$', '@', '(', ')', ':', ';'] {
        let out = run(&format!("${c}"));
        assert_eq!(out, c.to_string());
    }
}

#[test]
fn literal_regions_are_transparent() {
    // For text-and-escape templates T, `$str((T))` decodes to exactly T.
    let cases = [
        ("plain words", "plain words"),
        ("a $) b", "a ) b"),
        ("$$$(pair$)", "$(pair)"),
        ("spaces   kept", "spaces   kept"),
        ("colons : and ; semis", "colons : and ; semis"),
    ];
    for (region, decoded) in cases {
        assert_eq!(run(&format!("$str(({region}))")), decoded);
        assert_eq!(run(&format!("$concat(({region}))")), decoded);
    }
}

#[test]
fn multimap_sizes_round_trip() {
    let map = MultiMap::from_pairs([
        ("a", "1"),
        ("b", "2"),
        ("a", "3"),
        ("c", "4"),
        ("a", "5"),
    ]);
    assert_eq!(map.len(), map.pairs().count());
    for key in ["a", "b", "c"] {
        let indexed = map.index(key).expect("key is present");
        let counted = map.keys().filter(|k| k.to_string() == key).count();
        assert_eq!(indexed.len(), counted);
    }
    assert!(map.index("zzz").is_none());
}

#[test]
fn at_expression_entries_match_their_sources() {
    // Size as seen through the library agrees with the entry count implied
    // by the source for a few representative shapes.
    let cases = [
        ("@()", 0),
        ("@(a)", 1),
        ("@(a;b;c)", 3),
        ("@(a:1;b:2)", 2),
        ("@(a:1;;b:2)", 2),
        ("@(a::b)", 1),
        ("@(a:b:c)", 1),
        ("@(:orphan)", 0),
    ];
    for (source, size) in cases {
        assert_eq!(
            run(&format!("$len({source})")),
            size.to_string(),
            "for {source}"
        );
    }
}

#[test]
fn output_is_stable_across_repeated_evaluation() {
    use weft_engine::Interpolator;
    let mut interpolator = Interpolator::default();
    interpolator
        .set_pattern("$upper($token) @(a:$token) $len(@(x;y))")
        .unwrap();
    interpolator.set_token("token", "value");
    let first = interpolator.interpolate();
    let second = interpolator.interpolate();
    assert_eq!(first, second);
    assert_eq!(first, "VALUE value 2");
}
