//! Argument-coercion helpers shared across the library modules.
//!
//! These implement the library's calling conventions: numeric builtins see
//! their arguments squashed to numbers, comparisons fall back from numeric
//! to text ordering, and predicates yield `"true"` or absent so they
//! compose with truthiness.

use crate::multimap::MultiMap;
use crate::value::{format_number, parse_number, Value};
use std::cmp::Ordering;

/// Stringify all arguments and concatenate them.
pub(crate) fn text_of(args: &[Value]) -> String {
    args.iter().map(|value| value.to_string()).collect()
}

/// Stringify the first argument, or empty when there is none.
pub(crate) fn first_text(args: &[Value]) -> String {
    args.first().map(|value| value.to_string()).unwrap_or_default()
}

/// Stringify and concatenate every argument after the first.
pub(crate) fn rest_text(args: &[Value]) -> String {
    match args {
        [] | [_] => String::new(),
        [_, rest @ ..] => text_of(rest),
    }
}

/// Coerce the concatenated arguments to one number.
pub(crate) fn one_number(args: &[Value]) -> Option<f64> {
    parse_number(&text_of(args))
}

/// Coerce the first argument, then the concatenated rest, to two numbers.
pub(crate) fn two_numbers(args: &[Value]) -> Option<(f64, f64)> {
    let a = parse_number(&first_text(args))?;
    let b = parse_number(&rest_text(args))?;
    Some((a, b))
}

pub(crate) fn number(n: f64) -> Value {
    Value::Str(format_number(n))
}

/// Predicate result: `"true"` when it holds, absent otherwise.
pub(crate) fn truth(condition: bool) -> Option<Value> {
    condition.then(|| Value::Str("true".to_string()))
}

/// Numeric order when both sides parse as numbers, text order otherwise.
/// `None` when a NaN leaves the order undefined.
pub(crate) fn compare(args: &[Value]) -> Option<Ordering> {
    let a = first_text(args);
    let b = rest_text(args);
    match (parse_number(&a), parse_number(&b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y),
        _ => Some(a.cmp(&b)),
    }
}

/// Wrap a multi-result into a fresh collection keyed 1..n.
pub(crate) fn number_list(numbers: &[f64]) -> Value {
    Value::from(MultiMap::from_values(
        numbers.iter().map(|&n| number(n)),
    ))
}

/// The chosen branch of a conditional: a single value passes through
/// unchanged (preserving collection identity), several are concatenated.
pub(crate) fn branch(args: &[Value]) -> Option<Value> {
    match args {
        [] => None,
        [one] => Some(one.clone()),
        many => Some(Value::Str(text_of(many))),
    }
}
