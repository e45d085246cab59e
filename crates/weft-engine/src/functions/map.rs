use super::adapters::{first_text, number, truth};
use super::{string, Module};
use crate::interpolator::Interpolator;
use crate::multimap::{MapEntry, MultiMap};
use crate::value::{parse_number, Value};

pub(crate) const MODULE: Module = Module {
    name: "map",
    functions: &[
        ("list", list),
        ("map", map_),
        ("len", len),
        ("concat", concat),
        ("concats", concats),
        ("nthvalue", nthvalue),
        ("first", first),
        ("last", last),
        ("has", has),
        ("get", get),
        ("index", index),
        ("unique", unique),
    ],
};

// The polymorphic functions (`len`, `concat`, `concats`, `first`, `last`,
// `index`) shadow the `string` module's versions in the combined table and
// delegate back to them when the argument is not a collection.

/// A single collection argument is re-keyed 1..n; any other argument shape
/// becomes a list of the arguments themselves.
fn list(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    match args {
        [Value::Map(map)] => Some(Value::from(MultiMap::from_values(
            map.values().cloned(),
        ))),
        _ => Some(Value::from(MultiMap::from_values(args.to_vec()))),
    }
}

/// Apply a builtin by name to every value of a collection, with any extra
/// arguments appended, preserving keys. An absent per-value result becomes
/// empty text.
fn map_(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let name = first_text(args).to_ascii_lowercase();
    let function = interpolator.function(&name)?;
    let Some(Value::Map(source)) = args.get(1) else {
        return None;
    };
    let extras = args.get(2..).unwrap_or(&[]);
    let mut entries = Vec::with_capacity(source.len());
    for entry in source.entries() {
        let mut call_args = Vec::with_capacity(1 + extras.len());
        call_args.push(entry.value.clone());
        call_args.extend_from_slice(extras);
        let value = function(interpolator, &call_args).unwrap_or_else(Value::empty);
        entries.push(MapEntry {
            key: entry.key.clone(),
            value,
        });
    }
    Some(Value::from(MultiMap::from_entries(entries)))
}

fn len(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    match args.first() {
        Some(Value::Map(map)) => Some(number(map.len() as f64)),
        _ => string::len(interpolator, args),
    }
}

/// Join a collection's values; optional separator and 1-based range.
fn concat(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    match args.first() {
        Some(Value::Map(map)) => {
            let sep = args.get(1).map(|v| v.to_string()).unwrap_or_default();
            let from = range_arg(args.get(2), 1);
            let to = range_arg(args.get(3), map.len());
            Some(Value::Str(map.concat(&sep, from, to)))
        }
        _ => string::concat(interpolator, args),
    }
}

/// Like `concat` with the separator first: `$concats(sep map)`.
fn concats(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    match args.get(1) {
        Some(Value::Map(map)) => {
            let sep = first_text(args);
            let from = range_arg(args.get(2), 1);
            let to = range_arg(args.get(3), map.len());
            Some(Value::Str(map.concat(&sep, from, to)))
        }
        _ => string::concats(interpolator, args),
    }
}

fn range_arg(arg: Option<&Value>, default: usize) -> usize {
    arg.and_then(|value| parse_number(&value.to_string()))
        .map(|n| n.trunc().max(0.0) as usize)
        .unwrap_or(default)
}

/// Value of the nth entry, 1-indexed.
fn nthvalue(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let Some(Value::Map(map)) = args.first() else {
        return None;
    };
    let n = parse_number(&args.get(1)?.to_string())?.trunc();
    if n < 1.0 {
        return None;
    }
    map.entry(n as usize).map(|entry| entry.value.clone())
}

fn first(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    match args.first() {
        Some(Value::Map(map)) => map.first().cloned(),
        _ => string::first(interpolator, args),
    }
}

fn last(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    match args.first() {
        Some(Value::Map(map)) => map.last().cloned(),
        _ => string::last(interpolator, args),
    }
}

fn has(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let Some(Value::Map(map)) = args.first() else {
        return None;
    };
    let key = args.get(1)?.to_string();
    truth(map.has(&key))
}

/// Value of the first entry with the key; optional third argument as
/// default when the key is absent.
fn get(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let Some(Value::Map(map)) = args.first() else {
        return None;
    };
    let key = args.get(1)?.to_string();
    map.get(&key).cloned().or_else(|| args.get(2).cloned())
}

/// Submap of every entry with the key, renumbered 1..n; optional third
/// argument as default when the key is absent. Text arguments fall back to
/// substring position lookup.
fn index(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    match args.first() {
        Some(Value::Map(map)) => {
            let key = args.get(1)?.to_string();
            map.index(&key)
                .map(Value::from)
                .or_else(|| args.get(2).cloned())
        }
        _ => string::index(interpolator, args),
    }
}

fn unique(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let Some(Value::Map(map)) = args.first() else {
        return None;
    };
    Some(Value::from(map.unique()))
}
