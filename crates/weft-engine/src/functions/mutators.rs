use super::adapters::{first_text, number, one_number, text_of};
use super::Module;
use crate::interpolator::Interpolator;
use crate::value::{parse_number, Value};

pub(crate) const MODULE: Module = Module {
    name: "mutators",
    functions: &[
        ("randomseed", randomseed),
        ("random", random),
        ("choose", choose),
        ("set", set),
    ],
};

fn randomseed(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let seed = one_number(args)?;
    interpolator.rng().seed(seed.to_bits());
    None
}

/// `random()` is a float in `[0, 1)`; `random(m)` an integer in `1..=m`;
/// `random(m n)` an integer in `m..=n`.
fn random(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    match args.len() {
        0 => Some(number(interpolator.rng().next_f64())),
        1 => {
            let hi = parse_number(&first_text(args))?.trunc() as i64;
            if hi < 1 {
                return None;
            }
            Some(number(interpolator.rng().next_range(1, hi) as f64))
        }
        _ => {
            let lo = parse_number(&args[0].to_string())?.trunc() as i64;
            let hi = parse_number(&args[1].to_string())?.trunc() as i64;
            if lo > hi {
                return None;
            }
            Some(number(interpolator.rng().next_range(lo, hi) as f64))
        }
    }
}

/// Pick uniformly among the arguments, or among the values of a single
/// collection argument.
fn choose(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    match args {
        [] => None,
        [Value::Map(map)] => {
            if map.is_empty() {
                return None;
            }
            let i = interpolator.rng().pick_index(map.len());
            map.values().nth(i).cloned()
        }
        _ => {
            let i = interpolator.rng().pick_index(args.len());
            args.get(i).cloned()
        }
    }
}

/// Bind a token for the rest of the evaluation (and later ones on the same
/// interpolator). A single value is stored as-is, several are concatenated.
/// Writes may be refused by the underscore rule; either way `set` itself
/// produces no output.
fn set(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let name = first_text(args);
    if name.is_empty() {
        return None;
    }
    let value = match args.get(1..).unwrap_or(&[]) {
        [] => Value::empty(),
        [one] => one.clone(),
        many => Value::Str(text_of(many)),
    };
    interpolator.set_token_checked(&name, value);
    None
}
