use super::adapters::first_text;
use super::Module;
use crate::interpolator::Interpolator;
use crate::value::Value;

pub(crate) const MODULE: Module = Module {
    name: "translation",
    functions: &[("gettext", gettext), ("gettextornull", gettextornull)],
};

/// Resolve a translation key, falling back to the key itself when the
/// backend has no entry. Absent without a backend.
fn gettext(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let key = first_text(args);
    let rest = substitutions(args);
    let translator = interpolator.translator()?;
    let text = translator.lookup(&key, &rest).unwrap_or(key);
    Some(Value::Str(text))
}

/// Resolve a translation key; absent when the backend has no entry or
/// there is no backend.
fn gettextornull(interpolator: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let key = first_text(args);
    let rest = substitutions(args);
    let translator = interpolator.translator()?;
    translator.lookup(&key, &rest).map(Value::Str)
}

fn substitutions(args: &[Value]) -> Vec<String> {
    args.iter().skip(1).map(|value| value.to_string()).collect()
}
