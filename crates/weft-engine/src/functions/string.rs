use super::adapters::{first_text, number, rest_text, text_of, truth};
use super::Module;
use crate::interpolator::Interpolator;
use crate::value::{parse_number, Value};
use regex::Regex;

pub(crate) const MODULE: Module = Module {
    name: "string",
    functions: &[
        ("str", str_),
        ("lower", lower),
        ("upper", upper),
        ("reverse", reverse),
        ("trim", trim),
        ("trimleft", trimleft),
        ("trimright", trimright),
        ("first", first),
        ("last", last),
        ("contains", contains),
        ("startswith", startswith),
        ("endswith", endswith),
        ("concat", concat),
        ("concats", concats),
        ("len", len),
        ("capitalize", capitalize),
        ("punctuate", punctuate),
        ("gsub", gsub),
        ("sub", sub),
        ("index", index),
        ("match", match_),
        ("char", char_),
        ("byte", byte),
        ("rep", rep),
    ],
};

// Indices throughout count Unicode scalar values, 1-based; negative
// indices wrap from the end.

pub(crate) fn str_(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    Some(Value::Str(text_of(args)))
}

fn lower(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    Some(Value::Str(text_of(args).to_lowercase()))
}

fn upper(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    Some(Value::Str(text_of(args).to_uppercase()))
}

fn reverse(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    Some(Value::Str(text_of(args).chars().rev().collect()))
}

fn trim(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    Some(Value::Str(text_of(args).trim().to_string()))
}

fn trimleft(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    Some(Value::Str(text_of(args).trim_start().to_string()))
}

fn trimright(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    Some(Value::Str(text_of(args).trim_end().to_string()))
}

pub(crate) fn first(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let text = text_of(args);
    Some(Value::Str(
        text.chars().next().map(String::from).unwrap_or_default(),
    ))
}

pub(crate) fn last(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let text = text_of(args);
    Some(Value::Str(
        text.chars().next_back().map(String::from).unwrap_or_default(),
    ))
}

fn contains(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(first_text(args).contains(&rest_text(args)))
}

fn startswith(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(first_text(args).starts_with(&rest_text(args)))
}

fn endswith(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(first_text(args).ends_with(&rest_text(args)))
}

pub(crate) fn concat(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    Some(Value::Str(text_of(args)))
}

/// Join every argument after the first with the first as separator.
pub(crate) fn concats(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let sep = first_text(args);
    let parts: Vec<String> = args
        .iter()
        .skip(1)
        .map(|value| value.to_string())
        .collect();
    Some(Value::Str(parts.join(&sep)))
}

pub(crate) fn len(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    Some(number(text_of(args).chars().count() as f64))
}

fn capitalize(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let text = text_of(args);
    let mut chars = text.chars();
    let capitalized = match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Some(Value::Str(capitalized))
}

/// Append a punctuation mark (default `.`) unless the text already ends
/// with one of the allowed characters (default: any ASCII punctuation).
fn punctuate(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let text = first_text(args);
    let mark = args
        .get(1)
        .map(|value| value.to_string())
        .unwrap_or_else(|| ".".to_string());
    let allowed = args.get(2).map(|value| value.to_string());
    let already = text.chars().next_back().is_some_and(|c| match &allowed {
        Some(set) => set.contains(c),
        None => c.is_ascii_punctuation(),
    });
    if already {
        Some(Value::Str(text))
    } else {
        Some(Value::Str(text + &mark))
    }
}

/// Regex substitution over the first argument. The pattern and replacement
/// use the host regex syntax (`$1`, `${name}` in the replacement); an
/// optional fourth argument caps the number of replacements.
fn gsub(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let text = first_text(args);
    let pattern = args.get(1)?.to_string();
    let replacement = args
        .get(2)
        .map(|value| value.to_string())
        .unwrap_or_default();
    let count = args
        .get(3)
        .and_then(|value| parse_number(&value.to_string()));
    let re = Regex::new(&pattern).ok()?;
    let replaced = match count {
        Some(n) if n >= 0.0 => re.replacen(&text, n as usize, replacement.as_str()),
        Some(_) => return None,
        None => re.replace_all(&text, replacement.as_str()),
    };
    Some(Value::Str(replaced.into_owned()))
}

/// Substring by 1-based inclusive character positions, following the
/// traditional rules: negative positions count back from the end, and an
/// empty range yields empty text.
fn sub(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let text = first_text(args);
    let from = parse_number(&args.get(1)?.to_string())?.trunc() as i64;
    let to = args
        .get(2)
        .and_then(|value| parse_number(&value.to_string()))
        .map(|n| n.trunc() as i64)
        .unwrap_or(-1);
    Some(Value::Str(substring(&text, from, to)))
}

fn substring(text: &str, from: i64, to: i64) -> String {
    let len = text.chars().count() as i64;
    let from = if from < 0 {
        (len + from + 1).max(1)
    } else {
        from.max(1)
    };
    let to = if to < 0 { len + to + 1 } else { to.min(len) };
    if from > to {
        return String::new();
    }
    text.chars()
        .skip((from - 1) as usize)
        .take((to - from + 1) as usize)
        .collect()
}

/// 1-based character position of the first occurrence of the needle.
pub(crate) fn index(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let hay = first_text(args);
    let needle = rest_text(args);
    let at = hay.find(&needle)?;
    Some(number((hay[..at].chars().count() + 1) as f64))
}

/// First regex match; with capture groups, the first group.
fn match_(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let text = first_text(args);
    let pattern = args.get(1)?.to_string();
    let re = Regex::new(&pattern).ok()?;
    let captures = re.captures(&text)?;
    let matched = if captures.len() > 1 {
        captures.get(1)?
    } else {
        captures.get(0)?
    };
    Some(Value::Str(matched.as_str().to_string()))
}

/// The text whose character codes are the arguments.
fn char_(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let mut out = String::new();
    for value in args {
        let code = parse_number(&value.to_string())?.trunc();
        if code < 0.0 || code > f64::from(u32::MAX) {
            return None;
        }
        out.push(char::from_u32(code as u32)?);
    }
    Some(Value::Str(out))
}

/// Character code at a 1-based position (default the first).
fn byte(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let text = first_text(args);
    let position = args
        .get(1)
        .and_then(|value| parse_number(&value.to_string()))
        .map(|n| n.trunc() as i64)
        .unwrap_or(1);
    let len = text.chars().count() as i64;
    let position = if position < 0 { len + position + 1 } else { position };
    if position < 1 || position > len {
        return None;
    }
    let c = text.chars().nth((position - 1) as usize)?;
    Some(number(f64::from(u32::from(c))))
}

/// Output beyond 1 MiB is treated as a fault and yields nothing.
const REP_LIMIT: usize = 1 << 20;

fn rep(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let text = first_text(args);
    let n = parse_number(&args.get(1)?.to_string())?.trunc();
    if n < 0.0 {
        return Some(Value::Str(String::new()));
    }
    let n = n as usize;
    if text.len().checked_mul(n)? > REP_LIMIT {
        return None;
    }
    Some(Value::Str(text.repeat(n)))
}

#[cfg(test)]
mod tests {
    use super::substring;

    #[test]
    fn substring_follows_traditional_rules() {
        assert_eq!(substring("hello", 1, 3), "hel");
        assert_eq!(substring("hello", 2, 2), "e");
        assert_eq!(substring("hello", -3, -1), "llo");
        assert_eq!(substring("hello", 4, 2), "");
        assert_eq!(substring("hello", 0, 99), "hello");
        assert_eq!(substring("héllo", 2, 2), "é");
    }
}
