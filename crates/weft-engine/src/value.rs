use crate::multimap::MultiMap;
use std::fmt;
use triomphe::Arc;

/// A runtime value: either text or an ordered key/value collection.
///
/// Collections are shared behind an [`Arc`]: a [`MultiMap`] is never mutated
/// after construction, so cloning a value is cheap and preserves identity.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    Map(Arc<MultiMap>),
}

impl Value {
    pub fn empty() -> Self {
        Value::Str(String::new())
    }

    /// The collection behind this value, if it is one.
    pub fn as_map(&self) -> Option<&MultiMap> {
        match self {
            Value::Map(map) => Some(map),
            Value::Str(_) => None,
        }
    }

    /// A value is truthy when its text projection is non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(text) => !text.is_empty(),
            Value::Map(map) => map.first().is_some_and(Value::is_truthy),
        }
    }
}

/// The text projection: text passes through, a collection projects to its
/// first value (or nothing when empty).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(text) => f.write_str(text),
            Value::Map(map) => write!(f, "{map}"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

impl From<MultiMap> for Value {
    fn from(map: MultiMap) -> Self {
        Value::Map(Arc::new(map))
    }
}

impl From<Arc<MultiMap>> for Value {
    fn from(map: Arc<MultiMap>) -> Self {
        Value::Map(map)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Str(format_number(n))
    }
}

/// Parse text as a number, tolerating surrounding whitespace. Empty or
/// non-numeric text is not a number.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}

/// Render a number the way templates expect: integral values without a
/// fractional part, everything else in the shortest form that round-trips.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == n.trunc() && n.abs() < 9_007_199_254_740_992.0 {
        return format!("{}", n as i64);
    }
    format!("{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_like_templates_expect() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(f64::NAN), "nan");
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn parsing_tolerates_whitespace() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("x"), None);
    }

    #[test]
    fn truthiness_follows_the_text_projection() {
        assert!(Value::from("x").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::from(MultiMap::new()).is_truthy());
    }
}
