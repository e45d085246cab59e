#![doc = include_str!("../README.md")]

pub mod ast;
mod entities;
mod functions;
mod interpolator;
mod multimap;
mod rng;
mod value;

pub use crate::interpolator::{Interpolator, InterpolatorOptions, PatternError, Translator};
pub use crate::multimap::{MapEntry, MultiMap};
pub use crate::rng::{ChaChaSource, RandomSource};
pub use crate::value::Value;
pub use weft_parser::Error as SyntaxError;

/// Interpolate `pattern` once against the given token bindings.
///
/// This is the convenience entry point: it builds an [`Interpolator`] from
/// `options`, compiles the pattern and evaluates it. Parse errors degrade to
/// empty output here even in strict mode; drive an [`Interpolator`] directly
/// to observe them.
///
/// ```rust
/// use weft_engine::{interpolate, InterpolatorOptions};
///
/// let out = interpolate(
///     "$name rolled $add($a $b)",
///     [("name", "ada"), ("a", "3"), ("b", "4")],
///     InterpolatorOptions::default(),
/// );
/// assert_eq!(out, "ada rolled 7");
/// ```
pub fn interpolate<K, V, I>(pattern: &str, tokens: I, options: InterpolatorOptions) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let mut interpolator = Interpolator::new(options);
    let _ = interpolator.set_pattern(pattern);
    interpolator.interpolate_with(tokens)
}
