use crate::ast::{self, AtEntry, Expr};
use crate::functions::{self, BuiltinFn};
use crate::multimap::{MapEntry, MultiMap};
use crate::rng::{ChaChaSource, RandomSource};
use crate::value::Value;
use indexmap::IndexMap;
use std::collections::HashSet;
use triomphe::Arc;
use weft_parser::{Error as SyntaxError, Parser};

/// Feature flags and library filtering for an [`Interpolator`].
///
/// All features default to on, mirroring what templates written for the
/// engine expect. Turning a construct off leaves its source text literal:
/// with `allow_functions` off, `$upper(x)` reads as the token `$upper`
/// followed by the text `(x)`.
#[derive(Debug, Clone)]
pub struct InterpolatorOptions {
    /// Resolve `$name` token references.
    pub allow_tokens: bool,
    /// Parse and dispatch `$name(…)` calls.
    pub allow_functions: bool,
    /// Parse `@(…)` at-expressions and let collections cross call
    /// boundaries. When off, call arguments only ever see text.
    pub allow_multimaps: bool,
    /// Decode character references (`&#64;`) in literal text.
    pub allow_character_entities: bool,
    /// Restrict `$set` to names starting with `_` or names already bound.
    pub require_custom_token_underscore: bool,
    /// Stop at the first parse error; [`Interpolator::set_pattern`] reports
    /// it instead of degrading to empty output silently.
    pub strict: bool,
    /// Library modules or functions to expose. `None` exposes everything.
    pub library_include: Option<HashSet<String>>,
    /// Library modules or functions to hide.
    pub library_exclude: HashSet<String>,
}

impl Default for InterpolatorOptions {
    fn default() -> Self {
        Self {
            allow_tokens: true,
            allow_functions: true,
            allow_multimaps: true,
            allow_character_entities: true,
            require_custom_token_underscore: true,
            strict: false,
            library_include: None,
            library_exclude: HashSet::new(),
        }
    }
}

/// Backend for the `gettext` builtins. Without one, the builtins yield
/// nothing.
pub trait Translator {
    /// Resolve a translation key. `args` are positional substitutions the
    /// backend may interpolate into the resolved text.
    fn lookup(&self, key: &str, args: &[String]) -> Option<String>;
}

/// The first syntax error of a pattern parsed in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at bytes {start}..{end}")]
pub struct PatternError {
    message: String,
    data: String,
    start: usize,
    end: usize,
}

impl PatternError {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Inclusive 1-indexed byte range into the pattern.
    pub fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

impl From<&SyntaxError> for PatternError {
    fn from(err: &SyntaxError) -> Self {
        Self {
            message: err.message().to_string(),
            data: err.data().to_string(),
            start: err.start(),
            end: err.end(),
        }
    }
}

/// Evaluates interpolation patterns against a mutable token environment.
///
/// An interpolator owns a compiled pattern ([`set_pattern`]), a token map,
/// the built-in function table, and a random stream. [`interpolate`] may be
/// called repeatedly; `$set` writes and `randomseed` reseeds persist across
/// calls on the same instance.
///
/// ## Example
///
/// ```rust
/// use weft_engine::{Interpolator, InterpolatorOptions};
///
/// let mut interpolator = Interpolator::new(InterpolatorOptions::default());
/// interpolator.set_pattern("$greeting, $upper($name)!").unwrap();
///
/// let out = interpolator.interpolate_with([("greeting", "hi"), ("name", "ada")]);
/// assert_eq!(out, "hi, ADA!");
/// ```
///
/// [`set_pattern`]: Interpolator::set_pattern
/// [`interpolate`]: Interpolator::interpolate
pub struct Interpolator {
    options: InterpolatorOptions,
    tokens: IndexMap<String, Value>,
    functions: IndexMap<&'static str, BuiltinFn>,
    built: Arc<Vec<Expr>>,
    errors: Vec<SyntaxError>,
    warnings: Vec<SyntaxError>,
    rng: Box<dyn RandomSource>,
    translator: Option<Box<dyn Translator>>,
}

impl Interpolator {
    pub fn new(options: InterpolatorOptions) -> Self {
        let functions = functions::table(
            options.library_include.as_ref(),
            &options.library_exclude,
        );
        Self {
            options,
            tokens: IndexMap::new(),
            functions,
            built: Arc::new(Vec::new()),
            errors: Vec::new(),
            warnings: Vec::new(),
            rng: Box::new(ChaChaSource::default()),
            translator: None,
        }
    }

    /// Replace the random stream, e.g. with a scripted source in tests.
    pub fn with_rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Attach a translation backend for the `gettext` builtins.
    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = translator.into();
        self
    }

    /// Parse and compile a pattern. Errors and warnings are retained for
    /// inspection; with [`InterpolatorOptions::strict`] the first error is
    /// also returned. A pattern with errors interpolates to empty output.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), PatternError> {
        let tree = Parser::new(pattern)
            .allow_tokens(self.options.allow_tokens)
            .allow_functions(self.options.allow_functions)
            .allow_at_expressions(self.options.allow_multimaps)
            .strict(self.options.strict)
            .parse();
        self.errors = tree.errors().to_vec();
        self.warnings = tree.warnings().to_vec();
        let mut built = ast::build(&tree);
        if self.options.allow_character_entities {
            ast::decode_entities(&mut built);
        }
        self.built = Arc::new(built);
        match (self.options.strict, self.errors.first()) {
            (true, Some(err)) => Err(err.into()),
            _ => Ok(()),
        }
    }

    /// Evaluate the current pattern against the current token map.
    pub fn interpolate(&mut self) -> String {
        let built = Arc::clone(&self.built);
        self.eval_seq(&built).to_string()
    }

    /// Replace the token map, then evaluate the current pattern.
    pub fn interpolate_with<K, V, I>(&mut self, tokens: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.tokens = tokens
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self.interpolate()
    }

    /// Bind a token, bypassing the `$set` validation rules.
    pub fn set_token(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.tokens.insert(name.into(), value.into());
    }

    /// The current binding of a token.
    pub fn token(&self, name: &str) -> Option<&Value> {
        self.tokens.get(name)
    }

    /// Errors recorded for the current pattern.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Warnings recorded for the current pattern.
    pub fn warnings(&self) -> &[SyntaxError] {
        &self.warnings
    }

    pub(crate) fn function(&self, name: &str) -> Option<BuiltinFn> {
        self.functions.get(name).copied()
    }

    /// Bind a token on behalf of `$set`, subject to the underscore rule:
    /// new names must start with `_` unless the name is already bound.
    pub(crate) fn set_token_checked(&mut self, name: &str, value: Value) -> bool {
        if self.options.require_custom_token_underscore
            && !name.starts_with('_')
            && !self.tokens.contains_key(name)
        {
            return false;
        }
        self.tokens.insert(name.to_string(), value);
        true
    }

    pub(crate) fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    pub(crate) fn translator(&self) -> Option<&dyn Translator> {
        self.translator.as_deref()
    }

    // Evaluation. Strictly left-to-right: `$set` writes become visible to
    // later siblings and descendants within the same call to `interpolate`.

    fn eval_seq(&mut self, exprs: &[Expr]) -> Value {
        let mut parts = Vec::new();
        for expr in exprs {
            self.eval_into(expr, &mut parts);
        }
        merge_parts(parts)
    }

    fn eval_into(&mut self, expr: &Expr, out: &mut Vec<Value>) {
        match expr {
            Expr::Text(text) => out.push(Value::Str(text.clone())),
            Expr::Token(name) => {
                // An unbound token contributes nothing.
                if let Some(value) = self.tokens.get(name) {
                    out.push(value.clone());
                }
            }
            Expr::Call { name, args } => {
                if let Some(value) = self.eval_call(name, args) {
                    out.push(value);
                }
            }
            Expr::At { entries } => out.push(self.eval_at(entries)),
        }
    }

    fn eval_call(&mut self, name: &str, args: &[Vec<Expr>]) -> Option<Value> {
        let name = name.to_ascii_lowercase();
        // An unknown name yields nothing, without evaluating arguments.
        let function = self.function(&name)?;
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.eval_seq(arg);
            values.push(self.convert(value));
        }
        function(self, &values)
    }

    fn eval_at(&mut self, entries: &[AtEntry]) -> Value {
        let mut out = Vec::new();
        for entry in entries {
            match &entry.key {
                None => {
                    let value = self.eval_seq(&entry.value);
                    if let Value::Map(map) = &value {
                        // A bare collection flattens into the surrounding
                        // one, keeping entries with truthy keys.
                        for e in map.entries() {
                            if e.key.is_truthy() {
                                out.push(e.clone());
                            }
                        }
                    } else {
                        let text = value.to_string();
                        if !text.is_empty() {
                            out.push(MapEntry {
                                key: Value::Str(text),
                                value,
                            });
                        }
                    }
                }
                Some(key) => {
                    let key = self.eval_seq(key);
                    let value = self.eval_seq(&entry.value);
                    if let Value::Map(keys) = &key {
                        // A collection key fans out: one entry per value,
                        // all sharing this entry's value.
                        for k in keys.values() {
                            out.push(MapEntry {
                                key: Value::Str(k.to_string()),
                                value: value.clone(),
                            });
                        }
                    } else if key.is_truthy() {
                        out.push(MapEntry { key, value });
                    }
                }
            }
        }
        Value::Map(Arc::new(MultiMap::from_entries(out)))
    }

    /// Normalize a value crossing a call boundary: collections pass through
    /// only while they are allowed, anything else becomes text.
    pub(crate) fn convert(&self, value: Value) -> Value {
        if !self.options.allow_multimaps && value.as_map().is_some() {
            return Value::Str(value.to_string());
        }
        value
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new(InterpolatorOptions::default())
    }
}

/// A single value passes through unchanged, preserving collection identity;
/// several values are stringified and concatenated.
fn merge_parts(mut parts: Vec<Value>) -> Value {
    match parts.len() {
        0 => Value::empty(),
        1 => parts.pop().expect("length checked"),
        _ => Value::Str(parts.iter().map(|part| part.to_string()).collect()),
    }
}
