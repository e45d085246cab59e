use std::fmt;

pub(crate) const UNEXPECTED_CHARACTER: &str = "unexpected character";
pub(crate) const UNTERMINATED_CALL: &str = "unterminated function call";
pub(crate) const UNTERMINATED_AT: &str = "unterminated at-expression";
pub(crate) const NESTING_LIMIT: &str = "nesting limit reached";

/// An `Error` type for syntax problems found while reading a template.
///
/// Errors are returned alongside the resulting tree rather than aborting the
/// parse. Check [`SyntaxTree::errors`] before evaluating a template: a tree
/// that carries errors evaluates to empty output.
///
/// The same record type is used for warnings ([`SyntaxTree::warnings`]),
/// which flag recovered constructs such as an unterminated function call that
/// was re-read as a plain token reference.
///
/// [`SyntaxTree::errors`]: crate::SyntaxTree::errors
/// [`SyntaxTree::warnings`]: crate::SyntaxTree::warnings
#[derive(PartialEq, Eq, Clone, thiserror::Error)]
#[error("{message} at bytes {start}..{end}")]
pub struct Error {
    pub(crate) message: String,
    pub(crate) data: String,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Error {
    /// Create a new instance of `Error`.
    pub fn new<S: Into<String>>(message: S, data: String) -> Self {
        Self {
            message: message.into(),
            data,
            start: 0,
            end: 0,
        }
    }

    /// Create a new instance of `Error` with an inclusive 1-indexed byte
    /// range into the source.
    pub fn with_range<S: Into<String>>(message: S, data: String, start: usize, end: usize) -> Self {
        Self {
            message: message.into(),
            data,
            start,
            end,
        }
    }

    /// Get a reference to the error's message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Get a reference to the error's data. This is usually the text that
    /// `weft-parser` has found to be syntactically incorrect.
    pub fn data(&self) -> &str {
        self.data.as_ref()
    }

    /// First byte of the offending range, 1-indexed.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last byte of the offending range, 1-indexed inclusive.
    pub fn end(&self) -> usize {
        self.end
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ERROR@{}:{} {:?} {}",
            self.start, self.end, self.message, self.data
        )
    }
}
