#![doc = include_str!("../README.md")]

mod error;
mod nesting;
mod parser;
mod syntax;
#[cfg(test)]
mod tests;

pub use crate::error::Error;
pub use crate::nesting::NestingTracker;
pub use crate::parser::Parser;
pub use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};
