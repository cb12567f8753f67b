//! Safe arithmetic expression evaluation
//!
//! Replaces dynamic evaluation of user-typed formulas with a tokenizer and a
//! recursive-descent evaluator that only understands numbers, `+ - * / ^`
//! and parentheses.

mod parser;
pub mod token;

pub use parser::evaluate;
pub use token::{Spanned, Token};
