//! Expression engine for virtual variables: tokenizer, parser, and array
//! evaluator with profile broadcasting.
pub mod eval;
pub mod parser;
pub mod token;

pub use eval::evaluate;
pub use parser::{parse, Expr};
