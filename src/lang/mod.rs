//! Main module for the `.lang` parsing pipeline.

pub mod ast;
pub mod edit;
pub mod lexing;
pub mod parsing;
pub mod scanner;
pub mod testing;
pub mod tree;
