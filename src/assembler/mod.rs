//! The Assembler module is in charge of taking the
//! text form of a single function body and producing
//! an instruction sequence from it.
//!
//! It does this by splitting the text into whitespace
//! delimited tokens and walking them with a cursor,
//! handing each recognized mnemonic to a `CodeBuilder`.
//!
//! One `Parser` drives one function body at a time. It
//! may be reused, but only sequentially: every call to
//! `parse` resets what the previous call built.

pub mod ast;
pub mod builder;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;

pub use self::builder::{BuildError, CodeBuilder, InstructionList};
pub use self::error::{AsmError, AsmErrorKind};
pub use self::parser::Parser;
