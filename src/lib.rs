//! Text assembler and structured type table for a WebAssembly module emitter.
//!
//! The [`assembler`] lowers the whitespace-delimited text form of a function
//! body into an ordered instruction sequence. The [`module`] side interns the
//! structured types an emitter references and tracks the type-section index
//! each one is eventually placed at.

#[macro_use]
extern crate log;

pub mod assembler;
pub mod module;
