//! The code building side of the assembler.
//!
//! The parser only decides *which* operation a token stands for.
//! Materializing it, and any stack bookkeeping that goes with that,
//! is the job of a `CodeBuilder`.

use thiserror::Error;

use super::ast::*;

/// A fault raised by a `CodeBuilder` while emitting an instruction.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("{message}")]
pub struct BuildError {
    pub message: String,
}

impl BuildError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        BuildError { message: message.into() }
    }
}

/// Receives the operations decoded by the parser, in order.
///
/// `code_pos` is the index of the mnemonic token and `line` the
/// source line of the function body.
pub trait CodeBuilder {
    /// Drops everything built so far, including stack bookkeeping.
    fn reset(&mut self);

    fn add_local_instruction(&mut self, op: LocalOp, idx: i32, code_pos: usize, line: usize) -> Result<(), BuildError>;

    fn add_const_instruction(&mut self, value: i32, ty: ValueType, code_pos: usize, line: usize) -> Result<(), BuildError>;

    fn add_numeric_instruction(&mut self, op: NumericOperator, ty: ValueType, code_pos: usize, line: usize) -> Result<(), BuildError>;

    fn add_convert_instruction(&mut self, conv: Conversion, code_pos: usize, line: usize) -> Result<(), BuildError>;

    fn add_block_instruction(&mut self, op: BlockOperator, label: Option<&str>, code_pos: usize, line: usize) -> Result<(), BuildError>;
}

/// A `CodeBuilder` that records the instruction sequence as is.
#[derive(Clone, Default, Debug)]
pub struct InstructionList {
    instructions: Vec<Instruction>,
}

impl InstructionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    #[inline]
    fn push(&mut self, op: Op, code_pos: usize, line: usize) -> Result<(), BuildError> {
        self.instructions.push(Instruction { op, code_pos, line });
        Ok(())
    }
}

impl CodeBuilder for InstructionList {
    fn reset(&mut self) {
        self.instructions.clear();
    }

    fn add_local_instruction(&mut self, op: LocalOp, idx: i32, code_pos: usize, line: usize) -> Result<(), BuildError> {
        self.push(Op::Local(op, idx), code_pos, line)
    }

    fn add_const_instruction(&mut self, value: i32, ty: ValueType, code_pos: usize, line: usize) -> Result<(), BuildError> {
        self.push(Op::Const(value, ty), code_pos, line)
    }

    fn add_numeric_instruction(&mut self, op: NumericOperator, ty: ValueType, code_pos: usize, line: usize) -> Result<(), BuildError> {
        self.push(Op::Numeric(op, ty), code_pos, line)
    }

    fn add_convert_instruction(&mut self, conv: Conversion, code_pos: usize, line: usize) -> Result<(), BuildError> {
        self.push(Op::Convert(conv), code_pos, line)
    }

    fn add_block_instruction(&mut self, op: BlockOperator, label: Option<&str>, code_pos: usize, line: usize) -> Result<(), BuildError> {
        self.push(Op::Block(op, label.map(str::to_owned)), code_pos, line)
    }
}
