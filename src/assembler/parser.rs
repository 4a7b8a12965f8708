//! The Parser module walks the tokens from the lexer and hands every
//! recognized operation to a `CodeBuilder`.
use super::ast::*;
use super::builder::{CodeBuilder, InstructionList};
use super::cursor::TokenCursor;
use super::error::{AsmError, AsmErrorKind};
use super::lexer;

pub struct Parser<B: CodeBuilder = InstructionList> {
    builder: B,
}

impl Parser<InstructionList> {
    pub fn new() -> Self {
        Parser { builder: InstructionList::new() }
    }

    /// The instruction sequence built by the last call to `parse`.
    pub fn instructions(&self) -> &[Instruction] {
        self.builder.instructions()
    }
}

impl Default for Parser<InstructionList> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: CodeBuilder> Parser<B> {
    pub fn with_builder(builder: B) -> Self {
        Parser { builder }
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    pub fn into_builder(self) -> B {
        self.builder
    }

    /// Parses the text form of one function body.
    ///
    /// Everything built by a previous call is dropped first, even if that
    /// call failed. `line` is the source line the text came from and tags
    /// any error raised on the way.
    pub fn parse(&mut self, text: &str, line: usize) -> Result<(), AsmError> {
        self.builder.reset();
        self.run(text, line).map_err(|kind| kind.at_line(line))
    }

    fn run(&mut self, text: &str, line: usize) -> Result<(), AsmErrorKind> {
        let mut cursor = TokenCursor::new(lexer::tokenize(text));
        trace!("parsing {} token(s) from line {}", cursor.len(), line);

        while let Some((code_pos, tok)) = cursor.next() {
            let mnemonic = match Mnemonic::from_token(tok) {
                Some(m) => m,
                None => return Err(AsmErrorKind::UnknownToken(tok.to_owned())),
            };
            let op = operation(mnemonic, &mut cursor)?;
            trace!("{:>4}: {}", code_pos, op);
            self.emit(op, code_pos, line)?;
        }

        Ok(())
    }

    fn emit(&mut self, op: Op, code_pos: usize, line: usize) -> Result<(), AsmErrorKind> {
        let b = &mut self.builder;
        match op {
            Op::Local(local, idx)  => b.add_local_instruction(local, idx, code_pos, line)?,
            Op::Const(value, ty)   => b.add_const_instruction(value, ty, code_pos, line)?,
            Op::Numeric(num, ty)   => b.add_numeric_instruction(num, ty, code_pos, line)?,
            Op::Convert(conv)      => b.add_convert_instruction(conv, code_pos, line)?,
            Op::Block(block, label) => b.add_block_instruction(block, label.as_deref(), code_pos, line)?,
        }
        Ok(())
    }
}

/// Builds the operation for a mnemonic, consuming its operand if it has one.
fn operation(mnemonic: Mnemonic, cursor: &mut TokenCursor) -> Result<Op, AsmErrorKind> {
    use Mnemonic::*;
    use NumericOperator::*;
    use ValueType::*;

    let op = match mnemonic {
        LocalGet        => Op::Local(LocalOp::Get, cursor.int_operand()?),
        LocalSet        => Op::Local(LocalOp::Set, cursor.int_operand()?),
        I32Const        => Op::Const(cursor.int_operand()?, I32),
        I32Add          => Op::Numeric(Add, I32),
        I32TruncSatF32S => Op::Convert(Conversion::F32ToI32),
        I64ExtendI32S   => Op::Convert(Conversion::I32ToI64),
        I64TruncSatF64S => Op::Convert(Conversion::F64ToI64),
        F32ConvertI32S  => Op::Convert(Conversion::I32ToF32),
        F64ConvertI64S  => Op::Convert(Conversion::I64ToF64),
        F32Div          => Op::Numeric(Div, F32),
        F32Max          => Op::Numeric(Max, F32),
        F32Mul          => Op::Numeric(Mul, F32),
        F32Sub          => Op::Numeric(Sub, F32),
        F64Div          => Op::Numeric(Div, F64),
        F64Max          => Op::Numeric(Max, F64),
        F64Mul          => Op::Numeric(Mul, F64),
        F64Sub          => Op::Numeric(Sub, F64),
        Return          => Op::Block(BlockOperator::Return, None),
    };
    Ok(op)
}
