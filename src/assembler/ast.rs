//! This AST describes a parsed function body in the WebAssembly text
//! instruction format, restricted to the subset the assembler accepts.
//!
//! A function body is a flat sequence of mnemonics, some of which take
//! a single integer operand. There are no nested blocks, labels, calls
//! or globals.
//!
//! Supported Instructions:
//!
//! ```wat
//! local.get N            ;; push local N
//! local.set N            ;; pop into local N
//! i32.const V            ;; push the 32-bit constant V
//! i32.add
//! i32.trunc_sat_f32_s    ;; f32 -> i32, saturating
//! i64.extend_i32_s       ;; i32 -> i64
//! i64.trunc_sat_f64_s    ;; f64 -> i64, saturating
//! f32.convert_i32_s      ;; i32 -> f32
//! f64.convert_i64_s      ;; i64 -> f64
//! f32.div  f32.max  f32.mul  f32.sub
//! f64.div  f64.max  f64.mul  f64.sub
//! return
//! ```
//!
//! Mnemonics are case-sensitive and operands are base-10 integers.

use std::fmt;

/// A value type on the operand stack.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum NumericOperator {
    Add,
    Sub,
    Mul,
    Div,
    Max,
}

impl fmt::Display for NumericOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            NumericOperator::Add => "add",
            NumericOperator::Sub => "sub",
            NumericOperator::Mul => "mul",
            NumericOperator::Div => "div",
            NumericOperator::Max => "max",
        })
    }
}

/// A signed conversion between two value types.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Conversion {
    F32ToI32,
    I32ToI64,
    F64ToI64,
    I32ToF32,
    I64ToF64,
}

impl Conversion {
    /// The mnemonic that performs this conversion.
    pub fn mnemonic(&self) -> Mnemonic {
        match self {
            Conversion::F32ToI32 => Mnemonic::I32TruncSatF32S,
            Conversion::I32ToI64 => Mnemonic::I64ExtendI32S,
            Conversion::F64ToI64 => Mnemonic::I64TruncSatF64S,
            Conversion::I32ToF32 => Mnemonic::F32ConvertI32S,
            Conversion::I64ToF64 => Mnemonic::F64ConvertI64S,
        }
    }

    /// Returns the `(from, to)` value types of the conversion.
    pub fn types(&self) -> (ValueType, ValueType) {
        use ValueType::*;
        match self {
            Conversion::F32ToI32 => (F32, I32),
            Conversion::I32ToI64 => (I32, I64),
            Conversion::F64ToI64 => (F64, I64),
            Conversion::I32ToF32 => (I32, F32),
            Conversion::I64ToF64 => (I64, F64),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BlockOperator {
    Return,
}

impl fmt::Display for BlockOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BlockOperator::Return => f.write_str("return"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum LocalOp {
    Get,
    Set,
}

/// One decoded operation and its payload.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Op {
    Local(LocalOp, i32),
    Const(i32, ValueType),
    Numeric(NumericOperator, ValueType),
    Convert(Conversion),
    Block(BlockOperator, Option<String>),
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Op::Local(LocalOp::Get, idx) => write!(f, "local.get {}", idx),
            Op::Local(LocalOp::Set, idx) => write!(f, "local.set {}", idx),
            Op::Const(value, ty) => write!(f, "{}.const {}", ty, value),
            Op::Numeric(op, ty) => write!(f, "{}.{}", ty, op),
            Op::Convert(conv) => write!(f, "{}", conv.mnemonic()),
            Op::Block(op, None) => write!(f, "{}", op),
            Op::Block(op, Some(label)) => write!(f, "{} {}", op, label),
        }
    }
}

/// An operation together with where it came from.
///
/// `code_pos` is the index of the mnemonic token in the parsed
/// token stream and `line` the source line handed to the parser.
/// Both exist for diagnostics only.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub op: Op,
    pub code_pos: usize,
    pub line: usize,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.op)
    }
}

/// Every mnemonic the assembler recognizes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Mnemonic {
    LocalGet,
    LocalSet,
    I32Const,
    I32Add,
    I32TruncSatF32S,
    I64ExtendI32S,
    I64TruncSatF64S,
    F32ConvertI32S,
    F64ConvertI64S,
    F32Div,
    F32Max,
    F32Mul,
    F32Sub,
    F64Div,
    F64Max,
    F64Mul,
    F64Sub,
    Return,
}

impl Mnemonic {
    pub const ALL: [Mnemonic; 18] = [
        Mnemonic::LocalGet,
        Mnemonic::LocalSet,
        Mnemonic::I32Const,
        Mnemonic::I32Add,
        Mnemonic::I32TruncSatF32S,
        Mnemonic::I64ExtendI32S,
        Mnemonic::I64TruncSatF64S,
        Mnemonic::F32ConvertI32S,
        Mnemonic::F64ConvertI64S,
        Mnemonic::F32Div,
        Mnemonic::F32Max,
        Mnemonic::F32Mul,
        Mnemonic::F32Sub,
        Mnemonic::F64Div,
        Mnemonic::F64Max,
        Mnemonic::F64Mul,
        Mnemonic::F64Sub,
        Mnemonic::Return,
    ];

    /// Looks up a token by its exact text.
    pub fn from_token(tok: &str) -> Option<Mnemonic> {
        use Mnemonic::*;
        match tok {
            "local.get"           => Some(LocalGet),
            "local.set"           => Some(LocalSet),
            "i32.const"           => Some(I32Const),
            "i32.add"             => Some(I32Add),
            "i32.trunc_sat_f32_s" => Some(I32TruncSatF32S),
            "i64.extend_i32_s"    => Some(I64ExtendI32S),
            "i64.trunc_sat_f64_s" => Some(I64TruncSatF64S),
            "f32.convert_i32_s"   => Some(F32ConvertI32S),
            "f64.convert_i64_s"   => Some(F64ConvertI64S),
            "f32.div"             => Some(F32Div),
            "f32.max"             => Some(F32Max),
            "f32.mul"             => Some(F32Mul),
            "f32.sub"             => Some(F32Sub),
            "f64.div"             => Some(F64Div),
            "f64.max"             => Some(F64Max),
            "f64.mul"             => Some(F64Mul),
            "f64.sub"             => Some(F64Sub),
            "return"              => Some(Return),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use Mnemonic::*;
        match self {
            LocalGet        => "local.get",
            LocalSet        => "local.set",
            I32Const        => "i32.const",
            I32Add          => "i32.add",
            I32TruncSatF32S => "i32.trunc_sat_f32_s",
            I64ExtendI32S   => "i64.extend_i32_s",
            I64TruncSatF64S => "i64.trunc_sat_f64_s",
            F32ConvertI32S  => "f32.convert_i32_s",
            F64ConvertI64S  => "f64.convert_i64_s",
            F32Div          => "f32.div",
            F32Max          => "f32.max",
            F32Mul          => "f32.mul",
            F32Sub          => "f32.sub",
            F64Div          => "f64.div",
            F64Max          => "f64.max",
            F64Mul          => "f64.mul",
            F64Sub          => "f64.sub",
            Return          => "return",
        }
    }

    /// Whether the mnemonic consumes the following token as an integer operand.
    pub fn takes_operand(&self) -> bool {
        matches!(self, Mnemonic::LocalGet | Mnemonic::LocalSet | Mnemonic::I32Const)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonic_table_is_consistent() {
        for m in Mnemonic::ALL.iter() {
            assert_eq!(Mnemonic::from_token(m.as_str()), Some(*m));
        }
    }

    #[test]
    fn test_mnemonic_is_case_sensitive() {
        assert_eq!(Mnemonic::from_token("I32.ADD"), None);
        assert_eq!(Mnemonic::from_token("Return"), None);
        assert_eq!(Mnemonic::from_token(" return"), None);
        assert_eq!(Mnemonic::from_token("call"), None);
        assert_eq!(Mnemonic::from_token("global.get"), None);
    }

    #[test]
    fn test_operand_arity() {
        let with_operand: Vec<_> = Mnemonic::ALL.iter().filter(|m| m.takes_operand()).collect();
        assert_eq!(with_operand, vec![&Mnemonic::LocalGet, &Mnemonic::LocalSet, &Mnemonic::I32Const]);
    }

    #[test]
    fn test_conversion_mnemonics() {
        assert_eq!(Conversion::F32ToI32.mnemonic(), Mnemonic::I32TruncSatF32S);
        assert_eq!(Conversion::I64ToF64.mnemonic(), Mnemonic::F64ConvertI64S);
        assert_eq!(Conversion::I32ToI64.types(), (ValueType::I32, ValueType::I64));
    }

    #[test]
    fn test_op_display() {
        assert_eq!(Op::Local(LocalOp::Get, 0).to_string(), "local.get 0");
        assert_eq!(Op::Local(LocalOp::Set, 3).to_string(), "local.set 3");
        assert_eq!(Op::Const(-7, ValueType::I32).to_string(), "i32.const -7");
        assert_eq!(Op::Numeric(NumericOperator::Max, ValueType::F64).to_string(), "f64.max");
        assert_eq!(Op::Convert(Conversion::F64ToI64).to_string(), "i64.trunc_sat_f64_s");
        assert_eq!(Op::Block(BlockOperator::Return, None).to_string(), "return");
    }
}
