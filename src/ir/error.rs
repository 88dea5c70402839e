//! Builder-facing errors.

use thiserror::Error;

use super::types::OpType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("operand type mismatch: got {got:?}, expected {expected:?}")]
    OperandTypeMismatch {
        got: Vec<OpType>,
        expected: Vec<OpType>,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
