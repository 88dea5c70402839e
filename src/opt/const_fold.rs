//! Constant folding.
//!
//! Integer instructions whose inputs are all constants are replaced by a
//! fresh constant. Add/Sub/Mul fold with wrapping signed arithmetic, Div
//! with truncation (a zero divisor is skipped, never a crash), and the bit
//! and shift operations in u64 with shift amounts masked mod 64.

use crate::compiler::Compiler;
use crate::ir::{BinOp, InstId, InstKind, IrBuilder, OpType, ProgramGraph};

use super::Pass;

pub struct ConstantFolding;

impl Pass for ConstantFolding {
    fn name(&self) -> &'static str {
        "const-fold"
    }

    fn run(&mut self, ctx: &mut Compiler) {
        let order = ctx.rpo().blocks().to_vec();
        let mut changed = false;
        let graph = ctx.graph_mut();
        let mut builder = IrBuilder::new(graph);

        for bb in order {
            let mut cur = builder.graph().block(bb).first_inst();
            while let Some(inst) = cur {
                // The tail is never a fold candidate.
                if builder.graph().inst(inst).next().is_none() {
                    break;
                }
                match fold(builder.graph(), inst) {
                    Some(value) => {
                        let folded = builder.make_int_constant(value);
                        cur = Some(builder.replace(inst, folded));
                        changed = true;
                    }
                    None => cur = builder.graph().inst(inst).next(),
                }
            }
        }

        if changed {
            ctx.invalidate_analyses();
        }
    }
}

/// Evaluates `inst` if it is a computable integer operation over constant
/// inputs.
fn fold(graph: &ProgramGraph, inst: InstId) -> Option<i64> {
    if graph.inst(inst).ty() != OpType::Int {
        return None;
    }
    match *graph.inst(inst).kind() {
        InstKind::Binop { op, .. } => {
            let lhs = graph.inst(graph.inst(inst).input(0)?).const_value()?;
            let rhs = graph.inst(graph.inst(inst).input(1)?).const_value()?;
            eval_binop(op, lhs, rhs)
        }
        InstKind::Not => {
            let value = graph.inst(graph.inst(inst).input(0)?).const_value()?;
            Some(!(value as u64) as i64)
        }
        _ => None,
    }
}

fn eval_binop(op: BinOp, lhs: i64, rhs: i64) -> Option<i64> {
    let value = match op {
        BinOp::Add => lhs.wrapping_add(rhs),
        BinOp::Sub => lhs.wrapping_sub(rhs),
        BinOp::Mul => lhs.wrapping_mul(rhs),
        BinOp::Div => {
            if rhs == 0 {
                return None;
            }
            lhs.wrapping_div(rhs)
        }
        BinOp::Mod => return None,
        BinOp::And => ((lhs as u64) & (rhs as u64)) as i64,
        BinOp::Or => ((lhs as u64) | (rhs as u64)) as i64,
        BinOp::Xor => ((lhs as u64) ^ (rhs as u64)) as i64,
        BinOp::Shl => (lhs as u64).wrapping_shl(rhs as u32) as i64,
        BinOp::Shr => (lhs as u64).wrapping_shr(rhs as u32) as i64,
    };
    Some(value)
}

#[cfg(test)]
#[path = "../tests/opt/t_const_fold.rs"]
mod tests;
