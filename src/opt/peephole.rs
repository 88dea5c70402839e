//! Algebraic peephole rewrites.
//!
//! Walks blocks in RPO; on a successful rewrite the walk restarts at the
//! returned instruction. Rules:
//!
//! - `x & x -> x`, `x & 0 -> 0`, `x & ~0 -> x`
//! - `x - x -> 0`, `x - 0 -> x`
//! - `(x >> c1) >> c2 -> x >> ((c1 + c2) mod 64)` for constant shifts
//! - `x / c -> x >> log2(c)` for a positive power-of-two constant

use crate::compiler::Compiler;
use crate::ir::{BinOp, InstId, InstKind, IrBuilder, OpType};

use super::Pass;

pub struct Peephole;

impl Pass for Peephole {
    fn name(&self) -> &'static str {
        "peephole"
    }

    fn run(&mut self, ctx: &mut Compiler) {
        let order = ctx.rpo().blocks().to_vec();
        let mut changed = false;
        let mut builder = IrBuilder::new(ctx.graph_mut());

        for bb in order {
            let mut cur = builder.graph().block(bb).first_inst();
            while let Some(inst) = cur {
                if builder.graph().inst(inst).next().is_none() {
                    break;
                }
                match try_rules(&mut builder, inst) {
                    Some(next) => {
                        changed = true;
                        cur = next;
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

/// Applies the first matching rule. Returns the instruction the walk should
/// continue from, or `None` if nothing matched.
fn try_rules(builder: &mut IrBuilder<'_>, inst: InstId) -> Option<Option<InstId>> {
    let op = match *builder.graph().inst(inst).kind() {
        InstKind::Binop { op, ty: OpType::Int } => op,
        _ => return None,
    };
    let lhs = builder.graph().inst(inst).input(0)?;
    let rhs = builder.graph().inst(inst).input(1)?;

    match op {
        BinOp::And => {
            if lhs == rhs {
                return Some(forward_to(builder, inst, lhs));
            }
            if is_const(builder, lhs, 0) || is_const(builder, rhs, 0) {
                return Some(fold_to_const(builder, inst, 0));
            }
            if is_const(builder, rhs, !0u64 as i64) {
                return Some(forward_to(builder, inst, lhs));
            }
            if is_const(builder, lhs, !0u64 as i64) {
                return Some(forward_to(builder, inst, rhs));
            }
            None
        }
        BinOp::Sub => {
            if lhs == rhs {
                return Some(fold_to_const(builder, inst, 0));
            }
            if is_const(builder, rhs, 0) {
                return Some(forward_to(builder, inst, lhs));
            }
            None
        }
        BinOp::Shr => {
            // Collapse a chain of two constant shifts.
            let inner = builder.graph().inst(lhs);
            if !matches!(
                inner.kind(),
                InstKind::Binop {
                    op: BinOp::Shr,
                    ..
                }
            ) {
                return None;
            }
            let value = inner.input(0)?;
            let c1 = builder.graph().inst(inner.input(1)?).const_value()?;
            let c2 = builder.graph().inst(rhs).const_value()?;
            let shift = (c1 as u64).wrapping_add(c2 as u64) % 64;
            Some(rewrite_to_shr(builder, inst, value, shift as i64))
        }
        BinOp::Div => {
            let divisor = builder.graph().inst(rhs).const_value()?;
            if divisor <= 0 || !(divisor as u64).is_power_of_two() {
                return None;
            }
            let shift = (divisor as u64).trailing_zeros() as i64;
            Some(rewrite_to_shr(builder, inst, lhs, shift))
        }
        _ => None,
    }
}

fn is_const(builder: &IrBuilder<'_>, inst: InstId, value: i64) -> bool {
    builder.graph().inst(inst).const_value() == Some(value)
}

/// Redirects all users of `inst` to `value` and drops `inst`.
fn forward_to(builder: &mut IrBuilder<'_>, inst: InstId, value: InstId) -> Option<InstId> {
    builder.move_users(inst, value);
    builder.rm_instruction(inst)
}

fn fold_to_const(builder: &mut IrBuilder<'_>, inst: InstId, value: i64) -> Option<InstId> {
    let constant = builder.make_int_constant(value);
    Some(builder.replace(inst, constant))
}

/// Replaces `inst` with `value >> shift`, synthesizing the shift amount.
fn rewrite_to_shr(
    builder: &mut IrBuilder<'_>,
    inst: InstId,
    value: InstId,
    shift: i64,
) -> Option<InstId> {
    let amount = builder.make_int_constant(shift);
    builder.insert_before(amount, inst);
    let shr = builder.make_shr(value, amount);
    Some(builder.replace(inst, shr))
}

#[cfg(test)]
#[path = "../tests/opt/t_peephole.rs"]
mod tests;
