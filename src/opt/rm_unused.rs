//! Dead-instruction cleanup.
//!
//! Drops pure instructions with no users. The sweep never looks at a
//! block's tail, so an open block keeps its last computation even when
//! nothing uses it yet.

use crate::compiler::Compiler;
use crate::ir::IrBuilder;

use super::Pass;

pub struct RmUnused;

impl Pass for RmUnused {
    fn name(&self) -> &'static str {
        "rm-unused"
    }

    fn run(&mut self, ctx: &mut Compiler) {
        let blocks: Vec<_> = ctx.graph().block_ids().collect();
        let mut changed = false;
        let mut builder = IrBuilder::new(ctx.graph_mut());

        for bb in blocks {
            let mut cur = builder.graph().block(bb).first_inst();
            while let Some(inst) = cur {
                if builder.graph().inst(inst).next().is_none() {
                    break;
                }
                let dead = builder.graph().inst(inst).num_users() == 0
                    && !builder.graph().inst(inst).is_terminator();
                if dead {
                    cur = builder.rm_instruction(inst);
                    changed = true;
                } else {
                    cur = builder.graph().inst(inst).next();
                }
            }
        }

        if changed {
            ctx.invalidate_analyses();
        }
    }
}

#[cfg(test)]
#[path = "../tests/opt/t_rm_unused.rs"]
mod tests;
