//! Linear block order for the register allocator.
//!
//! Walks the RPO, and on meeting a reducible loop header emits the whole
//! loop body contiguously, recursing into nested loops. Irreducible loops
//! get no clustering; their blocks fall out at their RPO positions.

use crate::ir::{BlockId, ProgramGraph};

use super::loops::LoopTree;
use super::rpo::Rpo;

pub struct LinearOrder {
    blocks: Vec<BlockId>,
}

impl LinearOrder {
    pub fn compute(graph: &ProgramGraph, rpo: &Rpo, loops: &LoopTree) -> Self {
        let mut order = Self { blocks: Vec::new() };
        let mut visited = vec![false; graph.num_blocks()];
        for &bb in rpo.blocks() {
            if visited[bb.index()] {
                continue;
            }
            if loops.is_header(bb) && loops.loop_of(bb).is_reducible() {
                order.linearize_loop(bb, loops, &mut visited);
            } else {
                order.blocks.push(bb);
                visited[bb.index()] = true;
            }
        }
        order
    }

    fn linearize_loop(&mut self, header: BlockId, loops: &LoopTree, visited: &mut [bool]) {
        let members: Vec<BlockId> = loops.loop_by_header(header).blocks().to_vec();
        for bb in members {
            if visited[bb.index()] {
                continue;
            }
            // Nested loop headers are emitted with their own loop.
            if loops.is_header(bb) && bb != header {
                self.linearize_loop(bb, loops, visited);
                continue;
            }
            self.blocks.push(bb);
            visited[bb.index()] = true;
        }
    }

    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_linear.rs"]
mod tests;
