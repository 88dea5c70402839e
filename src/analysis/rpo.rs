//! Reverse post-order of the reachable CFG.

use crate::graph::visit_rpo;
use crate::ir::{BlockId, ProgramGraph};

pub struct Rpo {
    blocks: Vec<BlockId>,
}

impl Rpo {
    pub fn compute(graph: &ProgramGraph) -> Self {
        let entry = graph.entry().expect("entry block must be specified");
        let mut blocks = Vec::with_capacity(graph.num_blocks());
        visit_rpo(graph, entry, |bb| blocks.push(bb));
        Self { blocks }
    }

    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_rpo.rs"]
mod tests;
