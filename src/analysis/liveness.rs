//! Live numbers and live ranges.
//!
//! Instructions get even live numbers along the linear order; all phis of a
//! block share the block's opening number. Ranges are computed in one
//! reverse pass over the linear order with the loop-header extension, a
//! sound over-approximation with exact starts at definitions. Instructions
//! that never become live keep the empty range (0, 0).

use std::collections::HashSet;

use crate::ir::{BlockId, InstId, ProgramGraph};

use super::linear::LinearOrder;
use super::loops::LoopTree;

/// Closed interval in the live-number scale.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LiveRange {
    pub begin: usize,
    pub end: usize,
}

impl LiveRange {
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    fn extend(&mut self, begin: usize, end: usize) {
        self.begin = self.begin.min(begin);
        self.end = self.end.max(end);
    }
}

pub struct Liveness {
    ranges: Vec<LiveRange>,
    live_numbers: Vec<usize>,
    block_ranges: Vec<(usize, usize)>,
}

impl Liveness {
    pub fn compute(graph: &ProgramGraph, linear: &LinearOrder, loops: &LoopTree) -> Self {
        let mut ranges = vec![LiveRange::default(); graph.num_insts()];
        let mut live_numbers = vec![0usize; graph.num_insts()];
        let mut block_ranges = vec![(0usize, 0usize); graph.num_blocks()];

        let mut n = 0usize;
        for &bb in linear.blocks() {
            let begin = n;
            for inst in graph.block_insts(bb) {
                if graph.inst(inst).is_phi() {
                    live_numbers[inst.index()] = begin;
                } else {
                    n += 2;
                    live_numbers[inst.index()] = n;
                }
            }
            n += 2;
            block_ranges[bb.index()] = (begin, n);
        }

        let mut live_in: Vec<HashSet<InstId>> = vec![HashSet::new(); graph.num_blocks()];

        for &bb in linear.blocks().iter().rev() {
            let (bb_begin, bb_end) = block_ranges[bb.index()];

            let mut live: HashSet<InstId> = HashSet::new();
            for succ in graph.block(bb).successors() {
                live.extend(live_in[succ.index()].iter().copied());
                // A phi input is live out of the predecessor it flows from.
                for inst in graph.block_insts(succ) {
                    if !graph.inst(inst).is_phi() {
                        continue;
                    }
                    if let Some(value) = graph.inst(inst).phi_value_for(bb) {
                        live.insert(value);
                    }
                }
            }

            for &id in &live {
                ranges[id.index()].extend(bb_begin, bb_end);
            }

            for inst in graph.block_insts_rev(bb) {
                if live.remove(&inst) {
                    ranges[inst.index()].begin = live_numbers[inst.index()];
                }
                if graph.inst(inst).is_phi() {
                    continue;
                }
                for input in graph.inst(inst).inputs() {
                    live.insert(input);
                    ranges[input.index()].extend(bb_begin, live_numbers[inst.index()]);
                }
            }

            if loops.is_header(bb) && loops.loop_of(bb).is_reducible() {
                // Everything live into the loop stays live to its end.
                let loop_end = loops
                    .loop_by_header(bb)
                    .blocks()
                    .iter()
                    .map(|m| block_ranges[m.index()].1)
                    .max()
                    .unwrap_or(bb_end);
                for &id in &live {
                    ranges[id.index()].extend(bb_begin, loop_end);
                }
            }

            live_in[bb.index()] = live;
        }

        Self {
            ranges,
            live_numbers,
            block_ranges,
        }
    }

    pub fn live_range(&self, inst: InstId) -> LiveRange {
        self.ranges[inst.index()]
    }

    pub fn ranges(&self) -> &[LiveRange] {
        &self.ranges
    }

    pub fn live_number(&self, inst: InstId) -> usize {
        self.live_numbers[inst.index()]
    }

    pub fn block_range(&self, bb: BlockId) -> (usize, usize) {
        self.block_ranges[bb.index()]
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_liveness.rs"]
mod tests;
