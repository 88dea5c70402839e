//! Loop detection and the loop tree.
//!
//! Back-edges are found on the DFS path, loops are keyed by their header
//! block, reducibility requires every latch to be dominated by the header,
//! and reducible loop bodies are discovered by walking the CFG backwards
//! from the latches. A sentinel root loop owns every block that is outside
//! all real loops, so containment is total.

use std::cell::RefCell;
use std::fmt;

use crate::graph::tree::KeyedTree;
use crate::graph::{visit_dfs_conditional, visit_postorder, Direction};
use crate::ir::{BlockId, ProgramGraph};

use super::doms::DomTree;

/// Key of a loop in the tree: a real loop is identified by its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopId {
    Root,
    Header(BlockId),
}

impl fmt::Display for LoopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopId::Root => f.write_str("root"),
            LoopId::Header(bb) => write!(f, "{}", bb.0),
        }
    }
}

#[derive(Debug)]
pub struct LoopInfo {
    header: Option<BlockId>,
    latches: Vec<BlockId>,
    /// Member blocks in forward DFS order, header first. For an outer loop
    /// this includes the blocks of nested loops. Empty for irreducible
    /// loops; for the root loop it holds the blocks outside all loops.
    blocks: Vec<BlockId>,
    reducible: bool,
}

impl Default for LoopInfo {
    fn default() -> Self {
        Self {
            header: None,
            latches: Vec::new(),
            blocks: Vec::new(),
            reducible: true,
        }
    }
}

impl LoopInfo {
    pub fn header(&self) -> Option<BlockId> {
        self.header
    }

    pub fn latches(&self) -> &[BlockId] {
        &self.latches
    }

    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    pub fn is_reducible(&self) -> bool {
        self.reducible
    }

    fn add_back_edge(&mut self, latch: BlockId, header: BlockId) {
        debug_assert!(
            self.header.is_none() || self.header == Some(header),
            "back edge must lead to the loop header"
        );
        if self.header.is_none() {
            self.header = Some(header);
        }
        self.latches.push(latch);
    }
}

pub struct LoopTree {
    tree: KeyedTree<LoopId, LoopInfo>,
    /// Innermost owning loop header per block; `None` = outside all loops.
    loop_ids: Vec<Option<BlockId>>,
}

impl LoopTree {
    pub fn compute(graph: &ProgramGraph, doms: &DomTree) -> Self {
        let entry = graph.entry().expect("entry block must be specified");
        let num_blocks = graph.num_blocks();

        // Back-edges: a successor already on the DFS path is a loop header.
        // The path marks are shared between the pre and post callbacks.
        let on_path = RefCell::new(vec![false; num_blocks]);
        let mut back_edges: Vec<(BlockId, BlockId)> = Vec::new();
        visit_dfs_conditional(
            graph,
            entry,
            Direction::Forward,
            |bb| {
                let mut on_path = on_path.borrow_mut();
                on_path[bb.index()] = true;
                for succ in graph.block(bb).successors() {
                    if on_path[succ.index()] {
                        back_edges.push((bb, succ));
                    }
                }
                true
            },
            |bb| on_path.borrow_mut()[bb.index()] = false,
        );

        let mut tree: KeyedTree<LoopId, LoopInfo> = KeyedTree::new();
        let mut loop_ids: Vec<Option<BlockId>> = vec![None; num_blocks];

        for &(latch, header) in &back_edges {
            let key = LoopId::Header(header);
            tree.insert(key);
            let info = tree.get_mut(key);
            info.add_back_edge(latch, header);
            info.reducible = info.reducible && doms.is_dominator_of(header, latch);
            loop_ids[header.index()] = Some(header);
            loop_ids[latch.index()] = Some(header);
        }

        // Headers in DFS post-order, so inner loops are populated before
        // the loops enclosing them.
        let mut headers: Vec<BlockId> = Vec::new();
        visit_postorder(graph, entry, Direction::Forward, |bb| {
            if tree.contains(LoopId::Header(bb)) {
                headers.push(bb);
            }
        });

        for &header in &headers {
            let key = LoopId::Header(header);
            if !tree.get(key).reducible {
                continue;
            }
            let latches = tree.get(key).latches.clone();

            let mut discovered = vec![false; num_blocks];
            discovered[header.index()] = true;
            for &latch in &latches {
                visit_dfs_conditional(
                    graph,
                    latch,
                    Direction::Backward,
                    |bb| {
                        if discovered[bb.index()] {
                            return false;
                        }
                        discovered[bb.index()] = true;
                        match loop_ids[bb.index()] {
                            Some(owner) if owner != header => {
                                // A block of an already-populated loop:
                                // that loop nests inside this one.
                                let inner = LoopId::Header(owner);
                                if !tree.has_parent(inner) {
                                    tree.link(key, inner);
                                }
                            }
                            None => loop_ids[bb.index()] = Some(header),
                            _ => {}
                        }
                        true
                    },
                    |_| {},
                );
            }

            // Member list in forward DFS order, header first.
            let mut members = Vec::new();
            visit_dfs_conditional(
                graph,
                header,
                Direction::Forward,
                |bb| {
                    if !discovered[bb.index()] {
                        return false;
                    }
                    members.push(bb);
                    true
                },
                |_| {},
            );
            tree.get_mut(key).blocks = members;
        }

        tree.insert(LoopId::Root);
        tree.get_mut(LoopId::Root).reducible = false;
        tree.set_root(LoopId::Root);
        let keys: Vec<LoopId> = tree.keys().collect();
        for key in keys {
            if key != LoopId::Root && !tree.has_parent(key) {
                tree.link(LoopId::Root, key);
            }
        }
        for bb in graph.block_ids() {
            if loop_ids[bb.index()].is_none() {
                tree.get_mut(LoopId::Root).blocks.push(bb);
            }
        }

        Self { tree, loop_ids }
    }

    /// Header of the innermost loop containing `bb`, if any.
    pub fn loop_id_of(&self, bb: BlockId) -> Option<BlockId> {
        self.loop_ids[bb.index()]
    }

    pub fn is_in_loop(&self, bb: BlockId) -> bool {
        self.loop_ids[bb.index()].is_some()
    }

    pub fn is_header(&self, bb: BlockId) -> bool {
        self.loop_ids[bb.index()] == Some(bb)
    }

    /// Loop info for the innermost loop containing `bb` (the root loop if
    /// `bb` is outside all loops).
    pub fn loop_of(&self, bb: BlockId) -> &LoopInfo {
        match self.loop_ids[bb.index()] {
            Some(header) => self.tree.get(LoopId::Header(header)),
            None => self.tree.get(LoopId::Root),
        }
    }

    pub fn contains_header(&self, header: BlockId) -> bool {
        self.tree.contains(LoopId::Header(header))
    }

    pub fn loop_by_header(&self, header: BlockId) -> &LoopInfo {
        self.tree.get(LoopId::Header(header))
    }

    pub fn parent_of(&self, id: LoopId) -> Option<LoopId> {
        self.tree.parent(id)
    }

    /// Number of loops, the root included.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn tree(&self) -> &KeyedTree<LoopId, LoopInfo> {
        &self.tree
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_loops.rs"]
mod tests;
