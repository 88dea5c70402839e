//! Dominator analysis.
//!
//! Per-node dominator sets are computed by reachability: a DFS from the
//! entry that avoids N reaches exactly the blocks N does not dominate.
//! Quadratic, which is fine at method size and much simpler than
//! Lengauer-Tarjan. Immediate dominators are derived from the sets and
//! materialized as tree links rooted at the entry.
//!
//! A node is not a member of its own dominator set; `dominators(entry)` is
//! empty.

use std::collections::HashSet;

use crate::graph::tree::KeyedTree;
use crate::graph::{visit_dfs, visit_dfs_conditional, DirectedGraph, Direction};
use crate::ir::{BlockId, ProgramGraph};

pub struct DomTree {
    tree: KeyedTree<BlockId, HashSet<BlockId>>,
}

impl DomTree {
    pub fn compute(graph: &ProgramGraph) -> Self {
        let entry = graph.entry().expect("entry block must be specified");

        let mut all_nodes = Vec::new();
        visit_dfs(graph, entry, Direction::Forward, |bb| all_nodes.push(bb));

        let mut tree: KeyedTree<BlockId, HashSet<BlockId>> = KeyedTree::new();
        for &node in &all_nodes {
            tree.insert(node);
        }

        for &dominator in &all_nodes {
            // Everything still reachable when walks detour around
            // `dominator` is not dominated by it.
            let mut path: HashSet<BlockId> = HashSet::new();
            visit_dfs_conditional(
                graph,
                entry,
                Direction::Forward,
                |bb| {
                    if bb == dominator {
                        return false;
                    }
                    path.insert(bb);
                    true
                },
                |_| {},
            );
            path.insert(dominator);
            for &node in &all_nodes {
                if !path.contains(&node) {
                    tree.get_mut(node).insert(dominator);
                }
            }
        }

        let mut doms = Self { tree };
        for &node in &all_nodes {
            if node == entry {
                continue;
            }
            let idom = doms.derive_immediate_dom(node);
            if idom != node {
                doms.tree.link(idom, node);
            }
        }
        doms.tree.set_root(entry);
        doms
    }

    /// The dominator of `node` that is dominated by every other dominator
    /// of `node`.
    fn derive_immediate_dom(&self, node: BlockId) -> BlockId {
        let mut idom = node;
        for &dom in self.tree.get(node) {
            if idom == node || self.is_dominator_of(idom, dom) {
                idom = dom;
            }
        }
        idom
    }

    pub fn is_dominator_of(&self, dominator: BlockId, dominated: BlockId) -> bool {
        self.tree.contains(dominated) && self.tree.get(dominated).contains(&dominator)
    }

    pub fn dominators(&self, node: BlockId) -> &HashSet<BlockId> {
        self.tree.get(node)
    }

    pub fn immediate_dominator(&self, node: BlockId) -> Option<BlockId> {
        self.tree.parent(node)
    }

    pub fn contains(&self, node: BlockId) -> bool {
        self.tree.contains(node)
    }

    pub fn root(&self) -> Option<BlockId> {
        self.tree.root()
    }

    pub fn tree(&self) -> &KeyedTree<BlockId, HashSet<BlockId>> {
        &self.tree
    }

    pub fn children(&self, node: BlockId) -> &[BlockId] {
        self.tree.children(node)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl DirectedGraph for DomTree {
    type Node = BlockId;

    fn successors(&self, node: BlockId) -> Vec<BlockId> {
        self.tree.successors(node)
    }

    fn predecessors(&self, node: BlockId) -> Vec<BlockId> {
        self.tree.predecessors(node)
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_doms.rs"]
mod tests;
