//! The compiler context: one graph, cached analyses, a pass list.

use crate::analysis::{DomTree, LinearOrder, Liveness, LoopTree, RegAlloc, Rpo};
use crate::ir::ProgramGraph;
use crate::opt::Pass;

/// Physical registers available to the allocator unless configured
/// otherwise.
pub const DEFAULT_NUM_PREGS: usize = 30;

/// Owns the [`ProgramGraph`] being compiled, caches analysis results and
/// drives the registered passes. One context per method; contexts are fully
/// independent.
pub struct Compiler {
    graph: ProgramGraph,
    num_pregs: usize,
    passes: Vec<Box<dyn Pass>>,
    rpo: Option<Rpo>,
    doms: Option<DomTree>,
    loops: Option<LoopTree>,
    linear: Option<LinearOrder>,
    liveness: Option<Liveness>,
    regalloc: Option<RegAlloc>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_pregs(DEFAULT_NUM_PREGS)
    }

    pub fn with_pregs(num_pregs: usize) -> Self {
        Self {
            graph: ProgramGraph::new(),
            num_pregs,
            passes: Vec::new(),
            rpo: None,
            doms: None,
            loops: None,
            linear: None,
            liveness: None,
            regalloc: None,
        }
    }

    pub fn graph(&self) -> &ProgramGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut ProgramGraph {
        &mut self.graph
    }

    pub fn num_pregs(&self) -> usize {
        self.num_pregs
    }

    /// Drops all cached analyses. Called by passes after mutating the graph.
    pub fn invalidate_analyses(&mut self) {
        self.rpo = None;
        self.doms = None;
        self.loops = None;
        self.linear = None;
        self.liveness = None;
        self.regalloc = None;
    }

    pub fn rpo(&mut self) -> &Rpo {
        if self.rpo.is_none() {
            self.rpo = Some(Rpo::compute(&self.graph));
        }
        self.rpo.as_ref().unwrap()
    }

    pub fn dom_tree(&mut self) -> &DomTree {
        if self.doms.is_none() {
            self.doms = Some(DomTree::compute(&self.graph));
        }
        self.doms.as_ref().unwrap()
    }

    pub fn loop_tree(&mut self) -> &LoopTree {
        if self.loops.is_none() {
            self.dom_tree();
            let doms = self.doms.as_ref().unwrap();
            self.loops = Some(LoopTree::compute(&self.graph, doms));
        }
        self.loops.as_ref().unwrap()
    }

    pub fn linear_order(&mut self) -> &LinearOrder {
        if self.linear.is_none() {
            self.rpo();
            self.loop_tree();
            let rpo = self.rpo.as_ref().unwrap();
            let loops = self.loops.as_ref().unwrap();
            self.linear = Some(LinearOrder::compute(&self.graph, rpo, loops));
        }
        self.linear.as_ref().unwrap()
    }

    pub fn liveness(&mut self) -> &Liveness {
        if self.liveness.is_none() {
            self.linear_order();
            let linear = self.linear.as_ref().unwrap();
            let loops = self.loops.as_ref().unwrap();
            self.liveness = Some(Liveness::compute(&self.graph, linear, loops));
        }
        self.liveness.as_ref().unwrap()
    }

    pub fn reg_alloc(&mut self) -> &RegAlloc {
        if self.regalloc.is_none() {
            self.liveness();
            let liveness = self.liveness.as_ref().unwrap();
            self.regalloc = Some(RegAlloc::compute(liveness, self.num_pregs));
        }
        self.regalloc.as_ref().unwrap()
    }

    pub fn register_pass<P: Pass + 'static>(&mut self, pass: P) {
        self.passes.push(Box::new(pass));
    }

    /// Runs every registered pass once, in registration order.
    pub fn run_all_passes(&mut self) {
        let mut passes = std::mem::take(&mut self.passes);
        for pass in &mut passes {
            pass.run(self);
        }
        self.passes = passes;
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/t_compiler.rs"]
mod tests;
