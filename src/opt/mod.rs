//! Optimization passes.

use crate::compiler::Compiler;

pub mod const_fold;
pub mod peephole;
pub mod rm_unused;

pub use const_fold::ConstantFolding;
pub use peephole::Peephole;
pub use rm_unused::RmUnused;

/// A correctness-preserving graph mutation. Passes request analyses through
/// the compiler context and must leave SSA invariants intact; a pass that
/// mutates the graph invalidates the cached analyses.
pub trait Pass {
    fn name(&self) -> &'static str;
    fn run(&mut self, ctx: &mut Compiler);
}
