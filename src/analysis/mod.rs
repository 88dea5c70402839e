//! Derived, read-only views of the program graph.
//!
//! Each analysis is a plain struct built by a `compute` constructor; results
//! are side tables keyed by block or instruction id. The compiler context
//! caches one instance of each and rebuilds on demand after invalidation.

pub mod doms;
pub mod linear;
pub mod liveness;
pub mod loops;
pub mod regalloc;
pub mod rpo;

pub use doms::DomTree;
pub use linear::LinearOrder;
pub use liveness::{LiveRange, Liveness};
pub use loops::{LoopId, LoopInfo, LoopTree};
pub use regalloc::{Location, RegAlloc};
pub use rpo::Rpo;
