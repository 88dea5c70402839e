//! Intrusive doubly linked instruction list.
//!
//! The list holds only head/tail ids; prev/next links live inside the
//! instructions themselves, so removal and insertion are O(1) given a
//! handle. The arena (`&mut [Instruction]`) owns the storage; the list owns
//! the order.

use super::inst::Instruction;
use super::InstId;

#[derive(Debug, Default, Clone, Copy)]
pub struct InstList {
    head: Option<InstId>,
    tail: Option<InstId>,
}

impl InstList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<InstId> {
        self.head
    }

    pub fn tail(&self) -> Option<InstId> {
        self.tail
    }

    pub fn insert_tail(&mut self, arena: &mut [Instruction], node: InstId) {
        debug_assert!(detached(arena, node), "node already linked");
        match self.tail {
            None => {
                self.head = Some(node);
                self.tail = Some(node);
            }
            Some(tail) => {
                arena[tail.index()].set_next(Some(node));
                arena[node.index()].set_prev(Some(tail));
                self.tail = Some(node);
            }
        }
    }

    pub fn insert_head(&mut self, arena: &mut [Instruction], node: InstId) {
        debug_assert!(detached(arena, node), "node already linked");
        match self.head {
            None => {
                self.head = Some(node);
                self.tail = Some(node);
            }
            Some(head) => {
                arena[head.index()].set_prev(Some(node));
                arena[node.index()].set_next(Some(head));
                self.head = Some(node);
            }
        }
    }

    pub fn insert_after(&mut self, arena: &mut [Instruction], point: InstId, node: InstId) {
        match arena[point.index()].next() {
            None => self.insert_tail(arena, node),
            Some(next) => {
                debug_assert!(detached(arena, node), "node already linked");
                arena[next.index()].set_prev(Some(node));
                arena[point.index()].set_next(Some(node));
                arena[node.index()].set_next(Some(next));
                arena[node.index()].set_prev(Some(point));
            }
        }
    }

    pub fn insert_before(&mut self, arena: &mut [Instruction], point: InstId, node: InstId) {
        match arena[point.index()].prev() {
            None => self.insert_head(arena, node),
            Some(prev) => {
                debug_assert!(detached(arena, node), "node already linked");
                arena[prev.index()].set_next(Some(node));
                arena[point.index()].set_prev(Some(node));
                arena[node.index()].set_prev(Some(prev));
                arena[node.index()].set_next(Some(point));
            }
        }
    }

    pub fn remove_head(&mut self, arena: &mut [Instruction]) -> Option<InstId> {
        let head = self.head?;
        self.remove(arena, head);
        Some(head)
    }

    pub fn remove_tail(&mut self, arena: &mut [Instruction]) -> Option<InstId> {
        let tail = self.tail?;
        self.remove(arena, tail);
        Some(tail)
    }

    /// Unlinks `node` and returns its former successor (None if it was the
    /// tail).
    pub fn remove(&mut self, arena: &mut [Instruction], node: InstId) -> Option<InstId> {
        let prev = arena[node.index()].prev();
        let next = arena[node.index()].next();

        match prev {
            Some(p) => arena[p.index()].set_next(next),
            None => self.head = next,
        }
        match next {
            Some(n) => arena[n.index()].set_prev(prev),
            None => self.tail = prev,
        }

        arena[node.index()].set_prev(None);
        arena[node.index()].set_next(None);
        next
    }

    /// Instruction ids from head to tail.
    pub fn iter<'a>(&self, arena: &'a [Instruction]) -> impl Iterator<Item = InstId> + 'a {
        let mut cur = self.head;
        std::iter::from_fn(move || {
            let id = cur?;
            cur = arena[id.index()].next();
            Some(id)
        })
    }

    /// Instruction ids from tail to head.
    pub fn iter_rev<'a>(&self, arena: &'a [Instruction]) -> impl Iterator<Item = InstId> + 'a {
        let mut cur = self.tail;
        std::iter::from_fn(move || {
            let id = cur?;
            cur = arena[id.index()].prev();
            Some(id)
        })
    }

    pub fn len(&self, arena: &[Instruction]) -> usize {
        self.iter(arena).count()
    }
}

fn detached(arena: &[Instruction], node: InstId) -> bool {
    arena[node.index()].prev().is_none() && arena[node.index()].next().is_none()
}

#[cfg(test)]
#[path = "../tests/ir/t_list.rs"]
mod tests;
