//! Linear-scan register allocation.
//!
//! Intervals come straight from [`Liveness`]; instructions with empty
//! ranges get no location. All orderings break ties on instruction id, so
//! the allocation is reproducible.

use std::collections::{BTreeSet, HashMap};

use crate::ir::InstId;

use super::liveness::Liveness;

/// Machine location assigned to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Reg(u32),
    Slot(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Interval {
    inst: InstId,
    begin: usize,
    end: usize,
}

// The active set is ordered by interval end, so expiry pops from the front
// and the spill candidate sits at the back.
impl Ord for Interval {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.end, self.begin, self.inst).cmp(&(other.end, other.begin, other.inst))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

pub struct RegAlloc {
    regs: Vec<Option<u32>>,
    slots: HashMap<InstId, u32>,
}

impl RegAlloc {
    pub fn compute(liveness: &Liveness, num_regs: usize) -> Self {
        let mut intervals: Vec<Interval> = liveness
            .ranges()
            .iter()
            .enumerate()
            .filter(|(_, range)| !range.is_empty())
            .map(|(idx, range)| Interval {
                inst: InstId(idx as u32),
                begin: range.begin,
                end: range.end,
            })
            .collect();
        intervals.sort_by_key(|iv| (iv.begin, iv.end, iv.inst));

        let mut alloc = Self {
            regs: vec![None; liveness.ranges().len()],
            slots: HashMap::new(),
        };

        // LIFO pool, lowest register on top.
        let mut free_pool: Vec<u32> = (0..num_regs as u32).rev().collect();
        let mut active: BTreeSet<Interval> = BTreeSet::new();
        let mut next_slot = 0u32;

        for interval in intervals {
            alloc.expire_old_intervals(&interval, &mut active, &mut free_pool);

            if let Some(reg) = free_pool.pop() {
                alloc.regs[interval.inst.index()] = Some(reg);
                active.insert(interval);
            } else {
                alloc.spill_at_interval(&interval, &mut active, &mut next_slot);
            }
        }

        alloc
    }

    fn expire_old_intervals(
        &mut self,
        interval: &Interval,
        active: &mut BTreeSet<Interval>,
        free_pool: &mut Vec<u32>,
    ) {
        let expired: Vec<Interval> = active
            .iter()
            .take_while(|old| old.end <= interval.begin)
            .copied()
            .collect();
        for old in expired {
            active.remove(&old);
            let reg = self.regs[old.inst.index()].expect("active interval without register");
            free_pool.push(reg);
        }
    }

    fn spill_at_interval(
        &mut self,
        interval: &Interval,
        active: &mut BTreeSet<Interval>,
        next_slot: &mut u32,
    ) {
        let spill = active.last().copied();
        match spill {
            // The longest-living active interval loses its register.
            Some(spill) if spill.end > interval.end => {
                let reg = self.regs[spill.inst.index()]
                    .take()
                    .expect("active interval without register");
                self.slots.insert(spill.inst, *next_slot);
                *next_slot += 1;
                active.remove(&spill);
                self.regs[interval.inst.index()] = Some(reg);
                active.insert(*interval);
            }
            _ => {
                self.slots.insert(interval.inst, *next_slot);
                *next_slot += 1;
            }
        }
    }

    /// Location of `inst`, `None` when its liveness is empty.
    pub fn location(&self, inst: InstId) -> Option<Location> {
        if let Some(&slot) = self.slots.get(&inst) {
            return Some(Location::Slot(slot));
        }
        self.regs[inst.index()].map(Location::Reg)
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_regalloc.rs"]
mod tests;
