//! Relaxers decide what a node's stored value becomes when a new path reaches it.
use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::move_path::MovePath;
use crate::search::{scalar_relax, EdgeComparator, EdgeRelaxer};
use crate::N_SMALLVEC_SIZE;

/// The non-dominated paths kept for one node by [MinMpMaxDistanceRelaxer], ordered by the
/// search comparator.
pub type LongestCost = SmallVec<[MovePath; N_SMALLVEC_SIZE]>;

/// Plain Dijkstra relaxation: the candidate replaces the stored path only when strictly better.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestPathRelaxer;

impl EdgeRelaxer<MovePath, MovePath> for ShortestPathRelaxer {
    fn relax(
        &self,
        current: Option<&MovePath>,
        candidate: &MovePath,
        comparator: &dyn EdgeComparator<MovePath>,
    ) -> Option<MovePath> {
        scalar_relax(current, candidate, comparator)
    }
}

/// Like [ShortestPathRelaxer], but a path that leaves the unit prone or hull-down never
/// replaces one that leaves it standing, and always loses to one that does.
#[derive(Clone, Copy, Debug, Default)]
pub struct StanceAwareRelaxer;

impl EdgeRelaxer<MovePath, MovePath> for StanceAwareRelaxer {
    fn relax(
        &self,
        current: Option<&MovePath>,
        candidate: &MovePath,
        comparator: &dyn EdgeComparator<MovePath>,
    ) -> Option<MovePath> {
        match current {
            Some(best) if best.is_down() != candidate.is_down() => {
                if candidate.is_down() {
                    None
                } else {
                    Some(candidate.clone())
                }
            }
            _ => scalar_relax(current, candidate, comparator),
        }
    }
}

/// Keeps every path to a node that no other kept path dominates. `a` dominates `b` when it
/// spends no more movement points and covers at least as many hexes, unless `a` leaves the
/// unit down while `b` does not. For units other than infantry, paths ending in a backward
/// step and paths ending in a forward step never dominate each other.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinMpMaxDistanceRelaxer {
    pub infantry: bool,
}

impl MinMpMaxDistanceRelaxer {
    pub fn new(infantry: bool) -> MinMpMaxDistanceRelaxer {
        MinMpMaxDistanceRelaxer { infantry }
    }

    pub fn dominates(&self, a: &MovePath, b: &MovePath) -> bool {
        if a.is_down() && !b.is_down() {
            return false;
        }
        if !self.infantry && a.is_last_step_backwards() != b.is_last_step_backwards() {
            return false;
        }
        a.mp_used() <= b.mp_used() && a.hexes_moved() >= b.hexes_moved()
    }
}

impl EdgeRelaxer<LongestCost, MovePath> for MinMpMaxDistanceRelaxer {
    fn relax(
        &self,
        current: Option<&LongestCost>,
        candidate: &MovePath,
        comparator: &dyn EdgeComparator<MovePath>,
    ) -> Option<LongestCost> {
        let Some(kept) = current else {
            let mut fresh = LongestCost::new();
            fresh.push(candidate.clone());
            return Some(fresh);
        };
        if kept.iter().any(|p| self.dominates(p, candidate)) {
            return None;
        }
        let mut next = kept
            .iter()
            .filter(|p| !self.dominates(candidate, p))
            .cloned()
            .collect::<LongestCost>();
        let at = next
            .iter()
            .position(|p| comparator.compare(candidate, p) == Ordering::Less)
            .unwrap_or(next.len());
        next.insert(at, candidate.clone());
        Some(next)
    }
}
