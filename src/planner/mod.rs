//! Planners: the kernel and the step generators assembled for concrete questions.
//!
//! Search-based planners are factory functions returning a configured
//! [MovePathFinder](crate::move_finder::MovePathFinder). Planners for unit types whose moves
//! are enumerated directly keep their results in a [PathSet] with the same accessors.
pub mod aero;
pub mod board_edge;
pub mod cluster;
pub mod destruction;
pub mod infantry;
pub mod longest;
pub mod newtonian;
pub mod prone;
pub mod shortest;
pub mod spheroid;

use std::cmp::Ordering;

use crate::cost::MpCost;
use crate::hex::Coords;
use crate::move_path::MovePath;
use crate::search::EdgeComparator;
use crate::FxIndexMap;

/// A flat list of computed paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: Vec<MovePath>,
}

impl PathSet {
    pub fn new(paths: Vec<MovePath>) -> PathSet {
        PathSet { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// The cheapest path ending in `coords`.
    pub fn computed_path(&self, coords: Coords) -> Option<MovePath> {
        self.paths
            .iter()
            .filter(|p| p.final_coords() == coords)
            .min_by(|a, b| MpCost.compare(a, b))
            .cloned()
    }

    /// The cheapest path per reached hex.
    pub fn all_computed_paths(&self) -> FxIndexMap<Coords, MovePath> {
        let mut best = FxIndexMap::<Coords, MovePath>::default();
        for path in &self.paths {
            match best.get(&path.final_coords()) {
                Some(kept) if MpCost.compare(path, kept) != Ordering::Less => {}
                _ => {
                    best.insert(path.final_coords(), path.clone());
                }
            }
        }
        best
    }

    pub fn all_computed_paths_uncategorized(&self) -> &[MovePath] {
        &self.paths
    }

    /// All paths, those covering the most hexes first.
    pub fn longest_computed_paths(&self) -> Vec<MovePath> {
        let mut paths = self.paths.clone();
        paths.sort_by(|a, b| {
            b.hexes_moved()
                .cmp(&a.hexes_moved())
                .then_with(|| a.mp_used().cmp(&b.mp_used()))
        });
        paths
    }
}

impl FromIterator<MovePath> for PathSet {
    fn from_iter<I: IntoIterator<Item = MovePath>>(iter: I) -> Self {
        PathSet::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GridBoard;
    use crate::hex::NORTH;
    use crate::move_path::{MoveContext, StepType};
    use crate::rules::StandardRules;
    use crate::unit::Unit;

    #[test]
    fn cheapest_path_per_hex() {
        let board = GridBoard::new(5, 5);
        let unit = Unit::mek(1, Coords::new(2, 2), NORTH, 6, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let start = ctx.start_path();
        let direct = start.with_step(&ctx, StepType::Forwards);
        let roundabout =
            start.with_steps(&ctx, &[StepType::Forwards, StepType::TurnLeft, StepType::TurnRight]);
        let set = [roundabout.clone(), start.clone(), direct.clone()]
            .into_iter()
            .collect::<PathSet>();
        assert_eq!(set.computed_path(Coords::new(2, 1)), Some(direct.clone()));
        assert_eq!(set.all_computed_paths().len(), 2);
        assert_eq!(set.longest_computed_paths()[0], direct);
        assert_eq!(set.all_computed_paths_uncategorized().len(), 3);
    }
}
