//! Space movement as a search: every node is a hex and facing reached by some mix of turns
//! and thrust.
use std::cmp::Ordering;

use crate::adjacency::newtonian::NewtonianAdjacencyMap;
use crate::cost::{MpCost, ShortestPathRelaxer};
use crate::move_finder::{MovePathFinder, MovePathLegalityFilter, MovePathLengthFilter};
use crate::move_path::{MoveContext, MovePath};
use crate::search::SearchOutcome;

pub struct NewtonianAerospacePathFinder<'a> {
    finder: MovePathFinder<'a, MovePath>,
}

impl<'a> NewtonianAerospacePathFinder<'a> {
    /// Paths spending at most the unit's max thrust.
    pub fn new(ctx: MoveContext<'a>) -> NewtonianAerospacePathFinder<'a> {
        NewtonianAerospacePathFinder::with_budget(ctx, ctx.unit.run_mp)
    }

    pub fn with_budget(ctx: MoveContext<'a>, max_thrust: u32) -> NewtonianAerospacePathFinder<'a> {
        let mut finder =
            MovePathFinder::new(ctx, ShortestPathRelaxer, NewtonianAdjacencyMap { ctx }, MpCost);
        finder.add_filter(MovePathLegalityFilter::new(ctx));
        finder.add_filter(MovePathLengthFilter { max_mp: max_thrust });
        NewtonianAerospacePathFinder { finder }
    }

    pub fn run(&mut self, start: MovePath) -> SearchOutcome {
        self.finder.run(start)
    }

    pub fn finder(&self) -> &MovePathFinder<'a, MovePath> {
        &self.finder
    }

    /// Paths that stay on the map, plus the single shortest way off it.
    pub fn all_computed_paths_uncategorized(&self) -> Vec<MovePath> {
        let mut paths = self.finder.all_computed_paths_uncategorized();
        let off_board = self.off_board_path();
        paths.retain(|p| !p.flies_off_board());
        paths.extend(off_board);
        paths
    }

    /// The fewest-step path off the map, cheaper first on ties.
    pub fn off_board_path(&self) -> Option<MovePath> {
        self.finder
            .all_computed_paths_uncategorized()
            .into_iter()
            .filter(MovePath::flies_off_board)
            .min_by(|a, b| match a.len().cmp(&b.len()) {
                Ordering::Equal => a.mp_used().cmp(&b.mp_used()),
                o => o,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GridBoard;
    use crate::hex::{Coords, NORTH};
    use crate::move_path::StepType;
    use crate::rules::StandardRules;
    use crate::unit::{AeroState, Unit, UnitKind};

    fn ship(position: Coords, thrust: u32) -> Unit {
        let aero = AeroState {
            current_thrust: thrust,
            structural_integrity: 6,
            ..AeroState::default()
        };
        Unit::aerospace(1, UnitKind::Aerodyne, position, NORTH, thrust, aero)
    }

    #[test]
    fn thrust_moves_within_budget() {
        let board = GridBoard::new(9, 9);
        let unit = ship(Coords::new(4, 4), 3);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let mut finder = NewtonianAerospacePathFinder::new(ctx);
        assert_eq!(finder.run(ctx.start_path()), SearchOutcome::Exhausted);
        let paths = finder.all_computed_paths_uncategorized();
        assert!(paths.iter().all(|p| p.mp_used() <= 3));
        let ahead = finder.finder().computed_path(Coords::new(4, 1)).unwrap();
        assert_eq!(ahead.step_types(), vec![StepType::Thrust; 3]);
        assert!(finder.off_board_path().is_none());
    }

    #[test]
    fn one_way_off_the_map() {
        let board = GridBoard::new(9, 9);
        let unit = ship(Coords::new(4, 1), 3);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let mut finder = NewtonianAerospacePathFinder::new(ctx);
        finder.run(ctx.start_path());
        let off = finder.off_board_path().unwrap();
        assert_eq!(off.step_types(), vec![StepType::Thrust, StepType::FlyOff]);
        assert_eq!(
            finder
                .all_computed_paths_uncategorized()
                .iter()
                .filter(|p| p.flies_off_board())
                .count(),
            1
        );
    }
}
