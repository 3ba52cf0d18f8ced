//! The kernel specialized to movement: nodes are hexes with a facing, elevation and
//! velocity, edges are [MovePath]s, and results are read back per hex.
use std::cmp::Ordering;
use std::slice;

use itertools::Itertools;
use log::debug;

use crate::cost::{LongestCost, MpCost};
use crate::hex::Coords;
use crate::move_path::{MoveContext, MoveNode, MovePath, StepType};
use crate::search::{
    AdjacencyMap, EdgeComparator, EdgeDestination, EdgeFilter, EdgeRelaxer, PathFinder,
    SearchOutcome, StopCondition,
};
use crate::FxIndexMap;

/// Final node of a path, see [MovePath::search_node].
#[derive(Clone, Copy, Debug, Default)]
pub struct MovePathDestination;

impl EdgeDestination<MoveNode, MovePath> for MovePathDestination {
    fn destination(&self, path: &MovePath) -> MoveNode {
        path.search_node()
    }
}

/// Drops paths whose last step the rules do not allow.
#[derive(Clone, Copy)]
pub struct MovePathLegalityFilter<'a> {
    pub ctx: MoveContext<'a>,
    /// Also hold the path to one turn's movement points.
    pub within_turn: bool,
}

impl<'a> MovePathLegalityFilter<'a> {
    pub fn new(ctx: MoveContext<'a>) -> MovePathLegalityFilter<'a> {
        MovePathLegalityFilter {
            ctx,
            within_turn: true,
        }
    }

    /// For routes spanning several turns.
    pub fn multi_turn(ctx: MoveContext<'a>) -> MovePathLegalityFilter<'a> {
        MovePathLegalityFilter {
            ctx,
            within_turn: false,
        }
    }
}

impl EdgeFilter<MovePath> for MovePathLegalityFilter<'_> {
    fn should_stay(&self, path: &MovePath) -> bool {
        if self.within_turn {
            self.ctx.is_legal(path)
        } else {
            self.ctx.is_step_legal(path)
        }
    }
}

/// Drops paths that spend more than `max_mp` movement points.
#[derive(Clone, Copy, Debug)]
pub struct MovePathLengthFilter {
    pub max_mp: u32,
}

impl EdgeFilter<MovePath> for MovePathLengthFilter {
    fn should_stay(&self, path: &MovePath) -> bool {
        path.mp_used() <= self.max_mp
    }
}

/// Cost values that are made of paths.
pub trait ComputedPaths {
    fn paths(&self) -> &[MovePath];
}

impl ComputedPaths for MovePath {
    fn paths(&self) -> &[MovePath] {
        slice::from_ref(self)
    }
}

impl ComputedPaths for LongestCost {
    fn paths(&self) -> &[MovePath] {
        self.as_slice()
    }
}

pub struct MovePathFinder<'a, C> {
    ctx: MoveContext<'a>,
    finder: PathFinder<'a, MoveNode, C, MovePath>,
    aggregation: Box<dyn EdgeComparator<MovePath> + 'a>,
    /// Seed an unmoved standing unit with the one- and two-turn facings as well, since the
    /// step generators only turn after the path has started.
    pub add_starting_turns: bool,
}

impl<'a, C: ComputedPaths> MovePathFinder<'a, C> {
    pub fn new(
        ctx: MoveContext<'a>,
        relaxer: impl EdgeRelaxer<C, MovePath> + 'a,
        adjacency: impl AdjacencyMap<MovePath> + 'a,
        comparator: impl EdgeComparator<MovePath> + 'a,
    ) -> MovePathFinder<'a, C> {
        MovePathFinder::from_finder(
            ctx,
            PathFinder::new(MovePathDestination, relaxer, adjacency, comparator),
        )
    }

    pub fn from_finder(
        ctx: MoveContext<'a>,
        finder: PathFinder<'a, MoveNode, C, MovePath>,
    ) -> MovePathFinder<'a, C> {
        MovePathFinder {
            ctx,
            finder,
            aggregation: Box::new(MpCost),
            add_starting_turns: false,
        }
    }

    /// Comparator used to pick one path per hex out of the paths arriving with different
    /// facings. Defaults to [MpCost].
    pub fn with_aggregation(mut self, comparator: impl EdgeComparator<MovePath> + 'a) -> Self {
        self.aggregation = Box::new(comparator);
        self
    }

    pub fn with_starting_turns(mut self) -> Self {
        self.add_starting_turns = true;
        self
    }

    pub fn ctx(&self) -> &MoveContext<'a> {
        &self.ctx
    }

    pub fn add_filter(&mut self, filter: impl EdgeFilter<MovePath> + 'a) {
        self.finder.add_filter(filter);
    }

    pub fn add_stop_condition(&mut self, condition: impl StopCondition<MovePath> + 'a) {
        self.finder.add_stop_condition(condition);
    }

    pub fn set_max_frontier_size(&mut self, limit: Option<usize>) {
        self.finder.set_max_frontier_size(limit);
    }

    pub fn finder(&self) -> &PathFinder<'a, MoveNode, C, MovePath> {
        &self.finder
    }

    fn starting_edges(&self, start: MovePath) -> Vec<MovePath> {
        if !self.add_starting_turns || !start.is_empty() || start.is_down() {
            return vec![start];
        }
        let ctx = &self.ctx;
        let left = start.with_step(ctx, StepType::TurnLeft);
        let right = start.with_step(ctx, StepType::TurnRight);
        let turns = [
            left.with_step(ctx, StepType::TurnLeft),
            right.with_step(ctx, StepType::TurnRight),
            left,
            right,
        ];
        let mut edges = vec![start];
        edges.extend(turns.into_iter().filter(|p| self.finder.passes_filters(p)));
        edges
    }

    pub fn run(&mut self, start: MovePath) -> SearchOutcome {
        let edges = self.starting_edges(start);
        self.finder.run(edges)
    }

    /// Runs from several starting paths at once; they compete for nodes like any other path.
    pub fn run_all(&mut self, starts: impl IntoIterator<Item = MovePath>) -> SearchOutcome {
        let edges = starts
            .into_iter()
            .flat_map(|s| self.starting_edges(s))
            .collect::<Vec<_>>();
        self.finder.run(edges)
    }

    /// Value stored for `node`; a bare [CoordsWithFacing](crate::CoordsWithFacing) stands
    /// for the node at ground level and rest.
    pub fn cost_of(&self, node: impl Into<MoveNode>) -> Option<&C> {
        self.finder.cost_of(&node.into())
    }

    /// The best path ending in `coords`, whatever its facing.
    pub fn computed_path(&self, coords: Coords) -> Option<MovePath> {
        self.finder
            .costs()
            .iter()
            .filter(|(node, _)| node.coords == coords)
            .flat_map(|(_, cost)| cost.paths())
            .min_by(|a, b| self.aggregation.compare(a, b))
            .cloned()
    }

    /// One best path per reached hex.
    pub fn all_computed_paths(&self) -> FxIndexMap<Coords, MovePath> {
        let mut best = FxIndexMap::<Coords, MovePath>::default();
        for path in self.finder.costs().values().flat_map(|c| c.paths()) {
            match best.get(&path.final_coords()) {
                Some(kept) if self.aggregation.compare(path, kept) != Ordering::Less => {}
                _ => {
                    best.insert(path.final_coords(), path.clone());
                }
            }
        }
        debug!("{} hexes reached by unit {}", best.len(), self.ctx.unit.id);
        best
    }

    /// Every stored path, all facings and non-dominated alternatives included.
    pub fn all_computed_paths_uncategorized(&self) -> Vec<MovePath> {
        self.finder
            .costs()
            .values()
            .flat_map(|c| c.paths().iter().cloned())
            .collect()
    }

    /// Per reached node, the path covering the most hexes (the cheaper one on ties), longest
    /// first.
    pub fn longest_computed_paths(&self) -> Vec<MovePath> {
        self.finder
            .costs()
            .values()
            .filter_map(|c| {
                c.paths().iter().min_by(|a, b| {
                    b.hexes_moved()
                        .cmp(&a.hexes_moved())
                        .then_with(|| a.mp_used().cmp(&b.mp_used()))
                })
            })
            .sorted_by(|a, b| {
                b.hexes_moved()
                    .cmp(&a.hexes_moved())
                    .then_with(|| a.mp_used().cmp(&b.mp_used()))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::NextStepsAdjacencyMap;
    use crate::board::GridBoard;
    use crate::cost::ShortestPathRelaxer;
    use crate::hex::{CoordsWithFacing, NORTH, SOUTH};
    use crate::rules::StandardRules;
    use crate::unit::Unit;

    #[test]
    fn backward_arrival_is_mirrored() {
        let board = GridBoard::new(5, 5);
        let unit = Unit::mek(1, Coords::new(2, 2), NORTH, 4, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let back = ctx.start_path().with_step(&ctx, StepType::Backwards);
        assert_eq!(
            MovePathDestination.destination(&back),
            MoveNode::new(Coords::new(2, 3), SOUTH, 0, 0)
        );
        let ahead = ctx.start_path().with_step(&ctx, StepType::Forwards);
        assert_eq!(MovePathDestination.destination(&ahead).facing, NORTH);
    }

    fn walker() -> Unit {
        Unit::mek(1, Coords::new(2, 4), NORTH, 3, 0)
    }

    #[test]
    fn aggregates_facings_per_hex() {
        let board = GridBoard::new(5, 7);
        let unit = walker();
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let mut finder: MovePathFinder<MovePath> = MovePathFinder::new(
            ctx,
            ShortestPathRelaxer,
            NextStepsAdjacencyMap::new(ctx),
            MpCost,
        )
        .with_starting_turns();
        finder.add_filter(MovePathLegalityFilter::new(ctx));
        finder.add_filter(MovePathLengthFilter { max_mp: 3 });
        assert_eq!(finder.run(ctx.start_path()), SearchOutcome::Exhausted);

        // every facing is stored for the starting hex, one path is handed out
        let home = Coords::new(2, 4);
        let facings = finder
            .finder()
            .costs()
            .keys()
            .filter(|node| node.coords == home)
            .map(|node| node.facing)
            .sorted()
            .collect::<Vec<_>>();
        assert_eq!(facings, vec![0, 1, 2, 3, 4, 5]);
        assert!(finder.computed_path(home).unwrap().is_empty());
        assert_eq!(
            finder
                .cost_of(CoordsWithFacing::new(home, SOUTH))
                .unwrap()
                .mp_used(),
            3
        );

        let all = finder.all_computed_paths();
        assert_eq!(all[&home].mp_used(), 0);
        assert_eq!(all[&Coords::new(2, 3)].mp_used(), 1);
        assert!(finder.all_computed_paths_uncategorized().len() > all.len());
        assert!(all.values().all(|p| p.mp_used() <= 3));
        let longest = finder.longest_computed_paths();
        assert_eq!(longest[0].hexes_moved(), 3);
        assert_eq!(longest[0].final_coords(), Coords::new(2, 1));
    }

    #[test]
    fn aggregation_comparator_picks_the_facing() {
        let board = GridBoard::new(5, 7);
        let unit = walker();
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let mut finder: MovePathFinder<MovePath> = MovePathFinder::new(
            ctx,
            ShortestPathRelaxer,
            NextStepsAdjacencyMap::new(ctx),
            MpCost,
        )
        .with_starting_turns()
        .with_aggregation(|a: &MovePath, b: &MovePath| b.final_facing().cmp(&a.final_facing()));
        finder.add_filter(MovePathLegalityFilter::new(ctx));
        finder.add_filter(MovePathLengthFilter { max_mp: 3 });
        finder.run(ctx.start_path());
        let home = finder.computed_path(Coords::new(2, 4)).unwrap();
        assert_eq!(home.final_facing(), 5);
        assert_eq!(home.step_types(), vec![StepType::TurnLeft]);
    }
}
