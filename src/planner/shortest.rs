//! Cheapest paths: everywhere within a budget, or to a single hex.
use crate::adjacency::NextStepsAdjacencyMap;
use crate::cost::{AStarComparator, GreedyComparator, GreedyFilter, MpCost, StanceAwareRelaxer};
use crate::hex::Coords;
use crate::move_finder::{MovePathFinder, MovePathLegalityFilter, MovePathLengthFilter};
use crate::move_path::{MoveContext, MovePath, StepType};
use crate::search::DestinationReached;

pub type ShortestPathFinder<'a> = MovePathFinder<'a, MovePath>;

/// The cheapest legal path to every node within `max_mp` movement points.
pub fn one_to_all<'a>(
    ctx: MoveContext<'a>,
    max_mp: u32,
    step_type: StepType,
) -> ShortestPathFinder<'a> {
    let adjacency = NextStepsAdjacencyMap { ctx, step_type };
    let mut finder =
        MovePathFinder::new(ctx, StanceAwareRelaxer, adjacency, MpCost).with_starting_turns();
    finder.add_filter(MovePathLegalityFilter::new(ctx));
    finder.add_filter(MovePathLengthFilter { max_mp });
    finder
}

/// A* towards `destination`, over as many turns as it takes. The search stops once a path
/// into the destination hex is settled; read it with
/// [computed_path](MovePathFinder::computed_path).
pub fn a_star<'a>(
    ctx: MoveContext<'a>,
    destination: Coords,
    step_type: StepType,
) -> ShortestPathFinder<'a> {
    let adjacency = NextStepsAdjacencyMap { ctx, step_type };
    let comparator = AStarComparator::new(ctx, destination, step_type == StepType::Backwards);
    let mut finder = MovePathFinder::new(ctx, StanceAwareRelaxer, adjacency, comparator)
        .with_starting_turns();
    finder.add_filter(MovePathLegalityFilter::multi_turn(ctx));
    finder.add_stop_condition(DestinationReached::new([destination]));
    finder
}

/// Greedy descent towards `destination`: only steps that close the distance are explored,
/// so the result is fast but not necessarily cheapest, and may not exist at all.
pub fn greedy<'a>(
    ctx: MoveContext<'a>,
    destination: Coords,
    step_type: StepType,
) -> ShortestPathFinder<'a> {
    let adjacency = NextStepsAdjacencyMap { ctx, step_type };
    let comparator = GreedyComparator { destination };
    let mut finder = MovePathFinder::new(ctx, StanceAwareRelaxer, adjacency, comparator)
        .with_starting_turns();
    finder.add_filter(MovePathLegalityFilter::multi_turn(ctx));
    finder.add_filter(GreedyFilter { destination });
    finder.add_stop_condition(DestinationReached::new([destination]));
    finder
}
