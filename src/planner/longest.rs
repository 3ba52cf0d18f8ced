//! Paths that get as far as possible for their movement points. Every node keeps all paths
//! no other path beats on both cost and distance.
use crate::adjacency::NextStepsAdjacencyMap;
use crate::cost::{AeroMultiPath, LongestCost, MinMpMaxDistance, MinMpMaxDistanceRelaxer};
use crate::move_finder::{MovePathFinder, MovePathLegalityFilter, MovePathLengthFilter};
use crate::move_path::{MoveContext, StepType};

pub type LongestPathFinder<'a> = MovePathFinder<'a, LongestCost>;

pub fn ground<'a>(ctx: MoveContext<'a>, max_mp: u32, step_type: StepType) -> LongestPathFinder<'a> {
    let relaxer = MinMpMaxDistanceRelaxer::new(ctx.unit.is_infantry());
    let adjacency = NextStepsAdjacencyMap { ctx, step_type };
    let mut finder =
        MovePathFinder::new(ctx, relaxer, adjacency, MinMpMaxDistance).with_starting_turns();
    finder.add_filter(MovePathLegalityFilter::new(ctx));
    finder.add_filter(MovePathLengthFilter { max_mp });
    finder
}

/// Longest paths for aerospace units flying over a ground map, one step at a time.
pub fn aero<'a>(ctx: MoveContext<'a>, max_mp: u32) -> LongestPathFinder<'a> {
    let relaxer = MinMpMaxDistanceRelaxer::new(false);
    let mut finder = MovePathFinder::new(
        ctx,
        relaxer,
        NextStepsAdjacencyMap::new(ctx),
        AeroMultiPath,
    )
    .with_aggregation(AeroMultiPath);
    finder.add_filter(MovePathLegalityFilter::new(ctx));
    finder.add_filter(MovePathLengthFilter { max_mp });
    finder
}
