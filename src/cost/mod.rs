//! Frontier orderings over movement paths, and the greedy descent filter.
pub mod relax;

use std::cmp::Ordering;

use crate::hex::{self, Coords};
use crate::move_path::{MoveContext, MovePath};
use crate::search::{EdgeComparator, EdgeFilter};

pub use relax::{LongestCost, MinMpMaxDistanceRelaxer, ShortestPathRelaxer, StanceAwareRelaxer};

/// Fewer movement points first, then fewer steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct MpCost;

impl EdgeComparator<MovePath> for MpCost {
    fn compare(&self, a: &MovePath, b: &MovePath) -> Ordering {
        a.mp_used()
            .cmp(&b.mp_used())
            .then_with(|| a.len().cmp(&b.len()))
    }
}

/// Closer to `destination` first, then fewer movement points.
#[derive(Clone, Copy, Debug)]
pub struct GreedyComparator {
    pub destination: Coords,
}

impl EdgeComparator<MovePath> for GreedyComparator {
    fn compare(&self, a: &MovePath, b: &MovePath) -> Ordering {
        let da = a.final_coords().distance(self.destination);
        let db = b.final_coords().distance(self.destination);
        da.cmp(&db).then_with(|| a.mp_used().cmp(&b.mp_used()))
    }
}

/// Keeps steps that strictly close in on `destination`, plus steps that stay in the hex
/// (facing changes and the like).
#[derive(Clone, Copy, Debug)]
pub struct GreedyFilter {
    pub destination: Coords,
}

impl EdgeFilter<MovePath> for GreedyFilter {
    fn should_stay(&self, path: &MovePath) -> bool {
        let Some(last) = path.last_step() else {
            return true;
        };
        if !last.kind.changes_hex() {
            return true;
        }
        let before = path.previous_state().coords.distance(self.destination);
        path.final_coords().distance(self.destination) < before
    }
}

/// Movement points spent plus an estimate of the movement points still needed to reach
/// `destination`.
#[derive(Clone, Copy)]
pub struct AStarComparator<'a> {
    pub ctx: MoveContext<'a>,
    pub destination: Coords,
    /// Whether the path is expected to back into the destination.
    pub backward: bool,
}

impl<'a> AStarComparator<'a> {
    pub fn new(ctx: MoveContext<'a>, destination: Coords, backward: bool) -> AStarComparator<'a> {
        AStarComparator {
            ctx,
            destination,
            backward,
        }
    }

    /// Turns still needed, read off the node the path is recorded under so that every path
    /// into a node gets the same estimate. When backing, the node facing is the body facing
    /// after a turn but the travel direction after a backward step, so the smaller count of
    /// the two readings is used.
    fn facing_estimate(&self, path: &MovePath) -> u32 {
        let node = path.search_node();
        if path.is_jumping() || node.coords == self.destination {
            return 0;
        }
        let ahead = node.coords.direction(self.destination);
        let mut turns = hex::facing_difference(node.facing, ahead);
        if self.backward {
            turns = turns.min(hex::facing_difference(node.facing, hex::opposite(ahead)));
        }
        let mut turns = turns as u32;
        if self.ctx.unit.can_shift {
            turns = turns.saturating_sub(1);
        }
        if !node.coords.on_spine(self.destination) {
            turns += 1;
        }
        turns
    }

    fn level_estimate(&self, path: &MovePath) -> u32 {
        if path.is_jumping() {
            return 0;
        }
        let level = |c: Coords| self.ctx.board.hex(c).map_or(0, |h| h.level);
        (level(self.destination) - level(path.final_coords())).unsigned_abs()
    }

    /// Estimated total cost of `path` once extended to the destination.
    pub fn estimate(&self, path: &MovePath) -> u32 {
        if self.ctx.unit.is_aerodyne() {
            return path.mp_used() + path.hexes_moved();
        }
        path.mp_used()
            + path.final_coords().distance(self.destination)
            + self.facing_estimate(path)
            + self.level_estimate(path)
    }
}

impl EdgeComparator<MovePath> for AStarComparator<'_> {
    fn compare(&self, a: &MovePath, b: &MovePath) -> Ordering {
        self.estimate(a)
            .cmp(&self.estimate(b))
            .then_with(|| a.mp_used().cmp(&b.mp_used()))
    }
}

/// Fewer movement points first, then more hexes covered.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinMpMaxDistance;

impl EdgeComparator<MovePath> for MinMpMaxDistance {
    fn compare(&self, a: &MovePath, b: &MovePath) -> Ordering {
        a.mp_used()
            .cmp(&b.mp_used())
            .then_with(|| b.hexes_moved().cmp(&a.hexes_moved()))
    }
}

/// Ordering for aerospace paths: fewer hexes flown, then less thrust, then more hexes flown
/// straight (which keeps later turns available).
#[derive(Clone, Copy, Debug, Default)]
pub struct AeroMultiPath;

impl EdgeComparator<MovePath> for AeroMultiPath {
    fn compare(&self, a: &MovePath, b: &MovePath) -> Ordering {
        a.hexes_moved()
            .cmp(&b.hexes_moved())
            .then_with(|| a.mp_used().cmp(&b.mp_used()))
            .then_with(|| b.straight_hexes().cmp(&a.straight_hexes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GridBoard, Hex};
    use crate::hex::{NORTH, SOUTH};
    use crate::move_path::StepType;
    use crate::rules::StandardRules;
    use crate::unit::Unit;

    #[test]
    fn mp_then_length() {
        let board = GridBoard::new(6, 6);
        let unit = Unit::mek(1, Coords::new(2, 2), NORTH, 5, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let forward = ctx.start_path().with_step(&ctx, StepType::Forwards);
        let turn = ctx.start_path().with_step(&ctx, StepType::TurnLeft);
        assert_eq!(MpCost.compare(&forward, &turn), Ordering::Equal);
        let two = forward.with_step(&ctx, StepType::Forwards);
        assert_eq!(MpCost.compare(&forward, &two), Ordering::Less);
        assert_eq!(MinMpMaxDistance.compare(&forward, &turn), Ordering::Less);
    }

    #[test]
    fn greedy_filter_only_closes_in() {
        let board = GridBoard::new(6, 6);
        let unit = Unit::mek(1, Coords::new(2, 3), NORTH, 5, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let filter = GreedyFilter {
            destination: Coords::new(2, 0),
        };
        assert!(filter.should_stay(&ctx.start_path().with_step(&ctx, StepType::Forwards)));
        assert!(!filter.should_stay(&ctx.start_path().with_step(&ctx, StepType::Backwards)));
        assert!(filter.should_stay(&ctx.start_path().with_step(&ctx, StepType::TurnRight)));
    }

    #[test]
    fn a_star_estimates() {
        let mut board = GridBoard::new(6, 6);
        board.set_hex(Coords::new(2, 0), Hex::clear(2)).unwrap();
        let unit = Unit::mek(1, Coords::new(2, 3), NORTH, 5, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let astar = AStarComparator::new(ctx, Coords::new(2, 0), false);
        // three hexes straight ahead on the spine, two levels up
        assert_eq!(astar.estimate(&ctx.start_path()), 5);
        let turned = ctx.start_path().with_step(&ctx, StepType::TurnRight);
        assert_eq!(astar.estimate(&turned), 1 + 3 + 1 + 2);

        let backing = AStarComparator::new(ctx, Coords::new(2, 0), true);
        let reversed = Unit::mek(2, Coords::new(2, 3), SOUTH, 5, 0);
        let rctx = MoveContext::new(&board, &StandardRules, &reversed);
        assert_eq!(backing.estimate(&rctx.start_path()), 5);
    }

    #[test]
    fn a_star_estimate_is_shared_by_a_node() {
        let board = GridBoard::new(6, 6);
        let facing_away = Unit::mek(1, Coords::new(2, 4), SOUTH, 5, 0);
        let away = MoveContext::new(&board, &StandardRules, &facing_away);
        let backed = away.start_path().with_step(&away, StepType::Backwards);
        let facing_on = Unit::mek(2, Coords::new(2, 4), NORTH, 5, 0);
        let on = MoveContext::new(&board, &StandardRules, &facing_on);
        let walked = on.start_path().with_step(&on, StepType::Forwards);
        assert_eq!(backed.search_node(), walked.search_node());

        let backing = AStarComparator::new(away, Coords::new(2, 0), true);
        // one hex spent, three straight ahead, no turns
        assert_eq!(backing.estimate(&backed), 4);
        assert_eq!(backing.estimate(&walked), 4);
        assert_eq!(backing.compare(&backed, &walked), Ordering::Equal);
    }
}
