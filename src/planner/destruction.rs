//! Routes that may shoot their way through woods and buildings.
//!
//! The search runs on a copy of the map where every levelable hex is already cleared, and
//! charges each such hex the movement the unit would lose while destroying it: the turns
//! needed to deal the hex's leveling factor in damage, times the unit's run MP.
use std::cmp::Ordering;

use fxhash::FxHashMap;
use itertools::Itertools;
use log::{debug, info};

use crate::adjacency::NextStepsAdjacencyMap;
use crate::board::{Board, Hex};
use crate::cost::ShortestPathRelaxer;
use crate::hex::Coords;
use crate::move_finder::{MovePathFinder, MovePathLegalityFilter};
use crate::move_path::{MoveContext, MovePath};
use crate::planner::cluster::{BoardClusterTracker, ClusterMovement};
use crate::search::{DestinationReached, EdgeComparator};
use crate::unit::Unit;

/// `base` with every levelable hex knocked down to rough ground.
pub struct LeveledBoard<'a> {
    base: &'a dyn Board,
    overrides: FxHashMap<Coords, Hex>,
}

impl<'a> LeveledBoard<'a> {
    pub fn new(base: &'a dyn Board) -> LeveledBoard<'a> {
        let overrides = (0..base.height())
            .flat_map(|y| (0..base.width()).map(move |x| Coords::new(x, y)))
            .filter_map(|c| {
                let hex = base.hex(c)?;
                hex.leveling_factor().map(|_| (c, hex.leveled()))
            })
            .collect();
        LeveledBoard { base, overrides }
    }

    pub fn leveled_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Board for LeveledBoard<'_> {
    fn width(&self) -> i32 {
        self.base.width()
    }

    fn height(&self) -> i32 {
        self.base.height()
    }

    fn hex(&self, coords: Coords) -> Option<&Hex> {
        self.overrides
            .get(&coords)
            .or_else(|| self.base.hex(coords))
    }
}

/// Movement points lost while `unit` levels the hex at `coords`, or 0 when there is nothing
/// to level.
pub fn leveling_cost(board: &dyn Board, unit: &Unit, coords: Coords) -> u32 {
    let Some(factor) = board.hex(coords).and_then(Hex::leveling_factor) else {
        return 0;
    };
    if unit.damage_per_turn == 0 {
        return u32::MAX;
    }
    factor.div_ceil(unit.damage_per_turn) * unit.run_mp
}

/// Levelable hexes entered by `path`. A unit that deals no damage levels nothing.
fn leveled_along(board: &dyn Board, unit: &Unit, path: &MovePath) -> Vec<Coords> {
    if unit.damage_per_turn == 0 {
        return Vec::new();
    }
    path.steps()
        .iter()
        .map(|s| s.state.coords)
        .filter(|c| board.hex(*c).is_some_and(|h| h.leveling_factor().is_some()))
        .unique()
        .collect()
}

/// Movement plus leveling cost, plus the distance to the nearest destination.
struct BulldozerComparator<'a> {
    base: &'a dyn Board,
    unit: &'a Unit,
    destinations: Vec<Coords>,
}

impl BulldozerComparator<'_> {
    fn cost(&self, path: &MovePath) -> u32 {
        leveled_along(self.base, self.unit, path)
            .into_iter()
            .fold(path.mp_used(), |total, c| {
                total.saturating_add(leveling_cost(self.base, self.unit, c))
            })
    }

    fn estimate(&self, path: &MovePath) -> u32 {
        let here = path.final_coords();
        let remaining = self
            .destinations
            .iter()
            .map(|d| here.distance(*d))
            .min()
            .unwrap_or(0);
        self.cost(path).saturating_add(remaining)
    }
}

impl EdgeComparator<MovePath> for BulldozerComparator<'_> {
    fn compare(&self, a: &MovePath, b: &MovePath) -> Ordering {
        self.estimate(a)
            .cmp(&self.estimate(b))
            .then_with(|| a.mp_used().cmp(&b.mp_used()))
    }
}

#[derive(Clone, Debug)]
pub struct BulldozerPath {
    pub path: MovePath,
    /// Hexes the unit has to level along the way, in path order.
    pub leveled: Vec<Coords>,
    pub leveling_cost: u32,
}

impl BulldozerPath {
    pub fn total_cost(&self) -> u32 {
        self.path.mp_used().saturating_add(self.leveling_cost)
    }
}

pub struct DestructionAwarePathFinder<'a> {
    ctx: MoveContext<'a>,
}

impl<'a> DestructionAwarePathFinder<'a> {
    pub fn new(ctx: MoveContext<'a>) -> DestructionAwarePathFinder<'a> {
        DestructionAwarePathFinder { ctx }
    }

    fn bulldozer_path(&self, path: MovePath) -> BulldozerPath {
        let board = self.ctx.board;
        let leveled = leveled_along(board, self.ctx.unit, &path);
        let leveling_cost = leveled.iter().fold(0u32, |total, c| {
            total.saturating_add(leveling_cost(board, self.ctx.unit, *c))
        });
        BulldozerPath {
            path,
            leveled,
            leveling_cost,
        }
    }

    /// Cheapest route from `start` to any of `destinations`, over as many turns as needed.
    /// Destinations the unit could not reach even after leveling are dropped up front using
    /// the destruction-aware clusters in `clusters`.
    pub fn find_path_to_coords(
        &self,
        start: &MovePath,
        destinations: &[Coords],
        clusters: &mut BoardClusterTracker,
    ) -> Option<BulldozerPath> {
        let from = start.final_coords();
        let unit = self.ctx.unit;
        let reachable = {
            let partition = clusters.clusters(self.ctx.board, ClusterMovement::of(unit), true);
            destinations
                .iter()
                .copied()
                .filter(|d| partition.same_cluster(from, *d))
                .collect::<Vec<_>>()
        };
        if reachable.is_empty() {
            info!(
                "Unit {} cannot reach any of {} destinations from {}",
                unit.id,
                destinations.len(),
                from
            );
            return None;
        }

        let board = if unit.damage_per_turn > 0 {
            LeveledBoard::new(self.ctx.board)
        } else {
            LeveledBoard {
                base: self.ctx.board,
                overrides: FxHashMap::default(),
            }
        };
        let ctx = self.ctx.with_board(&board);
        let comparator = BulldozerComparator {
            base: self.ctx.board,
            unit,
            destinations: reachable.clone(),
        };
        let mut finder: MovePathFinder<MovePath> = MovePathFinder::new(
            ctx,
            ShortestPathRelaxer,
            NextStepsAdjacencyMap::new(ctx),
            comparator,
        )
        .with_starting_turns();
        finder.add_filter(MovePathLegalityFilter::multi_turn(ctx));
        finder.add_stop_condition(DestinationReached::new(reachable.iter().copied()));
        let outcome = finder.run(start.clone());
        debug!(
            "Destruction-aware search for unit {} ended with {:?} ({} hexes leveled on the map)",
            unit.id,
            outcome,
            board.leveled_count()
        );

        finder
            .all_computed_paths_uncategorized()
            .into_iter()
            .filter(|p| reachable.contains(&p.final_coords()))
            .map(|p| self.bulldozer_path(p))
            .min_by_key(BulldozerPath::total_cost)
    }
}
