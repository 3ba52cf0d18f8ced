//! Connected regions of the map, per kind of movement.
//!
//! Two hexes are in the same cluster when a unit moving a certain way can walk from one to
//! the other, ignoring movement points. Planners check this before searching so that
//! unreachable destinations cost nothing. Clusters are built lazily with a union-find over
//! hex neighbours and cached until [BoardClusterTracker::clear] is called.
use itertools::Itertools;
use log::debug;
use petgraph::unionfind::UnionFind;

use crate::board::{Board, Hex, ULTRA_HEAVY_WOODS};
use crate::hex::{Coords, NORTHEAST, SOUTH, SOUTHEAST};
use crate::unit::{MotiveType, Unit, UnitKind};
use crate::FxIndexMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClusterMovement {
    Walker,
    Wheeled,
    Tracked,
    Hover,
    Infantry,
    /// Jumping or flying: any passable hex, any level change.
    Jump,
}

impl ClusterMovement {
    pub fn of(unit: &Unit) -> ClusterMovement {
        match (unit.kind, unit.motive) {
            (UnitKind::Infantry, _) => ClusterMovement::Infantry,
            (UnitKind::Tank, MotiveType::Wheeled) => ClusterMovement::Wheeled,
            (UnitKind::Tank, MotiveType::Hover) => ClusterMovement::Hover,
            (UnitKind::Tank, _) => ClusterMovement::Tracked,
            (UnitKind::Vtol | UnitKind::Aerodyne | UnitKind::Spheroid, _) => ClusterMovement::Jump,
            _ if unit.jump_mp > 0 => ClusterMovement::Jump,
            _ => ClusterMovement::Walker,
        }
    }

    fn max_climb(self) -> i32 {
        match self {
            ClusterMovement::Walker => 2,
            ClusterMovement::Jump => i32::MAX,
            _ => 1,
        }
    }

    fn passable(self, hex: &Hex) -> bool {
        if hex.impassable {
            return false;
        }
        let in_water = hex.water_depth > 0 && hex.bridge.is_none();
        match self {
            ClusterMovement::Walker | ClusterMovement::Jump => true,
            ClusterMovement::Infantry => !in_water,
            ClusterMovement::Wheeled => hex.woods == 0 && !in_water,
            ClusterMovement::Tracked => hex.woods < ULTRA_HEAVY_WOODS && !in_water,
            ClusterMovement::Hover => hex.woods == 0 && hex.building.is_none(),
        }
    }
}

/// One partition of the map.
pub struct BoardClusters {
    width: i32,
    height: i32,
    passable: Vec<bool>,
    components: UnionFind<usize>,
}

impl BoardClusters {
    /// Partitions `board` for `movement`. When `destruction_aware`, terrain the unit could
    /// shoot down counts as already cleared.
    pub fn build(
        board: &dyn Board,
        movement: ClusterMovement,
        destruction_aware: bool,
    ) -> BoardClusters {
        let (width, height) = (board.width(), board.height());
        let size = (width.max(0) * height.max(0)) as usize;
        let terrain = |c: Coords| -> Option<Hex> {
            let hex = board.hex(c)?;
            if destruction_aware && hex.leveling_factor().is_some() {
                Some(hex.leveled())
            } else {
                Some(hex.clone())
            }
        };
        let mut clusters = BoardClusters {
            width,
            height,
            passable: vec![false; size],
            components: UnionFind::new(size),
        };
        let coords = (0..height)
            .flat_map(|y| (0..width).map(move |x| Coords::new(x, y)))
            .collect::<Vec<_>>();
        for &c in &coords {
            if let (Some(ix), Some(hex)) = (clusters.index(c), terrain(c)) {
                clusters.passable[ix] = movement.passable(&hex);
            }
        }
        for &c in &coords {
            let (Some(ix), Some(hex)) = (clusters.index(c), terrain(c)) else {
                continue;
            };
            if !clusters.passable[ix] {
                continue;
            }
            // half of the neighbourhood is enough, the other half links back to us
            for direction in [NORTHEAST, SOUTHEAST, SOUTH] {
                let n = c.translated(direction);
                let (Some(n_ix), Some(n_hex)) = (clusters.index(n), terrain(n)) else {
                    continue;
                };
                if clusters.passable[n_ix] && (n_hex.level - hex.level).abs() <= movement.max_climb()
                {
                    clusters.components.union(ix, n_ix);
                }
            }
        }
        clusters
    }

    fn index(&self, c: Coords) -> Option<usize> {
        if c.x < 0 || c.y < 0 || c.x >= self.width || c.y >= self.height {
            return None;
        }
        Some((c.y * self.width + c.x) as usize)
    }

    /// Cluster of a passable hex on the map.
    pub fn cluster_id(&self, c: Coords) -> Option<usize> {
        let ix = self.index(c)?;
        if self.passable[ix] {
            Some(self.components.find(ix))
        } else {
            None
        }
    }

    pub fn same_cluster(&self, a: Coords, b: Coords) -> bool {
        match (self.cluster_id(a), self.cluster_id(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    pub fn hexes_in_cluster(&self, id: usize) -> Vec<Coords> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Coords::new(x, y)))
            .filter(|c| self.cluster_id(*c) == Some(id))
            .collect()
    }

    pub fn cluster_count(&self) -> usize {
        (0..self.passable.len())
            .filter(|ix| self.passable[*ix])
            .map(|ix| self.components.find(ix))
            .unique()
            .count()
    }
}

/// Lazily built clusters for every (movement, destruction-aware) combination asked for.
#[derive(Default)]
pub struct BoardClusterTracker {
    clusters: FxIndexMap<(ClusterMovement, bool), BoardClusters>,
}

impl BoardClusterTracker {
    pub fn new() -> BoardClusterTracker {
        BoardClusterTracker::default()
    }

    pub fn clusters(
        &mut self,
        board: &dyn Board,
        movement: ClusterMovement,
        destruction_aware: bool,
    ) -> &BoardClusters {
        self.clusters
            .entry((movement, destruction_aware))
            .or_insert_with(|| {
                let clusters = BoardClusters::build(board, movement, destruction_aware);
                debug!(
                    "Built {} {:?} clusters (destruction aware: {})",
                    clusters.cluster_count(),
                    movement,
                    destruction_aware
                );
                clusters
            })
    }

    /// Whether `unit` could get from `from` to `to` given enough turns.
    pub fn reachable(
        &mut self,
        board: &dyn Board,
        unit: &Unit,
        from: Coords,
        to: Coords,
        destruction_aware: bool,
    ) -> bool {
        self.clusters(board, ClusterMovement::of(unit), destruction_aware)
            .same_cluster(from, to)
    }

    /// Forgets every partition; call after the map changes.
    pub fn clear(&mut self) {
        self.clusters.clear();
    }
}
