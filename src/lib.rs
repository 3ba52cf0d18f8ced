//! # move_pathfinding
//!
//! Best-first search over movement paths of tabletop units on a hex map. A single
//! generalized search kernel ([search::PathFinder]) is assembled from strategy objects: a
//! destination map, an edge relaxer, an adjacency map (the step generator), a comparator
//! driving the frontier, filters and stop conditions. The [planner] module wires these
//! together for concrete purposes: shortest paths under a movement budget, A* and greedy
//! descent towards one hex, longest paths, and per-unit-type planners for infantry,
//! aerospace craft in three flight regimes, spheroids, prone units, board-edge retreats and
//! terrain-clearing "bulldozer" routes. [planner::cluster::BoardClusterTracker] answers
//! "can this unit get there at all" from
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) before any
//! search is spent.
//!
//! The game engine is not part of this crate: the map is read through [board::Board], the
//! unit through a [unit::Unit] snapshot and the rulebook through [rules::MoveRules].
pub mod adjacency;
pub mod board;
pub mod cost;
pub mod error;
pub mod hex;
pub mod move_finder;
pub mod move_path;
pub mod planner;
pub mod rules;
pub mod search;
pub mod unit;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

pub use error::{PathFinderError, Result};
pub use hex::{Coords, CoordsWithFacing};
pub use move_path::{MoveContext, MoveNode, MovePath, StepType};
pub use search::{PathFinder, PathFinderBuilder, SearchOutcome};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Most identical turns explored in a row by ground step generators; three covers an
/// about-face.
pub const MAX_CONSECUTIVE_TURNS: usize = 3;
/// Most identical turns explored in a row in Newtonian space movement.
pub const NEWTONIAN_MAX_CONSECUTIVE_TURNS: usize = 2;
/// Highest velocity the aerospace fan generators consider. Far below what the rules allow,
/// higher values blow up the number of fans.
pub const DEFAULT_VELOCITY_GOVERNOR: i32 = 3;
/// Aerodynes over a ground map stall below this velocity.
pub const MIN_GROUND_MAP_VELOCITY: i32 = 1;
pub const OPTIMAL_STRIKE_ALTITUDE: i32 = 5;
/// Altitude an aerospace unit may shed for free in one turn without a control roll.
pub const MAX_FREE_DESCENT: i32 = 2;
pub const MAX_AERO_ALTITUDE: i32 = 10;
pub const MAX_AERO_VELOCITY: i32 = 12;
pub(crate) const N_SMALLVEC_SIZE: usize = 4;
