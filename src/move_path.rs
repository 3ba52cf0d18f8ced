//! Movement paths: persistent, append-only sequences of atomic steps.
//!
//! A [MovePath] shares its prefix with every path it was extended from, so extending a path
//! that sits in a search frontier never disturbs it or any of its siblings.
use core::fmt;
use std::rc::Rc;

use crate::board::Board;
use crate::hex::{self, Coords, CoordsWithFacing};
use crate::rules::{MoveRules, MovementType};
use crate::unit::Unit;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepType {
    Forwards,
    Backwards,
    TurnLeft,
    TurnRight,
    LateralLeft,
    LateralRight,
    LateralLeftBackwards,
    LateralRightBackwards,
    GetUp,
    CarefulStand,
    Up,
    Down,
    StartJump,
    Accelerate,
    Decelerate,
    Hover,
    /// Newtonian thrust: spend thrust to drift one hex along the current facing.
    Thrust,
    /// Leave the map across the hexside the unit is facing.
    FlyOff,
    /// Withdraw from the battle off the board edge the unit is standing on.
    Flee,
}

impl StepType {
    pub fn is_turn(self) -> bool {
        matches!(self, StepType::TurnLeft | StepType::TurnRight)
    }

    pub fn is_backwards(self) -> bool {
        matches!(
            self,
            StepType::Backwards | StepType::LateralLeftBackwards | StepType::LateralRightBackwards
        )
    }

    pub fn is_lateral(self) -> bool {
        matches!(
            self,
            StepType::LateralLeft
                | StepType::LateralRight
                | StepType::LateralLeftBackwards
                | StepType::LateralRightBackwards
        )
    }

    /// Whether the step carries the unit into another hex.
    pub fn changes_hex(self) -> bool {
        matches!(
            self,
            StepType::Forwards | StepType::Backwards | StepType::Thrust | StepType::FlyOff
        ) || self.is_lateral()
    }

    /// Direction of travel relative to `facing` for hex-changing steps.
    pub fn direction(self, facing: u8) -> Option<u8> {
        let delta = match self {
            StepType::Forwards | StepType::Thrust | StepType::FlyOff => 0,
            StepType::Backwards => 3,
            StepType::LateralLeft => -1,
            StepType::LateralRight => 1,
            StepType::LateralLeftBackwards => -2,
            StepType::LateralRightBackwards => 2,
            _ => return None,
        };
        Some(hex::rotate(facing, delta))
    }

    pub fn opposite_turn(self) -> Option<StepType> {
        match self {
            StepType::TurnLeft => Some(StepType::TurnRight),
            StepType::TurnRight => Some(StepType::TurnLeft),
            _ => None,
        }
    }
}

/// Everything the planners need to know about a unit after some sequence of steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveState {
    pub coords: Coords,
    pub facing: u8,
    pub elevation: i32,
    pub mp_used: u32,
    pub hexes_moved: u32,
    pub velocity: i32,
    /// Hexes an aerospace unit still has to fly this turn.
    pub velocity_left: i32,
    /// Hexes moved since the last facing change.
    pub straight_hexes: u32,
    pub jumping: bool,
    pub prone: bool,
    pub hull_down: bool,
    pub flies_off_board: bool,
}

impl MoveState {
    pub fn of(unit: &Unit) -> MoveState {
        let velocity = unit.velocity();
        MoveState {
            coords: unit.position,
            facing: unit.facing,
            elevation: unit.elevation,
            mp_used: 0,
            hexes_moved: 0,
            velocity,
            velocity_left: velocity,
            straight_hexes: 0,
            jumping: false,
            prone: unit.prone,
            hull_down: unit.hull_down,
            flies_off_board: false,
        }
    }

    pub fn node(&self) -> CoordsWithFacing {
        CoordsWithFacing::new(self.coords, self.facing)
    }

    pub fn search_node(&self) -> MoveNode {
        MoveNode {
            coords: self.coords,
            facing: self.facing,
            elevation: self.elevation,
            velocity: self.velocity,
        }
    }

    /// Geometry of a step, before any movement points are charged.
    fn advanced(&self, step: StepType, unit: &Unit) -> MoveState {
        let mut next = *self;
        if let Some(direction) = step.direction(self.facing) {
            match step {
                StepType::FlyOff => next.flies_off_board = true,
                _ => {
                    next.hull_down = false;
                }
            }
            next.coords = self.coords.translated(direction);
            next.hexes_moved += 1;
            next.straight_hexes += 1;
            match step {
                _ if !unit.is_aero() => {}
                StepType::Thrust => {}
                // leaving the map ends the move, whatever velocity is left
                StepType::FlyOff => next.velocity_left = (self.velocity_left - 1).max(0),
                _ => next.velocity_left -= 1,
            }
            return next;
        }
        match step {
            StepType::TurnLeft => {
                next.facing = hex::rotate(self.facing, -1);
                next.straight_hexes = 0;
            }
            StepType::TurnRight => {
                next.facing = hex::rotate(self.facing, 1);
                next.straight_hexes = 0;
            }
            StepType::GetUp | StepType::CarefulStand => {
                next.prone = false;
                next.hull_down = false;
            }
            StepType::Up => next.elevation += 1,
            StepType::Down => next.elevation -= 1,
            StepType::StartJump => next.jumping = true,
            StepType::Accelerate => {
                next.velocity += 1;
                next.velocity_left += 1;
            }
            StepType::Decelerate => {
                next.velocity -= 1;
                next.velocity_left -= 1;
            }
            StepType::Flee => next.flies_off_board = true,
            _ => {}
        }
        next
    }
}

/// Graph vertex of every move-path search. Elevation and velocity are part of it, as paths
/// that end in the same hex and facing at another altitude or speed have different futures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveNode {
    pub coords: Coords,
    pub facing: u8,
    pub elevation: i32,
    pub velocity: i32,
}

impl MoveNode {
    pub fn new(coords: Coords, facing: u8, elevation: i32, velocity: i32) -> MoveNode {
        MoveNode {
            coords,
            facing: facing % 6,
            elevation,
            velocity,
        }
    }

    pub fn pose(&self) -> CoordsWithFacing {
        CoordsWithFacing::new(self.coords, self.facing)
    }
}

/// A ground-level node of a unit at rest.
impl From<CoordsWithFacing> for MoveNode {
    fn from(pose: CoordsWithFacing) -> MoveNode {
        MoveNode::new(pose.coords, pose.facing, 0, 0)
    }
}

impl fmt::Display for MoveNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at elevation {}, velocity {}",
            self.pose(),
            self.elevation,
            self.velocity
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveStep {
    pub kind: StepType,
    /// Movement points charged for this step alone.
    pub mp: u32,
    /// State of the unit once the step is taken.
    pub state: MoveState,
}

/// The read-only game view a path is computed against.
#[derive(Clone, Copy)]
pub struct MoveContext<'a> {
    pub board: &'a dyn Board,
    pub rules: &'a dyn MoveRules,
    pub unit: &'a Unit,
}

impl<'a> MoveContext<'a> {
    pub fn new(board: &'a dyn Board, rules: &'a dyn MoveRules, unit: &'a Unit) -> MoveContext<'a> {
        MoveContext { board, rules, unit }
    }

    /// Same rules and unit against another board, e.g. one with terrain cleared.
    pub fn with_board<'b>(&self, board: &'b dyn Board) -> MoveContext<'b>
    where
        'a: 'b,
    {
        MoveContext {
            board,
            rules: self.rules,
            unit: self.unit,
        }
    }

    /// Whether the last step of `path` is a legal continuation. Aerospace units are only
    /// classified by movement type, as the full step rules are not evaluated for them.
    pub fn is_legal(&self, path: &MovePath) -> bool {
        if self.unit.is_aero() {
            self.rules.movement_type(self.board, self.unit, path) != MovementType::Illegal
        } else {
            self.rules.is_legal(self.board, self.unit, path)
        }
    }

    /// Like [MoveContext::is_legal], but without the per-turn movement point budget for
    /// ground units.
    pub fn is_step_legal(&self, path: &MovePath) -> bool {
        if self.unit.is_aero() {
            self.rules.movement_type(self.board, self.unit, path) != MovementType::Illegal
        } else {
            self.rules.is_step_legal(self.board, self.unit, path)
        }
    }

    pub fn start_path(&self) -> MovePath {
        MovePath::new(self.unit)
    }
}

struct PathNode {
    step: MoveStep,
    prev: Option<Rc<PathNode>>,
}

#[derive(Clone)]
pub struct MovePath {
    unit_id: u32,
    start: MoveState,
    tail: Option<Rc<PathNode>>,
    len: usize,
}

impl MovePath {
    /// An empty path starting where the unit currently stands.
    pub fn new(unit: &Unit) -> MovePath {
        MovePath::from_state(unit.id, MoveState::of(unit))
    }

    pub fn from_state(unit_id: u32, start: MoveState) -> MovePath {
        MovePath {
            unit_id,
            start,
            tail: None,
            len: 0,
        }
    }

    /// A new path with `step` appended; `self` is left untouched.
    pub fn with_step(&self, ctx: &MoveContext, step: StepType) -> MovePath {
        let from = self.final_state();
        let mut to = from.advanced(step, ctx.unit);
        let mp = ctx.rules.step_cost(ctx.board, ctx.unit, from, &to, step);
        to.mp_used = from.mp_used + mp;
        MovePath {
            unit_id: self.unit_id,
            start: self.start,
            tail: Some(Rc::new(PathNode {
                step: MoveStep {
                    kind: step,
                    mp,
                    state: to,
                },
                prev: self.tail.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn with_steps(&self, ctx: &MoveContext, steps: &[StepType]) -> MovePath {
        steps
            .iter()
            .fold(self.clone(), |path, step| path.with_step(ctx, *step))
    }

    pub fn unit_id(&self) -> u32 {
        self.unit_id
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn start(&self) -> &MoveState {
        &self.start
    }

    pub fn last_step(&self) -> Option<&MoveStep> {
        self.tail.as_ref().map(|n| &n.step)
    }

    pub fn last_step_type(&self) -> Option<StepType> {
        self.last_step().map(|s| s.kind)
    }

    pub fn final_state(&self) -> &MoveState {
        self.last_step().map_or(&self.start, |s| &s.state)
    }

    /// State before the last step was taken.
    pub fn previous_state(&self) -> &MoveState {
        match self.tail.as_ref().and_then(|n| n.prev.as_ref()) {
            Some(prev) => &prev.step.state,
            None => &self.start,
        }
    }

    /// The same path without its last step.
    pub fn parent(&self) -> Option<MovePath> {
        let node = self.tail.as_ref()?;
        Some(MovePath {
            unit_id: self.unit_id,
            start: self.start,
            tail: node.prev.clone(),
            len: self.len - 1,
        })
    }

    pub fn final_coords(&self) -> Coords {
        self.final_state().coords
    }
    pub fn final_facing(&self) -> u8 {
        self.final_state().facing
    }
    pub fn final_elevation(&self) -> i32 {
        self.final_state().elevation
    }
    pub fn final_velocity(&self) -> i32 {
        self.final_state().velocity
    }
    pub fn velocity_left(&self) -> i32 {
        self.final_state().velocity_left
    }
    pub fn straight_hexes(&self) -> u32 {
        self.final_state().straight_hexes
    }
    pub fn mp_used(&self) -> u32 {
        self.final_state().mp_used
    }
    pub fn hexes_moved(&self) -> u32 {
        self.final_state().hexes_moved
    }
    pub fn is_jumping(&self) -> bool {
        self.final_state().jumping
    }
    pub fn flies_off_board(&self) -> bool {
        self.final_state().flies_off_board
    }
    pub fn final_prone(&self) -> bool {
        self.final_state().prone
    }
    pub fn final_hull_down(&self) -> bool {
        self.final_state().hull_down
    }
    pub fn is_down(&self) -> bool {
        self.final_prone() || self.final_hull_down()
    }
    pub fn final_node(&self) -> CoordsWithFacing {
        self.final_state().node()
    }

    /// The node this path is recorded under. A path ending in a backward step faces the way
    /// it travelled, so that forward and backward arrivals at a hex share nodes.
    pub fn search_node(&self) -> MoveNode {
        let mut node = self.final_state().search_node();
        if self.is_last_step_backwards() {
            node.facing = hex::opposite(node.facing);
        }
        node
    }

    pub fn is_last_step_backwards(&self) -> bool {
        self.last_step_type().is_some_and(StepType::is_backwards)
    }

    /// Steps from last to first.
    pub fn steps_rev(&self) -> impl Iterator<Item = &MoveStep> + '_ {
        std::iter::successors(self.tail.as_deref(), |n| n.prev.as_deref()).map(|n| &n.step)
    }

    /// Steps in the order they are taken.
    pub fn steps(&self) -> Vec<MoveStep> {
        let mut steps = self.steps_rev().copied().collect::<Vec<_>>();
        steps.reverse();
        steps
    }

    pub fn step_types(&self) -> Vec<StepType> {
        self.steps().into_iter().map(|s| s.kind).collect()
    }

    /// Whether the path starts in or passes through `coords`.
    pub fn visits(&self, coords: Coords) -> bool {
        self.start.coords == coords || self.steps_rev().any(|s| s.state.coords == coords)
    }

    /// The trailing run of identical turns, if the path currently ends in a turn.
    pub fn trailing_turns(&self) -> Option<(StepType, usize)> {
        let last = self.last_step_type().filter(|s| s.is_turn())?;
        let count = self.steps_rev().take_while(|s| s.kind == last).count();
        Some((last, count))
    }

    pub fn contains_step(&self, step: StepType) -> bool {
        self.steps_rev().any(|s| s.kind == step)
    }
}

impl PartialEq for MovePath {
    fn eq(&self, other: &Self) -> bool {
        self.unit_id == other.unit_id
            && self.start == other.start
            && self.len == other.len
            && self.steps_rev().eq(other.steps_rev())
    }
}

impl Eq for MovePath {}

impl fmt::Debug for MovePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MovePath")
            .field("unit", &self.unit_id)
            .field("start", &self.start.node())
            .field("steps", &self.step_types())
            .field("mp_used", &self.mp_used())
            .finish()
    }
}

impl fmt::Display for MovePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.start.node())?;
        for step in self.steps() {
            write!(f, " {:?}", step.kind)?;
        }
        write!(f, " => {} ({} MP)", self.final_node(), self.mp_used())
    }
}
