//! Fans of complete aerospace moves for aerodynes. A move is a velocity change, then
//! exactly `velocity` hexes of forward flight with turns wherever the turn mode allows,
//! then optional end-of-move adjustments.
use std::cmp::Ordering;

use fxhash::FxHashMap;
use indexmap::map::Entry;
use log::{debug, info, trace};

use super::aero_util::{adjust_altitude, generate_valid_accelerations, max_safe_thrust};
use crate::hex::Coords;
use crate::move_path::{MoveContext, MovePath, StepType};
use crate::{
    FxIndexMap, DEFAULT_VELOCITY_GOVERNOR, MAX_AERO_ALTITUDE, MAX_FREE_DESCENT,
    MIN_GROUND_MAP_VELOCITY, OPTIMAL_STRIKE_ALTITUDE,
};

/// Where the unit flies, which decides velocity bounds and altitude handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlightRegime {
    /// Over a ground map; paths are levelled off towards the strike altitude afterwards.
    Ground,
    /// Low over a ground map; altitude changes are picked before the fan is flown, and each
    /// altitude is flown as a fan of its own.
    LowAltitude,
    /// On a space map; the craft may come to a stop.
    Space,
}

/// Arrivals sharing a key have the same future: same hex, facing and altitude, with the same
/// number of hexes still to fly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct FanKey {
    coords: Coords,
    facing: u8,
    altitude: i32,
    velocity_left: i32,
}

impl FanKey {
    fn of(path: &MovePath) -> FanKey {
        let state = path.final_state();
        FanKey {
            coords: state.coords,
            facing: state.facing,
            altitude: state.elevation,
            velocity_left: state.velocity_left,
        }
    }
}

/// Per-run bookkeeping of one fan.
struct FanRun {
    /// Cheapest movement points seen per key.
    visited: FxHashMap<FanKey, u32>,
    finished: FxIndexMap<FanKey, MovePath>,
    off_board: Option<MovePath>,
}

impl FanRun {
    fn new(off_board: Option<MovePath>) -> FanRun {
        FanRun {
            visited: FxHashMap::default(),
            finished: FxIndexMap::default(),
            off_board,
        }
    }

    /// Records the arrival of `path`, false if an arrival at the same key was no dearer.
    fn visit(&mut self, path: &MovePath) -> bool {
        let key = FanKey::of(path);
        let mp = path.mp_used();
        match self.visited.get(&key) {
            Some(&seen) if seen <= mp => {
                trace!("Dropping redundant arrival {}", path);
                false
            }
            _ => {
                self.visited.insert(key, mp);
                true
            }
        }
    }

    fn finish(&mut self, path: MovePath) {
        match self.finished.entry(FanKey::of(&path)) {
            Entry::Occupied(mut kept) => {
                if path.mp_used() < kept.get().mp_used() {
                    kept.insert(path);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(path);
            }
        }
    }

    fn offer_off_board(&mut self, path: MovePath) {
        let shorter = match &self.off_board {
            None => true,
            Some(kept) => {
                path.len()
                    .cmp(&kept.len())
                    .then_with(|| path.mp_used().cmp(&kept.mp_used()))
                    == Ordering::Less
            }
        };
        if shorter {
            self.off_board = Some(path);
        }
    }
}

pub struct AeroMoveGenerator<'a> {
    pub ctx: MoveContext<'a>,
    pub regime: FlightRegime,
    /// Highest velocity considered. Kept well below the rules maximum, as every extra point of
    /// velocity multiplies the number of fans.
    pub velocity_governor: i32,
    pub optimal_altitude: i32,
    pub max_descent: i32,
    /// Append a final left or right turn to every finished path (low altitude only).
    pub end_turns: bool,
}

impl<'a> AeroMoveGenerator<'a> {
    pub fn new(ctx: MoveContext<'a>, regime: FlightRegime) -> AeroMoveGenerator<'a> {
        AeroMoveGenerator {
            ctx,
            regime,
            velocity_governor: DEFAULT_VELOCITY_GOVERNOR,
            optimal_altitude: OPTIMAL_STRIKE_ALTITUDE,
            max_descent: MAX_FREE_DESCENT,
            end_turns: regime == FlightRegime::LowAltitude,
        }
    }

    /// Paths with every reachable velocity in the governor's range. If the current velocity
    /// is too high to get into the range in one move, the slowest reachable velocity is used.
    fn velocity_branches(&self, start: &MovePath) -> Vec<MovePath> {
        let lower = match self.regime {
            FlightRegime::Space => 0,
            _ => MIN_GROUND_MAP_VELOCITY,
        };
        let branches =
            generate_valid_accelerations(&self.ctx, start, lower, self.velocity_governor);
        if !branches.is_empty() {
            return branches;
        }
        let slowest = lower.max(start.final_velocity() - max_safe_thrust(self.ctx.unit) as i32);
        generate_valid_accelerations(&self.ctx, start, slowest, slowest)
    }

    fn altitude_branches(&self, path: &MovePath) -> Vec<MovePath> {
        if self.regime != FlightRegime::LowAltitude {
            return vec![path.clone()];
        }
        let elevation = path.final_elevation();
        let mut branches = Vec::new();
        let highest = (elevation + 2).min(MAX_AERO_ALTITUDE);
        for altitude in (elevation - self.max_descent).max(1)..=highest {
            let adjusted = adjust_altitude(&self.ctx, path, altitude, self.max_descent);
            if adjusted.final_elevation() == altitude
                && !branches
                    .iter()
                    .any(|b: &MovePath| b.final_elevation() == altitude)
            {
                branches.push(adjusted);
            }
        }
        branches
    }

    fn fly(&self, path: MovePath, run: &mut FanRun) {
        let ctx = &self.ctx;
        if path.velocity_left() <= 0 {
            run.finish(path);
            return;
        }
        let ahead = path.final_coords().translated(path.final_facing());
        if !ctx.board.contains(ahead) {
            let gone = path.with_step(ctx, StepType::FlyOff);
            if ctx.is_legal(&gone) {
                run.offer_off_board(gone);
            }
            return;
        }
        let next = path.with_step(ctx, StepType::Forwards);
        if !ctx.is_legal(&next) || !run.visit(&next) {
            return;
        }
        let threshold = ctx.rules.straight_hexes_before_turn(next.final_velocity());
        let may_turn = next.velocity_left() > 0 && next.straight_hexes() >= threshold;
        self.fly(next.clone(), run);
        if may_turn {
            for turn in [StepType::TurnLeft, StepType::TurnRight] {
                let turned = next.with_step(ctx, turn);
                if ctx.is_legal(&turned) {
                    self.fly(turned, run);
                }
            }
        }
    }

    fn finish(&self, path: MovePath) -> Vec<MovePath> {
        let ctx = &self.ctx;
        match self.regime {
            FlightRegime::Ground => {
                vec![adjust_altitude(
                    ctx,
                    &path,
                    self.optimal_altitude,
                    self.max_descent,
                )]
            }
            FlightRegime::LowAltitude if self.end_turns => {
                let turns = [StepType::TurnLeft, StepType::TurnRight]
                    .into_iter()
                    .map(|t| path.with_step(ctx, t))
                    .filter(|p| ctx.is_legal(p))
                    .collect::<Vec<_>>();
                std::iter::once(path).chain(turns).collect()
            }
            _ => vec![path],
        }
    }

    pub fn generate(&self, start: &MovePath) -> Vec<MovePath> {
        let unit = self.ctx.unit;
        if unit.aero.is_some_and(|a| a.out_of_control) {
            info!("Unit {} is out of control, it keeps its position", unit.id);
            return vec![start.clone()];
        }
        let mut paths = Vec::new();
        let mut off_board = None;
        for velocity in self.velocity_branches(start) {
            for branch in self.altitude_branches(&velocity) {
                let mut run = FanRun::new(off_board.take());
                self.fly(branch, &mut run);
                off_board = run.off_board;
                paths.extend(run.finished.into_values().flat_map(|p| self.finish(p)));
            }
        }
        paths.extend(off_board);
        debug!(
            "Generated {} {:?} paths for unit {}",
            paths.len(),
            self.regime,
            unit.id
        );
        paths
    }
}
