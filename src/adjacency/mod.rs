//! Step generators: the implicit movement graph each planner searches.
//!
//! [NextStepsAdjacencyMap] is the kernel adjacency map for ground units (and, for longest
//! paths, aerospace units). The other submodules hold generators that enumerate whole paths
//! at once for unit types whose movement does not fit one-step-at-a-time search well.
pub mod aero;
pub mod aero_util;
pub mod board_edge;
pub(crate) mod fan;
pub mod infantry;
pub mod newtonian;
pub mod spheroid;

use crate::move_path::{MoveContext, MovePath, StepType};
use crate::search::AdjacencyMap;
use crate::{MAX_AERO_VELOCITY, MAX_CONSECUTIVE_TURNS};

/// One-step extensions of a path: turns, lateral shifts, a single forward (or backward)
/// step, standing up and elevation changes.
#[derive(Clone, Copy)]
pub struct NextStepsAdjacencyMap<'a> {
    pub ctx: MoveContext<'a>,
    /// [StepType::Forwards] or [StepType::Backwards]: the direction hex-changing steps take.
    pub step_type: StepType,
}

impl<'a> NextStepsAdjacencyMap<'a> {
    pub fn new(ctx: MoveContext<'a>) -> NextStepsAdjacencyMap<'a> {
        NextStepsAdjacencyMap {
            ctx,
            step_type: StepType::Forwards,
        }
    }

    pub fn backwards(ctx: MoveContext<'a>) -> NextStepsAdjacencyMap<'a> {
        NextStepsAdjacencyMap {
            ctx,
            step_type: StepType::Backwards,
        }
    }

    fn lateral_steps(&self) -> [StepType; 2] {
        if self.step_type == StepType::Backwards {
            [
                StepType::LateralLeftBackwards,
                StepType::LateralRightBackwards,
            ]
        } else {
            [StepType::LateralLeft, StepType::LateralRight]
        }
    }

    fn enters_board(&self, path: &MovePath, step: StepType) -> bool {
        step.direction(path.final_facing())
            .is_some_and(|d| self.ctx.board.contains(path.final_coords().translated(d)))
    }

    fn aero_steps(&self, path: &MovePath) -> Vec<MovePath> {
        let ctx = &self.ctx;
        let state = path.final_state();
        let mut steps = Vec::new();
        if state.velocity_left > 0 {
            if self.enters_board(path, StepType::Forwards) {
                steps.push(StepType::Forwards);
            } else {
                steps.push(StepType::FlyOff);
            }
        }
        if state.hexes_moved == 0 {
            if state.velocity < MAX_AERO_VELOCITY {
                steps.push(StepType::Accelerate);
            }
            if state.velocity > 0 {
                steps.push(StepType::Decelerate);
            }
        }
        if state.straight_hexes >= ctx.rules.straight_hexes_before_turn(state.velocity)
            && (state.hexes_moved > 0 || state.velocity == 0)
        {
            steps.extend(allowed_turns(path));
        }
        steps.into_iter().map(|s| path.with_step(ctx, s)).collect()
    }
}

/// Turns that neither undo the previous turn nor exceed [MAX_CONSECUTIVE_TURNS] in a row.
pub(crate) fn allowed_turns(path: &MovePath) -> Vec<StepType> {
    turns_within(path, MAX_CONSECUTIVE_TURNS)
}

pub(crate) fn turns_within(path: &MovePath, max_in_a_row: usize) -> Vec<StepType> {
    [StepType::TurnLeft, StepType::TurnRight]
        .into_iter()
        .filter(|turn| match path.trailing_turns() {
            Some((last, _)) if Some(last) == turn.opposite_turn() => false,
            Some((last, n)) if last == *turn => n < max_in_a_row,
            _ => true,
        })
        .collect()
}

impl AdjacencyMap<MovePath> for NextStepsAdjacencyMap<'_> {
    fn adjacent(&mut self, path: &MovePath) -> Vec<MovePath> {
        if path.flies_off_board() {
            return Vec::new();
        }
        let ctx = &self.ctx;
        let unit = ctx.unit;
        if unit.is_aero() {
            return self.aero_steps(path);
        }
        let state = path.final_state();
        let mut steps = Vec::new();
        if state.prone || (state.hull_down && !unit.is_tank()) {
            if unit.can_careful_stand {
                steps.push(StepType::CarefulStand);
            }
            steps.push(StepType::GetUp);
        } else {
            if !path.is_empty() {
                steps.extend(allowed_turns(path));
            }
            if unit.can_shift && !state.jumping {
                steps.extend(
                    self.lateral_steps()
                        .into_iter()
                        .filter(|s| self.enters_board(path, *s)),
                );
            }
            if self.enters_board(path, self.step_type) {
                steps.push(self.step_type);
            }
            if unit.is_vtol() {
                if state.elevation < unit.max_elevation {
                    steps.push(StepType::Up);
                }
                if state.elevation > 0 {
                    steps.push(StepType::Down);
                }
            }
        }
        steps.into_iter().map(|s| path.with_step(ctx, s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GridBoard;
    use crate::hex::{Coords, NORTH, SOUTH};
    use crate::rules::StandardRules;
    use crate::unit::{AeroState, MotiveType, Unit, UnitKind};

    fn kinds(paths: &[MovePath]) -> Vec<StepType> {
        paths.iter().filter_map(|p| p.last_step_type()).collect()
    }

    #[test]
    fn ground_steps() {
        let board = GridBoard::new(5, 5);
        let unit = Unit::mek(1, Coords::new(2, 2), NORTH, 4, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let mut map = NextStepsAdjacencyMap::new(ctx);
        assert_eq!(kinds(&map.adjacent(&ctx.start_path())), vec![StepType::Forwards]);

        let moved = ctx.start_path().with_step(&ctx, StepType::Forwards);
        assert_eq!(
            kinds(&map.adjacent(&moved)),
            vec![StepType::TurnLeft, StepType::TurnRight, StepType::Forwards]
        );
        let left = moved.with_step(&ctx, StepType::TurnLeft);
        assert_eq!(
            kinds(&map.adjacent(&left)),
            vec![StepType::TurnLeft, StepType::Forwards]
        );
        let about = left.with_steps(&ctx, &[StepType::TurnLeft, StepType::TurnLeft]);
        assert_eq!(kinds(&map.adjacent(&about)), vec![StepType::Forwards]);
    }

    #[test]
    fn edge_of_board_blocks_steps() {
        let board = GridBoard::new(5, 5);
        let unit = Unit::mek(1, Coords::new(2, 0), NORTH, 4, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        assert!(NextStepsAdjacencyMap::new(ctx)
            .adjacent(&ctx.start_path())
            .is_empty());
        assert_eq!(
            kinds(&NextStepsAdjacencyMap::backwards(ctx).adjacent(&ctx.start_path())),
            vec![StepType::Backwards]
        );
    }

    #[test]
    fn down_units_only_stand() {
        let board = GridBoard::new(5, 5);
        let mut mek = Unit::mek(1, Coords::new(2, 2), SOUTH, 4, 0);
        mek.prone = true;
        mek.can_careful_stand = true;
        let ctx = MoveContext::new(&board, &StandardRules, &mek);
        assert_eq!(
            kinds(&NextStepsAdjacencyMap::new(ctx).adjacent(&ctx.start_path())),
            vec![StepType::CarefulStand, StepType::GetUp]
        );

        let mut tank = Unit::tank(2, MotiveType::Tracked, Coords::new(2, 2), SOUTH, 4);
        tank.hull_down = true;
        let ctx = MoveContext::new(&board, &StandardRules, &tank);
        assert_eq!(
            kinds(&NextStepsAdjacencyMap::new(ctx).adjacent(&ctx.start_path())),
            vec![StepType::Forwards]
        );
    }

    #[test]
    fn vtol_changes_elevation() {
        let board = GridBoard::new(5, 5);
        let vtol = Unit::vtol(1, Coords::new(2, 2), NORTH, 5, 1);
        let ctx = MoveContext::new(&board, &StandardRules, &vtol);
        let steps = kinds(&NextStepsAdjacencyMap::new(ctx).adjacent(&ctx.start_path()));
        assert!(steps.contains(&StepType::Up));
        assert!(steps.contains(&StepType::Down));
    }

    #[test]
    fn aerospace_flies_off_at_the_edge() {
        let board = GridBoard::new(5, 5);
        let aero = AeroState {
            current_thrust: 4,
            structural_integrity: 4,
            velocity: 2,
            ..AeroState::default()
        };
        let fighter = Unit::aerospace(1, UnitKind::Aerodyne, Coords::new(2, 0), NORTH, 4, aero);
        let ctx = MoveContext::new(&board, &StandardRules, &fighter);
        let steps = kinds(&NextStepsAdjacencyMap::new(ctx).adjacent(&ctx.start_path()));
        assert_eq!(
            steps,
            vec![StepType::FlyOff, StepType::Accelerate, StepType::Decelerate]
        );
        let gone = ctx.start_path().with_step(&ctx, StepType::FlyOff);
        assert!(gone.flies_off_board());
        assert!(NextStepsAdjacencyMap::new(ctx).adjacent(&gone).is_empty());
    }
}
