//! The movement rules oracle. The tabletop rulebook lives outside this crate; planners only
//! ask it what a step costs and whether a path's last step is allowed. [StandardRules] is a
//! compact reading of the usual ground and aerospace movement costs.
use crate::board::{Board, Hex, ULTRA_HEAVY_WOODS};
use crate::move_path::{MovePath, MoveState, StepType};
use crate::unit::{MotiveType, Unit, UnitKind};
use crate::{MAX_AERO_ALTITUDE, MAX_AERO_VELOCITY};

/// Classification of a path used in place of full step legality for aerospace units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementType {
    Illegal,
    Walk,
    Run,
    Jump,
    SafeThrust,
    OverThrust,
}

pub trait MoveRules {
    /// Movement points (thrust for aerospace units) charged for `step`, which takes the
    /// unit from state `from` to state `to`.
    fn step_cost(
        &self,
        board: &dyn Board,
        unit: &Unit,
        from: &MoveState,
        to: &MoveState,
        step: StepType,
    ) -> u32;

    /// Whether the last step of `path` is allowed at all, however many movement points the
    /// path has spent so far. Planners looking beyond the current turn use this.
    fn is_step_legal(&self, board: &dyn Board, unit: &Unit, path: &MovePath) -> bool;

    /// Whether the last step of `path` is a legal continuation within this turn's budget.
    fn is_legal(&self, board: &dyn Board, unit: &Unit, path: &MovePath) -> bool {
        path.last_step()
            .map_or(true, |s| s.state.mp_used <= self.max_mp(unit, s.state.jumping))
            && self.is_step_legal(board, unit, path)
    }

    fn movement_type(&self, board: &dyn Board, unit: &Unit, path: &MovePath) -> MovementType;

    /// Hexes an aerospace unit must fly straight before it may turn again.
    fn straight_hexes_before_turn(&self, velocity: i32) -> u32 {
        match velocity {
            ..=2 => 0,
            3..=5 => 1,
            6..=7 => 2,
            8..=9 => 3,
            10..=11 => 4,
            _ => 5,
        }
    }

    /// Most movement points a path may spend.
    fn max_mp(&self, unit: &Unit, jumping: bool) -> u32 {
        if jumping {
            unit.jump_mp
        } else {
            unit.run_mp.max(unit.walk_mp)
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardRules;

impl StandardRules {
    fn terrain_cost(unit: &Unit, hex: &Hex) -> u32 {
        let mut cost = hex.woods as u32;
        if hex.rough {
            cost += 1;
        }
        if hex.building.is_some() {
            cost += 1;
        }
        if hex.bridge.is_none() && hex.water_depth > 0 {
            cost += match (unit.motive, hex.water_depth) {
                (MotiveType::Hover, _) => 0,
                (_, 1) => 1,
                _ => 3,
            };
        }
        cost
    }

    fn level(board: &dyn Board, state: &MoveState) -> i32 {
        board.hex(state.coords).map_or(0, |h| h.level)
    }

    fn terrain_allows(unit: &Unit, hex: &Hex) -> bool {
        if let Some(bridge) = hex.bridge {
            if unit.tonnage > bridge.capacity {
                return false;
            }
        }
        let in_water = hex.water_depth > 0 && hex.bridge.is_none();
        match (unit.kind, unit.motive) {
            (UnitKind::Infantry, _) => !in_water || unit.amphibious,
            (UnitKind::Tank, MotiveType::Hover) => hex.woods == 0 && hex.building.is_none(),
            (UnitKind::Tank, MotiveType::Wheeled) => {
                hex.woods == 0 && (!in_water || unit.amphibious)
            }
            (UnitKind::Tank, _) => hex.woods < ULTRA_HEAVY_WOODS && (!in_water || unit.amphibious),
            _ => true,
        }
    }
}

impl MoveRules for StandardRules {
    fn step_cost(
        &self,
        board: &dyn Board,
        unit: &Unit,
        from: &MoveState,
        to: &MoveState,
        step: StepType,
    ) -> u32 {
        match step {
            StepType::Thrust => 1,
            StepType::FlyOff | StepType::StartJump | StepType::Flee => 0,
            s if s.changes_hex() => {
                if unit.is_aerodyne() {
                    return 0;
                }
                if unit.is_spheroid() || from.jumping || (unit.is_vtol() && to.elevation > 0) {
                    return 1;
                }
                let Some(hex) = board.hex(to.coords) else {
                    return 1;
                };
                let climb = (hex.level - Self::level(board, from)).unsigned_abs();
                let lateral = if s.is_lateral() { 1 } else { 0 };
                1 + Self::terrain_cost(unit, hex) + climb + lateral
            }
            StepType::TurnLeft | StepType::TurnRight => {
                if unit.is_infantry() || unit.is_spheroid() || from.jumping {
                    0
                } else {
                    1
                }
            }
            StepType::GetUp => 2,
            StepType::CarefulStand => unit.walk_mp.max(2),
            StepType::Up => {
                if unit.is_aero() {
                    2
                } else {
                    1
                }
            }
            StepType::Down => {
                if unit.is_aero() {
                    0
                } else {
                    1
                }
            }
            StepType::Accelerate | StepType::Decelerate => 1,
            StepType::Hover => 2,
            _ => 1,
        }
    }

    fn is_step_legal(&self, board: &dyn Board, unit: &Unit, path: &MovePath) -> bool {
        let Some(last) = path.last_step() else {
            return true;
        };
        let from = path.previous_state();
        let to = &last.state;
        match last.kind {
            StepType::Flee => return unit.can_flee && board.is_edge(from.coords),
            StepType::FlyOff => return unit.is_aero(),
            StepType::GetUp | StepType::CarefulStand => {
                return (from.prone || from.hull_down)
                    && (last.kind == StepType::GetUp || unit.can_careful_stand);
            }
            _ => {}
        }
        if from.prone || (from.hull_down && !unit.is_tank()) {
            return false;
        }
        match last.kind {
            StepType::StartJump => {
                return unit.jump_mp > 0 && !from.jumping && from.mp_used == 0;
            }
            StepType::Up => return unit.is_vtol() && to.elevation <= unit.max_elevation,
            StepType::Down => return unit.is_vtol() && to.elevation >= 0,
            s if s.is_lateral() && (!unit.can_shift || to.jumping) => return false,
            StepType::Backwards if to.jumping => return false,
            _ => {}
        }
        if !last.kind.changes_hex() {
            return true;
        }
        let Some(hex) = board.hex(to.coords) else {
            return false;
        };
        if hex.impassable {
            return false;
        }
        if to.jumping || (unit.is_vtol() && to.elevation > 0) {
            return true;
        }
        let climb = (hex.level - Self::level(board, from)).abs();
        climb <= unit.max_climb() && Self::terrain_allows(unit, hex)
    }

    fn movement_type(&self, board: &dyn Board, unit: &Unit, path: &MovePath) -> MovementType {
        let state = path.final_state();
        let Some(aero) = unit.aero else {
            return if !self.is_legal(board, unit, path) {
                MovementType::Illegal
            } else if state.jumping {
                MovementType::Jump
            } else if state.mp_used <= unit.walk_mp {
                MovementType::Walk
            } else {
                MovementType::Run
            };
        };
        if let Some(last) = path.last_step() {
            if aero.out_of_control {
                return MovementType::Illegal;
            }
            match last.kind {
                StepType::Hover if !aero.can_hover => return MovementType::Illegal,
                StepType::GetUp
                | StepType::CarefulStand
                | StepType::StartJump
                | StepType::Flee
                | StepType::Backwards => return MovementType::Illegal,
                s if s.is_lateral() => return MovementType::Illegal,
                StepType::FlyOff => {}
                _ => {
                    if !board.contains(state.coords) {
                        return MovementType::Illegal;
                    }
                }
            }
        }
        if state.velocity < 0 || state.velocity > MAX_AERO_VELOCITY {
            return MovementType::Illegal;
        }
        if unit.is_aerodyne() && state.velocity_left < 0 {
            return MovementType::Illegal;
        }
        if state.elevation < 1 || state.elevation > MAX_AERO_ALTITUDE {
            return MovementType::Illegal;
        }
        if state.mp_used > unit.run_mp {
            MovementType::Illegal
        } else if state.mp_used > unit.walk_mp {
            MovementType::OverThrust
        } else {
            MovementType::SafeThrust
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GridBoard, LIGHT_WOODS};
    use crate::hex::{Coords, NORTH, SOUTH};
    use crate::move_path::MoveContext;
    use crate::unit::AeroState;

    fn board() -> GridBoard {
        let mut board = GridBoard::new(6, 6);
        board.set_hex(Coords::new(2, 1), Hex::clear(0).with_woods(LIGHT_WOODS)).unwrap();
        board.set_hex(Coords::new(3, 3), Hex::clear(3)).unwrap();
        board.set_hex(Coords::new(4, 4), Hex::clear(0).impassable()).unwrap();
        board.set_hex(Coords::new(1, 1), Hex::clear(0).with_water(2)).unwrap();
        board
    }

    #[test]
    fn ground_costs() {
        let board = board();
        let unit = Unit::mek(1, Coords::new(2, 2), NORTH, 4, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let woods = ctx.start_path().with_step(&ctx, StepType::Forwards);
        assert_eq!(woods.mp_used(), 2);
        let turned = ctx.start_path().with_step(&ctx, StepType::TurnLeft);
        assert_eq!(turned.mp_used(), 1);
        assert!(ctx.is_legal(&woods));
    }

    #[test]
    fn climbing_limits() {
        let board = board();
        let mek = Unit::mek(1, Coords::new(3, 4), NORTH, 6, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &mek);
        let up = ctx.start_path().with_step(&ctx, StepType::Forwards);
        assert_eq!(up.final_coords(), Coords::new(3, 3));
        assert!(!ctx.is_legal(&up));

        let jumper = Unit::mek(2, Coords::new(3, 4), NORTH, 6, 4);
        let ctx = MoveContext::new(&board, &StandardRules, &jumper);
        let jump = ctx
            .start_path()
            .with_steps(&ctx, &[StepType::StartJump, StepType::Forwards]);
        assert!(ctx.is_legal(&jump));
        assert_eq!(jump.mp_used(), 1);
    }

    #[test]
    fn terrain_restrictions() {
        let board = board();
        let infantry = Unit::infantry(1, Coords::new(1, 2), NORTH, 3, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &infantry);
        assert!(!ctx.is_legal(&ctx.start_path().with_step(&ctx, StepType::Forwards)));

        let tank = Unit::tank(2, MotiveType::Wheeled, Coords::new(2, 2), NORTH, 5);
        let ctx = MoveContext::new(&board, &StandardRules, &tank);
        assert!(!ctx.is_legal(&ctx.start_path().with_step(&ctx, StepType::Forwards)));

        let mek = Unit::mek(3, Coords::new(4, 3), SOUTH, 5, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &mek);
        assert!(!ctx.is_legal(&ctx.start_path().with_step(&ctx, StepType::Forwards)));
    }

    #[test]
    fn prone_units_must_stand() {
        let board = board();
        let mut mek = Unit::mek(1, Coords::new(2, 2), NORTH, 4, 0);
        mek.prone = true;
        let ctx = MoveContext::new(&board, &StandardRules, &mek);
        assert!(!ctx.is_legal(&ctx.start_path().with_step(&ctx, StepType::Forwards)));
        let up = ctx.start_path().with_step(&ctx, StepType::GetUp);
        assert!(ctx.is_legal(&up));
        assert!(!up.final_prone());
        assert!(ctx.is_legal(&up.with_step(&ctx, StepType::Forwards)));
        assert!(!ctx.is_legal(&ctx.start_path().with_step(&ctx, StepType::CarefulStand)));
    }

    #[test]
    fn aerospace_classification() {
        let board = GridBoard::new(8, 8);
        let aero = AeroState {
            current_thrust: 6,
            structural_integrity: 5,
            velocity: 2,
            ..AeroState::default()
        };
        let fighter = Unit::aerospace(1, UnitKind::Aerodyne, Coords::new(4, 4), NORTH, 4, aero);
        let ctx = MoveContext::new(&board, &StandardRules, &fighter);
        let path = ctx.start_path().with_steps(
            &ctx,
            &[StepType::Forwards, StepType::TurnRight, StepType::Forwards],
        );
        assert_eq!(
            StandardRules.movement_type(&board, &fighter, &path),
            MovementType::SafeThrust
        );
        let too_far = path.with_step(&ctx, StepType::Forwards);
        assert!(!ctx.is_legal(&too_far));
        let hover = ctx.start_path().with_step(&ctx, StepType::Hover);
        assert!(!ctx.is_legal(&hover));
    }
}
