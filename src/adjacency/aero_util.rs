//! Building blocks shared by the aerospace generators.
use crate::move_path::{MoveContext, MovePath, StepType};
use crate::unit::Unit;

/// Thrust that can be spent without risking the airframe: the lower of current thrust and
/// structural integrity. Zero for anything that is not an aerospace unit.
pub fn max_safe_thrust(unit: &Unit) -> u32 {
    unit.aero
        .map_or(0, |a| a.current_thrust.min(a.structural_integrity))
}

/// Extensions of `start` by the acceleration or deceleration steps needed to reach every
/// velocity in `[lower, upper]` that is also within one turn's safe thrust of the current
/// velocity. Illegal sequences are left out.
pub fn generate_valid_accelerations(
    ctx: &MoveContext,
    start: &MovePath,
    lower: i32,
    upper: i32,
) -> Vec<MovePath> {
    let velocity = start.final_velocity();
    let thrust = max_safe_thrust(ctx.unit) as i32;
    let low = lower.max(velocity - thrust);
    let high = upper.min(velocity + thrust);
    (low..=high)
        .filter_map(|target| {
            let step = if target < velocity {
                StepType::Decelerate
            } else {
                StepType::Accelerate
            };
            let mut path = start.clone();
            for _ in 0..(target - velocity).unsigned_abs() {
                path = path.with_step(ctx, step);
                if !ctx.is_legal(&path) {
                    return None;
                }
            }
            Some(path)
        })
        .collect()
}

/// `path` turned in place to every other facing, one path per facing, as long as each turn
/// is legal.
pub fn generate_valid_rotations(ctx: &MoveContext, path: &MovePath) -> Vec<MovePath> {
    let mut rotations = Vec::new();
    for (turn, count) in [(StepType::TurnLeft, 3), (StepType::TurnRight, 2)] {
        let mut current = path.clone();
        for _ in 0..count {
            current = current.with_step(ctx, turn);
            if !ctx.is_legal(&current) {
                break;
            }
            rotations.push(current.clone());
        }
    }
    rotations
}

/// `path` extended by the fewest turns that leave it facing `facing`.
pub fn rotate_to(ctx: &MoveContext, path: &MovePath, facing: u8) -> MovePath {
    let current = path.final_facing();
    let clockwise = (facing as i32 - current as i32).rem_euclid(6);
    let (turn, count) = if clockwise <= 3 {
        (StepType::TurnRight, clockwise)
    } else {
        (StepType::TurnLeft, 6 - clockwise)
    };
    (0..count).fold(path.clone(), |p, _| p.with_step(ctx, turn))
}

/// Climbs or dives `path` towards `altitude`. Diving stops after `max_descent` levels, and
/// either direction stops at the first step the rules reject.
pub fn adjust_altitude(
    ctx: &MoveContext,
    path: &MovePath,
    altitude: i32,
    max_descent: i32,
) -> MovePath {
    let mut adjusted = path.clone();
    let mut descended = 0;
    loop {
        let elevation = adjusted.final_elevation();
        let step = if elevation < altitude {
            StepType::Up
        } else if elevation > altitude && descended < max_descent {
            descended += 1;
            StepType::Down
        } else {
            return adjusted;
        };
        let next = adjusted.with_step(ctx, step);
        if !ctx.is_legal(&next) {
            return adjusted;
        }
        adjusted = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GridBoard;
    use crate::hex::{Coords, NORTH, SOUTHWEST};
    use crate::rules::StandardRules;
    use crate::unit::{AeroState, UnitKind};

    fn fighter(velocity: i32, thrust: u32) -> Unit {
        let aero = AeroState {
            current_thrust: thrust,
            structural_integrity: 8,
            velocity,
            ..AeroState::default()
        };
        Unit::aerospace(1, UnitKind::Aerodyne, Coords::new(5, 5), NORTH, thrust, aero)
    }

    #[test]
    fn safe_thrust_is_capped_by_structure() {
        let mut unit = fighter(3, 9);
        assert_eq!(max_safe_thrust(&unit), 8);
        unit.aero = None;
        assert_eq!(max_safe_thrust(&unit), 0);
    }

    #[test]
    fn accelerations_within_governor() {
        let board = GridBoard::new(10, 10);
        let unit = fighter(3, 2);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let velocities = generate_valid_accelerations(&ctx, &ctx.start_path(), 1, 3)
            .iter()
            .map(MovePath::final_velocity)
            .collect::<Vec<_>>();
        assert_eq!(velocities, vec![1, 2, 3]);
    }

    #[test]
    fn rotations_cover_other_facings() {
        let board = GridBoard::new(10, 10);
        let unit = crate::unit::Unit::infantry(1, Coords::new(5, 5), NORTH, 2, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let mut facings = generate_valid_rotations(&ctx, &ctx.start_path())
            .iter()
            .map(MovePath::final_facing)
            .collect::<Vec<_>>();
        facings.sort();
        assert_eq!(facings, vec![1, 2, 3, 4, 5]);
        let turned = rotate_to(&ctx, &ctx.start_path(), SOUTHWEST);
        assert_eq!(turned.step_types(), vec![StepType::TurnLeft, StepType::TurnLeft]);
    }

    #[test]
    fn altitude_adjustment() {
        let board = GridBoard::new(10, 10);
        let mut unit = fighter(2, 8);
        unit.elevation = 9;
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let dived = adjust_altitude(&ctx, &ctx.start_path(), 5, 2);
        assert_eq!(dived.final_elevation(), 7);
        assert_eq!(dived.mp_used(), 0);

        unit.elevation = 3;
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let climbed = adjust_altitude(&ctx, &ctx.start_path(), 5, 2);
        assert_eq!(climbed.final_elevation(), 5);
        assert_eq!(climbed.mp_used(), 4);
    }
}
