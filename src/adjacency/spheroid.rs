use super::fan::six_direction_fan;
use crate::move_path::{MoveContext, MovePath, StepType};

/// Spheroid craft in atmosphere move like a hovering helicopter: any direction each hex, up
/// to their max thrust.
pub struct SpheroidMoveGenerator<'a> {
    pub ctx: MoveContext<'a>,
}

impl<'a> SpheroidMoveGenerator<'a> {
    pub fn new(ctx: MoveContext<'a>) -> SpheroidMoveGenerator<'a> {
        SpheroidMoveGenerator { ctx }
    }

    pub fn generate(&self, start: &MovePath) -> Vec<MovePath> {
        let ctx = &self.ctx;
        let mut paths = vec![start.clone()];
        let hover = start.with_step(ctx, StepType::Hover);
        if ctx.is_legal(&hover) {
            paths.push(hover);
        }
        paths.extend(six_direction_fan(ctx, start, ctx.unit.run_mp, |_| true));
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GridBoard;
    use crate::hex::{Coords, NORTH};
    use crate::rules::StandardRules;
    use crate::unit::{AeroState, Unit, UnitKind};

    fn dropship(can_hover: bool) -> Unit {
        let aero = AeroState {
            current_thrust: 3,
            structural_integrity: 10,
            velocity: 0,
            can_hover,
            ..AeroState::default()
        };
        Unit::aerospace(1, UnitKind::Spheroid, Coords::new(4, 4), NORTH, 2, aero)
    }

    #[test]
    fn hover_only_when_capable() {
        let board = GridBoard::new(9, 9);
        let unit = dropship(true);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let paths = SpheroidMoveGenerator::new(ctx).generate(&ctx.start_path());
        assert_eq!(paths[1].step_types(), vec![StepType::Hover]);

        let unit = dropship(false);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let paths = SpheroidMoveGenerator::new(ctx).generate(&ctx.start_path());
        assert!(!paths.iter().any(|p| p.contains_step(StepType::Hover)));
    }

    #[test]
    fn reaches_run_thrust_in_any_direction() {
        let board = GridBoard::new(9, 9);
        let unit = dropship(false);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let paths = SpheroidMoveGenerator::new(ctx).generate(&ctx.start_path());
        assert!(paths.iter().all(|p| p.mp_used() <= 3));
        let ring = paths
            .iter()
            .filter(|p| p.final_coords().distance(Coords::new(4, 4)) == 3)
            .map(MovePath::final_coords)
            .collect::<fxhash::FxHashSet<_>>();
        assert_eq!(ring.len(), 18);
    }
}
