//! Infantry face any direction for free, so their moves are enumerated as whole paths rather
//! than searched one facing at a time.
use log::debug;

use super::aero_util::generate_valid_rotations;
use super::fan::six_direction_fan;
use crate::move_path::{MoveContext, MovePath, StepType};

pub struct InfantryMoveGenerator<'a> {
    pub ctx: MoveContext<'a>,
    /// Offer withdrawing off the map to an unmoved unit standing on a board edge.
    pub allow_flee: bool,
}

impl<'a> InfantryMoveGenerator<'a> {
    pub fn new(ctx: MoveContext<'a>) -> InfantryMoveGenerator<'a> {
        InfantryMoveGenerator {
            ctx,
            allow_flee: true,
        }
    }

    /// Impassable hexes and bridges that cannot carry the unit are never entered.
    fn enterable(&self, path: &MovePath) -> bool {
        let Some(hex) = self.ctx.board.hex(path.final_coords()) else {
            return false;
        };
        !hex.impassable
            && hex
                .bridge
                .map_or(true, |b| b.capacity >= self.ctx.unit.tonnage)
    }

    /// The stand-still path, every walking and jumping path within budget, and every legal
    /// in-place rotation of each of them.
    pub fn generate(&self, start: &MovePath) -> Vec<MovePath> {
        let ctx = &self.ctx;
        let unit = ctx.unit;
        let mut paths = vec![start.clone()];
        if self.allow_flee && start.is_empty() && ctx.board.is_edge(start.final_coords()) {
            let flee = start.with_step(ctx, StepType::Flee);
            if ctx.is_legal(&flee) {
                paths.push(flee);
            }
        }

        let walk_budget = ctx.rules.max_mp(unit, false);
        paths.extend(six_direction_fan(ctx, start, walk_budget, |p| self.enterable(p)));

        if unit.jump_mp > 0 && !start.is_jumping() {
            let jump = start.with_step(ctx, StepType::StartJump);
            if ctx.is_legal(&jump) {
                let jump_budget = ctx.rules.max_mp(unit, true);
                paths.extend(six_direction_fan(ctx, &jump, jump_budget, |p| {
                    self.enterable(p)
                }));
            }
        }

        let rotations = paths
            .iter()
            .filter(|p| !p.flies_off_board())
            .flat_map(|p| generate_valid_rotations(ctx, p))
            .collect::<Vec<_>>();
        paths.extend(rotations);
        debug!(
            "Generated {} infantry paths for unit {}",
            paths.len(),
            unit.id
        );
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GridBoard, Hex};
    use crate::hex::{Coords, NORTH};
    use crate::rules::StandardRules;
    use crate::unit::Unit;

    #[test]
    fn weak_bridges_are_avoided() {
        let mut board = GridBoard::new(5, 5);
        board
            .set_hex(Coords::new(2, 1), Hex::clear(0).with_bridge(1.0))
            .unwrap();
        let unit = Unit::infantry(1, Coords::new(2, 2), NORTH, 1, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let paths = InfantryMoveGenerator::new(ctx).generate(&ctx.start_path());
        assert!(paths.iter().all(|p| !p.visits(Coords::new(2, 1))));
        assert!(paths.iter().any(|p| p.final_coords() == Coords::new(2, 3)));
    }

    #[test]
    fn jumping_branch() {
        let board = GridBoard::new(7, 7);
        let unit = Unit::infantry(1, Coords::new(3, 3), NORTH, 1, 3);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let paths = InfantryMoveGenerator::new(ctx).generate(&ctx.start_path());
        let farthest = paths
            .iter()
            .filter(|p| p.is_jumping())
            .map(|p| p.final_coords().distance(Coords::new(3, 3)))
            .max();
        assert_eq!(farthest, Some(3));
        assert!(paths
            .iter()
            .filter(|p| !p.is_jumping())
            .all(|p| p.hexes_moved() <= 1));
    }

    #[test]
    fn flee_from_the_edge() {
        let board = GridBoard::new(5, 5);
        let mut unit = Unit::infantry(1, Coords::new(0, 2), NORTH, 1, 0);
        unit.can_flee = true;
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let mut generator = InfantryMoveGenerator::new(ctx);
        let paths = generator.generate(&ctx.start_path());
        assert!(paths.iter().any(MovePath::flies_off_board));
        generator.allow_flee = false;
        let paths = generator.generate(&ctx.start_path());
        assert!(!paths.iter().any(MovePath::flies_off_board));
    }
}
