//! Planning for a unit that starts the turn prone or hull-down. Staying down, getting up and
//! standing carefully are searched as separate starts and merged into one result set where
//! standing paths are preferred.
use crate::move_finder::MovePathFinder;
use crate::move_path::{MoveContext, MovePath, StepType};
use crate::planner::shortest::{one_to_all, ShortestPathFinder};
use crate::search::SearchOutcome;

pub struct PronePathFinder<'a> {
    ctx: MoveContext<'a>,
    finder: ShortestPathFinder<'a>,
}

impl<'a> PronePathFinder<'a> {
    pub fn new(ctx: MoveContext<'a>, max_mp: u32) -> PronePathFinder<'a> {
        PronePathFinder {
            ctx,
            finder: one_to_all(ctx, max_mp, StepType::Forwards),
        }
    }

    /// Starting paths: `start` itself plus each legal way of standing up from it.
    pub fn starts(&self, start: &MovePath) -> Vec<MovePath> {
        let ctx = &self.ctx;
        let mut starts = vec![start.clone()];
        if start.is_down() {
            starts.extend(
                [StepType::GetUp, StepType::CarefulStand]
                    .into_iter()
                    .map(|s| start.with_step(ctx, s))
                    .filter(|p| ctx.is_legal(p)),
            );
        }
        starts
    }

    pub fn run(&mut self, start: &MovePath) -> SearchOutcome {
        let starts = self.starts(start);
        self.finder.run_all(starts)
    }

    pub fn finder(&self) -> &MovePathFinder<'a, MovePath> {
        &self.finder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GridBoard;
    use crate::hex::{Coords, NORTH};
    use crate::rules::StandardRules;
    use crate::unit::Unit;

    #[test]
    fn careful_stand_joins_the_results() {
        let board = GridBoard::new(7, 7);
        let mut unit = Unit::mek(1, Coords::new(3, 3), NORTH, 4, 0);
        unit.prone = true;
        unit.can_careful_stand = true;
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let mut planner = PronePathFinder::new(ctx, 6);
        assert_eq!(planner.starts(&ctx.start_path()).len(), 3);
        planner.run(&ctx.start_path());
        let home = planner.finder().computed_path(Coords::new(3, 3)).unwrap();
        assert_eq!(home.step_types(), vec![StepType::GetUp]);
        let far = planner.finder().computed_path(Coords::new(3, 0)).unwrap();
        assert_eq!(far.mp_used(), 5);
        assert!(planner
            .finder()
            .all_computed_paths()
            .values()
            .all(|p| !p.final_prone()));
    }
}
