use super::turns_within;
use crate::move_path::{MoveContext, MovePath, StepType};
use crate::search::AdjacencyMap;
use crate::NEWTONIAN_MAX_CONSECUTIVE_TURNS;

/// Space movement without gravity or altitude: each step turns left, turns right, or spends
/// a point of thrust to drift one hex ahead (flying off the map at the edge).
#[derive(Clone, Copy)]
pub struct NewtonianAdjacencyMap<'a> {
    pub ctx: MoveContext<'a>,
}

impl AdjacencyMap<MovePath> for NewtonianAdjacencyMap<'_> {
    fn adjacent(&mut self, path: &MovePath) -> Vec<MovePath> {
        if path.flies_off_board() {
            return Vec::new();
        }
        let ctx = &self.ctx;
        let ahead = path.final_coords().translated(path.final_facing());
        let drift = if ctx.board.contains(ahead) {
            StepType::Thrust
        } else {
            StepType::FlyOff
        };
        turns_within(path, NEWTONIAN_MAX_CONSECUTIVE_TURNS)
            .into_iter()
            .chain([drift])
            .map(|s| path.with_step(ctx, s))
            .collect()
    }
}
