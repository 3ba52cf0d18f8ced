use crate::move_path::{MoveContext, MovePath, StepType};
use crate::search::AdjacencyMap;

/// Coarse moves for long-range retreat planning: veer left, go straight or veer right, one
/// hex at a time. Only hexes that are on the map, passable and free of buildings are entered;
/// the full rules are not consulted.
#[derive(Clone, Copy)]
pub struct BoardEdgeAdjacencyMap<'a> {
    pub ctx: MoveContext<'a>,
}

impl BoardEdgeAdjacencyMap<'_> {
    fn enterable(&self, path: &MovePath) -> bool {
        self.ctx
            .board
            .hex(path.final_coords())
            .is_some_and(|h| !h.impassable && h.building.is_none())
    }
}

impl AdjacencyMap<MovePath> for BoardEdgeAdjacencyMap<'_> {
    fn adjacent(&mut self, path: &MovePath) -> Vec<MovePath> {
        let ctx = &self.ctx;
        let options: [&[StepType]; 3] = [
            &[StepType::TurnLeft, StepType::Forwards],
            &[StepType::Forwards],
            &[StepType::TurnRight, StepType::Forwards],
        ];
        options
            .into_iter()
            .map(|steps| path.with_steps(ctx, steps))
            .filter(|p| self.enterable(p))
            .collect()
    }
}
