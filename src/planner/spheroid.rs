use crate::adjacency::spheroid::SpheroidMoveGenerator;
use crate::move_path::{MoveContext, MovePath};
use crate::planner::PathSet;

/// Moves of a spheroid craft in atmosphere: hovering in place when it can, otherwise any
/// route within its max thrust.
pub struct SpheroidPathFinder<'a> {
    generator: SpheroidMoveGenerator<'a>,
    paths: PathSet,
}

impl<'a> SpheroidPathFinder<'a> {
    pub fn new(ctx: MoveContext<'a>) -> SpheroidPathFinder<'a> {
        SpheroidPathFinder {
            generator: SpheroidMoveGenerator::new(ctx),
            paths: PathSet::default(),
        }
    }

    pub fn run(&mut self, start: &MovePath) {
        self.paths = PathSet::new(self.generator.generate(start));
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }
}
