use crate::adjacency::infantry::InfantryMoveGenerator;
use crate::move_path::{MoveContext, MovePath};
use crate::planner::PathSet;

/// Every move an infantry unit can make this turn.
pub struct InfantryPathFinder<'a> {
    generator: InfantryMoveGenerator<'a>,
    paths: PathSet,
}

impl<'a> InfantryPathFinder<'a> {
    pub fn new(ctx: MoveContext<'a>) -> InfantryPathFinder<'a> {
        InfantryPathFinder {
            generator: InfantryMoveGenerator::new(ctx),
            paths: PathSet::default(),
        }
    }

    pub fn allow_flee(mut self, allow: bool) -> Self {
        self.generator.allow_flee = allow;
        self
    }

    pub fn run(&mut self, start: &MovePath) {
        self.paths = PathSet::new(self.generator.generate(start));
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }
}
