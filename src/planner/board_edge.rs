//! Retreat routes to a side of the map.
use crate::adjacency::board_edge::BoardEdgeAdjacencyMap;
use crate::board::BoardEdge;
use crate::cost::ShortestPathRelaxer;
use crate::move_finder::MovePathFinder;
use crate::move_path::{MoveContext, MovePath};

pub struct BoardEdgePathFinder<'a> {
    ctx: MoveContext<'a>,
}

impl<'a> BoardEdgePathFinder<'a> {
    pub fn new(ctx: MoveContext<'a>) -> BoardEdgePathFinder<'a> {
        BoardEdgePathFinder { ctx }
    }

    /// Cheapest coarse route from `start` to any hex on `edge`. Ignores the turn budget and
    /// most movement rules; only impassable hexes and buildings block the way.
    pub fn find_path_to_edge(&self, start: &MovePath, edge: BoardEdge) -> Option<MovePath> {
        let ctx = self.ctx;
        let board = ctx.board;
        let estimate = move |p: &MovePath| p.mp_used() + edge.distance(board, p.final_coords());
        let mut finder: MovePathFinder<MovePath> = MovePathFinder::new(
            ctx,
            ShortestPathRelaxer,
            BoardEdgeAdjacencyMap { ctx },
            move |a: &MovePath, b: &MovePath| {
                estimate(a)
                    .cmp(&estimate(b))
                    .then_with(|| a.mp_used().cmp(&b.mp_used()))
            },
        );
        finder.add_stop_condition(move |p: &MovePath| edge.is_on(board, p.final_coords()));
        finder.run(start.clone());
        finder
            .all_computed_paths_uncategorized()
            .into_iter()
            .filter(|p| edge.is_on(board, p.final_coords()))
            .min_by_key(MovePath::mp_used)
    }

    /// Like [find_path_to_edge](Self::find_path_to_edge), towards the edge closest to the
    /// end of `start`.
    pub fn find_path_to_nearest_edge(&self, start: &MovePath) -> Option<MovePath> {
        let edge = BoardEdge::nearest(self.ctx.board, start.final_coords());
        self.find_path_to_edge(start, edge)
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
    fn straight_to_the_north_edge() {
        let board = GridBoard::new(7, 7);
        let unit = Unit::mek(1, Coords::new(3, 3), NORTH, 4, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let finder = BoardEdgePathFinder::new(ctx);
        let path = finder
            .find_path_to_edge(&ctx.start_path(), BoardEdge::North)
            .unwrap();
        assert_eq!(path.final_coords(), Coords::new(3, 0));
        assert_eq!(path.mp_used(), 3);
    }

    #[test]
    fn nearest_edge_and_blocked_edges() {
        let mut board = GridBoard::new(7, 7);
        let unit = Unit::mek(1, Coords::new(1, 3), NORTH, 4, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let path = BoardEdgePathFinder::new(ctx)
            .find_path_to_nearest_edge(&ctx.start_path())
            .unwrap();
        assert_eq!(path.final_coords().x, 0);

        for x in 0..7 {
            board
                .set_hex(Coords::new(x, 1), Hex::clear(0).impassable())
                .unwrap();
        }
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        assert!(BoardEdgePathFinder::new(ctx)
            .find_path_to_edge(&ctx.start_path(), BoardEdge::North)
            .is_none());
    }

    #[test]
    fn already_on_the_edge() {
        let board = GridBoard::new(7, 7);
        let unit = Unit::mek(1, Coords::new(0, 3), NORTH, 4, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let path = BoardEdgePathFinder::new(ctx)
            .find_path_to_edge(&ctx.start_path(), BoardEdge::West)
            .unwrap();
        assert!(path.is_empty());
    }
}
