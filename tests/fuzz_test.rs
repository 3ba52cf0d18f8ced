/// Fuzzes the planners on many random maps: a multi-turn A* search must find a path exactly
/// when the cluster tracker puts start and goal in the same cluster, and budgeted searches
/// must stay within their budget and give the same answer when run twice.
use move_pathfinding::{
    board::{Board, GridBoard, Hex},
    hex::SOUTH,
    planner::{
        cluster::{BoardClusters, ClusterMovement},
        shortest,
    },
    rules::StandardRules,
    unit::Unit,
    Coords, MoveContext, StepType,
};
use rand::prelude::*;

fn random_board(w: usize, h: usize, rng: &mut StdRng) -> GridBoard {
    let mut board = GridBoard::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let mut hex = Hex::clear(rng.gen_range(0..=3));
            if rng.gen_bool(0.2) {
                hex = hex.impassable();
            } else if rng.gen_bool(0.3) {
                hex = hex.with_woods(rng.gen_range(1..=3));
            }
            board.set_hex(Coords::new(x, y), hex).unwrap();
        }
    }
    board
}

fn visualize_board(board: &GridBoard, start: Coords, end: Coords) {
    for y in 0..board.height() {
        for x in 0..board.width() {
            let c = Coords::new(x, y);
            let hex = board.hex(c).unwrap();
            if c == start {
                print!("S");
            } else if c == end {
                print!("G");
            } else if hex.impassable {
                print!("#");
            } else {
                print!("{}", hex.level);
            }
        }
        println!();
    }
}

#[test]
fn fuzz_reachability() {
    const N: usize = 8;
    const N_BOARDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Coords::new(0, 0);
    let end = Coords::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_BOARDS {
        let mut board = random_board(N, N, &mut rng);
        board.set_hex(start, Hex::clear(0)).unwrap();
        board.set_hex(end, Hex::clear(0)).unwrap();
        let clusters = BoardClusters::build(&board, ClusterMovement::Walker, false);
        let reachable = clusters.same_cluster(start, end);

        let unit = Unit::mek(1, start, SOUTH, 4, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let mut finder = shortest::a_star(ctx, end, StepType::Forwards);
        finder.run(ctx.start_path());
        let path = finder.computed_path(end);
        // Show the board if the search and the clusters disagree
        if path.is_some() != reachable {
            visualize_board(&board, start, end);
        }
        assert!(path.is_some() == reachable);
    }
}

#[test]
fn fuzz_budget_and_reruns() {
    const N: usize = 6;
    const N_BOARDS: usize = 200;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Coords::new(2, 2);
    for _ in 0..N_BOARDS {
        let mut board = random_board(N, N, &mut rng);
        board.set_hex(start, Hex::clear(0)).unwrap();
        let unit = Unit::mek(1, start, SOUTH, 4, 0);
        let ctx = MoveContext::new(&board, &StandardRules, &unit);
        let clusters = BoardClusters::build(&board, ClusterMovement::Walker, false);

        let mut finder = shortest::one_to_all(ctx, unit.run_mp, StepType::Forwards);
        finder.run(ctx.start_path());
        let first = finder.all_computed_paths();
        for (coords, path) in &first {
            assert!(path.mp_used() <= unit.run_mp);
            assert_eq!(path.steps().iter().map(|s| s.mp).sum::<u32>(), path.mp_used());
            assert!(clusters.same_cluster(start, *coords));
        }
        finder.run(ctx.start_path());
        assert_eq!(first, finder.all_computed_paths());
    }
}
