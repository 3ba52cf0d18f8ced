use std::collections::VecDeque;

use fxhash::FxHashMap;

use super::aero_util::rotate_to;
use crate::hex::Coords;
use crate::move_path::{MoveContext, MovePath, StepType};

/// Every simple path from `start` that turns freely to any of the six directions before each
/// forward step, stays within `max_mp`, and only enters hexes `enterable` accepts.
///
/// Branches are cut when they reach a hex (in the same jumping state) no cheaper than an
/// earlier branch did.
pub(crate) fn six_direction_fan(
    ctx: &MoveContext,
    start: &MovePath,
    max_mp: u32,
    enterable: impl Fn(&MovePath) -> bool,
) -> Vec<MovePath> {
    let mut best = FxHashMap::<(Coords, bool), u32>::default();
    best.insert((start.final_coords(), start.is_jumping()), start.mp_used());
    let mut pending = VecDeque::from([start.clone()]);
    let mut paths = Vec::new();
    while let Some(path) = pending.pop_front() {
        for direction in 0..6 {
            let target = path.final_coords().translated(direction);
            if !ctx.board.contains(target) || path.visits(target) {
                continue;
            }
            let next = rotate_to(ctx, &path, direction).with_step(ctx, StepType::Forwards);
            if next.mp_used() > max_mp || !enterable(&next) || !ctx.is_legal(&next) {
                continue;
            }
            let key = (target, next.is_jumping());
            if best.get(&key).is_some_and(|&mp| mp <= next.mp_used()) {
                continue;
            }
            best.insert(key, next.mp_used());
            paths.push(next.clone());
            pending.push_back(next);
        }
    }
    paths
}
