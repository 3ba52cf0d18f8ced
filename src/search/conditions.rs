//! Ready-made stop conditions.
use std::time::{Duration, Instant};

use super::StopCondition;
use crate::hex::Coords;
use crate::move_path::MovePath;

/// Cooperative cancellation: halts once `timeout` has passed since the run started. Checked
/// once per settled edge, so a zero timeout still settles exactly one edge.
#[derive(Clone, Debug)]
pub struct TimeoutStop {
    timeout: Duration,
    started: Instant,
}

impl TimeoutStop {
    pub fn new(timeout: Duration) -> TimeoutStop {
        TimeoutStop {
            timeout,
            started: Instant::now(),
        }
    }

    pub fn from_millis(millis: u64) -> TimeoutStop {
        TimeoutStop::new(Duration::from_millis(millis))
    }
}

impl<E> StopCondition<E> for TimeoutStop {
    fn should_stop(&mut self, _edge: &E) -> bool {
        self.started.elapsed() >= self.timeout
    }

    fn reset(&mut self) {
        self.started = Instant::now();
    }
}

/// Halts after a fixed number of settled edges.
#[derive(Clone, Debug)]
pub struct EdgeCountStop {
    limit: usize,
    seen: usize,
}

impl EdgeCountStop {
    pub fn new(limit: usize) -> EdgeCountStop {
        EdgeCountStop { limit, seen: 0 }
    }
}

impl<E> StopCondition<E> for EdgeCountStop {
    fn should_stop(&mut self, _edge: &E) -> bool {
        self.seen += 1;
        self.seen >= self.limit
    }

    fn reset(&mut self) {
        self.seen = 0;
    }
}

/// Halts as soon as a path ending in one of the given hexes is settled.
#[derive(Clone, Debug)]
pub struct DestinationReached {
    destinations: Vec<Coords>,
}

impl DestinationReached {
    pub fn new(destinations: impl IntoIterator<Item = Coords>) -> DestinationReached {
        DestinationReached {
            destinations: destinations.into_iter().collect(),
        }
    }
}

impl StopCondition<MovePath> for DestinationReached {
    fn should_stop(&mut self, edge: &MovePath) -> bool {
        self.destinations.contains(&edge.final_coords())
    }
}
