//! Aerodyne moves in the three flight regimes.
use crate::adjacency::aero::{AeroMoveGenerator, FlightRegime};
use crate::move_path::{MoveContext, MovePath};
use crate::planner::PathSet;
use crate::{DEFAULT_VELOCITY_GOVERNOR, MAX_FREE_DESCENT, OPTIMAL_STRIKE_ALTITUDE};

pub struct AeroPathFinder<'a> {
    ctx: MoveContext<'a>,
    regime: FlightRegime,
    pub velocity_governor: i32,
    pub optimal_altitude: i32,
    pub max_descent: i32,
    pub end_turns: bool,
    paths: PathSet,
}

impl<'a> AeroPathFinder<'a> {
    pub fn new(ctx: MoveContext<'a>, regime: FlightRegime) -> AeroPathFinder<'a> {
        AeroPathFinder {
            ctx,
            regime,
            velocity_governor: DEFAULT_VELOCITY_GOVERNOR,
            optimal_altitude: OPTIMAL_STRIKE_ALTITUDE,
            max_descent: MAX_FREE_DESCENT,
            end_turns: regime == FlightRegime::LowAltitude,
            paths: PathSet::default(),
        }
    }

    /// Over a ground map, levelling off at the strike altitude.
    pub fn ground(ctx: MoveContext<'a>) -> AeroPathFinder<'a> {
        AeroPathFinder::new(ctx, FlightRegime::Ground)
    }

    pub fn low_altitude(ctx: MoveContext<'a>) -> AeroPathFinder<'a> {
        AeroPathFinder::new(ctx, FlightRegime::LowAltitude)
    }

    pub fn space(ctx: MoveContext<'a>) -> AeroPathFinder<'a> {
        AeroPathFinder::new(ctx, FlightRegime::Space)
    }

    pub fn regime(&self) -> FlightRegime {
        self.regime
    }

    pub fn run(&mut self, start: &MovePath) {
        let generator = AeroMoveGenerator {
            ctx: self.ctx,
            regime: self.regime,
            velocity_governor: self.velocity_governor,
            optimal_altitude: self.optimal_altitude,
            max_descent: self.max_descent,
            end_turns: self.end_turns,
        };
        self.paths = PathSet::new(generator.generate(start));
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }
}
