//! Hex coordinates in the column-offset layout used by tabletop maps: columns are `x`, rows
//! are `y`, and odd columns sit half a hex lower than even ones. Facings run clockwise from
//! north: 0 = N, 1 = NE, 2 = SE, 3 = S, 4 = SW, 5 = NW.
use core::fmt;

pub const NORTH: u8 = 0;
pub const NORTHEAST: u8 = 1;
pub const SOUTHEAST: u8 = 2;
pub const SOUTH: u8 = 3;
pub const SOUTHWEST: u8 = 4;
pub const NORTHWEST: u8 = 5;

/// Rotates a facing by `delta` hexsides, positive being clockwise.
pub fn rotate(facing: u8, delta: i32) -> u8 {
    (facing as i32 + delta).rem_euclid(6) as u8
}

/// The facing pointing the other way.
pub fn opposite(facing: u8) -> u8 {
    rotate(facing, 3)
}

/// Minimal number of hexside turns needed to get from one facing to another (0..=3).
pub fn facing_difference(from: u8, to: u8) -> u8 {
    let d = (to as i32 - from as i32).rem_euclid(6) as u8;
    d.min(6 - d)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub const fn new(x: i32, y: i32) -> Coords {
        Coords { x, y }
    }

    /// The neighbouring hex in the given direction.
    pub fn translated(self, direction: u8) -> Coords {
        let odd = self.x & 1;
        match direction % 6 {
            NORTH => Coords::new(self.x, self.y - 1),
            NORTHEAST => Coords::new(self.x + 1, self.y - 1 + odd),
            SOUTHEAST => Coords::new(self.x + 1, self.y + odd),
            SOUTH => Coords::new(self.x, self.y + 1),
            SOUTHWEST => Coords::new(self.x - 1, self.y + odd),
            _ => Coords::new(self.x - 1, self.y - 1 + odd),
        }
    }

    pub fn translated_by(self, direction: u8, distance: u32) -> Coords {
        (0..distance).fold(self, |c, _| c.translated(direction))
    }

    /// All six neighbours, indexed by direction.
    pub fn neighbours(self) -> [Coords; 6] {
        [0, 1, 2, 3, 4, 5].map(|d| self.translated(d))
    }

    fn axial(self) -> (i32, i32) {
        (self.x, self.y - (self.x - (self.x & 1)) / 2)
    }

    /// Number of hexes between the two coordinates.
    pub fn distance(self, other: Coords) -> u32 {
        let (q1, r1) = self.axial();
        let (q2, r2) = other.axial();
        let dq = q1 - q2;
        let dr = r1 - r2;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    pub fn is_adjacent(self, other: Coords) -> bool {
        self.distance(other) == 1
    }

    fn center(self) -> (f64, f64) {
        let half_row = if self.x & 1 == 1 { 0.5 } else { 0.0 };
        (
            self.x as f64 * 1.5,
            (self.y as f64 + half_row) * 3f64.sqrt(),
        )
    }

    /// Bearing towards `other` in degrees, clockwise from north, in `[0, 360)`.
    pub fn degree(self, other: Coords) -> f64 {
        let (x1, y1) = self.center();
        let (x2, y2) = other.center();
        let deg = (x2 - x1).atan2(y1 - y2).to_degrees();
        if deg < 0.0 {
            deg + 360.0
        } else {
            deg
        }
    }

    /// The facing that points most closely towards `other`.
    pub fn direction(self, other: Coords) -> u8 {
        ((self.degree(other) / 60.0).round() as i32).rem_euclid(6) as u8
    }

    /// Whether `other` lies exactly on one of the six hex spines from this hex.
    pub fn on_spine(self, other: Coords) -> bool {
        let deg = self.degree(other);
        let rem = deg % 60.0;
        rem < 1e-6 || 60.0 - rem < 1e-6
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where a unit stands and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordsWithFacing {
    pub coords: Coords,
    pub facing: u8,
}

impl CoordsWithFacing {
    pub fn new(coords: Coords, facing: u8) -> CoordsWithFacing {
        CoordsWithFacing {
            coords,
            facing: facing % 6,
        }
    }
}

impl fmt::Display for CoordsWithFacing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} facing {}", self.coords, self.facing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_are_adjacent_and_reversible() {
        for c in [Coords::new(0, 0), Coords::new(3, 4), Coords::new(-1, 2)] {
            for (dir, n) in c.neighbours().into_iter().enumerate() {
                assert_eq!(c.distance(n), 1, "{c} -> {n}");
                assert_eq!(n.translated(opposite(dir as u8)), c);
            }
        }
    }

    #[test]
    fn distance_in_offset_columns() {
        let origin = Coords::new(0, 0);
        assert_eq!(origin.distance(Coords::new(0, 4)), 4);
        assert_eq!(origin.distance(Coords::new(4, 4)), 6);
        assert_eq!(origin.distance(Coords::new(4, 0)), 4);
        assert_eq!(Coords::new(1, 0).distance(Coords::new(2, 0)), 1);
    }

    #[test]
    fn direction_matches_translation() {
        let c = Coords::new(5, 5);
        for dir in 0..6 {
            let far = c.translated_by(dir, 3);
            assert_eq!(c.direction(far), dir);
            assert!(c.on_spine(far));
        }
        assert!(!c.on_spine(Coords::new(7, 2)));
    }

    #[test]
    fn facing_helpers() {
        assert_eq!(rotate(NORTH, -1), NORTHWEST);
        assert_eq!(rotate(NORTHWEST, 2), NORTHEAST);
        assert_eq!(facing_difference(NORTH, SOUTH), 3);
        assert_eq!(facing_difference(NORTHWEST, NORTHEAST), 2);
        assert_eq!(CoordsWithFacing::new(Coords::new(1, 1), 7).facing, 1);
    }
}
