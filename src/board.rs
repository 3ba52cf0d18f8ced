//! Read-only view of the map the planners search over. The game engine owns the real map;
//! [GridBoard] is a dense in-memory implementation used for tests, benches and tools.
use core::fmt;

use crate::error::{PathFinderError, Result};
use crate::hex::Coords;

pub const LIGHT_WOODS: u8 = 1;
pub const HEAVY_WOODS: u8 = 2;
pub const ULTRA_HEAVY_WOODS: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Building {
    /// Construction factor, the damage needed to level the building.
    pub cf: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bridge {
    /// Maximum unit tonnage the bridge carries.
    pub capacity: f64,
}

/// Terrain of a single hex.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hex {
    pub level: i32,
    pub woods: u8,
    pub rough: bool,
    pub water_depth: u32,
    pub impassable: bool,
    pub building: Option<Building>,
    pub bridge: Option<Bridge>,
}

impl Hex {
    pub fn clear(level: i32) -> Hex {
        Hex {
            level,
            ..Hex::default()
        }
    }
    pub fn with_woods(mut self, woods: u8) -> Hex {
        self.woods = woods.min(ULTRA_HEAVY_WOODS);
        self
    }
    pub fn with_rough(mut self) -> Hex {
        self.rough = true;
        self
    }
    pub fn with_water(mut self, depth: u32) -> Hex {
        self.water_depth = depth;
        self
    }
    pub fn with_building(mut self, cf: u32) -> Hex {
        self.building = Some(Building { cf });
        self
    }
    pub fn with_bridge(mut self, capacity: f64) -> Hex {
        self.bridge = Some(Bridge { capacity });
        self
    }
    pub fn impassable(mut self) -> Hex {
        self.impassable = true;
        self
    }

    /// Terrain that a unit could clear by shooting at it, with the damage needed to do so.
    pub fn leveling_factor(&self) -> Option<u32> {
        if self.impassable {
            return None;
        }
        let woods = match self.woods {
            LIGHT_WOODS => 40,
            HEAVY_WOODS => 90,
            ULTRA_HEAVY_WOODS => 130,
            _ => 0,
        };
        let building = self.building.map_or(0, |b| b.cf);
        match woods + building {
            0 => None,
            f => Some(f),
        }
    }

    /// The same hex with woods and buildings knocked down to rough ground.
    pub fn leveled(&self) -> Hex {
        let mut hex = self.clone();
        if hex.woods > 0 || hex.building.is_some() {
            hex.rough = true;
        }
        hex.woods = 0;
        hex.building = None;
        hex
    }
}

pub trait Board {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn hex(&self, coords: Coords) -> Option<&Hex>;

    fn contains(&self, coords: Coords) -> bool {
        coords.x >= 0 && coords.y >= 0 && coords.x < self.width() && coords.y < self.height()
    }

    /// Hexes on the outermost ring of the map.
    fn is_edge(&self, coords: Coords) -> bool {
        self.contains(coords)
            && (coords.x == 0
                || coords.y == 0
                || coords.x == self.width() - 1
                || coords.y == self.height() - 1)
    }
}

/// The four sides of the map a unit can leave through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoardEdge {
    North,
    South,
    East,
    West,
}

impl BoardEdge {
    pub const ALL: [BoardEdge; 4] = [
        BoardEdge::North,
        BoardEdge::South,
        BoardEdge::East,
        BoardEdge::West,
    ];

    /// Number of hexes between `coords` and this edge's outermost row or column.
    pub fn distance(self, board: &dyn Board, coords: Coords) -> u32 {
        let d = match self {
            BoardEdge::North => coords.y,
            BoardEdge::South => board.height() - 1 - coords.y,
            BoardEdge::West => coords.x,
            BoardEdge::East => board.width() - 1 - coords.x,
        };
        d.max(0) as u32
    }

    pub fn is_on(self, board: &dyn Board, coords: Coords) -> bool {
        board.contains(coords) && self.distance(board, coords) == 0
    }

    /// The edge closest to `coords`, preferring north, south, east, west on ties.
    pub fn nearest(board: &dyn Board, coords: Coords) -> BoardEdge {
        let mut best = BoardEdge::North;
        for edge in BoardEdge::ALL {
            if edge.distance(board, coords) < best.distance(board, coords) {
                best = edge;
            }
        }
        best
    }
}

#[derive(Clone, Debug, Default)]
pub struct GridBoard {
    width: i32,
    height: i32,
    hexes: Vec<Hex>,
}

impl GridBoard {
    /// A flat board of level-0 clear hexes.
    pub fn new(width: usize, height: usize) -> GridBoard {
        GridBoard {
            width: width as i32,
            height: height as i32,
            hexes: vec![Hex::default(); width * height],
        }
    }

    fn index(&self, coords: Coords) -> Option<usize> {
        if self.contains(coords) {
            Some((coords.y * self.width + coords.x) as usize)
        } else {
            None
        }
    }

    pub fn set_hex(&mut self, coords: Coords, hex: Hex) -> Result<()> {
        let ix = self.index(coords).ok_or(PathFinderError::OffBoard(coords))?;
        self.hexes[ix] = hex;
        Ok(())
    }

    pub fn hex_mut(&mut self, coords: Coords) -> Option<&mut Hex> {
        let ix = self.index(coords)?;
        self.hexes.get_mut(ix)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coords> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coords::new(x, y)))
    }
}

impl Board for GridBoard {
    fn width(&self) -> i32 {
        self.width
    }
    fn height(&self) -> i32 {
        self.height
    }
    fn hex(&self, coords: Coords) -> Option<&Hex> {
        self.index(coords).and_then(|ix| self.hexes.get(ix))
    }
}

impl fmt::Display for GridBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            let row = (0..self.width)
                .map(|x| match self.hex(Coords::new(x, y)) {
                    Some(h) if h.impassable => '#',
                    Some(h) if h.building.is_some() => 'B',
                    Some(h) if h.woods > 0 => 'W',
                    Some(h) if h.water_depth > 0 => '~',
                    _ => '.',
                })
                .collect::<String>();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_hexes() {
        let mut board = GridBoard::new(4, 3);
        board
            .set_hex(Coords::new(1, 2), Hex::clear(2).with_woods(HEAVY_WOODS))
            .unwrap();
        assert_eq!(board.hex(Coords::new(1, 2)).unwrap().level, 2);
        assert!(board.hex(Coords::new(4, 0)).is_none());
        assert_eq!(
            board.set_hex(Coords::new(-1, 0), Hex::default()),
            Err(PathFinderError::OffBoard(Coords::new(-1, 0)))
        );
        assert_eq!(board.coords().count(), 12);
    }

    #[test]
    fn edges() {
        let board = GridBoard::new(10, 6);
        assert!(board.is_edge(Coords::new(0, 3)));
        assert!(!board.is_edge(Coords::new(4, 3)));
        assert_eq!(BoardEdge::nearest(&board, Coords::new(8, 3)), BoardEdge::East);
        assert_eq!(BoardEdge::nearest(&board, Coords::new(4, 1)), BoardEdge::North);
        assert_eq!(BoardEdge::South.distance(&board, Coords::new(4, 1)), 4);
    }

    #[test]
    fn leveling() {
        let woods = Hex::clear(0).with_woods(LIGHT_WOODS);
        assert_eq!(woods.leveling_factor(), Some(40));
        assert_eq!(woods.leveled().woods, 0);
        assert!(woods.leveled().rough);
        assert_eq!(Hex::clear(0).leveling_factor(), None);
        assert_eq!(Hex::clear(0).with_building(60).impassable().leveling_factor(), None);
    }
}
