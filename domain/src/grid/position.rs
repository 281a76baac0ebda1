//! Grid coordinates and the eight-way neighbourhood.

use serde::{Deserialize, Serialize};

/// Compass label for one of the eight cells surrounding a position.
///
/// The grid's y axis grows downward: `N` is (0, -1), `S` is (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// All eight directions in clockwise order starting from north.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Coordinate offset of this direction.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cell coordinate (Value Object).
///
/// Equality and hashing are by coordinate pair. Positions may lie outside
/// any particular grid; bounds are a [`Grid`](crate::grid::Grid) concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step in `direction`.
    pub fn neighbour(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position::new(self.x + dx, self.y + dy)
    }

    /// The eight surrounding positions, tagged with their direction labels.
    pub fn neighbours(&self) -> [(Direction, Position); 8] {
        Direction::ALL.map(|d| (d, self.neighbour(d)))
    }

    /// Chebyshev distance: the number of king moves between two positions.
    pub fn chebyshev_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Whether `other` is one of this position's eight neighbours.
    ///
    /// A position is not adjacent to itself (the zero vector is excluded).
    pub fn is_adjacent_to(&self, other: Position) -> bool {
        self.chebyshev_distance(other) == 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours_cover_all_eight_directions() {
        let pos = Position::new(3, 3);
        let neighbours = pos.neighbours();
        assert_eq!(neighbours.len(), 8);

        let labels: Vec<&str> = neighbours.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(labels, ["N", "NE", "E", "SE", "S", "SW", "W", "NW"]);

        for (direction, neighbour) in neighbours {
            assert_eq!(pos.neighbour(direction), neighbour);
            assert!(pos.is_adjacent_to(neighbour));
        }
    }

    #[test]
    fn test_north_is_up_in_screen_coordinates() {
        let pos = Position::new(2, 5);
        assert_eq!(pos.neighbour(Direction::N), Position::new(2, 4));
        assert_eq!(pos.neighbour(Direction::SE), Position::new(3, 6));
    }

    #[test]
    fn test_adjacency_excludes_self_and_distant_cells() {
        let pos = Position::new(0, 0);
        assert!(!pos.is_adjacent_to(pos));
        assert!(pos.is_adjacent_to(Position::new(1, 1)));
        assert!(pos.is_adjacent_to(Position::new(-1, 0)));
        assert!(!pos.is_adjacent_to(Position::new(2, 0)));
        assert!(!pos.is_adjacent_to(Position::new(2, 2)));
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = Position::new(1, 1);
        assert_eq!(a.chebyshev_distance(Position::new(1, 1)), 0);
        assert_eq!(a.chebyshev_distance(Position::new(4, 2)), 3);
        assert_eq!(a.chebyshev_distance(Position::new(-2, 1)), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(7, -2).to_string(), "(7, -2)");
        assert_eq!(Direction::NW.to_string(), "NW");
    }
}
