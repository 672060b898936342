use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::CrosswordError;
use crate::models::Direction;

/// Canonical identifier of a light, e.g. `12a` or `3d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightKey {
    pub number: u32,
    pub direction: Direction,
}

impl LightKey {
    pub fn new(number: u32, direction: Direction) -> Self {
        Self { number, direction }
    }

    /// Render relative to a list heading: the bare number when the
    /// direction matches, otherwise the full key.
    pub fn friendly(&self, default_direction: Direction) -> String {
        if self.direction == default_direction {
            self.number.to_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for LightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.direction.letter())
    }
}

/// Strict parse of the canonical wire form only (`^\d+[ad]$`).
///
/// Lenient input such as `" 5 ."` goes through
/// [`crate::Crossword::normalise_light_key`] instead.
impl FromStr for LightKey {
    type Err = CrosswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static CANONICAL: OnceLock<Regex> = OnceLock::new();
        let re = CANONICAL
            .get_or_init(|| Regex::new(r"^(\d+)([ad])$").expect("Invalid light key regex"));

        let illegal = || CrosswordError::IllegalLightKey(s.to_string());
        let caps = re.captures(s).ok_or_else(illegal)?;
        let number = caps[1].parse().map_err(|_| illegal())?;
        let direction = Direction::from_letter(&caps[2], None)?;
        Ok(Self { number, direction })
    }
}

impl Serialize for LightKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A numbered word slot in the grid.
///
/// Lights are derived from the grid on every mutation and never edited
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Light {
    pub id: LightKey,
    pub x: usize,
    pub y: usize,
    pub length: usize,
    /// Concatenated solutions of the light's cells.
    pub solution: String,
}

impl Light {
    pub fn direction(&self) -> Direction {
        self.id.direction
    }

    /// Grid coordinates of the cell `offset` letters into this light.
    pub fn cell_at(&self, offset: usize) -> (usize, usize) {
        match self.direction() {
            Direction::Across => (self.x + offset, self.y),
            Direction::Down => (self.x, self.y + offset),
        }
    }

    /// Coordinates of every cell in the light, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(|offset| self.cell_at(offset))
    }

    /// Whether the light's run passes through `(x, y)`.
    pub fn covers(&self, x: usize, y: usize) -> bool {
        match self.direction() {
            Direction::Across => y == self.y && x >= self.x && x < self.x + self.length,
            Direction::Down => x == self.x && y >= self.y && y < self.y + self.length,
        }
    }
}

/// A cell located by its position within a run of lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthCell<'a> {
    pub x: usize,
    pub y: usize,
    /// Offset of the cell within `light`.
    pub offset: usize,
    pub light: &'a Light,
}

/// Resolve a 0-based index into the concatenation of `lights`.
pub fn nth_cell<'a>(index: usize, lights: &[&'a Light]) -> Result<NthCell<'a>, CrosswordError> {
    let mut n = index;
    for &light in lights {
        if n < light.length {
            let (x, y) = light.cell_at(n);
            return Ok(NthCell {
                x,
                y,
                offset: n,
                light,
            });
        }
        n -= light.length;
    }
    Err(CrosswordError::SolutionIndex {
        index,
        length: lights.iter().map(|l| l.length).sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn light(id: &str, x: usize, y: usize, length: usize) -> Light {
        Light {
            id: id.parse().unwrap(),
            x,
            y,
            length,
            solution: String::new(),
        }
    }

    #[rstest]
    #[case("1a", 1, Direction::Across)]
    #[case("12d", 12, Direction::Down)]
    #[case("007a", 7, Direction::Across)]
    fn test_parse_canonical_key(
        #[case] input: &str,
        #[case] number: u32,
        #[case] direction: Direction,
    ) {
        assert_eq!(input.parse::<LightKey>().unwrap(), LightKey::new(number, direction));
    }

    #[rstest]
    #[case("1")]
    #[case("1 a")]
    #[case("1a.")]
    #[case("a1")]
    #[case("")]
    #[case("99999999999a")]
    fn test_parse_rejects_non_canonical(#[case] input: &str) {
        assert!(input.parse::<LightKey>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let key = LightKey::new(14, Direction::Down);
        assert_eq!(key.to_string(), "14d");
        assert_eq!(key.to_string().parse::<LightKey>().unwrap(), key);
    }

    #[test]
    fn test_friendly() {
        let key = LightKey::new(3, Direction::Across);
        assert_eq!(key.friendly(Direction::Across), "3");
        assert_eq!(key.friendly(Direction::Down), "3a");
    }

    #[test]
    fn test_cells_and_covers() {
        let down = light("2d", 1, 0, 3);
        assert_eq!(down.cells().collect::<Vec<_>>(), vec![(1, 0), (1, 1), (1, 2)]);
        assert!(down.covers(1, 2));
        assert!(!down.covers(1, 3));
        assert!(!down.covers(0, 1));
    }

    #[test]
    fn test_nth_cell_walks_into_later_lights() {
        let first = light("1a", 0, 0, 3);
        let second = light("2d", 4, 0, 4);
        let lights = [&first, &second];

        let cell = nth_cell(2, &lights).unwrap();
        assert_eq!((cell.x, cell.y, cell.offset), (2, 0, 2));
        assert_eq!(cell.light.id, first.id);

        let cell = nth_cell(5, &lights).unwrap();
        assert_eq!((cell.x, cell.y, cell.offset), (4, 2, 2));
        assert_eq!(cell.light.id, second.id);
    }

    #[test]
    fn test_nth_cell_out_of_range() {
        let first = light("1a", 0, 0, 3);
        let err = nth_cell(3, &[&first]).unwrap_err();
        assert!(matches!(
            err,
            CrosswordError::SolutionIndex {
                index: 3,
                length: 3
            }
        ));
    }
}
