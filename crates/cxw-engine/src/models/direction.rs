use std::fmt;

use serde::Serialize;

use crate::error::CrosswordError;

/// The two directions a light can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Both directions, in display order.
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    /// The single letter used in light keys (`a` / `d`).
    pub fn letter(self) -> char {
        match self {
            Direction::Across => 'a',
            Direction::Down => 'd',
        }
    }

    /// Human readable name, used in headings and error messages.
    pub fn description(self) -> &'static str {
        match self {
            Direction::Across => "Across",
            Direction::Down => "Down",
        }
    }

    /// Parse a direction letter, falling back to `default` when the letter is empty.
    pub fn from_letter(s: &str, default: Option<Direction>) -> Result<Self, CrosswordError> {
        match (s, default) {
            ("a", _) => Ok(Direction::Across),
            ("d", _) => Ok(Direction::Down),
            ("", Some(direction)) => Ok(direction),
            _ => Err(CrosswordError::IllegalDirection(s.to_string())),
        }
    }

    /// Parse a section title such as "Across" or "down clues" by its first letter.
    pub fn from_title(title: &str) -> Result<Self, CrosswordError> {
        let first = title
            .trim()
            .chars()
            .next()
            .map(|c| c.to_lowercase().to_string())
            .unwrap_or_default();
        Self::from_letter(&first, None)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
