use serde::Serialize;

use crate::models::Direction;

/// How a displayed answer continues past a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Joiner {
    #[default]
    None,
    /// Word break, drawn as a bar.
    Space,
    Hyphen,
}

impl Joiner {
    /// The joiner implied by a format-string separator character.
    pub fn from_separator(c: char) -> Self {
        if c == '-' {
            Joiner::Hyphen
        } else {
            Joiner::Space
        }
    }
}

/// A letter cell: holds the solution and the annotations derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LetterCell {
    /// Solution text for this cell; empty when unsolved.
    pub solution: String,
    /// Set iff this cell starts at least one light.
    pub number: Option<u32>,
    pub follows_across: Joiner,
    pub follows_down: Joiner,
}

impl LetterCell {
    pub fn new(solution: impl Into<String>) -> Self {
        Self {
            solution: solution.into(),
            ..Self::default()
        }
    }

    /// The joiner recorded for answers running in `direction`.
    pub fn follows(&self, direction: Direction) -> Joiner {
        match direction {
            Direction::Across => self.follows_across,
            Direction::Down => self.follows_down,
        }
    }

    pub fn set_follows(&mut self, direction: Direction, joiner: Joiner) {
        match direction {
            Direction::Across => self.follows_across = joiner,
            Direction::Down => self.follows_down = joiner,
        }
    }
}

/// A single grid square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Cell {
    Block,
    Letter(LetterCell),
}

impl Cell {
    pub fn is_block(&self) -> bool {
        matches!(self, Cell::Block)
    }

    pub fn as_letter(&self) -> Option<&LetterCell> {
        match self {
            Cell::Letter(letter) => Some(letter),
            Cell::Block => None,
        }
    }

    pub fn as_letter_mut(&mut self) -> Option<&mut LetterCell> {
        match self {
            Cell::Letter(letter) => Some(letter),
            Cell::Block => None,
        }
    }

    /// Number shown in the corner of the cell, if any.
    pub fn number(&self) -> Option<u32> {
        self.as_letter().and_then(|l| l.number)
    }

    /// Solution text; empty for blocks and unsolved letters.
    pub fn solution(&self) -> &str {
        self.as_letter().map_or("", |l| l.solution.as_str())
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Letter(LetterCell::default())
    }
}
