pub mod cell;
pub mod clue;
pub mod direction;
pub mod light;
pub mod puzzle_file;

pub use cell::{Cell, Joiner, LetterCell};
pub use clue::{Clue, ClueEntry};
pub use direction::Direction;
pub use light::{Light, LightKey, NthCell, nth_cell};
pub use puzzle_file::{PUZZLE_EXTENSIONS, PuzzleFile};
