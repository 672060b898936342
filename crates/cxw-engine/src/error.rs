use crate::models::Direction;

/// Hard failures raised by the crossword model.
///
/// These abort the operation that raised them. Soft problems found while
/// checking a puzzle are reported through [`crate::Crossword::warnings`]
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum CrosswordError {
    #[error("Illegal light key {0}")]
    IllegalLightKey(String),

    #[error("Illegal direction: {0}")]
    IllegalDirection(String),

    #[error("Unknown direction for key: {key} ({})", describe(.direction))]
    UnknownDirection {
        key: String,
        direction: Option<Direction>,
    },

    #[error("Error normalising clue key: {key} ({}) - {source}", describe(.direction))]
    ClueKey {
        key: String,
        direction: Option<Direction>,
        #[source]
        source: Box<CrosswordError>,
    },

    #[error("Invalid index {index} into solution of length {length}")]
    SolutionIndex { index: usize, length: usize },

    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

fn describe(direction: &Option<Direction>) -> &'static str {
    direction.map_or("no default direction", Direction::description)
}
