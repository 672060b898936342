//! Ingestion of puzzle sources into a [`Crossword`].
//!
//! Two source formats are understood:
//!
//! - **Text** ([`text`]): a block of grid lines followed by markdown-style
//!   clue sections.
//! - **XML** ([`xml`]): the Crossword Compiler interchange format.
//!
//! Both readers build the model purely through its public mutation API and
//! leave checking to the caller.

pub mod text;
pub mod xml;

use crate::Crossword;
use crate::error::CrosswordError;

pub use text::read_text;
pub use xml::read_xml;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Puzzle has no grid")]
    EmptyGrid,

    #[error("Line {line} is {actual} long and should be {expected} long")]
    RaggedRow {
        line: usize,
        actual: usize,
        expected: usize,
    },

    #[error("Line {line} explains a clue but no clue precedes it")]
    OrphanExplanation { line: usize },

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Missing <{0}> element")]
    MissingElement(&'static str),

    #[error("Invalid {attribute} {value:?} on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("Unexpected clue direction: {0}")]
    UnknownSection(String),

    #[error(transparent)]
    Crossword(#[from] CrosswordError),
}

/// Parse a puzzle source, choosing the reader by its first character.
pub fn parse(source: &str) -> Result<Crossword, ParseError> {
    if source.starts_with('<') {
        log::debug!("Parsing as XML");
        read_xml(source)
    } else {
        log::debug!("Parsing as text");
        read_text(source)
    }
}
