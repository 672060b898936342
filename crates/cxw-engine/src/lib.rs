pub mod crossword;
pub mod error;
pub mod highlight;
pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use crossword::{CluesInDirection, Crossword, format_length};
pub use error::CrosswordError;
pub use highlight::Highlight;
pub use io::*;
pub use models::*;
pub use parsing::{ParseError, parse};
