//! Plain-text puzzle reader.
//!
//! ```text
//! CAT
//! A#O
//! BEE
//!
//! # Across
//! 1. Pet (3)
//! CAT: definition
//! ```
//!
//! The grid runs up to the first empty line. Everything after it is read a
//! line at a time: headings switch direction, openers start a clue and
//! explainers attach a solution to the clue just opened.

use std::sync::OnceLock;

use regex::Regex;

use super::ParseError;
use crate::Crossword;
use crate::models::{Clue, Direction};

const BLOCK: char = '#';

fn opener_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d[\d.ad, ]*)[.:]\s+(.*)\s+\(([^)]+)\)\s*$")
            .expect("Invalid clue opener regex")
    })
}

fn explainer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^:]*):\s+(.*)$").expect("Invalid explainer regex"))
}

/// What a single line after the grid contributes.
#[derive(Debug, PartialEq)]
enum ClueLine<'a> {
    Blank,
    Heading(&'a str),
    Opener {
        id: &'a str,
        text: &'a str,
        format: &'a str,
    },
    Explainer {
        solution: &'a str,
        explanation: &'a str,
    },
    Other,
}

fn classify(line: &str) -> ClueLine<'_> {
    if line.is_empty() {
        return ClueLine::Blank;
    }
    if line.starts_with('#') {
        return ClueLine::Heading(line.trim_start_matches('#').trim_start());
    }
    if let Some(caps) = opener_regex().captures(line) {
        return ClueLine::Opener {
            id: caps.get(1).map_or("", |m| m.as_str()),
            text: caps.get(2).map_or("", |m| m.as_str()),
            format: caps.get(3).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = explainer_regex().captures(line) {
        return ClueLine::Explainer {
            solution: caps.get(1).map_or("", |m| m.as_str()),
            explanation: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    ClueLine::Other
}

/// Read a text puzzle. Clues are attached but not checked.
pub fn read_text(source: &str) -> Result<Crossword, ParseError> {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let height = lines
        .iter()
        .position(|line| line.is_empty())
        .unwrap_or(lines.len());
    if height == 0 {
        return Err(ParseError::EmptyGrid);
    }
    let width = lines[0].chars().count();

    let mut crossword = Crossword::new(width, height);
    for (y, line) in lines[..height].iter().enumerate() {
        let actual = line.chars().count();
        if actual != width {
            return Err(ParseError::RaggedRow {
                line: y + 1,
                actual,
                expected: width,
            });
        }
        for (x, c) in line.chars().enumerate() {
            match c {
                BLOCK => crossword.set_block_cell(x, y)?,
                '.' | ' ' => crossword.set_letter_cell(x, y, "")?,
                _ => crossword.set_letter_cell(x, y, c)?,
            }
        }
    }

    let mut section: Option<Direction> = None;
    let mut pending: Option<Clue> = None;
    for (index, line) in lines.iter().enumerate().skip(height) {
        match classify(line) {
            ClueLine::Blank | ClueLine::Other => {}
            ClueLine::Heading(title) => {
                if let Some(clue) = pending.take() {
                    crossword.set_clue(clue, section)?;
                }
                section = Some(Direction::from_title(title)?);
            }
            ClueLine::Opener { id, text, format } => {
                if let Some(clue) = pending.take() {
                    crossword.set_clue(clue, section)?;
                }
                pending = Some(Clue::new(id, text, format));
            }
            ClueLine::Explainer {
                solution,
                explanation,
            } => {
                let clue = pending
                    .as_mut()
                    .ok_or(ParseError::OrphanExplanation { line: index + 1 })?;
                clue.solution = Some(solution.to_string());
                clue.explanation = Some(explanation.to_string());
            }
        }
    }
    if let Some(clue) = pending {
        crossword.set_clue(clue, section)?;
    }

    log::debug!(
        "Read {}x{} text puzzle with {} clues",
        crossword.width(),
        crossword.height(),
        crossword.clues().len()
    );
    Ok(crossword)
}
