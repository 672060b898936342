//! Crossword Compiler XML reader.
//!
//! Only the parts of the format the model understands are read: the grid
//! and its cells, word solutions, and the clue lists. Everything else
//! (metadata, grid look, styling markup inside clues) is skipped.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::ParseError;
use crate::Crossword;
use crate::models::{Clue, Direction};

/// Largest grid the reader accepts, in cells.
const MAX_GRID_CELLS: usize = 1 << 16;

/// A `<clue>` element waiting for the word solutions, which may come later.
#[derive(Debug)]
struct PendingClue {
    word: Option<String>,
    number: String,
    format: String,
    citation: Option<String>,
    text: String,
}

#[derive(Debug, Default)]
struct XmlPuzzle {
    crossword: Option<Crossword>,
    words: HashMap<String, String>,
    clues: Vec<(PendingClue, Direction)>,
}

fn xml_error(err: impl std::fmt::Display) -> ParseError {
    ParseError::Xml(err.to_string())
}

fn attributes(element: &BytesStart<'_>) -> Result<HashMap<String, String>, ParseError> {
    let mut attrs = HashMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = attr.unescape_value().map_err(xml_error)?.to_string();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn number_attr(
    attrs: &HashMap<String, String>,
    element: &'static str,
    attribute: &'static str,
) -> Result<usize, ParseError> {
    let value = attrs.get(attribute).map(String::as_str).unwrap_or_default();
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidAttribute {
            element,
            attribute,
            value: value.to_string(),
        })
}

/// Cell coordinates are 1-based in the file.
fn coordinate_attr(
    attrs: &HashMap<String, String>,
    attribute: &'static str,
) -> Result<usize, ParseError> {
    number_attr(attrs, "cell", attribute)?
        .checked_sub(1)
        .ok_or_else(|| ParseError::InvalidAttribute {
            element: "cell",
            attribute,
            value: "0".to_string(),
        })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn section_direction(title: &str) -> Result<Direction, ParseError> {
    let title = collapse_whitespace(title);
    Direction::ALL
        .into_iter()
        .find(|d| d.description().eq_ignore_ascii_case(&title))
        .ok_or(ParseError::UnknownSection(title))
}

impl XmlPuzzle {
    fn open_grid(&mut self, attrs: &HashMap<String, String>) -> Result<(), ParseError> {
        let width = number_attr(attrs, "grid", "width")?;
        let height = number_attr(attrs, "grid", "height")?;
        if width
            .checked_mul(height)
            .is_none_or(|cells| cells > MAX_GRID_CELLS)
        {
            let (attribute, value) = if width >= height {
                ("width", width)
            } else {
                ("height", height)
            };
            return Err(ParseError::InvalidAttribute {
                element: "grid",
                attribute,
                value: value.to_string(),
            });
        }
        self.crossword = Some(Crossword::new(width, height));
        Ok(())
    }

    fn add_cell(&mut self, attrs: &HashMap<String, String>) -> Result<(), ParseError> {
        let x = coordinate_attr(attrs, "x")?;
        let y = coordinate_attr(attrs, "y")?;
        let crossword = self
            .crossword
            .as_mut()
            .ok_or(ParseError::MissingElement("grid"))?;
        if attrs.get("type").is_some_and(|t| t == "block") {
            crossword.set_block_cell(x, y)?;
        } else {
            let solution = attrs.get("solution").cloned().unwrap_or_default();
            crossword.set_letter_cell(x, y, solution)?;
        }
        Ok(())
    }

    fn add_word(&mut self, attrs: &HashMap<String, String>) {
        if let (Some(id), Some(solution)) = (attrs.get("id"), attrs.get("solution")) {
            self.words.insert(id.clone(), solution.clone());
        }
    }

    fn finish(self) -> Result<Crossword, ParseError> {
        let mut crossword = self.crossword.ok_or(ParseError::MissingElement("grid"))?;
        for (pending, direction) in self.clues {
            let text = collapse_whitespace(&pending.text);
            let mut clue = Clue::new(pending.number, text, pending.format);
            clue.solution = pending.word.and_then(|w| self.words.get(&w).cloned());
            clue.explanation = pending.citation;
            crossword.set_clue(clue, Some(direction))?;
        }
        Ok(crossword)
    }
}

fn pending_clue(attrs: &HashMap<String, String>) -> PendingClue {
    PendingClue {
        word: attrs.get("word").cloned(),
        number: attrs.get("number").cloned().unwrap_or_default(),
        format: attrs.get("format").cloned().unwrap_or_default(),
        citation: attrs.get("citation").cloned(),
        text: String::new(),
    }
}

/// Read a Crossword Compiler puzzle. Clues are attached but not checked.
pub fn read_xml(source: &str) -> Result<Crossword, ParseError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(false);

    let mut puzzle = XmlPuzzle::default();
    let mut in_clues = false;
    let mut section: Option<Direction> = None;
    let mut title: Option<String> = None;
    let mut clue: Option<PendingClue> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Eof => break,
            Event::Start(e) => match e.local_name().as_ref() {
                b"grid" => puzzle.open_grid(&attributes(&e)?)?,
                b"cell" => puzzle.add_cell(&attributes(&e)?)?,
                b"word" => puzzle.add_word(&attributes(&e)?),
                b"clues" => {
                    in_clues = true;
                    section = None;
                }
                b"title" if in_clues => title = Some(String::new()),
                b"clue" => clue = Some(pending_clue(&attributes(&e)?)),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"grid" => puzzle.open_grid(&attributes(&e)?)?,
                b"cell" => puzzle.add_cell(&attributes(&e)?)?,
                b"word" => puzzle.add_word(&attributes(&e)?),
                b"clue" => {
                    let direction = section.ok_or(ParseError::MissingElement("title"))?;
                    puzzle.clues.push((pending_clue(&attributes(&e)?), direction));
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"clues" => in_clues = false,
                b"title" => {
                    if let Some(text) = title.take() {
                        section = Some(section_direction(&text)?);
                    }
                }
                b"clue" => {
                    if let Some(done) = clue.take() {
                        let direction = section.ok_or(ParseError::MissingElement("title"))?;
                        puzzle.clues.push((done, direction));
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                let content = text.unescape().map_err(xml_error)?;
                if let Some(title) = title.as_mut() {
                    title.push_str(&content);
                } else if let Some(clue) = clue.as_mut() {
                    clue.text.push_str(&content);
                }
            }
            Event::CData(data) => {
                let content = String::from_utf8_lossy(&data.into_inner()).to_string();
                if let Some(clue) = clue.as_mut() {
                    clue.text.push_str(&content);
                }
            }
            _ => {}
        }
    }

    let crossword = puzzle.finish()?;
    log::debug!(
        "Read {}x{} XML puzzle with {} clues",
        crossword.width(),
        crossword.height(),
        crossword.clues().len()
    );
    Ok(crossword)
}
