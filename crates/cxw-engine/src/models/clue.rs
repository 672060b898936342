use std::borrow::Cow;

use serde::Serialize;

use crate::models::LightKey;

/// A clue as authored.
///
/// `id` holds whatever the source supplied until the clue is stored with
/// [`crate::Crossword::set_clue`], which rewrites it into the canonical
/// `"1a, 2d"` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Clue {
    pub id: String,
    /// Letter-count breakdown, e.g. `"4-3"` or `"5,2"`.
    pub format: String,
    /// Clue body (markdown in the text format, plain text from XML).
    pub text: String,
    /// Author-supplied answer, used to cross-check the grid.
    pub solution: Option<String>,
    pub explanation: Option<String>,
}

impl Clue {
    pub fn new(id: impl Into<String>, text: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            format: format.into(),
            ..Self::default()
        }
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Component light ids of a stored clue, in order.
    pub fn light_ids(&self) -> impl Iterator<Item = &str> {
        self.id.split(", ")
    }

    /// The first component, which decides where the clue is listed.
    pub fn first_light_id(&self) -> &str {
        self.light_ids().next().unwrap_or_default()
    }

    /// Whether `key` appears as the second or later component.
    pub fn continues_into(&self, key: &str) -> bool {
        self.light_ids().skip(1).any(|id| id == key)
    }
}

/// One entry of a clue list, as produced by
/// [`crate::Crossword::clues_in_direction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClueEntry<'a> {
    Clue(&'a Clue),
    /// Stand-in for a light without a clue of its own.
    Placeholder { id: LightKey, text: String },
}

impl ClueEntry<'_> {
    pub fn id(&self) -> Cow<'_, str> {
        match self {
            ClueEntry::Clue(clue) => Cow::Borrowed(clue.id.as_str()),
            ClueEntry::Placeholder { id, .. } => Cow::Owned(id.to_string()),
        }
    }

    /// True for entries standing in for a missing clue.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ClueEntry::Placeholder { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            ClueEntry::Clue(clue) => &clue.text,
            ClueEntry::Placeholder { text, .. } => text,
        }
    }
}
