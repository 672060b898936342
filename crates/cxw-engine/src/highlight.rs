use crate::Crossword;

/// Which clue, if any, is highlighted in a rendered puzzle.
///
/// Selecting a cell cycles through the clues running through it; selecting
/// a clue toggles it. The highlight is stored by clue id so it survives
/// re-rendering of the same crossword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    current: Option<String>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Advance to the next clue through `(x, y)`, clearing after the last.
    pub fn select_cell(&mut self, crossword: &Crossword, x: usize, y: usize) {
        let clues = crossword.clues_at(x, y);
        let position = self
            .current
            .as_deref()
            .and_then(|current| clues.iter().position(|c| c.id == current));
        let next = match position {
            None => clues.first(),
            Some(i) => clues.get(i + 1),
        };
        self.current = next.map(|c| c.id.clone());
    }

    pub fn toggle_clue(&mut self, id: &str) {
        if self.current.as_deref() == Some(id) {
            self.current = None;
        } else {
            self.current = Some(id.to_string());
        }
    }

    /// Cells of every light in the highlighted clue.
    pub fn cells(&self, crossword: &Crossword) -> Vec<(usize, usize)> {
        let Some(clue) = self.current.as_deref().and_then(|id| crossword.clue(id)) else {
            return Vec::new();
        };
        clue.light_ids()
            .filter_map(|id| crossword.light(id))
            .flat_map(|light| light.cells())
            .collect()
    }

    pub fn contains(&self, crossword: &Crossword, x: usize, y: usize) -> bool {
        self.cells(crossword).contains(&(x, y))
    }
}
