use super::Crossword;
use crate::error::CrosswordError;
use crate::models::{Clue, Direction};

impl Crossword {
    /// Store a clue under its normalised id, replacing any clue already
    /// stored with that id.
    pub fn set_clue(
        &mut self,
        mut clue: Clue,
        direction: Option<Direction>,
    ) -> Result<(), CrosswordError> {
        clue.id = self.normalise_clue_key(&clue.id, direction)?;
        match self.clues.iter_mut().find(|c| c.id == clue.id) {
            Some(existing) => {
                log::debug!("Replacing clue {}", clue.id);
                *existing = clue;
            }
            None => self.clues.push(clue),
        }
        Ok(())
    }

    /// Remove every clue stored under the normalised form of `id`.
    pub fn delete_clue(
        &mut self,
        id: &str,
        direction: Option<Direction>,
    ) -> Result<(), CrosswordError> {
        let id = self.normalise_clue_key(id, direction)?;
        self.clues.retain(|c| c.id != id);
        Ok(())
    }
}
