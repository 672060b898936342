use std::collections::VecDeque;
use std::slice;

use super::Crossword;
use crate::models::{Clue, ClueEntry, Direction, Light};

/// Clue list for one direction, in light order.
///
/// Borrows the crossword, so the list cannot outlive a grid edit. Clone it
/// (or call [`Crossword::clues_in_direction`] again) to iterate afresh.
#[derive(Debug, Clone)]
pub struct CluesInDirection<'a> {
    clues: &'a [Clue],
    direction: Direction,
    lights: slice::Iter<'a, Light>,
    pending: VecDeque<&'a Clue>,
}

impl<'a> Iterator for CluesInDirection<'a> {
    type Item = ClueEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(clue) = self.pending.pop_front() {
            return Some(ClueEntry::Clue(clue));
        }

        let direction = self.direction;
        let light = self.lights.find(|l| l.direction() == direction)?;
        let key = light.id.to_string();

        self.pending = self
            .clues
            .iter()
            .filter(|c| c.first_light_id() == key)
            .collect();
        if let Some(clue) = self.pending.pop_front() {
            return Some(ClueEntry::Clue(clue));
        }

        let referring: Vec<&str> = self
            .clues
            .iter()
            .filter(|c| c.continues_into(&key))
            .map(Clue::first_light_id)
            .collect();
        let text = if referring.is_empty() {
            "Unclued".to_string()
        } else {
            format!("See {}", referring.join(", "))
        };
        Some(ClueEntry::Placeholder { id: light.id, text })
    }
}

impl Crossword {
    /// Every light running in `direction`, each represented by its clues,
    /// a "See …" pointer when only a compound clue covers it, or an
    /// "Unclued" placeholder.
    pub fn clues_in_direction(&self, direction: Direction) -> CluesInDirection<'_> {
        CluesInDirection {
            clues: &self.clues,
            direction,
            lights: self.lights.iter(),
            pending: VecDeque::new(),
        }
    }
}
