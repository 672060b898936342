//! The crossword model: grid, derived lights, clues and check results.
//!
//! All grid mutation goes through [`Crossword::set_block_cell`] and
//! [`Crossword::set_letter_cell`], each of which renumbers the whole grid.
//! Clues are attached with [`Crossword::set_clue`] once the grid is in place,
//! and [`Crossword::check`] is run after population to produce warnings and
//! joiner markers.

mod check;
mod clues;
mod enumerate;
mod keys;
mod numbering;

pub use check::format_length;
pub use enumerate::CluesInDirection;

use serde::Serialize;

use crate::error::CrosswordError;
use crate::models::{Cell, Clue, LetterCell, Light};

#[derive(Debug, Clone, Serialize)]
pub struct Crossword {
    width: usize,
    height: usize,
    /// Row-major: `grid[y][x]`.
    grid: Vec<Vec<Cell>>,
    lights: Vec<Light>,
    clues: Vec<Clue>,
    warnings: Vec<String>,
    checked: bool,
}

impl Crossword {
    /// Create a blank grid: every cell an unsolved letter.
    pub fn new(width: usize, height: usize) -> Self {
        let mut crossword = Self {
            width,
            height,
            grid: vec![vec![Cell::default(); width]; height],
            lights: Vec::new(),
            clues: Vec::new(),
            warnings: Vec::new(),
            checked: false,
        };
        crossword.renumber_cells();
        crossword
    }

    pub fn set_block_cell(&mut self, x: usize, y: usize) -> Result<(), CrosswordError> {
        self.set_cell(x, y, Cell::Block)
    }

    pub fn set_letter_cell(
        &mut self,
        x: usize,
        y: usize,
        solution: impl Into<String>,
    ) -> Result<(), CrosswordError> {
        self.set_cell(x, y, Cell::Letter(LetterCell::new(solution)))
    }

    fn set_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), CrosswordError> {
        let slot = self
            .grid
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(CrosswordError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })?;
        *slot = cell;
        self.renumber_cells();
        Ok(())
    }

    /// False for blocks and for coordinates outside the grid.
    pub fn is_letter(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(|cell| !cell.is_block())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.grid.get(y).and_then(|row| row.get(x))
    }

    /// Grid rows, top to bottom.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    /// Lights in discovery order: row-major, across before down per cell.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn clue(&self, id: &str) -> Option<&Clue> {
        self.clues.iter().find(|c| c.id == id)
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Whether [`Crossword::check`] has completed.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Every light whose run passes through `(x, y)`.
    pub fn lights_at(&self, x: usize, y: usize) -> Vec<&Light> {
        self.lights.iter().filter(|l| l.covers(x, y)).collect()
    }

    /// Every clue with a component running through `(x, y)`, in clue order.
    pub fn clues_at(&self, x: usize, y: usize) -> Vec<&Clue> {
        let ids: Vec<String> = self
            .lights_at(x, y)
            .iter()
            .map(|l| l.id.to_string())
            .collect();
        self.clues
            .iter()
            .filter(|c| c.light_ids().any(|id| ids.iter().any(|l| l == id)))
            .collect()
    }
}
