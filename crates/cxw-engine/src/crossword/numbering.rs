use super::Crossword;
use crate::models::{Direction, Light, LightKey};

impl Crossword {
    /// Clear every cell number and rebuild the light index from scratch.
    ///
    /// A letter cell starts an across light when the cell to its right is a
    /// letter and the cell to its left is not; likewise for down with the
    /// cells below and above. Numbers come from one counter shared by both
    /// directions.
    pub(super) fn renumber_cells(&mut self) {
        let mut counter = 0;
        let mut lights = Vec::new();

        for y in 0..self.height {
            for x in 0..self.width {
                let starts_across =
                    self.is_letter(x + 1, y) && !(x > 0 && self.is_letter(x - 1, y));
                let starts_down =
                    self.is_letter(x, y + 1) && !(y > 0 && self.is_letter(x, y - 1));
                let starts_light = self.is_letter(x, y) && (starts_across || starts_down);

                let number = starts_light.then(|| {
                    counter += 1;
                    counter
                });
                if let Some(cell) = self.grid[y][x].as_letter_mut() {
                    cell.number = number;
                }
                let Some(number) = number else {
                    continue;
                };

                if starts_across {
                    lights.push(self.trace_light(x, y, LightKey::new(number, Direction::Across)));
                }
                if starts_down {
                    lights.push(self.trace_light(x, y, LightKey::new(number, Direction::Down)));
                }
            }
        }

        self.lights = lights;
    }

    /// Walk from `(x, y)` in the key's direction until a block or the edge.
    fn trace_light(&self, x: usize, y: usize, id: LightKey) -> Light {
        let mut light = Light {
            id,
            x,
            y,
            length: 0,
            solution: String::new(),
        };
        loop {
            let (cx, cy) = light.cell_at(light.length);
            match self.cell(cx, cy).and_then(|c| c.as_letter()) {
                Some(cell) => {
                    light.solution.push_str(&cell.solution);
                    light.length += 1;
                }
                None => break,
            }
        }
        light
    }
}
