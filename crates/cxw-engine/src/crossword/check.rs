use super::Crossword;
use crate::error::CrosswordError;
use crate::models::{Cell, Clue, Direction, Joiner, Light, LightKey, nth_cell};

/// A joiner marker to be written onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Follower {
    x: usize,
    y: usize,
    direction: Direction,
    joiner: Joiner,
}

/// Result of checking one clue: either the first problem found, or the
/// joiner markers its format implies.
enum ClueCheck {
    Warning(String),
    Followers(Vec<Follower>),
}

impl Crossword {
    /// Cross-check clues against the grid.
    ///
    /// Replaces the warnings list and recomputes every joiner marker, so
    /// running it again after further edits gives fresh results. A problem
    /// with one clue skips the remaining checks for that clue only.
    pub fn check(&mut self) -> Result<(), CrosswordError> {
        let mut warnings = self.coverage_warnings();
        let mut followers = Vec::new();
        for clue in &self.clues {
            match self.check_clue(clue)? {
                ClueCheck::Warning(warning) => warnings.push(warning),
                ClueCheck::Followers(found) => followers.extend(found),
            }
        }

        for cell in self.grid.iter_mut().flatten() {
            if let Cell::Letter(letter) = cell {
                letter.follows_across = Joiner::None;
                letter.follows_down = Joiner::None;
            }
        }
        for f in followers {
            if let Some(letter) = self.grid[f.y][f.x].as_letter_mut() {
                letter.set_follows(f.direction, f.joiner);
            }
        }

        for warning in &warnings {
            log::warn!("{warning}");
        }
        self.warnings = warnings;
        self.checked = true;
        log::debug!(
            "Completed check of {}x{} crossword: {} lights, {} clues, {} warnings",
            self.width,
            self.height,
            self.lights.len(),
            self.clues.len(),
            self.warnings.len()
        );
        Ok(())
    }

    /// Lights referenced by more than one clue, then lights no clue mentions.
    fn coverage_warnings(&self) -> Vec<String> {
        let mut unclued: Vec<String> = self.lights.iter().map(|l| l.id.to_string()).collect();
        let mut multiple: Vec<&str> = Vec::new();

        for id in self.clues.iter().flat_map(Clue::light_ids) {
            if let Some(pos) = unclued.iter().position(|l| l == id) {
                unclued.remove(pos);
            } else if self.light(id).is_some() && !multiple.contains(&id) {
                multiple.push(id);
            }
        }

        let mut warnings = Vec::new();
        if !multiple.is_empty() {
            warnings.push(format!("Clued multiple times: {}", multiple.join(", ")));
        }
        if !unclued.is_empty() {
            warnings.push(format!("Unclued: {}", unclued.join(", ")));
        }
        warnings
    }

    fn check_clue(&self, clue: &Clue) -> Result<ClueCheck, CrosswordError> {
        let Some(lights) = clue
            .light_ids()
            .map(|id| self.light(id))
            .collect::<Option<Vec<&Light>>>()
        else {
            return Ok(ClueCheck::Warning(format!(
                "Clue {} refers to an entry that is not in the grid",
                clue.id
            )));
        };

        let light_length: usize = lights.iter().map(|l| l.length).sum();
        let Some(clue_length) = checked_format_length(&clue.format) else {
            return Ok(ClueCheck::Warning(format!(
                "Clue {} should be {light_length} characters long but is given as {}, which is too long to count",
                clue.id, clue.format
            )));
        };
        if light_length != clue_length {
            let given = if clue_length.to_string() == clue.format {
                clue_length.to_string()
            } else {
                format!("{} which adds up to {clue_length}", clue.format)
            };
            return Ok(ClueCheck::Warning(format!(
                "Clue {} should be {light_length} characters long but is given as {given}",
                clue.id
            )));
        }

        // TODO: compare accented letters once grids can hold them
        if let Some(solution) = clue.solution.as_deref().filter(|s| !s.is_empty()) {
            let grid_solution: String = lights.iter().map(|l| l.solution.as_str()).collect();
            if normalise_solution(solution) != grid_solution {
                return Ok(ClueCheck::Warning(format!(
                    "In the grid, {} is {grid_solution} but the clue solution is {solution}",
                    clue.id
                )));
            }
        }

        followers(&clue.format, &lights, light_length).map(ClueCheck::Followers)
    }

    /// Look up a light by its canonical id.
    pub fn light(&self, id: &str) -> Option<&Light> {
        let key: LightKey = id.parse().ok()?;
        self.lights.iter().find(|l| l.id == key)
    }
}

/// Sum of every maximal digit run in a format string: `"4-3"` is 7.
pub fn format_length(format: &str) -> usize {
    format
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(parse_run)
        .fold(0, usize::saturating_add)
}

/// Like [`format_length`], but `None` when a run or the total overflows.
fn checked_format_length(format: &str) -> Option<usize> {
    format
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .try_fold(0usize, |total, run| total.checked_add(run.parse().ok()?))
}

fn parse_run(run: &str) -> usize {
    run.parse().unwrap_or(usize::MAX)
}

/// Uppercase and keep only `A`-`Z`.
fn normalise_solution(solution: &str) -> String {
    solution
        .to_uppercase()
        .chars()
        .filter(char::is_ascii_uppercase)
        .collect()
}

/// Walk the format string, marking the cell before each separator unless it
/// already ends its own light.
fn followers(
    format: &str,
    lights: &[&Light],
    total: usize,
) -> Result<Vec<Follower>, CrosswordError> {
    let chars: Vec<char> = format.chars().collect();
    let mut cursor = 0;
    let mut letters = 0usize;
    let mut found = Vec::new();

    while letters < total {
        let Some(&c) = chars.get(cursor) else {
            break;
        };
        if c.is_ascii_digit() {
            let end = chars[cursor..]
                .iter()
                .position(|c| !c.is_ascii_digit())
                .map_or(chars.len(), |p| cursor + p);
            let run: String = chars[cursor..end].iter().collect();
            letters = letters.saturating_add(parse_run(&run));
            cursor = end;
            continue;
        }

        cursor += 1;
        if letters == 0 {
            continue;
        }
        let cell = nth_cell(letters - 1, lights)?;
        if cell.offset == cell.light.length - 1 {
            continue;
        }
        found.push(Follower {
            x: cell.x,
            y: cell.y,
            direction: cell.light.direction(),
            joiner: Joiner::from_separator(c),
        });
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::crossword_from_rows;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn cat() -> Crossword {
        crossword_from_rows(&["CAT"])
    }

    /// 1a is CAT, 2d is STOP; nothing else is a light.
    fn compound_grid() -> Crossword {
        crossword_from_rows(&["CAT#S", "####T", "####O", "####P"])
    }

    fn joiners(cw: &Crossword) -> Vec<(usize, usize, Joiner, Joiner)> {
        let mut out = Vec::new();
        for (y, row) in cw.cells().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(l) = cell.as_letter()
                    && (l.follows_across != Joiner::None || l.follows_down != Joiner::None)
                {
                    out.push((x, y, l.follows_across, l.follows_down));
                }
            }
        }
        out
    }

    #[rstest]
    #[case("3", 3)]
    #[case("4-3", 7)]
    #[case("2,1,2", 5)]
    #[case("10", 10)]
    #[case("3 (2 words)", 5)]
    #[case("", 0)]
    #[case("-", 0)]
    fn test_format_length(#[case] format: &str, #[case] expected: usize) {
        assert_eq!(format_length(format), expected);
    }

    #[test]
    fn test_matching_clue_has_no_warnings() {
        let mut cw = cat();
        cw.set_clue(
            Clue::new("1", "Pet", "3").with_solution("CAT"),
            Some(Direction::Across),
        )
        .unwrap();
        cw.check().unwrap();
        assert!(cw.warnings().is_empty(), "{:?}", cw.warnings());
        assert!(cw.checked());
    }

    #[test]
    fn test_length_mismatch() {
        let mut cw = cat();
        cw.set_clue(Clue::new("1", "Pet", "4"), Some(Direction::Across))
            .unwrap();
        cw.check().unwrap();
        assert_eq!(
            cw.warnings(),
            ["Clue 1a should be 3 characters long but is given as 4"]
        );
    }

    #[test]
    fn test_length_mismatch_with_separators() {
        let mut cw = cat();
        cw.set_clue(Clue::new("1", "Pet", "2,1,2"), Some(Direction::Across))
            .unwrap();
        cw.check().unwrap();
        assert_eq!(
            cw.warnings(),
            ["Clue 1a should be 3 characters long but is given as 2,1,2 which adds up to 5"]
        );
    }

    #[test]
    fn test_format_too_long_to_count() {
        let mut cw = cat();
        cw.set_clue(
            Clue::new("1", "Pet", "99999999999999999999999"),
            Some(Direction::Across),
        )
        .unwrap();
        cw.check().unwrap();
        assert_eq!(
            cw.warnings(),
            ["Clue 1a should be 3 characters long but is given as 99999999999999999999999, which is too long to count"]
        );
        assert_eq!(checked_format_length("18446744073709551615,1"), None);
        assert_eq!(checked_format_length("4-3"), Some(7));
    }

    #[test]
    fn test_solution_mismatch_and_normalisation() {
        let mut cw = crossword_from_rows(&["CAT", "A#O", "BEE"]);
        cw.set_clue(Clue::new("1a", "Pet", "3").with_solution("c-a t!"), None)
            .unwrap();
        cw.set_clue(Clue::new("1d", "Taxi", "3").with_solution("cab"), None)
            .unwrap();
        cw.set_clue(Clue::new("2d", "Digit", "3").with_solution("toy"), None)
            .unwrap();
        cw.set_clue(Clue::new("3a", "Buzzer", "3").with_solution(""), None)
            .unwrap();
        cw.check().unwrap();
        assert_eq!(
            cw.warnings(),
            ["In the grid, 2d is TOE but the clue solution is toy"]
        );
    }

    #[test]
    fn test_unclued_and_clued_multiple_times() {
        let mut cw = crossword_from_rows(&["CAT", "A#O", "BEE"]);
        cw.set_clue(Clue::new("1a", "Pet", "3"), None).unwrap();
        cw.set_clue(Clue::new("1a, 3a", "Compound", "3,3"), None)
            .unwrap();
        cw.set_clue(Clue::new("3a", "Buzzer", "3"), None).unwrap();
        cw.check().unwrap();
        assert_eq!(
            cw.warnings(),
            ["Clued multiple times: 1a, 3a", "Unclued: 1d, 2d"]
        );
    }

    #[test]
    fn test_every_unclued_light_in_one_warning() {
        let mut cw = crossword_from_rows(&["CAT", "A#O", "BEE"]);
        cw.check().unwrap();
        assert_eq!(cw.warnings(), ["Unclued: 1a, 1d, 2d, 3a"]);
    }

    #[test]
    fn test_clue_for_missing_light() {
        let mut cw = cat();
        cw.set_clue(Clue::new("1a", "Pet", "3"), None).unwrap();
        cw.set_clue(Clue::new("1d", "Nowhere", "3"), None).unwrap();
        cw.set_clue(Clue::new("1a, 4a", "Partly", "3,2"), None)
            .unwrap();
        cw.check().unwrap();
        assert_eq!(
            cw.warnings(),
            [
                "Clued multiple times: 1a",
                "Clue 1d refers to an entry that is not in the grid",
                "Clue 1a, 4a refers to an entry that is not in the grid",
            ]
        );
    }

    #[rstest]
    #[case::separator_at_light_end("3-4", vec![])]
    #[case::hyphen_inside_first_light("2-5", vec![(1, 0, Joiner::Hyphen, Joiner::None)])]
    #[case::space_inside_second_light("4,3", vec![(4, 0, Joiner::None, Joiner::Space)])]
    #[case::several_separators("1-1-1-4", vec![
        (0, 0, Joiner::Hyphen, Joiner::None),
        (1, 0, Joiner::Hyphen, Joiner::None),
    ])]
    #[case::space_separator("5 2", vec![(4, 1, Joiner::None, Joiner::Space)])]
    fn test_compound_followers(
        #[case] format: &str,
        #[case] expected: Vec<(usize, usize, Joiner, Joiner)>,
    ) {
        let mut cw = compound_grid();
        cw.set_clue(Clue::new("1a, 2d", "Compound", format), None)
            .unwrap();
        cw.check().unwrap();
        assert!(cw.warnings().is_empty(), "{:?}", cw.warnings());
        assert_eq!(joiners(&cw), expected);
    }

    #[test]
    fn test_followers_skipped_after_failed_check() {
        let mut cw = compound_grid();
        cw.set_clue(
            Clue::new("1a, 2d", "Compound", "2-5").with_solution("castop"),
            None,
        )
        .unwrap();
        cw.check().unwrap();
        assert_eq!(cw.warnings().len(), 1);
        assert!(joiners(&cw).is_empty());
    }

    #[test]
    fn test_check_is_repeatable() {
        let mut cw = compound_grid();
        cw.set_clue(Clue::new("1a, 2d", "Compound", "2-5"), None)
            .unwrap();
        cw.set_clue(Clue::new("9a", "Stray", "3"), None).unwrap();
        cw.check().unwrap();
        let first_warnings = cw.warnings().to_vec();
        let first_joiners = joiners(&cw);

        cw.check().unwrap();
        assert_eq!(cw.warnings(), first_warnings.as_slice());
        assert_eq!(joiners(&cw), first_joiners);

        cw.set_clue(Clue::new("1a, 2d", "Compound", "3-4"), None)
            .unwrap();
        cw.check().unwrap();
        assert!(joiners(&cw).is_empty());
    }

    #[test]
    fn test_leading_separator_marks_nothing() {
        let mut cw = cat();
        cw.set_clue(Clue::new("1a", "Pet", "-3"), None).unwrap();
        cw.check().unwrap();
        assert!(cw.warnings().is_empty());
        assert!(joiners(&cw).is_empty());
    }

    #[test]
    fn test_leading_zero_digit_run() {
        let mut cw = cat();
        cw.set_clue(Clue::new("1a", "Pet", "01-2"), None).unwrap();
        cw.check().unwrap();
        assert!(cw.warnings().is_empty());
        assert_eq!(joiners(&cw), vec![(0, 0, Joiner::Hyphen, Joiner::None)]);
    }
}
