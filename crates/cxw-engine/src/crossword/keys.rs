use std::sync::OnceLock;

use regex::Regex;

use super::Crossword;
use crate::error::CrosswordError;
use crate::models::{Direction, LightKey};

fn light_key_regex() -> &'static Regex {
    static LIGHT_KEY: OnceLock<Regex> = OnceLock::new();
    LIGHT_KEY.get_or_init(|| {
        Regex::new(r"^\s*(\d+)\s*([ad]?)\s*\.?\s*$").expect("Invalid light key regex")
    })
}

impl Crossword {
    /// Normalise a user-written light key such as `"5"`, `" 12d."` or `"3 a"`.
    ///
    /// An explicit direction letter wins, then `default_direction`. Without
    /// either, the direction is inferred when exactly one of `{n}a` / `{n}d`
    /// exists in the grid.
    pub fn normalise_light_key(
        &self,
        key: &str,
        default_direction: Option<Direction>,
    ) -> Result<LightKey, CrosswordError> {
        let caps = light_key_regex()
            .captures(key)
            .ok_or_else(|| CrosswordError::IllegalLightKey(key.to_string()))?;
        let number: u32 = caps[1]
            .parse()
            .map_err(|_| CrosswordError::IllegalLightKey(key.to_string()))?;

        let letter = &caps[2];
        if !letter.is_empty() || default_direction.is_some() {
            let direction = Direction::from_letter(letter, default_direction)?;
            return Ok(LightKey::new(number, direction));
        }

        let exists = |direction| {
            let candidate = LightKey::new(number, direction);
            self.lights.iter().any(|l| l.id == candidate)
        };
        match (exists(Direction::Across), exists(Direction::Down)) {
            (true, false) => Ok(LightKey::new(number, Direction::Across)),
            (false, true) => Ok(LightKey::new(number, Direction::Down)),
            _ => Err(CrosswordError::UnknownDirection {
                key: key.to_string(),
                direction: default_direction,
            }),
        }
    }

    /// Normalise a comma-separated clue key into canonical `"1a, 2d"` form.
    pub fn normalise_clue_key(
        &self,
        key: &str,
        default_direction: Option<Direction>,
    ) -> Result<String, CrosswordError> {
        let lights = key
            .split(',')
            .map(|part| self.normalise_light_key(part, default_direction))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| CrosswordError::ClueKey {
                key: key.to_string(),
                direction: default_direction,
                source: Box::new(source),
            })?;
        Ok(join_keys(lights.iter().map(LightKey::to_string)))
    }

    /// Render a canonical clue key relative to a clue-list heading, e.g.
    /// `"1a, 2d"` under Across becomes `"1, 2d"`.
    pub fn friendly_clue_key(&self, key: &str, default_direction: Direction) -> String {
        join_keys(key.split(", ").map(|part| match part.parse::<LightKey>() {
            Ok(light) => light.friendly(default_direction),
            Err(_) => part.to_string(),
        }))
    }
}

fn join_keys(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use crate::Crossword;
    use crate::error::CrosswordError;
    use crate::models::{Direction, LightKey};
    use crate::tests::crossword_from_rows;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    /// 1a/1d share a cell, 2d and 3a exist in only one direction each.
    fn sample() -> Crossword {
        crossword_from_rows(&["CAT", "A#O", "BEE"])
    }

    #[fixture]
    fn grid() -> Crossword {
        sample()
    }

    #[rstest]
    #[case("1a", None, "1a")]
    #[case(" 1 d . ", None, "1d")]
    #[case("2", None, "2d")]
    #[case("3.", None, "3a")]
    #[case("02", None, "2d")]
    #[case("1", Some(Direction::Down), "1d")]
    #[case("1a", Some(Direction::Down), "1a")]
    #[case("9", Some(Direction::Across), "9a")]
    fn test_normalise_light_key(
        grid: Crossword,
        #[case] input: &str,
        #[case] default: Option<Direction>,
        #[case] expected: &str,
    ) {
        let key = grid.normalise_light_key(input, default).unwrap();
        assert_eq!(key.to_string(), expected);
    }

    #[rstest]
    #[case("1")]
    #[case("9")]
    fn test_unknown_direction(grid: Crossword, #[case] input: &str) {
        let err = grid.normalise_light_key(input, None).unwrap_err();
        assert!(matches!(err, CrosswordError::UnknownDirection { .. }));
        assert_eq!(
            err.to_string(),
            format!("Unknown direction for key: {input} (no default direction)")
        );
    }

    #[rstest]
    #[case("")]
    #[case("a")]
    #[case("1x")]
    #[case("1 2")]
    #[case("1a..")]
    fn test_illegal_light_key(grid: Crossword, #[case] input: &str) {
        let err = grid.normalise_light_key(input, Some(Direction::Across)).unwrap_err();
        assert!(matches!(err, CrosswordError::IllegalLightKey(_)));
    }

    #[test]
    fn test_ambiguous_number_resolves_when_one_direction_exists() {
        let mut cw = crossword_from_rows(&[
            ".#.#.#.",
            ".#.#.#.",
            "#######",
            "...####",
            ".######",
        ]);
        let ids: Vec<String> = cw.lights().iter().map(|l| l.id.to_string()).collect();
        assert_eq!(ids, vec!["1d", "2d", "3d", "4d", "5a", "5d"]);

        let err = cw.normalise_light_key("5", None).unwrap_err();
        assert!(matches!(err, CrosswordError::UnknownDirection { .. }));

        cw.set_block_cell(1, 3).unwrap();
        assert_eq!(cw.normalise_light_key("5", None).unwrap().to_string(), "5d");
    }

    #[test]
    fn test_normalise_clue_key() {
        let cw = sample();
        assert_eq!(cw.normalise_clue_key("1a,2", None).unwrap(), "1a, 2d");
        assert_eq!(
            cw.normalise_clue_key(" 1 , 3a", Some(Direction::Down)).unwrap(),
            "1d, 3a"
        );
        assert_eq!(cw.normalise_clue_key("3", None).unwrap(), "3a");
    }

    #[test]
    fn test_normalise_clue_key_names_failing_key() {
        let cw = sample();
        let err = cw.normalise_clue_key("2, 1", None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error normalising clue key: 2, 1 (no default direction) - \
             Unknown direction for key:  1 (no default direction)"
        );

        let err = cw.normalise_clue_key("1a,", Some(Direction::Across)).unwrap_err();
        assert!(err.to_string().starts_with("Error normalising clue key: 1a, (Across)"));
    }

    #[test]
    fn test_friendly_clue_key() {
        let cw = sample();
        assert_eq!(cw.friendly_clue_key("1a", Direction::Across), "1");
        assert_eq!(cw.friendly_clue_key("1a", Direction::Down), "1a");
        assert_eq!(cw.friendly_clue_key("1a, 2d, 3a", Direction::Across), "1, 2d, 3");
    }

    #[rstest]
    #[case("1a")]
    #[case("2d")]
    #[case("3a")]
    #[case("1d")]
    fn test_normalise_friendly_is_stable(grid: Crossword, #[case] key: &str) {
        let canonical = grid.normalise_light_key(key, None).unwrap();
        for direction in Direction::ALL {
            let friendly = canonical.friendly(direction);
            let again = grid.normalise_light_key(&friendly, Some(direction)).unwrap();
            assert_eq!(again, canonical);
            assert_eq!(again.to_string().parse::<LightKey>().unwrap(), canonical);
        }
    }
}
