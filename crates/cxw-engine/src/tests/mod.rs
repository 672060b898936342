use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::Crossword;

/// Build a crossword from grid rows: `#` is a block, `.` or space an empty letter.
pub fn crossword_from_rows(rows: &[&str]) -> Crossword {
    let width = rows.first().map_or(0, |row| row.chars().count());
    let mut crossword = Crossword::new(width, rows.len());
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            match c {
                '#' => crossword.set_block_cell(x, y).unwrap(),
                '.' | ' ' => crossword.set_letter_cell(x, y, "").unwrap(),
                _ => crossword.set_letter_cell(x, y, c).unwrap(),
            }
        }
    }
    crossword
}

/// Create a temporary puzzles directory
pub fn create_test_puzzles_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test puzzle file, making parent directories as needed
pub fn create_test_file(puzzles_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = puzzles_dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}
