use relative_path::{RelativePath, RelativePathBuf};

/// File extensions recognised as puzzle sources.
pub const PUZZLE_EXTENSIONS: [&str; 2] = ["cxw", "xml"];

/// A puzzle file located relative to a puzzles directory
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleFile {
    relative_path: RelativePathBuf,
    display_name: String,
}

impl PuzzleFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = Self::extract_display_name(&relative_path);
        Self {
            relative_path,
            display_name,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without its puzzle extension
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    fn extract_display_name(path: &RelativePath) -> String {
        match (path.file_stem(), path.extension()) {
            (Some(stem), Some(ext)) if PUZZLE_EXTENSIONS.contains(&ext) => stem.to_string(),
            _ => path.file_name().unwrap_or("Untitled").to_string(),
        }
    }
}

impl From<&str> for PuzzleFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_puzzle_extension() {
        assert_eq!(PuzzleFile::from("sunday/prize.cxw").display_name(), "prize");
        assert_eq!(PuzzleFile::from("cryptic.xml").display_name(), "cryptic");
    }

    #[test]
    fn test_display_name_keeps_other_extensions() {
        assert_eq!(PuzzleFile::from("notes.txt").display_name(), "notes.txt");
    }

    #[test]
    fn test_relative_path_preserved() {
        let file = PuzzleFile::from("a/b.cxw");
        assert_eq!(file.relative_path().as_str(), "a/b.cxw");
    }
}
