use crate::Crossword;
use crate::models::{PUZZLE_EXTENSIONS, PuzzleFile};
use crate::parsing::{ParseError, parse};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid puzzles directory: {0}")]
    InvalidPuzzlesDir(String),
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Read a puzzle file as text without parsing it
pub fn read_file(relative_path: &RelativePath, puzzles_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(puzzles_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Read and parse a puzzle file. The result is not yet checked.
pub fn read_puzzle(relative_path: &RelativePath, puzzles_root: &Path) -> Result<Crossword, IoError> {
    let source = read_file(relative_path, puzzles_root)?;
    parse(&source).map_err(|source| IoError::Parse {
        path: relative_path.to_path(puzzles_root),
        source,
    })
}

/// Scan for puzzle files under the puzzles directory, sorted by path
pub fn scan_puzzle_files(puzzles_root: &Path) -> Result<Vec<PuzzleFile>, IoError> {
    validate_puzzles_dir(puzzles_root)?;

    let mut paths = Vec::new();
    scan_directory_recursive(puzzles_root, &mut paths)?;
    paths.sort();

    let files = paths
        .iter()
        .filter_map(|path| path.strip_prefix(puzzles_root).ok())
        .filter_map(|relative| RelativePathBuf::from_path(relative).ok())
        .map(PuzzleFile::new)
        .collect();
    Ok(files)
}

fn is_puzzle_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PUZZLE_EXTENSIONS.contains(&ext))
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if is_puzzle_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_puzzles_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidPuzzlesDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_puzzles_dir};
    use pretty_assertions::assert_eq;

    const CAT: &str = "CAT\n\n# Across\n1. Pet (3)\n";

    fn names(files: &[PuzzleFile]) -> Vec<&str> {
        files.iter().map(|f| f.relative_path().as_str()).collect()
    }

    #[test]
    fn test_scan_finds_both_formats_sorted() {
        // Given a puzzles directory with text and XML puzzles
        let dir = create_test_puzzles_dir();
        create_test_file(&dir, "b.xml", "<crossword/>");
        create_test_file(&dir, "a.cxw", CAT);

        // When scanning
        let files = scan_puzzle_files(dir.path()).unwrap();

        // Then both are found in path order
        assert_eq!(names(&files), vec!["a.cxw", "b.xml"]);
        assert_eq!(files[0].display_name(), "a");
    }

    #[test]
    fn test_scan_nested_directories() {
        let dir = create_test_puzzles_dir();
        create_test_file(&dir, "root.cxw", CAT);
        create_test_file(&dir, "weekly/2024/one.cxw", CAT);

        let files = scan_puzzle_files(dir.path()).unwrap();

        assert_eq!(names(&files), vec!["root.cxw", "weekly/2024/one.cxw"]);
        assert_eq!(files[1].display_name(), "one");
    }

    #[test]
    fn test_scan_ignores_other_files() {
        let dir = create_test_puzzles_dir();
        create_test_file(&dir, "puzzle.cxw", CAT);
        create_test_file(&dir, "notes.md", "# Notes");
        create_test_file(&dir, "image.png", "fake image data");

        let files = scan_puzzle_files(dir.path()).unwrap();

        assert_eq!(names(&files), vec!["puzzle.cxw"]);
    }

    #[test]
    fn test_scan_invalid_directory() {
        let result = scan_puzzle_files(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(IoError::InvalidPuzzlesDir(_))));
    }

    #[test]
    fn test_validate_puzzles_dir() {
        let dir = create_test_puzzles_dir();
        assert!(validate_puzzles_dir(dir.path()).is_ok());

        let file = create_test_file(&dir, "a.cxw", CAT);
        assert!(validate_puzzles_dir(&file).is_err());
    }

    #[test]
    fn test_read_puzzle() {
        let dir = create_test_puzzles_dir();
        create_test_file(&dir, "cat.cxw", CAT);

        let crossword = read_puzzle(RelativePath::new("cat.cxw"), dir.path()).unwrap();
        assert_eq!(crossword.clues()[0].id, "1a");
    }

    #[test]
    fn test_read_puzzle_not_found() {
        let dir = create_test_puzzles_dir();
        let result = read_puzzle(RelativePath::new("missing.cxw"), dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_read_puzzle_parse_error_names_file() {
        let dir = create_test_puzzles_dir();
        create_test_file(&dir, "ragged.cxw", "CAT\nAO\n");

        let err = read_puzzle(RelativePath::new("ragged.cxw"), dir.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("ragged.cxw"), "{message}");
        assert!(message.ends_with("Line 2 is 2 long and should be 3 long"));
    }
}
