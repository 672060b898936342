//! Non-interactive `--check` mode.

use cxw_engine::{PuzzleFile, io};
use std::path::{Path, PathBuf};

/// Where puzzles come from: a single file or a scanned directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleSource {
    pub root: PathBuf,
    pub files: Vec<PuzzleFile>,
}

impl PuzzleSource {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if path.is_file() {
            let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Ok(Self {
                root,
                files: vec![PuzzleFile::from_relative_str(&name)],
            });
        }
        Ok(Self {
            root: path.to_path_buf(),
            files: io::scan_puzzle_files(path)?,
        })
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct CheckReport {
    pub lines: Vec<String>,
    pub failures: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.failures == 0
    }
}

/// Parse and check every puzzle. A puzzle fails when it cannot be read or
/// checked, or when the check produces warnings.
pub fn check_puzzles(source: &PuzzleSource) -> CheckReport {
    let mut report = CheckReport::default();
    for file in &source.files {
        let name = file.relative_path().as_str();
        let checked = io::read_puzzle(file.relative_path(), &source.root)
            .map_err(anyhow::Error::from)
            .and_then(|mut crossword| {
                crossword.check()?;
                Ok(crossword)
            });
        match checked {
            Ok(crossword) if crossword.warnings().is_empty() => {
                report.lines.push(format!("{name}: ok"));
            }
            Ok(crossword) => {
                report.failures += 1;
                report
                    .lines
                    .push(format!("{name}: {} warning(s)", crossword.warnings().len()));
                report
                    .lines
                    .extend(crossword.warnings().iter().map(|w| format!("  {w}")));
            }
            Err(err) => {
                report.failures += 1;
                report.lines.push(format!("{name}: error: {err}"));
            }
        }
    }
    log::info!(
        "Checked {} puzzle(s), {} failed",
        source.files.len(),
        report.failures
    );
    report
}
