use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::ImportError;
use crate::input;

/// Unique cleaned words, kept in codepoint order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WordSet {
    words: BTreeSet<String>,
}

impl WordSet {
    /// Returns `true` when the word was not already present.
    pub fn insert(&mut self, word: String) -> bool {
        self.words.insert(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub files: usize,
    pub lines: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub words: WordSet,
    pub stats: ScanStats,
}

/// Collect the unique words of every `*.txt` file directly inside `dir`.
pub fn scan_directory(dir: &Path) -> Result<ScanReport, ImportError> {
    if !dir.is_dir() {
        return Err(ImportError::InputDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let files = list_word_files(dir)?;
    let mut report = ScanReport::default();

    for path in files {
        report.stats.files += 1;
        tracing::info!("Processing file: {}", display_name(&path));

        if let Err(err) = scan_file(&path, &mut report) {
            tracing::warn!("{}", err);
        }
    }

    if report.stats.files == 0 {
        tracing::warn!("No .txt files found in {}", dir.display());
    }

    Ok(report)
}

fn scan_file(path: &Path, report: &mut ScanReport) -> Result<(), ImportError> {
    let file_error = |source| ImportError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(file_error)?;
    input::read_words(BufReader::new(file), &mut report.words, &mut report.stats)
        .map_err(file_error)
}

fn list_word_files(dir: &Path) -> Result<Vec<PathBuf>, ImportError> {
    let read_dir_error = |source| ImportError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && has_txt_extension(&path) {
            files.push(path);
        }
    }

    // read_dir order is platform dependent
    files.sort();
    Ok(files)
}

fn has_txt_extension(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".txt"))
        .unwrap_or(false)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
