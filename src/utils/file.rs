// Cross-platform file utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const REPORT_EXTENSION: &str = "xml";

/// File utilities for cross-platform operations
pub struct FileUtils;

impl FileUtils {
    /// Collect all .xml report files from a file or directory, sorted by path
    pub fn collect_report_files(path: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        if path.is_file() {
            if Self::is_report_file(path) {
                files.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            let walker = walkdir::WalkDir::new(path).into_iter().filter_entry(|e| {
                // Always include the root directory itself, even if it starts with '.'
                if e.depth() == 0 {
                    return true;
                }
                !e.file_name().to_string_lossy().starts_with('.')
            });

            for entry in walker.flatten() {
                if entry.file_type().is_file() && Self::is_report_file(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }

        files.sort();
        files
    }

    pub fn is_report_file(path: &Path) -> bool {
        path.extension()
            .is_some_and(|e| e.eq_ignore_ascii_case(REPORT_EXTENSION))
    }

    /// Read file content
    pub fn read_file(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write file content
    pub fn write_file(path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }
}
