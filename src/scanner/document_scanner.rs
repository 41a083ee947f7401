use crate::config::FilterConfig;
use crate::error::{AntecedentesError, Result};
use crate::extractor::MediaKind;
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One record document queued for processing.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub source_path: PathBuf,
    pub filename: String,
    pub kind: MediaKind,
    pub size: u64,
}

impl InputFile {
    pub fn new(source_path: PathBuf, size: u64) -> Self {
        let filename = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        let kind = MediaKind::from_path(&source_path);

        Self {
            source_path,
            filename,
            kind,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.source_path.display().to_string()
    }
}

/// Expands CLI inputs (files and directories) into the ordered batch.
pub struct DocumentScanner {
    filter: FileFilter,
    max_depth: usize,
}

impl DocumentScanner {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            max_depth: config.max_depth,
        }
    }

    /// Explicit file arguments keep their order; each directory contributes
    /// its matches sorted by path. Scan errors inside a directory are
    /// tolerated unless nothing at all could be collected.
    pub fn collect_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<InputFile>> {
        let mut files = Vec::new();
        let mut scan_errors = Vec::new();

        for input in inputs {
            if !input.exists() {
                return Err(AntecedentesError::InvalidPath {
                    path: input.display().to_string(),
                });
            }

            if input.is_dir() {
                files.extend(self.scan_directory(input, &mut scan_errors)?);
            } else {
                files.push(self.validate_file(input)?);
            }
        }

        if files.is_empty() {
            if !scan_errors.is_empty() {
                return Err(AntecedentesError::Permission {
                    path: format!("Multiple scan errors: {}", scan_errors.join(", ")),
                });
            }
            return Err(AntecedentesError::NoInputFiles {
                searched_extensions: self.filter.get_extensions().clone(),
            });
        }

        Ok(files)
    }

    fn scan_directory(
        &self,
        root: &Path,
        scan_errors: &mut Vec<String>,
    ) -> Result<Vec<InputFile>> {
        let mut found = Vec::new();

        let walker = WalkDir::new(root)
            .max_depth(self.max_depth)
            .follow_links(false) // Security: don't follow symlinks
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    scan_errors.push(format!("Scan error: {}", err));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.filter.is_record_file(path) {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| AntecedentesError::Io(e.into()))?;
            if !self.filter.is_size_allowed(metadata.len()) {
                scan_errors.push(format!(
                    "Skipped oversized file: {} ({} bytes)",
                    path.display(),
                    metadata.len()
                ));
                continue;
            }

            found.push(InputFile::new(path.to_path_buf(), metadata.len()));
        }

        // Deterministic batch order within a directory
        found.sort_by(|a, b| a.source_path.cmp(&b.source_path));

        Ok(found)
    }

    /// An explicitly named file skips the extension filter; the original tool
    /// let the reader fail on whatever the user handed it.
    fn validate_file(&self, path: &Path) -> Result<InputFile> {
        let metadata = std::fs::metadata(path)?;

        if !self.filter.is_size_allowed(metadata.len()) {
            return Err(AntecedentesError::FileTooLarge {
                size: metadata.len(),
                max_size: self.filter.get_max_file_size(),
            });
        }

        Ok(InputFile::new(path.to_path_buf(), metadata.len()))
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if entry.depth() > self.max_depth {
            return false;
        }

        if entry.file_type().is_file() || entry.depth() == 0 {
            return true;
        }

        if entry.file_type().is_dir() {
            return self.filter.should_traverse_directory(entry.path());
        }

        true
    }
}
