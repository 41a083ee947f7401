use crate::error::Result;
use crate::extractor;
use crate::parser::{self, Record};
use crate::scanner::InputFile;
use std::fs;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct BatchProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub bytes_processed: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub errors: Vec<String>,
}

impl BatchProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            bytes_processed: 0,
            current_file: None,
            start_time: Instant::now(),
            errors: Vec::new(),
        }
    }

    pub fn update_file(&mut self, filename: String, bytes: u64) {
        self.files_processed += 1;
        self.bytes_processed += bytes;
        self.current_file = Some(filename);
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Runs the per-file pipeline over a batch: read bytes, extract text,
/// lowercase, parse fields. Strictly sequential, one record per input file.
pub struct BatchProcessor;

impl BatchProcessor {
    pub fn new() -> Self {
        Self
    }

    /// A file that cannot be read or extracted still yields a record (with
    /// default fields) so the output row count always matches the input
    /// count; the reason lands in `progress.errors`.
    pub fn process_files(
        &self,
        files: &[InputFile],
        progress_callback: Option<&dyn Fn(&BatchProgress)>,
    ) -> Result<(Vec<Record>, BatchProgress)> {
        let mut progress = BatchProgress::new(files.len());
        let mut records = Vec::with_capacity(files.len());

        for file in files {
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            let record = match self.process_single(file) {
                Ok(record) => record,
                Err(e) => {
                    progress.add_error(format!("{}: {}", file.display_path(), e));
                    parser::parse_record("")
                }
            };

            records.push(record);
            progress.update_file(file.filename.clone(), file.size);
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        // Ascending by name; stable, so empty names keep input order at the top
        records.sort_by(|a, b| a.name.cmp(&b.name));

        Ok((records, progress))
    }

    fn process_single(&self, file: &InputFile) -> Result<Record> {
        let data = fs::read(&file.source_path)?;
        let text = extractor::extract_text(file.kind, &file.filename, &data)?;

        Ok(parser::parse_record(&text.to_lowercase()))
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}
