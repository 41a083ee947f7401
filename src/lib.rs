pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod report;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{AppearanceConfig, Config, CliOverrides, FilterConfig, OutputConfig};
pub use error::{AntecedentesError, Result, UserFriendlyError};

// Core functionality re-exports
pub use batch::{BatchProcessor, BatchProgress};
pub use extractor::MediaKind;
pub use parser::{Category, Record};
pub use report::WorkbookWriter;
pub use scanner::{DocumentScanner, InputFile};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Final result of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub records: Vec<Record>,
    pub files_processed: usize,
    pub bytes_processed: u64,
    pub workbook_path: PathBuf,
    pub workbook_bytes: u64,
    pub errors: Vec<String>,
    pub processed_at: DateTime<Utc>,
}

/// Main library interface: wires scanner, batch processor, workbook writer
/// and terminal output together.
pub struct Antecedentes {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl Antecedentes {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create an Antecedentes instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Full pipeline: collect inputs, process every file, write the
    /// two-sheet workbook, show preview and summary.
    pub fn process(&self, inputs: &[PathBuf], force_overwrite: bool) -> Result<BatchReport> {
        self.output_formatter.print_banner(&self.config.appearance);

        let files = self.collect_inputs(inputs)?;
        self.output_formatter
            .info(&format!("Found {} record files", files.len()));

        let (records, progress) = self.run_batch(&files)?;

        let writer = WorkbookWriter::new().with_force_overwrite(force_overwrite);
        let workbook_path = self.config.output.workbook_path.clone();
        let workbook_bytes = writer.write_to_file(&records, &workbook_path)?;

        for error in &progress.errors {
            self.output_formatter.warning(error);
        }

        self.output_formatter
            .print_records_preview(&records, self.config.output.preview_rows);
        self.output_formatter
            .print_batch_summary(&progress, workbook_bytes);

        Ok(BatchReport {
            records,
            files_processed: progress.files_processed,
            bytes_processed: progress.bytes_processed,
            workbook_path,
            workbook_bytes,
            errors: progress.errors,
            processed_at: Utc::now(),
        })
    }

    /// Expand files/directories into the ordered batch.
    pub fn collect_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<InputFile>> {
        self.output_formatter
            .start_operation("Collecting record documents");

        let scanner = DocumentScanner::new(&self.config.filters);
        scanner.collect_inputs(inputs)
    }

    fn run_batch(&self, files: &[InputFile]) -> Result<(Vec<Record>, BatchProgress)> {
        self.output_formatter.start_operation("Processing records");

        let file_progress = self.progress_manager.create_file_progress(files.len() as u64);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &BatchProgress| {
                ui::progress::update_file_progress(&pb, progress);
            }
        };

        let processor = BatchProcessor::new();
        let (records, progress) = processor.process_files(files, Some(&progress_callback))?;

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Processed {} files", progress.files_processed),
            progress.elapsed(),
        );

        Ok((records, progress))
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(AntecedentesError::Io)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &AntecedentesError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to process a batch with minimal setup
pub fn process_files_simple(
    inputs: &[PathBuf],
    output_path: Option<&Path>,
    verbose: bool,
) -> Result<BatchReport> {
    let mut config = Config::default();

    if let Some(path) = output_path {
        config.output.workbook_path = path.to_path_buf();
    }

    let app = Antecedentes::new(
        config,
        OutputMode::Human,
        if verbose { 1 } else { 0 },
        false,
    );

    app.process(inputs, false)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
