use thiserror::Error;

#[derive(Error, Debug)]
pub enum AntecedentesError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input path: {path}")]
    InvalidPath { path: String },

    #[error("No PDF or DOCX files found in the given inputs")]
    NoInputFiles { searched_extensions: Vec<String> },

    #[error("Text extraction failed for {path}: {reason}")]
    Extraction { path: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },

    #[error("File too large: {size} bytes (max: {max_size} bytes)")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Failed to build workbook: {message}")]
    Workbook { message: String },

    #[error("Output file already exists: {path}")]
    OutputFileExists { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for AntecedentesError {
    fn user_message(&self) -> String {
        match self {
            AntecedentesError::InvalidPath { path } => {
                format!("Invalid input path: {}", path)
            }
            AntecedentesError::NoInputFiles {
                searched_extensions,
            } => {
                format!(
                    "No record documents found with extensions: {}",
                    searched_extensions.join(", ")
                )
            }
            AntecedentesError::Extraction { path, reason } => {
                format!("Could not extract text from {}: {}", path, reason)
            }
            AntecedentesError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            AntecedentesError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            AntecedentesError::FileTooLarge { size, max_size } => {
                format!(
                    "File too large: {} (maximum allowed: {})",
                    format_bytes(*size),
                    format_bytes(*max_size)
                )
            }
            AntecedentesError::Workbook { message } => {
                format!("Failed to build the Excel workbook: {}", message)
            }
            AntecedentesError::OutputFileExists { path } => {
                format!("Output file already exists: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            AntecedentesError::InvalidPath { .. } => Some(
                "Check that each input path exists and points to a PDF/DOCX file or a directory containing them.".to_string()
            ),
            AntecedentesError::NoInputFiles { .. } => Some(
                "Pass individual .pdf/.docx files, or a directory that contains them. Use --formats to accept other extensions.".to_string()
            ),
            AntecedentesError::Extraction { .. } => Some(
                "The file may be corrupt, encrypted, or not a real PDF/DOCX. The batch continues with an empty record for it.".to_string()
            ),
            AntecedentesError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            AntecedentesError::Permission { .. } => Some(
                "Ensure you have read permission on the inputs and write permission on the output directory.".to_string()
            ),
            AntecedentesError::FileTooLarge { .. } => Some(
                "Increase the maximum file size limit with --max-size or exclude the large file.".to_string()
            ),
            AntecedentesError::OutputFileExists { .. } => Some(
                "Remove the existing file, choose a different path with --output, or use --force to overwrite.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for AntecedentesError {
    fn from(error: toml::de::Error) -> Self {
        AntecedentesError::Config {
            message: error.to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for AntecedentesError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        AntecedentesError::Workbook {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AntecedentesError>;

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
