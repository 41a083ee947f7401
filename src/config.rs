use crate::error::{AntecedentesError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PRIMARY_COLOR: &str = "#0047AB"; // institutional blue
pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";
pub const DEFAULT_WORKBOOK_NAME: &str = "FordFiorasi_Antecedentes.xlsx";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub filters: FilterConfig,
    pub output: OutputConfig,
}

/// Display preferences, rendering only. Replaces the ambient session colors
/// of the original tool with an explicit struct.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppearanceConfig {
    pub primary_color: String,
    /// Not consumed by the terminal renderer (only the primary color tints
    /// the banner); kept so saved config files round-trip both colors.
    pub background_color: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    pub extensions: Vec<String>,
    pub max_file_size: u64,
    pub exclude_patterns: Vec<String>,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub workbook_path: PathBuf,
    pub preview_rows: usize,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

impl AppearanceConfig {
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["pdf".to_string(), "docx".to_string()],
            max_file_size: 25 * 1024 * 1024, // 25MB
            exclude_patterns: vec![
                // Office lock files left behind by open documents
                r"~\$.*".to_string(),
                r".*\.tmp".to_string(),
            ],
            max_depth: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from(DEFAULT_WORKBOOK_NAME),
            preview_rows: 20,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AntecedentesError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| AntecedentesError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| AntecedentesError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["antecedentes.toml", ".antecedentes.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref formats) = cli_args.formats {
            self.filters.extensions = formats
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ref exclude) = cli_args.exclude {
            self.filters.exclude_patterns.extend(exclude.clone());
        }

        if let Some(max_size) = cli_args.max_file_size {
            self.filters.max_file_size = max_size;
        }

        if let Some(ref output_path) = cli_args.output_path {
            self.output.workbook_path = output_path.clone();
        }

        if let Some(ref primary) = cli_args.primary_color {
            self.appearance.primary_color = primary.clone();
        }

        if cli_args.default_colors {
            self.appearance.reset_to_defaults();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| AntecedentesError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| AntecedentesError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.filters.extensions.is_empty() {
            return Err(AntecedentesError::Config {
                message: "At least one file extension must be specified".to_string(),
            });
        }

        if self.filters.max_file_size == 0 {
            return Err(AntecedentesError::Config {
                message: "Maximum file size must be greater than 0".to_string(),
            });
        }

        if self.filters.max_depth == 0 {
            return Err(AntecedentesError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        validate_hex_color(&self.appearance.primary_color)?;
        validate_hex_color(&self.appearance.background_color)?;

        if self.output.workbook_path.as_os_str().is_empty() {
            return Err(AntecedentesError::Config {
                message: "Output workbook path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

fn validate_hex_color(value: &str) -> Result<()> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());

    if valid {
        Ok(())
    } else {
        Err(AntecedentesError::Config {
            message: format!("Invalid color value '{}', expected #RRGGBB", value),
        })
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub formats: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub max_file_size: Option<u64>,
    pub output_path: Option<PathBuf>,
    pub primary_color: Option<String>,
    pub default_colors: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formats(mut self, formats: Option<String>) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_max_file_size(mut self, max_size: Option<u64>) -> Self {
        self.max_file_size = max_size;
        self
    }

    pub fn with_output_path(mut self, output_path: Option<PathBuf>) -> Self {
        self.output_path = output_path;
        self
    }

    pub fn with_primary_color(mut self, primary_color: Option<String>) -> Self {
        self.primary_color = primary_color;
        self
    }

    pub fn with_default_colors(mut self, default_colors: bool) -> Self {
        self.default_colors = default_colors;
        self
    }
}
