use crate::config::{CliOverrides, Config};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "antecedentes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Process disciplinary-record documents into an Excel summary")]
#[command(
    long_about = "Antecedentes reads a batch of PDF/DOCX disciplinary records, extracts \
                       name, issue date, record type, response status and a short summary \
                       from each, and writes a two-sheet Excel workbook."
)]
#[command(before_help = "⚙️ Antecedentes - Procesador de Antecedentes Disciplinarios")]
#[command(after_help = "EXAMPLES:\n  \
    antecedentes legajos/\n  \
    antecedentes caso1.pdf caso2.docx --output antecedentes.xlsx\n  \
    antecedentes legajos/ --formats pdf --max-size 10 --verbose\n  \
    antecedentes legajos/ --output-format json --quiet")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Record files (PDF/DOCX) or directories containing them
    #[arg(required_unless_present = "generate_config")]
    pub inputs: Vec<PathBuf>,

    /// Output workbook path (defaults to FordFiorasi_Antecedentes.xlsx)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File formats to accept (comma-separated)
    #[arg(short, long, help = "File extensions to accept (e.g., pdf,docx)")]
    pub formats: Option<String>,

    /// Filename patterns to exclude when scanning directories
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Maximum file size in MB
    #[arg(long, help = "Maximum file size to process (in MB)")]
    pub max_size: Option<u64>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Primary display color (hex, e.g. #0047AB)
    #[arg(long, help = "Primary color for the terminal banner (#RRGGBB)")]
    pub primary_color: Option<String>,

    /// Reset display colors to the institutional defaults
    #[arg(long, conflicts_with = "primary_color")]
    pub default_colors: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force overwrite of existing output workbook
    #[arg(long, help = "Overwrite existing output workbook")]
    pub force: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show what would be processed without actually doing it")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> crate::error::Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let max_file_size = self.max_size.map(|size| size * 1024 * 1024); // Convert MB to bytes

        CliOverrides::new()
            .with_formats(self.formats.clone())
            .with_exclude(self.exclude.clone())
            .with_max_file_size(max_file_size)
            .with_output_path(self.output.clone())
            .with_primary_color(self.primary_color.clone())
            .with_default_colors(self.default_colors)
    }

    pub fn should_use_colors(&self) -> bool {
        !self.quiet && console::Term::stdout().features().colors_supported()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn parse_size_string(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim().to_lowercase();

    let (number_str, multiplier) = if s.ends_with("kb") || s.ends_with("k") {
        (s.trim_end_matches("kb").trim_end_matches("k"), 1024)
    } else if s.ends_with("mb") || s.ends_with("m") {
        (s.trim_end_matches("mb").trim_end_matches("m"), 1024 * 1024)
    } else if s.ends_with("gb") || s.ends_with("g") {
        (
            s.trim_end_matches("gb").trim_end_matches("g"),
            1024 * 1024 * 1024,
        )
    } else if s.ends_with("b") {
        (s.trim_end_matches("b"), 1)
    } else {
        (s.as_str(), 1)
    };

    let number: f64 = number_str
        .parse()
        .map_err(|_| format!("Invalid number format: {}", number_str))?;

    if number < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    Ok((number * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> Cli {
        Cli {
            inputs: vec![PathBuf::from("legajos")],
            output: None,
            formats: None,
            exclude: None,
            max_size: None,
            config: None,
            output_format: OutputFormat::Human,
            primary_color: None,
            default_colors: false,
            verbose: 0,
            quiet: false,
            force: false,
            dry_run: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_overrides_from_flags() {
        let mut cli = base_cli();
        cli.max_size = Some(5);
        cli.output = Some(PathBuf::from("salida.xlsx"));
        cli.formats = Some("pdf".to_string());

        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.max_file_size, Some(5 * 1024 * 1024));
        assert_eq!(overrides.output_path, Some(PathBuf::from("salida.xlsx")));
        assert_eq!(overrides.formats, Some("pdf".to_string()));
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let mut cli = base_cli();
        cli.formats = Some("pdf".to_string());
        cli.primary_color = Some("#112233".to_string());

        let config = cli.load_config().unwrap();
        assert_eq!(config.filters.extensions, vec!["pdf"]);
        assert_eq!(config.appearance.primary_color, "#112233");
    }

    #[test]
    fn test_invalid_color_rejected() {
        let mut cli = base_cli();
        cli.primary_color = Some("azul".to_string());
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_verbosity_level() {
        let mut cli = base_cli();
        cli.verbose = 2;
        assert_eq!(cli.verbosity_level(), 2);
        assert!(cli.is_verbose());

        cli.quiet = true;
        assert_eq!(cli.verbosity_level(), 0);
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_parse_size_string() {
        assert_eq!(parse_size_string("10").unwrap(), 10);
        assert_eq!(parse_size_string("10KB").unwrap(), 10 * 1024);
        assert_eq!(parse_size_string("5MB").unwrap(), 5 * 1024 * 1024);
        assert_eq!(parse_size_string("1GB").unwrap(), 1024 * 1024 * 1024);

        assert!(parse_size_string("invalid").is_err());
        assert!(parse_size_string("-5MB").is_err());
    }
}
