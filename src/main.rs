use antecedentes::{
    Antecedentes, AntecedentesError, Cli, OutputFormat, OutputFormatter, OutputMode,
    UserFriendlyError,
};
use clap::Parser;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match Antecedentes::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&cli, &app);
    }

    match app.process(&cli.inputs, cli.force) {
        Ok(report) => {
            if matches!(cli.output_format, OutputFormat::Json) {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
                );
            }

            // A degraded batch still completed: every input produced a row
            // and the workbook was written, so this is a success.
            0
        }
        Err(e) => {
            app.handle_error(&e);

            // Map error types to appropriate exit codes
            match e {
                AntecedentesError::InvalidPath { .. } => 2,
                AntecedentesError::NoInputFiles { .. } => 3,
                AntecedentesError::Config { .. } => 4,
                AntecedentesError::Permission { .. } => 7,
                AntecedentesError::OutputFileExists { .. } => 8,
                AntecedentesError::FileTooLarge { .. } => 9,
                _ => 1, // General error
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "antecedentes.toml".to_string());

    match Antecedentes::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  antecedentes <inputs> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(cli: &Cli, app: &Antecedentes) -> i32 {
    let formatter = app.output_formatter();

    formatter.info("DRY RUN MODE - No files will be processed");
    formatter.print_separator();

    let files = match app.collect_inputs(&cli.inputs) {
        Ok(files) => files,
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            return 1;
        }
    };

    formatter.info("Files that would be processed:");
    for file in &files {
        println!("  {} ({})", file.display_path(), file.kind.label());
    }

    let config = app.config();
    formatter.print_separator();
    formatter.info("Configuration that would be used:");
    println!("  Extensions: {}", config.filters.extensions.join(", "));
    println!("  Max file size: {} bytes", config.filters.max_file_size);
    println!(
        "  Output workbook: {}",
        config.output.workbook_path.display()
    );
    println!("  Primary color: {}", config.appearance.primary_color);

    if cli.force {
        formatter.warning("Force mode enabled - would overwrite existing workbook");
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to process the batch");

    0
}

fn print_startup_error(error: &AntecedentesError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn base_cli(inputs: Vec<PathBuf>) -> Cli {
        Cli {
            inputs,
            output: None,
            formats: None,
            exclude: None,
            max_size: None,
            config: None,
            output_format: OutputFormat::Plain,
            primary_color: None,
            default_colors: false,
            verbose: 0,
            quiet: true,
            force: false,
            dry_run: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut cli = base_cli(vec![]);
        cli.config = Some(config_path.clone());
        cli.generate_config = true;

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[filters]"));
    }

    #[test]
    fn test_dry_run_with_missing_input() {
        let cli = base_cli(vec![PathBuf::from("/no/such/dir")]);
        let app = Antecedentes::from_cli(&cli).unwrap();

        let exit_code = handle_dry_run(&cli, &app);
        assert_eq!(exit_code, 1);
    }

    #[test]
    fn test_dry_run_with_inputs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("legajo.pdf"), b"x").unwrap();

        let cli = base_cli(vec![temp_dir.path().to_path_buf()]);
        let app = Antecedentes::from_cli(&cli).unwrap();

        let exit_code = handle_dry_run(&cli, &app);
        assert_eq!(exit_code, 0);
    }
}
