//! Command-line interface for the ertidy utility
//!
//! Provides a CLI to repair machine-generated Mermaid.js ER diagram markup.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::colorizer::render_diff;
use ertidy::core::logging::init_logging;
use ertidy::prelude::*;

/// ertidy - Repair machine-generated Mermaid.js ER diagrams
#[derive(Parser)]
#[command(name = "ertidy")]
#[command(about = "Strip comments and repair names in Mermaid.js ER diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off); overrides ERTIDY_LOG_LEVEL and RUST_LOG
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json); overrides ERTIDY_LOG_FORMAT
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize an ER diagram
    Normalize {
        /// Input file containing the diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the normalized diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Additional attribute key modifier (repeatable)
        #[arg(long = "key-modifier", value_name = "TOKEN")]
        key_modifiers: Vec<String>,
    },

    /// Show the lines normalization would change; fails if there are any
    Check {
        /// Input file to check (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// When to use colors in output
        #[arg(
            long,
            value_enum,
            default_value_t = ColorChoice::Auto
        )]
        color: ColorChoice,

        /// Additional attribute key modifier (repeatable)
        #[arg(long = "key-modifier", value_name = "TOKEN")]
        key_modifiers: Vec<String>,
    },

    /// Detect diagram type in input
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// JSON shape of a `check` run
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    clean: bool,
    lines_total: usize,
    changed_lines: &'a [usize],
    comments_stripped: usize,
    entity_names_repaired: usize,
    attribute_names_joined: usize,
    labels_camel_cased: usize,
}

impl<'a> From<&'a NormalizeReport> for CheckOutput<'a> {
    fn from(report: &'a NormalizeReport) -> Self {
        Self {
            clean: report.is_clean(),
            lines_total: report.lines_total,
            changed_lines: &report.changed_lines,
            comments_stripped: report.comments_stripped,
            entity_names_repaired: report.entity_names_repaired,
            attribute_names_joined: report.attribute_names_joined,
            labels_camel_cased: report.labels_camel_cased,
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct TidyApp {
    detector: ErDetector,
}

impl TidyApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Flags win; init_logging reads the environment for any flag left unset
        let log_level = cli.log_level.map(LogLevel::as_str);
        let log_format = cli.log_format.map(LogFormat::as_str);

        if let Err(e) = init_logging(log_level, log_format) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("ertidy v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Normalize {
                input,
                output,
                key_modifiers,
            } => self.normalize_command(input, output, &key_modifiers, cli.verbose),
            Commands::Check {
                input,
                json,
                color,
                key_modifiers,
            } => self.check_command(input, json, color, &key_modifiers, cli.verbose),
            Commands::Detect { input } => self.detect_command(input, cli.verbose),
        }
    }

    /// Build a normalizer that also accepts the given key modifiers
    pub fn build_normalizer(&self, key_modifiers: &[String]) -> Result<ErNormalizer> {
        let mut builder = Grammar::mermaid().to_builder();
        for modifier in key_modifiers {
            builder = builder.key_modifier(modifier.as_str());
        }
        let grammar = builder
            .build()
            .map_err(|e| anyhow!("Invalid --key-modifier: {}", e))?;
        Ok(ErNormalizer::with_grammar(grammar))
    }

    /// Handle the normalize command
    fn normalize_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        key_modifiers: &[String],
        verbose: bool,
    ) -> Result<()> {
        let normalizer = self.build_normalizer(key_modifiers)?;
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        if !content.trim().is_empty() && !self.detector.detect(&content) {
            warn!(
                confidence = self.detector.confidence(&content),
                "Input does not look like an ER diagram; unrecognized lines are passed through"
            );
        }

        let (normalized, report) = normalizer.normalize_with_report(&content);
        info!(%report, "Normalized diagram");

        if verbose {
            eprintln!("{}", report);
        }

        self.write_output(output, &normalized)
    }

    /// Handle the check command
    fn check_command(
        &self,
        input: Option<PathBuf>,
        json: bool,
        color: ColorChoice,
        key_modifiers: &[String],
        verbose: bool,
    ) -> Result<()> {
        let normalizer = self.build_normalizer(key_modifiers)?;
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let (normalized, report) = normalizer.normalize_with_report(&content);

        if json {
            let output = CheckOutput::from(&report);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            let colorize = self.should_colorize(color);
            print!(
                "{}",
                render_diff(&content, &normalized, &report.changed_lines, colorize)
            );
            println!("{}", report);
        }
        io::stdout().flush()?;

        if report.is_clean() {
            Ok(())
        } else {
            Err(anyhow!(
                "{} line(s) need normalization",
                report.lines_changed()
            ))
        }
    }

    /// Determine if we should colorize stdout based on the color choice
    fn should_colorize(&self, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                // Check NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                crossterm::tty::IsTty::is_tty(&std::io::stdout())
            }
        }
    }

    /// Handle the detect command
    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
            eprintln!("Confidence: {:.1}", self.detector.confidence(&content));
        }

        match ertidy::detect(&content) {
            Ok(diagram_type) => {
                println!("{}", diagram_type);
                Ok(())
            }
            Err(e) => {
                eprintln!("Could not detect diagram type: {}", e);
                Err(e.into())
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) => {
                if path.to_string_lossy() == "-" {
                    // Read from stdin
                    let mut content = String::new();
                    io::stdin().read_to_string(&mut content)?;
                    Ok(content)
                } else {
                    // Read from file
                    fs::read_to_string(&path).map_err(|e| {
                        anyhow!("Failed to read input file '{}': {}", path.display(), e)
                    })
                }
            }
            None => {
                // No input file specified, read from stdin
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout, byte for byte
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing_normalize_command() {
        let args = vec![
            "ertidy",
            "normalize",
            "--input",
            "schema.mmd",
            "--output",
            "clean.mmd",
            "--key-modifier",
            "IDX",
            "--key-modifier",
            "NN",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Normalize {
                input,
                output,
                key_modifiers,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "schema.mmd");
                assert_eq!(output.unwrap().to_string_lossy(), "clean.mmd");
                assert_eq!(key_modifiers, vec!["IDX", "NN"]);
            }
            _ => panic!("Expected Normalize command"),
        }
    }

    #[test]
    fn test_cli_parsing_check_command() {
        let args = vec!["ertidy", "check", "--json", "--color", "never"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Check {
                input,
                json,
                color,
                key_modifiers,
            } => {
                assert!(input.is_none());
                assert!(json);
                assert_eq!(color, ColorChoice::Never);
                assert!(key_modifiers.is_empty());
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parsing_check_defaults() {
        let cli = Cli::try_parse_from(vec!["ertidy", "check"]).unwrap();

        match cli.command {
            Commands::Check { json, color, .. } => {
                assert!(!json);
                assert_eq!(color, ColorChoice::Auto); // default
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parsing_detect_command() {
        let args = vec!["ertidy", "detect", "--input", "schema.mmd"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Detect { input } => {
                assert_eq!(input.unwrap().to_string_lossy(), "schema.mmd");
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_cli_parsing_logging_flags() {
        let args = vec![
            "ertidy",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "detect",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.log_format, Some(LogFormat::Json));

        let cli = Cli::try_parse_from(vec!["ertidy", "detect"]).unwrap();
        assert_eq!(cli.log_level, None);
        assert_eq!(cli.log_format, None);
    }

    #[test]
    fn test_verbose_flag() {
        let args = vec!["ertidy", "--verbose", "normalize"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(cli.verbose);
    }

    #[test]
    fn test_build_normalizer_with_key_modifier() {
        let app = TidyApp::new();
        let normalizer = app.build_normalizer(&["IDX".to_string()]).unwrap();
        assert_eq!(
            normalizer.normalize("A {\n  string last Name IDX\n}"),
            "A {\n  string lastName IDX\n}"
        );
    }

    #[test]
    fn test_build_normalizer_rejects_bad_modifier() {
        let app = TidyApp::new();
        assert!(app.build_normalizer(&["NOT NULL".to_string()]).is_err());
        assert!(app.build_normalizer(&[String::new()]).is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let app = TidyApp::new();
        let input = "erDiagram\n  A ||--o{ B : has\n";

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.mmd");
        fs::write(&file_path, input).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, input);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = TidyApp::new();
        let dir = tempdir().unwrap();
        let err = app
            .read_input(Some(dir.path().join("missing.mmd")))
            .unwrap_err();
        assert!(err.to_string().contains("missing.mmd"));
    }

    #[test]
    fn test_write_output_to_file() {
        let app = TidyApp::new();
        let output = "erDiagram\r\n  A_B {\r\n  }";

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("clean.mmd");

        app.write_output(Some(file_path.clone()), output).unwrap();

        let read_content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(read_content, output);
    }

    #[test]
    fn test_normalize_command_file_to_file() {
        let app = TidyApp::new();
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("schema.mmd");
        let output_path = dir.path().join("clean.mmd");
        fs::write(
            &input_path,
            "erDiagram\n  IT-OPERATION {\n    string upload Date // when\n  }\n",
        )
        .unwrap();

        app.normalize_command(Some(input_path), Some(output_path.clone()), &[], false)
            .unwrap();

        assert_eq!(
            fs::read_to_string(&output_path).unwrap(),
            "erDiagram\n  IT_OPERATION {\n    string uploadDate\n  }\n"
        );
    }

    #[test]
    fn test_check_command_clean_and_dirty() {
        let app = TidyApp::new();
        let dir = tempdir().unwrap();

        let clean = dir.path().join("clean.mmd");
        fs::write(&clean, "erDiagram\n  A ||--o{ B : has\n").unwrap();
        assert!(app
            .check_command(Some(clean), false, ColorChoice::Never, &[], false)
            .is_ok());

        let dirty = dir.path().join("dirty.mmd");
        fs::write(&dirty, "erDiagram\n  A ||--o{ B : has many\n").unwrap();
        let err = app
            .check_command(Some(dirty), true, ColorChoice::Never, &[], false)
            .unwrap_err();
        assert!(err.to_string().contains("1 line(s)"));
    }

    #[test]
    fn test_check_output_json_shape() {
        let (_, report) = ertidy::normalize_with_report("A-B ||--o{ C : has many // x");
        let value = serde_json::to_value(CheckOutput::from(&report)).unwrap();
        assert_eq!(value["clean"], false);
        assert_eq!(value["changed_lines"], serde_json::json!([1]));
        assert_eq!(value["entity_names_repaired"], 1);
        assert_eq!(value["labels_camel_cased"], 1);
        assert_eq!(value["comments_stripped"], 1);
    }

    #[test]
    fn test_detect_command() {
        let app = TidyApp::new();
        let dir = tempdir().unwrap();

        let er = dir.path().join("er.mmd");
        fs::write(&er, "erDiagram\n").unwrap();
        assert!(app.detect_command(Some(er), false).is_ok());

        let flowchart = dir.path().join("flow.mmd");
        fs::write(&flowchart, "graph TD; A-->B;").unwrap();
        assert!(app.detect_command(Some(flowchart), false).is_err());
    }

    #[test]
    fn test_should_colorize() {
        let app = TidyApp::new();
        assert!(app.should_colorize(ColorChoice::Always));
        assert!(!app.should_colorize(ColorChoice::Never));
    }
}
