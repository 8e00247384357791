// crosscheck CLI - truth-vs-extract comparison workbooks

mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crosscheck_engine::{reconcile, CompareResult, FieldMapping};
use exit_codes::{EXIT_INVALID_MAPPING, EXIT_MISMATCH, EXIT_RUNTIME, EXIT_UNMATCHED};

#[derive(Parser)]
#[command(name = "xcheck")]
#[command(about = "Compare a pipeline extract against truth metadata, field by field")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a comparison workbook from a truth JSON and an extract CSV
    #[command(after_help = "\
Examples:
  xcheck run --truth metadata.json --extract export.csv
  xcheck run --truth metadata.json --extract export.csv -o comparison.xlsx
  xcheck run --truth metadata.json --extract export.csv --csv -o comparison.csv
  xcheck run --truth metadata.json --extract export.csv --mapping fields.toml --json")]
    Run {
        /// Truth file: metadata JSON ({"testData": [...]} or a bare array)
        #[arg(long)]
        truth: PathBuf,

        /// Extract file: export CSV, all cells read as text
        #[arg(long)]
        extract: PathBuf,

        /// Output file (defaults to truth_extract_comparison.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Field mapping TOML (defaults to the built-in credentialing mapping)
        #[arg(long)]
        mapping: Option<PathBuf>,

        /// Write the output table as CSV instead of XLSX
        #[arg(long)]
        csv: bool,

        /// Print the full result as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate a mapping config without running
    #[command(after_help = "\
Examples:
  xcheck validate fields.toml")]
    Validate {
        /// Path to the mapping TOML
        mapping: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            truth,
            extract,
            output,
            mapping,
            csv,
            json,
        } => cmd_run(truth, extract, output, mapping, csv, json),
        Commands::Validate { mapping } => cmd_validate(mapping),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn runtime(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_RUNTIME,
            message: msg.into(),
            hint: None,
        }
    }

    fn mapping(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_INVALID_MAPPING,
            message: msg.into(),
            hint: None,
        }
    }
}

fn load_mapping(path: Option<PathBuf>) -> Result<FieldMapping, CliError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| CliError::runtime(format!("cannot read {}: {e}", path.display())))?;
            FieldMapping::from_toml(&raw).map_err(|e| CliError::mapping(e.to_string()))
        }
        None => Ok(FieldMapping::credentialing()),
    }
}

fn cmd_run(
    truth_path: PathBuf,
    extract_path: PathBuf,
    output: Option<PathBuf>,
    mapping_path: Option<PathBuf>,
    csv_output: bool,
    json_output: bool,
) -> Result<(), CliError> {
    let mapping = load_mapping(mapping_path)?;
    let truth = crosscheck_io::truth::read_truth_file(&truth_path).map_err(CliError::runtime)?;
    let rows =
        crosscheck_io::extract::read_extract_file(&extract_path).map_err(CliError::runtime)?;

    let result = reconcile(&rows, &truth, &mapping);

    let output_path = output.unwrap_or_else(|| {
        PathBuf::from(if csv_output {
            "truth_extract_comparison.csv"
        } else {
            "truth_extract_comparison.xlsx"
        })
    });

    if csv_output {
        let file = std::fs::File::create(&output_path).map_err(|e| {
            CliError::runtime(format!("cannot create {}: {e}", output_path.display()))
        })?;
        crosscheck_io::csv::write_table_csv(&result.table, std::io::BufWriter::new(file))
            .map_err(CliError::runtime)?;
    } else {
        crosscheck_io::xlsx::export(&result.table, &output_path).map_err(CliError::runtime)?;
    }
    eprintln!("wrote {}", output_path.display());

    if json_output {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    print_summary(&result);

    let s = &result.summary;
    if s.field_mismatches > 0 {
        return Err(CliError {
            code: EXIT_MISMATCH,
            message: format!("{} field mismatch(es) found", s.field_mismatches),
            hint: None,
        });
    }
    if s.unmatched_rows > 0 {
        return Err(CliError {
            code: EXIT_UNMATCHED,
            message: format!("{} extract row(s) without a truth record", s.unmatched_rows),
            hint: Some("unmatched rows keep their extract values; truth columns stay blank".into()),
        });
    }

    Ok(())
}

fn print_summary(result: &CompareResult) {
    let s = &result.summary;
    eprintln!(
        "compared {} row(s): {} matched ({} exact, {} canonical, {} by provider), {} unmatched",
        s.rows,
        s.matched_rows,
        s.matched_by_exact_name,
        s.matched_by_canonical_name,
        s.matched_by_provider_name,
        s.unmatched_rows,
    );
    eprintln!(
        "fields: {} compared — {} match, {} mismatch, {} no opinion",
        s.fields_compared, s.field_matches, s.field_mismatches, s.field_no_opinion,
    );
    if result.index.key_collisions > 0 {
        eprintln!(
            "note: {} identity key collision(s); later truth records overwrote earlier ones",
            result.index.key_collisions,
        );
    }
}

fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| CliError::runtime(format!("cannot read {}: {e}", path.display())))?;

    match FieldMapping::from_toml(&raw) {
        Ok(mapping) => {
            eprintln!(
                "valid: mapping '{}' with {} field(s)",
                mapping.name,
                mapping.fields.len(),
            );
            Ok(())
        }
        Err(e) => Err(CliError::mapping(e.to_string())),
    }
}
