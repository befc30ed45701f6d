//! # bom - Solar Mounting BOM Calculator
//!
//! Command-line front end for `bom_core`.
//!
//! ```bash
//! bom compute input.json             # BOM for a JSON input
//! bom compute input.json --format json --keep-zero
//! bom ground --type ezys --modules 36 --module-length 2250
//! bom formulas > FORMULAS.md         # formula reference
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bom_core::calculations::{calculate_with, BomReport, ResolveOptions};
use bom_core::formulas::generate_formulas_markdown;
use bom_core::input::{validate_roof_selection, BatteryType, CalculatorInput, GroundLayout};
use bom_core::{rules, CalcError};

#[derive(Parser, Debug)]
#[command(name = "bom", version, about = "Solar mounting bill-of-materials calculator")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the BOM for a JSON input file
    Compute {
        /// Path to a calculator input (JSON)
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Keep rows whose quantity is zero
        #[arg(long)]
        keep_zero: bool,
    },
    /// Lay out a ground structure and calculate its BOM
    Ground {
        #[arg(long = "type", value_enum, default_value_t = GroundType::Fence)]
        ground_type: GroundType,
        /// Number of modules (8-54)
        #[arg(long)]
        modules: u32,
        /// Module length in mm (1700-2400)
        #[arg(long, default_value_t = 1722.0)]
        module_length: f64,
        /// Module thickness in mm
        #[arg(long, default_value_t = 30.0)]
        module_thickness: f64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print the formula reference as markdown
    Formulas,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum GroundType {
    #[value(name = "ezys", alias = "fence")]
    Fence,
    #[value(name = "poline", alias = "pole")]
    Pole,
}

impl From<GroundType> for BatteryType {
    fn from(ground_type: GroundType) -> Self {
        match ground_type {
            GroundType::Fence => BatteryType::GroundFence,
            GroundType::Pole => BatteryType::GroundPole,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bom_core=warn,bom_cli=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        report_error(&e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CalcError> {
    rules::verify_tables()?;

    match args.command {
        Command::Compute { file, format, keep_zero } => {
            let json = fs::read_to_string(&file).map_err(|e| {
                CalcError::invalid_input("file", file.display().to_string(), e.to_string())
            })?;
            let input = CalculatorInput::from_json(&json)?;
            info!(file = %file.display(), battery_type = input.battery_type.code(), "loaded input");

            if !input.battery_type.is_ground() {
                let selection = validate_roof_selection(&input)?;
                if selection.needs_layout_tool {
                    info!("odd module count: holder and clamp rows read the layout overrides");
                }
            }

            let options = ResolveOptions {
                drop_zero_quantities: !keep_zero,
            };
            let report = calculate_with(&input, options)?;
            print_report(&report, format)
        }
        Command::Ground {
            ground_type,
            modules,
            module_length,
            module_thickness,
            format,
        } => {
            let layout = GroundLayout::new(ground_type.into(), modules, module_length, module_thickness)?;
            info!(
                rows = layout.rows_count,
                construction_length = layout.construction_length,
                "ground layout"
            );
            let report = calculate_with(&layout.to_input(), ResolveOptions::default())?;
            print_report(&report, format)
        }
        Command::Formulas => {
            print!("{}", generate_formulas_markdown());
            Ok(())
        }
    }
}

fn print_report(report: &BomReport, format: OutputFormat) -> Result<(), CalcError> {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Table => print_table(report),
    }
    Ok(())
}

fn print_table(report: &BomReport) {
    println!("═══════════════════════════════════════════════════════════════════════════");
    println!("  BOM: {}", report.battery_type.display_name());
    println!("═══════════════════════════════════════════════════════════════════════════");
    println!();
    println!("{:<24} {:<44} {:>8} {:>8}  {}", "Code", "Name", "Length", "Qty", "Note");
    println!("{}", "─".repeat(96));
    for row in &report.system {
        let length = row.length.map(|l| l.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<44} {:>8} {:>8}  {}",
            row.code, row.name, length, row.quantity, row.note
        );
    }

    if !report.furniture.is_empty() {
        println!();
        println!("Furniture:");
        println!("{}", "─".repeat(96));
        for row in &report.furniture {
            println!("{:<69} {:>8}  {}", row.name, row.quantity, row.note);
        }
    }

    println!();
    println!("═══════════════════════════════════════════════════════════════════════════");
    println!("  {} lines", report.line_count());
    println!("═══════════════════════════════════════════════════════════════════════════");
}

fn report_error(e: &CalcError) {
    error!(code = e.error_code(), "calculation failed");
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
