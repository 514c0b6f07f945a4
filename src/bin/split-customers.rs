use std::path::PathBuf;

use clap::Parser;
use harvest_tools::config::{DEFAULT_CUSTOMER_COLUMN, SplitConfig};
use harvest_tools::{Result, logging, pipeline};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose)?;

    let config = SplitConfig {
        input: cli.filename,
        output_dir: cli.output_dir,
        customer_column: cli.customer_column,
    };

    let summary = pipeline::split_customers(&config)?;
    println!(
        "\nRead {} with {} rows!",
        config.input.display(),
        summary.rows_read
    );
    println!(
        "Saved splitted file to {} ({} sheets)!\n",
        summary.output.display(),
        summary.sheets_written
    );
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Split an orders spreadsheet into one sheet per customer."
)]
struct Cli {
    /// Orders export (.xlsx, .xls, .ods or .csv).
    filename: PathBuf,

    /// Directory the split workbook is written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Exact header of the customer column.
    #[arg(long, default_value = DEFAULT_CUSTOMER_COLUMN)]
    customer_column: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}
