use std::path::PathBuf;

use clap::Parser;
use harvest_tools::config::{self, DEFAULT_ORDER_COLUMN, ListifyConfig};
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

    let decompositions = match &cli.rules {
        Some(path) => config::load_decompositions(path)?,
        None => config::default_decompositions(),
    };

    let config = ListifyConfig {
        input: cli.filename,
        output_dir: cli.output_dir,
        order_column: cli.order_column,
        decompositions,
    };

    let summary = pipeline::listify_orders(&config)?;
    println!(
        "\nSuccessfully read {} with {} rows.",
        config.input.display(),
        summary.rows_read
    );
    println!("Saved listified file to {}!\n", summary.output.display());
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Aggregate free-text order cells into per-item purchase totals."
)]
struct Cli {
    /// Orders export (.csv, .xlsx, .xls or .ods).
    filename: PathBuf,

    /// Directory the listified CSV is written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Substring identifying the order column header.
    #[arg(long, default_value = DEFAULT_ORDER_COLUMN)]
    order_column: String,

    /// JSON file replacing the built-in decomposition rules.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}
