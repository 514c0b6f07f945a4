use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use crate::harvest::tools::config::{ListifyConfig, SplitConfig};
use crate::harvest::tools::error::{Result, ToolError};
use crate::harvest::tools::io::{csv_write, excel_write, table_read};
use crate::harvest::tools::listify::{self, OrderParser, ParseReport};
use crate::harvest::tools::model::Cell;
use crate::harvest::tools::split;

/// What a completed aggregator run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListifySummary {
    pub output: PathBuf,
    pub rows_read: usize,
    pub items_written: usize,
    pub report: ParseReport,
}

/// What a completed splitter run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub output: PathBuf,
    pub rows_read: usize,
    pub sheets_written: usize,
}

/// Aggregates the order column of `config.input` into per-item totals and
/// writes them to `listified-<stem>.csv`. Nothing is written unless the
/// input loads and the order column is found.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %config.input.display())
)]
pub fn listify_orders(config: &ListifyConfig) -> Result<ListifySummary> {
    let table = table_read::read_table(&config.input)?;
    info!(rows = table.rows.len(), "read order table");

    let order_idx = table
        .find_column_containing(&config.order_column)
        .ok_or_else(|| ToolError::MissingColumn {
            marker: config.order_column.clone(),
            available: table.columns.clone(),
        })?;
    debug!(column = %table.columns[order_idx], "using order column");

    let orders: Vec<String> = table
        .column_cells(order_idx)
        .filter(|cell| !cell.is_empty())
        .map(Cell::to_string)
        .collect();

    let parser = OrderParser::new()?;
    let (totals, report) = listify::aggregate(&parser, orders.iter().map(String::as_str));
    if report.has_skips() {
        warn!(
            skipped_segments = report.skipped_segments,
            unmatched_quantities = report.unmatched_quantities,
            "some order segments were not counted"
        );
    }
    info!(
        orders = report.orders,
        line_items = report.line_items,
        distinct_items = totals.len(),
        "aggregated orders"
    );

    let aggregates = listify::derive_aggregates(&parser, &totals, &config.decompositions);
    let output = config.output_path();
    csv_write::write_aggregates(&output, &aggregates)?;
    info!(output = %output.display(), items = aggregates.len(), "saved listified file");

    Ok(ListifySummary {
        output,
        rows_read: table.rows.len(),
        items_written: aggregates.len(),
        report,
    })
}

/// Splits `config.input` into one worksheet per customer and writes them to
/// `splitted-<stem>.xlsx`.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %config.input.display())
)]
pub fn split_customers(config: &SplitConfig) -> Result<SplitSummary> {
    let table = table_read::read_table(&config.input)?;
    info!(rows = table.rows.len(), "read customer table");

    let workbook = split::split_by_customer(&table, &config.customer_column)?;
    debug!(sheet_count = workbook.tables.len(), "workbook constructed");

    let output = config.output_path();
    excel_write::write_workbook(&output, &workbook)?;
    info!(output = %output.display(), "saved splitted file");

    Ok(SplitSummary {
        output,
        rows_read: table.rows.len(),
        sheets_written: workbook.tables.len(),
    })
}
