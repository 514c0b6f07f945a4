use std::collections::{HashMap, HashSet};

use crate::harvest::tools::error::{Result, ToolError};
use crate::harvest::tools::model::{Cell, Table};

/// Longest sheet name Excel accepts.
const MAX_SHEET_NAME: usize = 31;

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Represents all tables required to materialise the Excel workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    pub tables: Vec<SheetTable>,
}

/// Groups the rows of `table` by the exact value of `customer_column`, one
/// sheet per customer in order of first appearance. Each sheet starts with
/// an unnamed column holding the row's original 0-based index.
pub fn split_by_customer(table: &Table, customer_column: &str) -> Result<WorkbookData> {
    let column_idx =
        table
            .find_column_exact(customer_column)
            .ok_or_else(|| ToolError::MissingColumn {
                marker: customer_column.to_string(),
                available: table.columns.clone(),
            })?;

    let mut groups: Vec<(String, Vec<Vec<Cell>>)> = Vec::new();
    let mut group_index: HashMap<(u8, String), usize> = HashMap::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        let customer = row.get(column_idx).unwrap_or(&Cell::Empty);

        let mut indexed = Vec::with_capacity(row.len() + 1);
        indexed.push(Cell::Number(row_idx as f64));
        indexed.extend(row.iter().cloned());

        let group_idx = *group_index.entry(customer.group_key()).or_insert_with(|| {
            groups.push((customer.to_string(), Vec::new()));
            groups.len() - 1
        });
        groups[group_idx].1.push(indexed);
    }

    let mut columns = Vec::with_capacity(table.columns.len() + 1);
    columns.push(String::new());
    columns.extend(table.columns.iter().cloned());

    let mut sheet_names = SheetNameRegistry::default();
    let tables = groups
        .into_iter()
        .map(|(customer, rows)| SheetTable {
            sheet_name: sheet_names.assign(&customer),
            columns: columns.clone(),
            rows,
        })
        .collect();

    Ok(WorkbookData { tables })
}

#[derive(Debug, Default)]
struct SheetNameRegistry {
    used: HashSet<String>,
}

impl SheetNameRegistry {
    fn assign(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        if self.used.insert(base.to_lowercase()) {
            return base;
        }

        let mut counter = 1;
        loop {
            let suffix = format!("_{counter}");
            let prefix: String = base
                .chars()
                .take(MAX_SHEET_NAME - suffix.chars().count())
                .collect();
            let candidate = format!("{prefix}{suffix}");
            if self.used.insert(candidate.to_lowercase()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']', '\'', '"'];
    let sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    let sanitized: String = sanitized.trim().chars().take(MAX_SHEET_NAME).collect();
    if sanitized.is_empty() {
        "Sheet".to_string()
    } else {
        sanitized
    }
}
