use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};

use crate::harvest::tools::error::{Result, ToolError};
use crate::harvest::tools::model::{Cell, Table};

/// Reads a table from `path`. Files whose extension mentions `csv` go through
/// the CSV reader; everything else is opened as a spreadsheet and the first
/// worksheet is used. The first row is always the header.
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }

    if is_csv(path) {
        read_csv(path)
    } else {
        read_spreadsheet(path)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase().contains("csv"))
        .unwrap_or(false)
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let columns = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }

    let width = records
        .iter()
        .map(|record| record.len())
        .max()
        .unwrap_or(0)
        .max(columns.len());
    let mut rows: Vec<Vec<Cell>> = vec![Vec::with_capacity(width); records.len()];
    for col_idx in 0..width {
        let fields: Vec<&str> = records
            .iter()
            .map(|record| record.get(col_idx).unwrap_or(""))
            .collect();
        for (row, cell) in rows.iter_mut().zip(Cell::from_column(&fields)) {
            row.push(cell);
        }
    }

    Ok(Table { columns, rows })
}

fn read_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ToolError::EmptyWorkbook(path.to_path_buf()))??;

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => header.iter().map(|cell| cell_to_string(Some(cell))).collect(),
        None => Vec::new(),
    };

    let rows = rows
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    Ok(Table { columns, rows })
}

fn to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::String(value) if value.is_empty() => Cell::Empty,
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Bool(*value),
        other => Cell::Text(other.to_string()),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::Empty) | None => String::new(),
        Some(other) => to_cell(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn csv_input_keeps_header_and_rows() {
        let dir = tempdir().expect("temporary directory");
        let path = dir.path().join("orders.csv");
        fs::write(
            &path,
            "Customer Name ,Your Order\nAsha,\"Spinach 250 gms (details: 1) (total: 40)\"\nRavi,\n",
        )
        .expect("csv written");

        let table = read_table(&path).expect("table read");
        assert_eq!(table.columns, vec!["Customer Name ", "Your Order"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][1], Cell::Empty);
    }

    #[test]
    fn csv_customer_values_are_read_verbatim() {
        let dir = tempdir().expect("temporary directory");
        let path = dir.path().join("orders.csv");
        fs::write(&path, "Customer Name ,Amount\n007,10\n7,20\n7.0,30\nTRUE,40\n")
            .expect("csv written");

        let table = read_table(&path).expect("table read");
        let customers: Vec<&Cell> = table.column_cells(0).collect();
        assert_eq!(
            customers,
            vec![
                &Cell::Text("007".into()),
                &Cell::Text("7".into()),
                &Cell::Text("7.0".into()),
                &Cell::Text("TRUE".into()),
            ]
        );
        assert_eq!(table.rows[1][1], Cell::Number(20.0));
    }

    #[test]
    fn missing_file_is_reported_before_reading() {
        let dir = tempdir().expect("temporary directory");
        let err = read_table(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, ToolError::MissingInput(_)));
    }

    #[test]
    fn extension_detection_is_case_insensitive() {
        assert!(is_csv(Path::new("orders.CSV")));
        assert!(!is_csv(Path::new("orders.xlsx")));
        assert!(!is_csv(Path::new("orders")));
    }
}
