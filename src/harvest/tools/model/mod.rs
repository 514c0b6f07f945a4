use std::fmt;

use serde::{Deserialize, Serialize};

/// A single spreadsheet value. Keeping the original kind lets the splitter
/// write numbers back as numbers instead of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank cell.
    Empty,
    /// Plain string value.
    Text(String),
    /// Numeric value. Spreadsheet integers are widened to `f64`.
    Number(f64),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Types one CSV column. The column becomes numeric or boolean only when
    /// every non-empty field renders back to exactly the same text, so no
    /// value is rewritten on output.
    pub fn from_column(fields: &[&str]) -> Vec<Cell> {
        let present = || fields.iter().filter(|field| !field.is_empty());

        let numbers: Option<Vec<f64>> = present()
            .map(|field| field.parse::<f64>().ok().filter(|value| value.is_finite()))
            .collect();
        let numeric = numbers.is_some_and(|values| {
            present()
                .zip(values)
                .all(|(field, value)| Cell::Number(value).to_string() == *field)
        });
        let boolean = present().all(|field| *field == "True" || *field == "False");
        let any_present = present().next().is_some();

        fields
            .iter()
            .map(|field| match *field {
                "" => Cell::Empty,
                field if any_present && numeric => match field.parse() {
                    Ok(value) => Cell::Number(value),
                    Err(_) => Cell::Text(field.to_string()),
                },
                field if any_present && boolean => Cell::Bool(field == "True"),
                field => Cell::Text(field.to_string()),
            })
            .collect()
    }

    /// Identity used when grouping rows: the cell kind plus its exact value.
    pub fn group_key(&self) -> (u8, String) {
        match self {
            Cell::Empty => (0, String::new()),
            Cell::Text(value) => (1, value.clone()),
            Cell::Number(value) => (2, format!("{value:?}")),
            Cell::Bool(value) => (3, value.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(value) => f.write_str(value),
            Cell::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Bool(value) => write!(f, "{}", if *value { "True" } else { "False" }),
        }
    }
}

/// A header row plus the data rows beneath it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Returns the index of the last column whose header contains `marker`.
    pub fn find_column_containing(&self, marker: &str) -> Option<usize> {
        self.columns
            .iter()
            .rposition(|column| column.contains(marker))
    }

    /// Returns the index of the column whose header equals `name` exactly.
    pub fn find_column_exact(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Iterates over one column, yielding [`Cell::Empty`] for short rows.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&Cell::Empty))
    }
}

/// Purchase unit inferred from an item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Gms,
    Pcs,
    Bunches,
    Kgs,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gms => "gms",
            Unit::Pcs => "pcs",
            Unit::Bunches => "bunches",
            Unit::Kgs => "kgs",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(item, quantity)` pair parsed out of an order cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub item: String,
    pub quantity: u64,
}

impl LineItem {
    pub fn new(item: impl Into<String>, quantity: u64) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// Per-item purchase summary. Field order matches the CSV output columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemAggregate {
    /// Item name exactly as it appeared in the orders.
    pub item: String,
    /// Packets ordered across all orders.
    pub num_units: u64,
    /// Base units in one packet.
    pub qty_per_packet: u64,
    /// `num_units * qty_per_packet`.
    pub total_qty: u64,
    pub unit: Unit,
}

impl ItemAggregate {
    /// Builds an aggregate, deriving `total_qty` from the other fields.
    pub fn new(item: impl Into<String>, num_units: u64, qty_per_packet: u64, unit: Unit) -> Self {
        Self {
            item: item.into(),
            num_units,
            qty_per_packet,
            total_qty: num_units.saturating_mul(qty_per_packet),
            unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_columns_are_typed_as_a_whole() {
        assert_eq!(
            Cell::from_column(&["42", "", "7"]),
            vec![Cell::Number(42.0), Cell::Empty, Cell::Number(7.0)]
        );
        assert_eq!(
            Cell::from_column(&["True", "False"]),
            vec![Cell::Bool(true), Cell::Bool(false)]
        );
        assert_eq!(
            Cell::from_column(&["42", "Spinach (details: 1)"]),
            vec![Cell::Text("42".into()), Cell::Text("Spinach (details: 1)".into())]
        );
        assert_eq!(Cell::from_column(&["", ""]), vec![Cell::Empty, Cell::Empty]);
    }

    #[test]
    fn csv_columns_keep_non_canonical_values_as_text() {
        let cells = Cell::from_column(&["007", "7", "7.0", "TRUE"]);
        let rendered: Vec<String> = cells.iter().map(Cell::to_string).collect();
        assert_eq!(rendered, vec!["007", "7", "7.0", "TRUE"]);
        assert!(cells.iter().all(|cell| matches!(cell, Cell::Text(_))));
    }

    #[test]
    fn group_key_separates_kinds() {
        assert_ne!(
            Cell::Text("7".into()).group_key(),
            Cell::Number(7.0).group_key()
        );
        assert_eq!(Cell::Number(7.0).group_key(), Cell::Number(7.0).group_key());
    }

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(Cell::Number(7.0).to_string(), "7");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn order_column_lookup_prefers_last_match() {
        let table = Table {
            columns: vec![
                "Your Order (old)".into(),
                "Customer Name ".into(),
                "Your Order".into(),
            ],
            rows: Vec::new(),
        };
        assert_eq!(table.find_column_containing("Your Order"), Some(2));
        assert_eq!(table.find_column_exact("Customer Name "), Some(1));
        assert_eq!(table.find_column_exact("Customer Name"), None);
    }

    #[test]
    fn aggregate_total_is_units_times_packet() {
        let aggregate = ItemAggregate::new("Tondli 300 gms", 2, 300, Unit::Gms);
        assert_eq!(aggregate.total_qty, 600);
    }
}
