//! Turns free-text order cells into per-item purchase totals.
//!
//! An order cell looks like
//! `Tondli 300 gms (details: 2) Spinach 250 gms (details: 1) (total: 500)`:
//! every parenthesised group closes one line item, and the last group is the
//! order total which never contributes to the item list.

use std::collections::BTreeMap;

use regex::Regex;

use crate::harvest::tools::config::DecompositionRule;
use crate::harvest::tools::error::Result;
use crate::harvest::tools::model::{ItemAggregate, LineItem, Unit};

/// Unit markers checked in order; the first one found in the lower-cased item
/// name wins.
const UNIT_MARKERS: [(&str, Unit); 3] = [
    (" gm", Unit::Gms),
    (" pc", Unit::Pcs),
    (" bunch", Unit::Bunches),
];

/// Counts describing how much of the input could be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub orders: usize,
    pub segments: usize,
    pub line_items: usize,
    /// Segments with no `(`, hence no item name.
    pub skipped_segments: usize,
    /// Segments naming an item whose quantity did not match `: N)`.
    pub unmatched_quantities: usize,
}

impl ParseReport {
    pub fn has_skips(&self) -> bool {
        self.skipped_segments > 0 || self.unmatched_quantities > 0
    }
}

/// Result of parsing a single segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Item name and quantity were both found.
    Item(LineItem),
    /// An item name was found but no quantity matched.
    Unmatched(String),
    /// The segment carried no `(` at all.
    Skipped,
}

/// Holds the compiled patterns used to read order cells.
#[derive(Debug)]
pub struct OrderParser {
    quantity: Regex,
    digits: Regex,
}

impl OrderParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            quantity: Regex::new(r": ?([0-9]+)\)")?,
            digits: Regex::new(r"[0-9]+")?,
        })
    }

    /// Splits an order cell into its item segments. Embedded line breaks are
    /// removed, trailing blank pieces are ignored, and the final piece (the
    /// order total) is dropped.
    pub fn segments(&self, order: &str) -> Vec<String> {
        let mut parts: Vec<String> = order
            .split(')')
            .map(|part| part.chars().filter(|ch| *ch != '\n' && *ch != '\r').collect())
            .collect();
        while parts.last().is_some_and(|part| part.trim().is_empty()) {
            parts.pop();
        }
        parts.pop();
        parts
    }

    /// Reads one segment produced by [`OrderParser::segments`].
    pub fn parse_segment(&self, segment: &str) -> Segment {
        let closed = format!("{segment})");
        let mut parts = closed.split('(');
        let (Some(name), Some(details)) = (parts.next(), parts.next()) else {
            return Segment::Skipped;
        };

        let item = name.trim().to_string();
        match self.extract_quantity(details) {
            Some(quantity) => Segment::Item(LineItem { item, quantity }),
            None => Segment::Unmatched(item),
        }
    }

    /// Returns the first `: N)` quantity in `text`.
    pub fn extract_quantity(&self, text: &str) -> Option<u64> {
        self.quantity
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse().ok())
    }

    /// Returns the last number embedded in an item name, or 1. A number too
    /// large for `u64` saturates.
    pub fn extract_packet_size(&self, item: &str) -> u64 {
        self.digits
            .find_iter(item)
            .last()
            .map(|digits| digits.as_str().parse().unwrap_or(u64::MAX))
            .unwrap_or(1)
    }

    /// Parses one order cell into its line items. Item names without a
    /// quantity are returned separately so they still appear in the totals.
    pub fn parse_order(&self, order: &str, report: &mut ParseReport) -> (Vec<LineItem>, Vec<String>) {
        let mut items = Vec::new();
        let mut unmatched = Vec::new();

        report.orders += 1;
        for segment in self.segments(order) {
            report.segments += 1;
            match self.parse_segment(&segment) {
                Segment::Item(item) => {
                    report.line_items += 1;
                    items.push(item);
                }
                Segment::Unmatched(name) => {
                    report.unmatched_quantities += 1;
                    unmatched.push(name);
                }
                Segment::Skipped => report.skipped_segments += 1,
            }
        }

        (items, unmatched)
    }
}

/// Infers the purchase unit from an item name.
pub fn infer_unit(item: &str) -> Unit {
    let lowered = item.to_lowercase();
    UNIT_MARKERS
        .iter()
        .find(|(marker, _)| lowered.contains(marker))
        .map(|(_, unit)| *unit)
        .unwrap_or(Unit::Kgs)
}

/// Sums quantities per distinct item name across all orders. Every item
/// seen in any order is present, at zero if none of its quantities matched.
pub fn aggregate<'a, I>(parser: &OrderParser, orders: I) -> (BTreeMap<String, u64>, ParseReport)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    let mut report = ParseReport::default();

    for order in orders {
        let (items, unmatched) = parser.parse_order(order, &mut report);
        for name in unmatched {
            totals.entry(name).or_insert(0);
        }
        for LineItem { item, quantity } in items {
            let total = totals.entry(item).or_insert(0);
            *total = total.saturating_add(quantity);
        }
    }

    (totals, report)
}

/// Builds output rows from per-item totals and applies the decomposition
/// table. Untouched items come first in name order, followed by the
/// expansion rows in rule order.
pub fn derive_aggregates(
    parser: &OrderParser,
    totals: &BTreeMap<String, u64>,
    rules: &[DecompositionRule],
) -> Vec<ItemAggregate> {
    let mut rows = Vec::with_capacity(totals.len());
    let mut expanded = Vec::new();

    for (item, num_units) in totals {
        match rules.iter().position(|rule| &rule.item == item) {
            Some(rule_idx) => expanded.push((rule_idx, *num_units)),
            None => rows.push(ItemAggregate::new(
                item.clone(),
                *num_units,
                parser.extract_packet_size(item),
                infer_unit(item),
            )),
        }
    }

    expanded.sort_by_key(|(rule_idx, _)| *rule_idx);

    for (rule_idx, num_units) in expanded {
        for expansion in &rules[rule_idx].expansions {
            rows.push(ItemAggregate::new(
                expansion.name.clone(),
                num_units.saturating_mul(expansion.multiplier),
                1,
                expansion.unit,
            ));
        }
    }

    rows
}
