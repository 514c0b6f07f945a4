use std::path::Path;

use crate::harvest::tools::error::Result;
use crate::harvest::tools::model::ItemAggregate;

/// Writes aggregates as `item,num_units,qty_per_packet,total_qty,unit`.
pub fn write_aggregates(path: &Path, aggregates: &[ItemAggregate]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if aggregates.is_empty() {
        writer.write_record(["item", "num_units", "qty_per_packet", "total_qty", "unit"])?;
    }
    for aggregate in aggregates {
        writer.serialize(aggregate)?;
    }
    writer.flush()?;
    Ok(())
}
