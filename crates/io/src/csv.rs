// Comparison table CSV export

use std::io::Write;

use crosscheck_engine::ComparisonTable;

/// Write the comparison table as CSV, headers first, `\n` terminated.
pub fn write_table_csv(table: &ComparisonTable, writer: impl Write) -> Result<(), String> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(&table.headers)
        .map_err(|e| format!("CSV write error: {e}"))?;
    for row in &table.rows {
        csv.write_record(row)
            .map_err(|e| format!("CSV write error: {e}"))?;
    }

    csv.flush().map_err(|e| format!("CSV flush error: {e}"))?;
    Ok(())
}
