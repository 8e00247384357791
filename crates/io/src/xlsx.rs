// Comparison workbook export (xlsx only)
//
// Presentation snapshot for review in a spreadsheet. Not a round-trip
// format; the CSV export is the scriptable path.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crosscheck_engine::ComparisonTable;

const SHEET_NAME: &str = "Comparison";

/// Column-width heuristic bounds, in Excel character units.
const MIN_COL_WIDTH: f64 = 6.0;
const MAX_COL_WIDTH: f64 = 40.0;

/// Export the comparison table as an XLSX workbook: one `Comparison`
/// sheet, bold frozen header row, columns sized to their longest cell.
pub fn export(table: &ComparisonTable, path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(|e| format!("cannot create sheet '{SHEET_NAME}': {e}"))?;

    let header_format = Format::new().set_bold();
    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| format!("cannot write header '{header}': {e}"))?;
    }

    for (r, cells) in table.rows.iter().enumerate() {
        for (c, cell) in cells.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            worksheet
                .write_string((r + 1) as u32, c as u16, cell)
                .map_err(|e| format!("cannot write cell ({r},{c}): {e}"))?;
        }
    }

    for (c, header) in table.headers.iter().enumerate() {
        let longest = table
            .rows
            .iter()
            .map(|row| row.get(c).map(String::len).unwrap_or(0))
            .max()
            .unwrap_or(0)
            .max(header.len());
        let width = (longest as f64 + 2.0).clamp(MIN_COL_WIDTH, MAX_COL_WIDTH);
        worksheet
            .set_column_width(c as u16, width)
            .map_err(|e| format!("cannot size column {c}: {e}"))?;
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("cannot freeze header row: {e}"))?;

    workbook
        .save(path)
        .map_err(|e| format!("cannot save {}: {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_a_workbook() {
        let table = ComparisonTable {
            headers: vec![
                "File Name".into(),
                "Truth: State".into(),
                "Extract: State".into(),
                "State Match?".into(),
                "  ".into(),
            ],
            rows: vec![vec![
                "doc.pdf".into(),
                "TX".into(),
                "TX".into(),
                "True".into(),
                String::new(),
            ]],
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("comparison.xlsx");
        export(&table, &path).unwrap();

        let written = std::fs::metadata(&path).unwrap();
        assert!(written.len() > 0);
    }

    #[test]
    fn empty_table_still_produces_a_workbook() {
        let table = ComparisonTable {
            headers: vec!["File Name".into()],
            rows: vec![],
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        export(&table, &path).unwrap();
        assert!(path.exists());
    }
}
