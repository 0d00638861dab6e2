use std::io::Write;

use crate::error::{DatasmithError, Result};
use crate::table::Table;

/// Write a table as CSV: one header line, then one line per record.
/// Null values become empty fields.
pub fn write_csv<W: Write>(writer: &mut W, table: &Table) -> Result<()> {
    let header = table
        .column_names()
        .iter()
        .map(|c| csv_escape(c))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{}", header).map_err(|e| DatasmithError::Output {
        message: "writing CSV header".to_string(),
        source: e,
    })?;

    for row_idx in 0..table.num_records() {
        let values: Vec<String> = table
            .iter()
            .map(|(_, values)| csv_escape(&values[row_idx].to_csv_string()))
            .collect();

        writeln!(writer, "{}", values.join(",")).map_err(|e| DatasmithError::Output {
            message: format!("writing CSV row {}", row_idx + 1),
            source: e,
        })?;
    }

    Ok(())
}

/// Escape a string for CSV: quote if it contains comma, quote, or newline.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
