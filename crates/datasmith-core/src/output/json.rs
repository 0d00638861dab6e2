use std::io::Write;

use crate::error::{DatasmithError, Result};
use crate::generate::value::Value;
use crate::table::Table;

/// Write a table as a JSON array of records using streaming serialization.
///
/// Writes row-by-row instead of building the whole JSON tree first. Keys
/// keep the table's column order.
pub fn write_json<W: Write>(writer: &mut W, table: &Table) -> Result<()> {
    let keys = table
        .column_names()
        .iter()
        .map(|name| json_key(name))
        .collect::<Result<Vec<_>>>()?;
    let rows = table.num_records();

    write_str(writer, "[\n")?;

    for row_idx in 0..rows {
        write_str(writer, "  {")?;

        for (col_idx, (key, (_, values))) in keys.iter().zip(table.iter()).enumerate() {
            let val_str = json_value(&values[row_idx])?;
            write_str(writer, &format!("\n    {}: {}", key, val_str))?;
            if col_idx < keys.len() - 1 {
                write_str(writer, ",")?;
            }
        }

        write_str(writer, "\n  }")?;
        if row_idx < rows - 1 {
            write_str(writer, ",")?;
        }
        write_str(writer, "\n")?;
    }

    write_str(writer, "]\n")?;

    Ok(())
}

/// Helper to write a string slice and map IO errors.
fn write_str<W: Write>(writer: &mut W, s: &str) -> Result<()> {
    writer
        .write_all(s.as_bytes())
        .map_err(|e| DatasmithError::Output {
            message: "writing JSON".to_string(),
            source: e,
        })
}

/// Serialize a string as an RFC 8259-compliant JSON key.
fn json_key(s: &str) -> Result<String> {
    serde_json::to_string(s).map_err(|e| DatasmithError::Other(format!("JSON key error: {}", e)))
}

/// Serialize a Value as a JSON value string.
///
/// Non-finite floats have no JSON form and are written as `null`.
fn json_value(value: &Value) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| DatasmithError::Other(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> Table {
        let mut table = Table::new(2);
        table
            .insert_column("name", vec![Value::text("Alice"), Value::text("Bob \"B\"")])
            .unwrap();
        table
            .insert_column("qty", vec![Value::Int(3), Value::Null])
            .unwrap();
        table
            .insert_column("price", vec![Value::Float(94.5), Value::Float(0.0)])
            .unwrap();
        table
    }

    #[test]
    fn test_write_json_parses_back() {
        let mut buf = Vec::new();
        write_json(&mut buf, &make_table()).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Alice");
        assert_eq!(rows[0]["qty"], 3);
        assert_eq!(rows[0]["price"], 94.5);
        assert!(rows[1]["qty"].is_null());
        assert_eq!(rows[1]["name"], "Bob \"B\"");
    }

    #[test]
    fn test_write_json_keeps_column_order() {
        let mut buf = Vec::new();
        write_json(&mut buf, &make_table()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let name = text.find("\"name\"").unwrap();
        let qty = text.find("\"qty\"").unwrap();
        let price = text.find("\"price\"").unwrap();
        assert!(name < qty && qty < price);
    }

    #[test]
    fn test_write_json_empty_table() {
        let mut table = Table::new(0);
        table.insert_column("a", Vec::new()).unwrap();
        let mut buf = Vec::new();
        write_json(&mut buf, &table).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(parsed.as_array().unwrap().is_empty());
    }
}
