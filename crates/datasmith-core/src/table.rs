//! # Table
//!
//! The in-memory result of a generation run: an insertion-ordered map from
//! column name to a column of values. Every column holds exactly
//! `num_records` values; the count is fixed when the table is created.
//! Positions in the public API are 1-based, matching how rules reference
//! columns.

use indexmap::IndexMap;

use crate::error::{DatasmithError, Result};
use crate::generate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Vec<Value>>,
    num_records: usize,
}

impl Table {
    pub fn new(num_records: usize) -> Self {
        Self {
            columns: IndexMap::new(),
            num_records,
        }
    }

    pub fn num_records(&self) -> usize {
        self.num_records
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Column at a 1-based position.
    pub fn column_at(&self, position: usize) -> Option<(&str, &[Value])> {
        position
            .checked_sub(1)
            .and_then(|idx| self.columns.get_index(idx))
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Mutable values of the column at a 1-based position.
    pub fn column_at_mut(&mut self, position: usize) -> Option<&mut Vec<Value>> {
        position
            .checked_sub(1)
            .and_then(|idx| self.columns.get_index_mut(idx))
            .map(|(_, values)| values)
    }

    /// Append a new column at the end.
    pub fn insert_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if self.columns.contains_key(name) {
            return Err(DatasmithError::DuplicateColumn {
                column: name.to_string(),
            });
        }
        self.check_length(name, &values)?;
        self.columns.insert(name.to_string(), values);
        Ok(())
    }

    /// Replace the values of an existing column, keeping its position.
    pub fn replace_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        self.check_length(name, &values)?;
        match self.columns.get_mut(name) {
            Some(slot) => {
                *slot = values;
                Ok(())
            }
            None => Err(DatasmithError::Other(format!(
                "Cannot replace missing column '{}'",
                name
            ))),
        }
    }

    /// Rename the column at a 1-based position, keeping its place.
    ///
    /// Returns `Ok(false)` when the position is out of range.
    pub fn rename_at(&mut self, position: usize, new_name: &str) -> Result<bool> {
        let Some(idx) = position.checked_sub(1).filter(|i| *i < self.columns.len()) else {
            return Ok(false);
        };
        if let Some(existing) = self.columns.get_index_of(new_name) {
            if existing == idx {
                return Ok(true);
            }
            return Err(DatasmithError::DuplicateColumn {
                column: new_name.to_string(),
            });
        }
        self.columns = std::mem::take(&mut self.columns)
            .into_iter()
            .enumerate()
            .map(|(i, (name, values))| {
                if i == idx {
                    (new_name.to_string(), values)
                } else {
                    (name, values)
                }
            })
            .collect();
        Ok(true)
    }

    /// Values of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.num_records {
            return None;
        }
        Some(self.columns.values().map(|col| &col[index]).collect())
    }

    /// Row-oriented copy of the table, one ordered map per record.
    pub fn to_records(&self) -> Vec<IndexMap<String, Value>> {
        (0..self.num_records)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|(name, values)| (name.clone(), values[row].clone()))
                    .collect()
            })
            .collect()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<Value>> {
        self.columns.iter()
    }

    /// Take the table apart into an ordered `(name, values)` list.
    pub(crate) fn into_columns(self) -> Vec<(String, Vec<Value>)> {
        self.columns.into_iter().collect()
    }

    fn check_length(&self, name: &str, values: &[Value]) -> Result<()> {
        if values.len() != self.num_records {
            return Err(DatasmithError::ColumnLength {
                column: name.to_string(),
                expected: self.num_records,
                actual: values.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new(2);
        t.insert_column("id", vec![Value::Int(1), Value::Int(2)])
            .unwrap();
        t.insert_column("name", vec![Value::text("a"), Value::text("b")])
            .unwrap();
        t
    }

    #[test]
    fn test_positions_are_one_based() {
        let t = sample();
        assert_eq!(t.column_at(1).unwrap().0, "id");
        assert_eq!(t.column_at(2).unwrap().0, "name");
        assert!(t.column_at(0).is_none());
        assert!(t.column_at(3).is_none());
    }

    #[test]
    fn test_insert_rejects_wrong_length_and_duplicates() {
        let mut t = sample();
        let err = t.insert_column("x", vec![Value::Null]).unwrap_err();
        assert!(matches!(err, DatasmithError::ColumnLength { expected: 2, actual: 1, .. }));

        let err = t
            .insert_column("id", vec![Value::Null, Value::Null])
            .unwrap_err();
        assert!(matches!(err, DatasmithError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut t = sample();
        assert!(t.rename_at(1, "company_id").unwrap());
        assert_eq!(t.column_names(), vec!["company_id", "name"]);
        assert!(!t.rename_at(5, "nope").unwrap());
        assert!(t.rename_at(2, "company_id").is_err());
        assert!(t.rename_at(2, "name").unwrap());
    }

    #[test]
    fn test_records_preserve_column_order() {
        let t = sample();
        let records = t.to_records();
        assert_eq!(records.len(), 2);
        let keys: Vec<&String> = records[1].keys().collect();
        assert_eq!(keys, vec!["id", "name"]);
        assert_eq!(records[1]["name"], Value::text("b"));
        assert_eq!(t.row(0).unwrap(), vec![&Value::Int(1), &Value::text("a")]);
        assert!(t.row(2).is_none());
    }
}
