use tracing::{debug, warn};

use crate::error::Result;
use crate::rules::types::ReorderSpec;
use crate::table::Table;

/// Permute the table's columns into `spec.order`.
///
/// The order must name every column exactly once (1-based). Anything else
/// leaves the table unchanged and logs a warning.
pub fn reorder_columns(table: Table, spec: &ReorderSpec) -> Result<Table> {
    if let Err(reason) = check_permutation(&spec.order, table.column_count()) {
        warn!("Ignoring column reorder {:?}: {}", spec.order, reason);
        return Ok(table);
    }

    let num_records = table.num_records();
    let mut slots: Vec<Option<(String, Vec<_>)>> =
        table.into_columns().into_iter().map(Some).collect();

    let mut reordered = Table::new(num_records);
    for position in &spec.order {
        if let Some((name, values)) = slots[position - 1].take() {
            reordered.insert_column(&name, values)?;
        }
    }
    debug!("Reordered columns: {:?}", reordered.column_names());
    Ok(reordered)
}

fn check_permutation(order: &[usize], column_count: usize) -> std::result::Result<(), String> {
    if order.len() != column_count {
        return Err(format!(
            "expected {} positions, got {}",
            column_count,
            order.len()
        ));
    }
    let mut seen = vec![false; column_count];
    for &position in order {
        if position == 0 || position > column_count {
            return Err(format!("position {} is out of range", position));
        }
        if std::mem::replace(&mut seen[position - 1], true) {
            return Err(format!("position {} appears more than once", position));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::value::Value;

    fn table() -> Table {
        let mut t = Table::new(1);
        for (name, v) in [("a", 1), ("b", 2), ("c", 3)] {
            t.insert_column(name, vec![Value::Int(v)]).unwrap();
        }
        t
    }

    #[test]
    fn test_identity_is_a_no_op() {
        let t = table();
        let once = reorder_columns(t.clone(), &ReorderSpec::identity(3)).unwrap();
        assert_eq!(once, t);
        let twice = reorder_columns(once, &ReorderSpec::identity(3)).unwrap();
        assert_eq!(twice, t);
    }

    #[test]
    fn test_valid_permutation() {
        let t = reorder_columns(table(), &ReorderSpec::new(vec![3, 1, 2])).unwrap();
        assert_eq!(t.column_names(), vec!["c", "a", "b"]);
        assert_eq!(t.column("c").unwrap(), &[Value::Int(3)]);
    }

    #[test]
    fn test_invalid_orders_leave_table_unchanged() {
        for order in [vec![1, 2], vec![1, 2, 3, 4], vec![1, 1, 2], vec![0, 1, 2], vec![1, 2, 9]] {
            let t = reorder_columns(table(), &ReorderSpec::new(order.clone())).unwrap();
            assert_eq!(t.column_names(), vec!["a", "b", "c"], "order {:?}", order);
        }
    }
}
