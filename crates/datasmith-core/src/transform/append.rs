use rand::Rng;
use tracing::{debug, warn};

use crate::error::Result;
use crate::generate::sampling::pick;
use crate::generate::text::generate_text;
use crate::generate::value::Value;
use crate::rules::types::{AppendRule, AppendSource};
use crate::table::Table;

/// Apply append rules in declared order. Columns are added or edited, never
/// removed.
pub fn apply_append_rules(table: &mut Table, rules: &[AppendRule], rng: &mut impl Rng) -> Result<()> {
    for rule in rules {
        match rule {
            AppendRule::Overwrite {
                column,
                rename,
                find,
                replace,
            } => overwrite(table, *column, rename.as_deref(), find, replace)?,
            AppendRule::Generate {
                name,
                source,
                nullable,
            } => {
                let values = generate_values(source, *nullable, table.num_records(), rng);
                table.insert_column(name, values)?;
                debug!("Appended column '{}' (nullable {})", name, nullable);
            }
        }
    }
    Ok(())
}

fn overwrite(
    table: &mut Table,
    column: usize,
    rename: Option<&str>,
    find: &str,
    replace: &str,
) -> Result<()> {
    if column == 0 || column > table.column_count() {
        warn!(
            "Skipping overwrite: column {} is out of range (table has {} columns)",
            column,
            table.column_count()
        );
        return Ok(());
    }

    if let Some(new_name) = rename {
        table.rename_at(column, new_name)?;
    }

    let mut replaced = 0usize;
    if let Some(values) = table.column_at_mut(column) {
        for value in values.iter_mut().filter(|v| !v.is_null()) {
            if value.to_text() == find {
                *value = value.literal_like(replace);
                replaced += 1;
            }
        }
    }
    debug!(
        "Overwrite on column {}: {} values '{}' -> '{}'",
        column, replaced, find, replace
    );
    Ok(())
}

fn generate_values(
    source: &AppendSource,
    nullable: f64,
    num_records: usize,
    rng: &mut impl Rng,
) -> Vec<Value> {
    (0..num_records)
        .map(|_| {
            let value = match source {
                AppendSource::Random { options, weights } => {
                    Value::text(pick(options, weights.as_deref(), rng).as_str())
                }
                AppendSource::Text { method } => generate_text(*method, rng),
                AppendSource::Null => Value::Null,
            };
            if nullable > 0.0 && rng.random::<f64>() < nullable {
                Value::Null
            } else {
                value
            }
        })
        .collect()
}
