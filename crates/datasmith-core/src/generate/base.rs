use rand::Rng;

use crate::generate::sampling::pick;
use crate::generate::text::generate_text;
use crate::generate::value::Value;
use crate::rules::types::{ColumnRule, Source};

/// Produce the raw (uncoerced) values of one column in the base pass.
///
/// Independent kinds are filled in here; dependent kinds get a column of
/// `Null` placeholders that the resolver overwrites later.
pub fn generate_column(rule: &ColumnRule, num_records: usize, rng: &mut impl Rng) -> Vec<Value> {
    match &rule.source {
        Source::RowIndex => (0..num_records)
            .map(|i| Value::Int(i64::try_from(i).map_or(i64::MAX, |i| i.saturating_add(1))))
            .collect(),
        Source::Random { options, weights } => (0..num_records)
            .map(|_| Value::text(pick(options, weights.as_deref(), rng).as_str()))
            .collect(),
        Source::Text { method } => (0..num_records)
            .map(|_| generate_text(*method, rng))
            .collect(),
        Source::Increment { start, step } => (0..num_records)
            .map(|i| {
                let i = i64::try_from(i).unwrap_or(i64::MAX);
                Value::Int(start.saturating_add(i.saturating_mul(*step)))
            })
            .collect(),
        _ => vec![Value::Null; num_records],
    }
}
