//! # Dependency Resolver
//!
//! Computes dependent columns from columns already present in the table.
//! References are 1-based positions that normalization guarantees point at
//! earlier columns, so by the time a rule is resolved every input column is
//! final and coerced.

use std::collections::HashMap;

use rand::Rng;

use crate::error::{DatasmithError, Result};
use crate::generate::sampling::uniform_pick;
use crate::generate::value::Value;
use crate::rules::types::{ColumnRule, Operator, Sign, Source};
use crate::table::Table;

/// Compute the raw (uncoerced) values of a dependent column.
///
/// Independent rules are returned as-is from the base pass, so callers only
/// invoke this for rules where [`Source::is_dependent`] holds.
pub fn resolve_column(
    rule: &ColumnRule,
    table: &Table,
    num_records: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Value>> {
    let values = match &rule.source {
        Source::Reference {
            column,
            keys,
            outputs,
        } => {
            let input = input_column(rule, table, *column)?;
            let lookup = lookup_table(keys, outputs);
            let fallback = outputs.last().cloned().unwrap_or_default();
            input
                .iter()
                .map(|v| {
                    let key = v.to_text();
                    Value::text(lookup.get(key.as_str()).copied().unwrap_or(&fallback).as_str())
                })
                .collect()
        }
        Source::ReferenceRange {
            column,
            thresholds,
            outputs,
        } => {
            let input = input_column(rule, table, *column)?;
            input
                .iter()
                .map(|v| Value::text(bucket(v, thresholds, outputs)))
                .collect()
        }
        Source::ReferenceBoolean {
            column,
            condition,
            when_true,
            when_false,
        } => {
            let input = input_column(rule, table, *column)?;
            let target = *condition as f64;
            input
                .iter()
                .map(|v| {
                    if v.as_f64() == Some(target) {
                        Value::text(when_true.as_str())
                    } else {
                        Value::text(when_false.as_str())
                    }
                })
                .collect()
        }
        Source::ReferenceBooleanRandom {
            column,
            condition,
            values,
        } => {
            let input = input_column(rule, table, *column)?;
            input
                .iter()
                .map(|v| {
                    if v.as_i64() == Some(*condition) {
                        Value::text(uniform_pick(values, rng).as_str())
                    } else {
                        Value::Int(0)
                    }
                })
                .collect()
        }
        Source::Aggregate { operator, operands } => {
            let inputs = operands
                .iter()
                .map(|p| input_column(rule, table, *p))
                .collect::<Result<Vec<_>>>()?;
            (0..num_records)
                .map(|row| Value::Float(aggregate(*operator, &inputs, row)))
                .collect()
        }
        Source::Discount {
            column,
            percent,
            sign,
        } => {
            let input = input_column(rule, table, *column)?;
            let factor = match sign {
                Sign::Minus => 1.0 - percent / 100.0,
                Sign::Plus => 1.0 + percent / 100.0,
            };
            input
                .iter()
                .map(|v| Value::Float(v.as_f64().unwrap_or(0.0) * factor))
                .collect()
        }
        Source::RowIndex
        | Source::Random { .. }
        | Source::Text { .. }
        | Source::Increment { .. } => table
            .column_at(rule.position)
            .map(|(_, values)| values.to_vec())
            .unwrap_or_else(|| vec![Value::Null; num_records]),
    };
    Ok(values)
}

fn input_column<'t>(rule: &ColumnRule, table: &'t Table, position: usize) -> Result<&'t [Value]> {
    table
        .column_at(position)
        .map(|(_, values)| values)
        .ok_or_else(|| DatasmithError::ForwardReference {
            column: rule.name.clone(),
            position: rule.position,
            reference: position,
        })
}

/// Key → output map. Keys and outputs pair positionally; a later duplicate
/// key wins.
fn lookup_table<'a>(keys: &'a [String], outputs: &'a [String]) -> HashMap<&'a str, &'a String> {
    keys.iter()
        .map(|k| k.trim())
        .zip(outputs.iter())
        .collect()
}

/// First bucket whose upper bound is `>= value`; the last output otherwise.
fn bucket<'a>(value: &Value, thresholds: &[i64], outputs: &'a [String]) -> &'a str {
    let last = outputs.last().map(String::as_str).unwrap_or_default();
    let Some(v) = value.as_i64() else {
        return last;
    };
    thresholds
        .iter()
        .zip(outputs.iter())
        .find(|(threshold, _)| v <= **threshold)
        .map(|(_, output)| output.as_str())
        .unwrap_or(last)
}

fn aggregate(operator: Operator, inputs: &[&[Value]], row: usize) -> f64 {
    let mut operands = inputs
        .iter()
        .map(|column| column.get(row).and_then(Value::as_f64).unwrap_or(0.0));
    match operator {
        Operator::Sum => operands.sum(),
        Operator::Product => {
            let first = operands.next().unwrap_or(0.0);
            operands.fold(first, |acc, x| acc * x)
        }
    }
}
