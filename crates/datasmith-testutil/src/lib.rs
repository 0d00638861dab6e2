use datasmith_core::config::{parse_config, sample_config};
use datasmith_core::rules::spec::{AppendSpec, ColumnSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic RNG for tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn strings(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

/// `row_index` column.
pub fn row_index(name: &str) -> ColumnSpec {
    ColumnSpec::new(name, "int", "company")
}

/// Weighted (or uniform when `weights` is empty) random column.
pub fn random(name: &str, dtype: &str, options: &[&str], weights: &[u32]) -> ColumnSpec {
    let mut spec = ColumnSpec::new(name, dtype, "random");
    spec.options = strings(options);
    if !weights.is_empty() {
        spec.weights = Some(weights.to_vec());
    }
    spec
}

/// Faker-backed text column.
pub fn text(name: &str, method: &str) -> ColumnSpec {
    let mut spec = ColumnSpec::new(name, "str", "faker");
    spec.faker_method = Some(method.to_string());
    spec
}

/// `reference` column mapping `keys` to `outputs` (last output is the fallback).
pub fn reference(name: &str, dtype: &str, cols: usize, keys: &[&str], outputs: &[&str]) -> ColumnSpec {
    let mut spec = ColumnSpec::new(name, dtype, "reference");
    spec.cols = Some(cols);
    spec.value = strings(keys);
    spec.range = strings(outputs);
    spec
}

/// `reference_range` column with ascending upper bounds.
pub fn reference_range(name: &str, cols: usize, thresholds: &[&str], outputs: &[&str]) -> ColumnSpec {
    let mut spec = ColumnSpec::new(name, "int", "reference_range");
    spec.cols = Some(cols);
    spec.range = strings(thresholds);
    spec.value = strings(outputs);
    spec
}

/// `reference_boolean` column: `when_true` if column `cols` equals `condition`.
pub fn gate(name: &str, cols: usize, condition: i64, when_true: &str, when_false: &str) -> ColumnSpec {
    let mut spec = ColumnSpec::new(name, "int", "reference_boolean");
    spec.cols = Some(cols);
    spec.condition = Some(condition.to_string());
    spec.value = strings(&[when_true, when_false]);
    spec
}

/// `reference_boolean2` column: random draw from `values` on match, else 0.
pub fn random_gate(name: &str, cols: usize, condition: i64, values: &[&str]) -> ColumnSpec {
    let mut spec = ColumnSpec::new(name, "int", "reference_boolean2");
    spec.cols = Some(cols);
    spec.condition = Some(condition.to_string());
    spec.value = strings(values);
    spec
}

/// Aggregate (`total`) column over operand tokens like `"c8"`.
pub fn total(name: &str, operation: &str, operands: &[&str]) -> ColumnSpec {
    let mut spec = ColumnSpec::new(name, "decimal", "total");
    spec.operation = Some(operation.to_string());
    spec.operands = strings(operands);
    spec
}

/// Percentage `discount` column (`operation` is `"-"` or `"+"`).
pub fn discount(name: &str, cols: usize, operation: &str, percent: &str) -> ColumnSpec {
    let mut spec = ColumnSpec::new(name, "decimal", "discount");
    spec.cols = Some(cols);
    spec.operation = Some(operation.to_string());
    spec.value = strings(&[percent]);
    spec
}

/// Append rule that renames column `cols` and replaces `find` with `replace`.
pub fn replace(cols: usize, col_name: Option<&str>, find: &str, replace: &str) -> AppendSpec {
    AppendSpec {
        operation: "replace".to_string(),
        cols: Some(cols),
        col_name: col_name.map(str::to_string),
        find: Some(find.to_string()),
        replace: Some(replace.to_string()),
        ..AppendSpec::default()
    }
}

/// Append rule that adds a random column with the given null probability.
pub fn generate_random(new_col: &str, options: &[&str], nullable: f64) -> AppendSpec {
    AppendSpec {
        operation: "generate".to_string(),
        new_col: Some(new_col.to_string()),
        data: Some("random".to_string()),
        options: strings(options),
        nullable,
        ..AppendSpec::default()
    }
}

/// A small quote pipeline:
///
/// 1. `Company_ID` row index
/// 2. `Lead_Source` weighted random
/// 3. `Project_Selection` random 1/0
/// 4. `Offer_Selection` gate on column 3
/// 5. `Quantity` random gate on column 4
/// 6. `Unit_Price` random price
/// 7. `Total_Cost` = `Unit_Price * Quantity`
pub fn quote_specs() -> Vec<ColumnSpec> {
    vec![
        row_index("Company_ID"),
        random("Lead_Source", "str", &["Website", "Call"], &[70, 30]),
        random("Project_Selection", "int", &["1", "0"], &[50, 50]),
        gate("Offer_Selection", 3, 1, "1", "0"),
        random_gate("Quantity", 4, 1, &["1", "2", "3", "4", "5"]),
        random("Unit_Price", "decimal", &["300", "400.5", "530"], &[]),
        total("Total_Cost", "*", &["c6", "c5"]),
    ]
}

/// Column rules of the bundled 17-column sales-pipeline sample.
pub fn sales_pipeline_specs() -> Vec<ColumnSpec> {
    parse_config(sample_config())
        .expect("bundled sample config parses")
        .columns
}
