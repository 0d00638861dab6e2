use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::Result;
use crate::generate::base::generate_column;
use crate::generate::coerce::coerce_column;
use crate::generate::resolve::resolve_column;
use crate::rules::types::{AppendRule, ReorderSpec, RuleSet, RunMode};
use crate::table::Table;
use crate::transform::append::apply_append_rules;
use crate::transform::reorder::reorder_columns;

/// Everything one generation run needs. Immutable once built.
#[derive(Debug, Clone)]
pub struct GenerationRun {
    pub num_records: usize,
    pub mode: RunMode,
    pub rules: RuleSet,
    pub append: Vec<AppendRule>,
    pub reorder: Option<ReorderSpec>,
    /// Fixed seed for reproducible output; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl GenerationRun {
    /// A generate-only run with no append or reorder pass.
    pub fn new(rules: RuleSet, num_records: usize) -> Self {
        Self {
            num_records,
            mode: RunMode::GenerateOnly,
            rules,
            append: Vec::new(),
            reorder: None,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Progress reporting hook: `(column_name, columns_done, columns_total)`.
pub type ProgressCallback<'a> = &'a dyn Fn(&str, usize, usize);

/// Materialize the table for a rule set (base pass, then dependent pass).
///
/// Each column is coerced exactly once, right after its values are final,
/// so dependent columns always read coerced inputs.
pub fn generate_table(
    rules: &RuleSet,
    num_records: usize,
    rng: &mut impl Rng,
    progress_callback: Option<ProgressCallback<'_>>,
) -> Result<Table> {
    let total = rules.len();
    let mut done = 0usize;
    let mut report = |name: &str| {
        done += 1;
        if let Some(cb) = progress_callback {
            cb(name, done, total);
        }
    };

    let mut table = Table::new(num_records);

    for rule in rules {
        let mut values = generate_column(rule, num_records, rng);
        if !rule.source.is_dependent() {
            coerce_column(&mut values, rule.dtype);
            report(&rule.name);
        }
        table.insert_column(&rule.name, values)?;
        debug!(
            "Base pass: column {} '{}' ({})",
            rule.position,
            rule.name,
            rule.source.kind()
        );
    }

    for rule in rules.iter().filter(|r| r.source.is_dependent()) {
        let mut values = resolve_column(rule, &table, num_records, rng)?;
        coerce_column(&mut values, rule.dtype);
        table.replace_column(&rule.name, values)?;
        report(&rule.name);
        debug!(
            "Resolved column {} '{}' from {:?} ({})",
            rule.position,
            rule.name,
            rule.source.dependencies(),
            rule.source.kind()
        );
    }

    Ok(table)
}

/// Execute a full run with the caller's RNG: generate, then append and
/// reorder as the run mode asks.
pub fn execute_run_with_rng(
    run: &GenerationRun,
    rng: &mut impl Rng,
    progress_callback: Option<ProgressCallback<'_>>,
) -> Result<Table> {
    let mut table = generate_table(&run.rules, run.num_records, rng, progress_callback)?;

    if run.mode.runs_append() && !run.append.is_empty() {
        apply_append_rules(&mut table, &run.append, rng)?;
        debug!("Append pass: {} rules applied", run.append.len());
    }

    if run.mode.runs_reorder() {
        if let Some(ref spec) = run.reorder {
            table = reorder_columns(table, spec)?;
        }
    }

    debug!(
        "Run complete: {} records x {} columns (mode {})",
        table.num_records(),
        table.column_count(),
        run.mode.level()
    );
    Ok(table)
}

/// Execute a full run, seeding the RNG from `run.seed` when set.
pub fn execute_run(
    run: &GenerationRun,
    progress_callback: Option<ProgressCallback<'_>>,
) -> Result<Table> {
    match run.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            execute_run_with_rng(run, &mut rng, progress_callback)
        }
        None => execute_run_with_rng(run, &mut rand::rng(), progress_callback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::value::Value;
    use crate::rules::spec::ColumnSpec;
    use std::cell::RefCell;

    fn specs() -> Vec<ColumnSpec> {
        let mut qty = ColumnSpec::new("qty", "int", "random");
        qty.options = Some(vec!["6".into()]);
        let mut price = ColumnSpec::new("price", "decimal", "random");
        price.options = Some(vec!["7".into()]);
        let mut total = ColumnSpec::new("total", "decimal", "total");
        total.operation = Some("*".into());
        total.operands = Some(vec!["c2".into(), "c3".into()]);
        vec![ColumnSpec::new("id", "int", "company"), qty, price, total]
    }

    #[test]
    fn test_generate_table_resolves_and_coerces() {
        let rules = RuleSet::build(&specs()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let table = generate_table(&rules, 5, &mut rng, None).unwrap();

        assert_eq!(table.column_names(), vec!["id", "qty", "price", "total"]);
        assert_eq!(table.num_records(), 5);
        assert_eq!(table.column("qty").unwrap()[0], Value::Int(6));
        assert_eq!(table.column("price").unwrap()[0], Value::Float(7.0));
        for v in table.column("total").unwrap() {
            assert_eq!(v, &Value::Float(42.0));
        }
    }

    #[test]
    fn test_zero_records() {
        let rules = RuleSet::build(&specs()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let table = generate_table(&rules, 0, &mut rng, None).unwrap();
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.num_records(), 0);
    }

    #[test]
    fn test_progress_reports_every_column_once() {
        let rules = RuleSet::build(&specs()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let seen = RefCell::new(Vec::new());
        let cb = |name: &str, done: usize, total: usize| {
            seen.borrow_mut().push((name.to_string(), done, total));
        };
        generate_table(&rules, 3, &mut rng, Some(&cb)).unwrap();
        let seen = seen.into_inner();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen.last().unwrap(), &("total".to_string(), 4, 4));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut lead = ColumnSpec::new("lead", "str", "random");
        lead.options = Some(vec!["a".into(), "b".into(), "c".into()]);
        let rules = RuleSet::build(&[lead]).unwrap();
        let run = GenerationRun::new(rules, 50).with_seed(7);
        assert_eq!(execute_run(&run, None).unwrap(), execute_run(&run, None).unwrap());
    }

    #[test]
    fn test_generate_only_skips_append_and_reorder() {
        let rules = RuleSet::build(&specs()).unwrap();
        let mut run = GenerationRun::new(rules, 2).with_seed(3);
        run.append = vec![AppendRule::Generate {
            name: "extra".into(),
            source: crate::rules::types::AppendSource::Null,
            nullable: 0.0,
        }];
        run.reorder = Some(ReorderSpec::new(vec![4, 3, 2, 1]));

        let table = execute_run(&run, None).unwrap();
        assert_eq!(table.column_names(), vec!["id", "qty", "price", "total"]);

        run.mode = RunMode::Append;
        let table = execute_run(&run, None).unwrap();
        assert_eq!(table.column_names(), vec!["id", "qty", "price", "total", "extra"]);

        run.mode = RunMode::AppendAndReorder;
        run.reorder = Some(ReorderSpec::new(vec![5, 4, 3, 2, 1]));
        let table = execute_run(&run, None).unwrap();
        assert_eq!(table.column_names(), vec!["extra", "total", "price", "qty", "id"]);
    }
}
