use anyhow::Result;
use comfy_table::Table as ComfyTable;

use datasmith_core::generate::engine;

use crate::args::{PreviewArgs, MAX_PREVIEW_ROWS};
use crate::commands::load_rules;

/// Longest cell shown before truncation.
const MAX_CELL_CHARS: usize = 40;

pub fn run(args: &PreviewArgs) -> Result<()> {
    let config = load_rules(&args.rules)?;
    let mut run = config.to_run()?;

    run.num_records = args.rows.clamp(1, MAX_PREVIEW_ROWS);
    // Fixed seed for preview unless one is given
    run.seed = args.seed.or(run.seed).or(Some(42));

    let table = engine::execute_run(&run, None)?;

    println!(
        "━━━ {} columns, {} of {} records (mode {}) ━━━",
        table.column_count(),
        table.num_records(),
        config.records.num,
        run.mode.level()
    );

    let mut t = ComfyTable::new();
    t.set_header(table.column_names());

    for row_idx in 0..table.num_records() {
        let values: Vec<String> = table
            .iter()
            .map(|(_, values)| truncate(&values[row_idx].to_string()))
            .collect();
        t.add_row(values);
    }

    println!("{}\n", t);

    Ok(())
}

fn truncate(s: &str) -> String {
    if s.chars().count() > MAX_CELL_CHARS {
        let head: String = s.chars().take(MAX_CELL_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
