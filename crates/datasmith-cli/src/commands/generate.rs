use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use datasmith_core::generate::engine;
use datasmith_core::output;
use datasmith_core::rules::types::RunMode;

use crate::args::{GenerateArgs, OutputFormat};
use crate::commands::load_rules;

pub fn run(args: &GenerateArgs) -> Result<()> {
    let mut config = load_rules(&args.rules)?;
    if let Some(rows) = args.rows {
        config.records.num = rows;
    }
    if let Some(mode) = args.mode {
        config.records.mode = mode;
    }
    config.validate()?;

    let mut run = config.to_run()?;
    if args.seed.is_some() {
        run.seed = args.seed;
    }

    // Phase 1: Generate columns
    let pb = ProgressBar::new(run.rules.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [1/2] Generating columns... {bar:40.cyan/dim} {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("█▓░"),
    );

    let table = engine::execute_run(
        &run,
        Some(&|column, done, _total| {
            pb.set_message(column.to_string());
            pb.set_position(done as u64);
        }),
    )?;

    pb.finish_with_message(format!(
        "✓ ({} records, mode {})",
        table.num_records(),
        run.mode.level()
    ));
    if run.mode < RunMode::AppendAndReorder && run.reorder.is_some() {
        tracing::debug!("Reorder section present but mode {} skips it", run.mode.level());
    }

    // Phase 2: Output
    let pb2 = ProgressBar::new_spinner();
    pb2.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [2/2] {msg}")
            .context("Invalid progress template")?,
    );

    match &args.output {
        Some(path) => {
            pb2.set_message(format!("Writing to {}...", path.display()));
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_table(&mut writer, &table, args.output_format())?;
            writer
                .flush()
                .with_context(|| format!("Failed to write {}", path.display()))?;

            pb2.finish_with_message(format!("Writing to {}... ✓", path.display()));
            eprintln!(
                "\n✓ Generated {} records × {} columns → {}",
                table.num_records(),
                table.column_count(),
                path.display()
            );
        }
        None => {
            pb2.set_message("Writing to stdout...");
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_table(&mut writer, &table, args.output_format())?;
            writer.flush().context("Failed to write to stdout")?;
            pb2.finish_with_message("Writing to stdout... ✓");
        }
    }

    Ok(())
}

fn write_table<W: Write>(
    writer: &mut W,
    table: &datasmith_core::Table,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => output::json::write_json(writer, table)?,
        OutputFormat::Csv => output::csv::write_csv(writer, table)?,
    }
    Ok(())
}
