use anyhow::Result;

use datasmith_core::graph::dag::ColumnGraph;
use datasmith_core::graph::visualize::{visualize, GraphFormat as CoreGraphFormat};
use datasmith_core::rules::types::RuleSet;

use crate::args::{GraphArgs, GraphFormat};
use crate::commands::load_rules;

pub fn run(args: &GraphArgs) -> Result<()> {
    let config = load_rules(&args.rules)?;
    let rules = RuleSet::build(&config.columns)?;
    let graph = ColumnGraph::from_rules(&rules);

    let format = match args.format {
        GraphFormat::Mermaid => CoreGraphFormat::Mermaid,
        GraphFormat::Dot => CoreGraphFormat::Dot,
    };

    let output = visualize(&graph, format);
    println!("{}", output);

    tracing::debug!(
        "Resolution order: {}",
        graph.resolution_order()?.join(" → ")
    );

    eprintln!(
        "{} columns, {} dependencies",
        graph.column_count(),
        graph.edge_count()
    );

    Ok(())
}
