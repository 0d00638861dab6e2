use crate::graph::dag::ColumnGraph;
use petgraph::visit::EdgeRef;

/// Output format for graph visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Mermaid,
    Dot,
}

/// Generate a visualization of the column dependency graph.
pub fn visualize(graph: &ColumnGraph, format: GraphFormat) -> String {
    match format {
        GraphFormat::Mermaid => generate_mermaid(graph),
        GraphFormat::Dot => generate_dot(graph),
    }
}

fn node_id(graph: &ColumnGraph, idx: petgraph::graph::NodeIndex) -> String {
    format!("c{}", graph.column(idx).position)
}

fn generate_mermaid(graph: &ColumnGraph) -> String {
    let mut output = String::from("graph TD\n");

    for node in graph.graph.node_indices() {
        let column = graph.column(node);
        output.push_str(&format!(
            "    {}[\"{} ({})\"]\n",
            node_id(graph, node),
            column.name,
            column.kind
        ));
    }

    output.push('\n');

    for edge in graph.graph.edge_references() {
        output.push_str(&format!(
            "    {} -->|{}| {}\n",
            node_id(graph, edge.source()),
            edge.weight().kind,
            node_id(graph, edge.target())
        ));
    }

    output
}

fn generate_dot(graph: &ColumnGraph) -> String {
    let mut output = String::from("digraph columns {\n");
    output.push_str("    rankdir=LR;\n");
    output.push_str("    node [shape=box, style=rounded];\n\n");

    for node in graph.graph.node_indices() {
        let column = graph.column(node);
        output.push_str(&format!(
            "    \"{}\" [label=\"{}\\n{}\"];\n",
            column.name, column.name, column.kind
        ));
    }

    for edge in graph.graph.edge_references() {
        output.push_str(&format!(
            "    \"{}\" -> \"{}\" [label=\"{}\"];\n",
            graph.column(edge.source()).name,
            graph.column(edge.target()).name,
            edge.weight().kind
        ));
    }

    output.push_str("}\n");
    output
}
