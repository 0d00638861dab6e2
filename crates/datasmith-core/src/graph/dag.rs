use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::{DatasmithError, Result};
use crate::rules::types::RuleSet;

/// A directed graph of column dependencies.
/// Edges point from an input column to the column computed from it.
pub struct ColumnGraph {
    pub graph: DiGraph<ColumnNode, EdgeInfo>,
    /// Node of each column, indexed by `position - 1`.
    nodes: Vec<NodeIndex>,
}

#[derive(Debug, Clone)]
pub struct ColumnNode {
    pub name: String,
    pub position: usize,
    /// Source kind, e.g. `random` or `reference_range`.
    pub kind: &'static str,
}

/// Information about an edge (one input of a dependent column).
#[derive(Debug, Clone)]
pub struct EdgeInfo {
    pub kind: &'static str,
}

impl ColumnGraph {
    /// Build the graph from a validated rule set.
    /// Each column becomes a node; each referenced position an edge.
    pub fn from_rules(rules: &RuleSet) -> Self {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = rules
            .iter()
            .map(|rule| {
                graph.add_node(ColumnNode {
                    name: rule.name.clone(),
                    position: rule.position,
                    kind: rule.source.kind(),
                })
            })
            .collect();

        for rule in rules {
            let to = nodes[rule.position - 1];
            for dep in rule.source.dependencies() {
                if let Some(&from) = nodes.get(dep.wrapping_sub(1)) {
                    graph.add_edge(
                        from,
                        to,
                        EdgeInfo {
                            kind: rule.source.kind(),
                        },
                    );
                }
            }
        }

        Self { graph, nodes }
    }

    pub fn column(&self, idx: NodeIndex) -> &ColumnNode {
        &self.graph[idx]
    }

    /// Node index for a 1-based column position.
    pub fn node_index(&self, position: usize) -> Option<NodeIndex> {
        position
            .checked_sub(1)
            .and_then(|i| self.nodes.get(i))
            .copied()
    }

    pub fn column_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Column names in an order where every input precedes its dependents.
    ///
    /// Rule sets that passed normalization are acyclic, so this only fails
    /// for graphs assembled by hand.
    pub fn resolution_order(&self) -> Result<Vec<String>> {
        toposort(&self.graph, None)
            .map(|sorted| {
                sorted
                    .into_iter()
                    .map(|idx| self.graph[idx].name.clone())
                    .collect()
            })
            .map_err(|cycle| {
                DatasmithError::Other(format!(
                    "Column dependency cycle through '{}'",
                    self.graph[cycle.node_id()].name
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::spec::ColumnSpec;

    fn rules() -> RuleSet {
        let mut lead = ColumnSpec::new("Lead_Source", "str", "random");
        lead.options = Some(vec!["Website".into(), "Call".into()]);
        let mut channel = ColumnSpec::new("Channel", "str", "reference");
        channel.cols = Some(2);
        channel.value = Some(vec!["Website".into()]);
        channel.range = Some(vec!["Online".into(), "Offline".into()]);
        let mut total = ColumnSpec::new("Total", "decimal", "total");
        total.operation = Some("+".into());
        total.operands = Some(vec!["c1".into(), "c1".into()]);
        RuleSet::build(&[ColumnSpec::new("Id", "int", "company"), lead, channel, total]).unwrap()
    }

    #[test]
    fn test_build_graph() {
        let graph = ColumnGraph::from_rules(&rules());
        assert_eq!(graph.column_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        let channel = graph.node_index(3).unwrap();
        assert_eq!(graph.column(channel).kind, "reference");
        assert!(graph.node_index(0).is_none());
    }

    #[test]
    fn test_resolution_order_puts_inputs_first() {
        let order = ColumnGraph::from_rules(&rules()).resolution_order().unwrap();
        let pos = |name: &str| order.iter().position(|n| n == name).unwrap();
        assert!(pos("Lead_Source") < pos("Channel"));
        assert!(pos("Id") < pos("Total"));
    }
}
