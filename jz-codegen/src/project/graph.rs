//! Document dependency graph.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::{algo::kosaraju_scc, graph::DiGraph};

/// `from` references `export` of `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    /// `None` for the default export.
    pub export: Option<String>,
    /// Emitted through `z.lazy`, so it does not constrain evaluation order.
    pub deferred: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: BTreeSet<String>,
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>) {
        self.nodes.insert(id.into());
    }

    /// Record an edge. Repeated edges are kept once.
    pub fn add_edge(&mut self, edge: DependencyEdge) {
        self.nodes.insert(edge.from.clone());
        self.nodes.insert(edge.to.clone());
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Dependencies first; ties broken by id. Deferred edges are ignored.
    pub fn topological_order(&self) -> Vec<String> {
        let mut pending: BTreeMap<&str, usize> = self.nodes.iter().map(|n| (n.as_str(), 0)).collect();
        let mut dependents: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut seen = BTreeSet::new();

        for edge in self.edges.iter().filter(|e| !e.deferred && e.from != e.to) {
            if !seen.insert((edge.from.as_str(), edge.to.as_str())) {
                continue;
            }
            *pending.entry(edge.from.as_str()).or_default() += 1;
            dependents
                .entry(edge.to.as_str())
                .or_default()
                .insert(edge.from.as_str());
        }

        let mut ready: BTreeSet<&str> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(id) = ready.pop_first() {
            order.push(id.to_string());
            for dependent in dependents.get(id).into_iter().flatten() {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(*dependent);
                    }
                }
            }
        }

        // Nodes left over sit on a cycle of direct edges.
        let placed: BTreeSet<String> = order.iter().cloned().collect();
        order.extend(self.nodes.iter().filter(|n| !placed.contains(*n)).cloned());
        order
    }

    /// Groups of documents that reference each other, sorted.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut graph = DiGraph::<&str, ()>::new();
        let indices: BTreeMap<&str, _> = self
            .nodes
            .iter()
            .map(|n| (n.as_str(), graph.add_node(n.as_str())))
            .collect();
        let mut self_loops = BTreeSet::new();
        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (indices.get(edge.from.as_str()), indices.get(edge.to.as_str())) {
                graph.update_edge(from, to, ());
            }
            if edge.from == edge.to {
                self_loops.insert(edge.from.as_str());
            }
        }

        let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || component.iter().any(|i| self_loops.contains(graph[*i]))
            })
            .map(|component| {
                let mut ids: Vec<String> = component.iter().map(|i| graph[*i].to_string()).collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, deferred: bool) -> DependencyEdge {
        DependencyEdge {
            from: from.into(),
            to: to.into(),
            export: None,
            deferred,
        }
    }

    #[test]
    fn test_topological_order_dependencies_first() {
        let mut graph = DependencyGraph::new();
        graph.add_node("z");
        graph.add_edge(edge("order", "user", false));
        graph.add_edge(edge("order", "address", false));
        graph.add_edge(edge("user", "address", false));
        assert_eq!(graph.topological_order(), vec!["address", "user", "order", "z"]);
    }

    #[test]
    fn test_deferred_edges_do_not_constrain_order() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(edge("a", "b", false));
        graph.add_edge(edge("b", "a", true));
        assert_eq!(graph.topological_order(), vec!["b", "a"]);
        assert_eq!(graph.cycles(), vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_edges_deduplicated() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(edge("a", "b", false));
        graph.add_edge(edge("a", "b", false));
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_cycles() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(edge("a", "b", false));
        graph.add_edge(edge("b", "c", false));
        graph.add_edge(edge("self", "self", true));
        assert_eq!(graph.cycles(), vec![vec!["self".to_string()]]);

        graph.add_edge(edge("c", "a", false));
        assert_eq!(graph.cycles().len(), 2);
        assert_eq!(graph.cycles()[0], vec!["a", "b", "c"]);

        // A direct cycle still yields a complete order.
        assert_eq!(graph.topological_order().len(), 4);

        graph.clear();
        assert!(graph.cycles().is_empty());
    }
}
