use crate::types::CellAddress;
use crate::Result;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// Manages dependencies between cells in a spreadsheet
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Directed graph where edges point from dependent to dependency
    /// E.g., if A1 contains =B1+C1, then edges are A1→B1 and A1→C1
    graph: DiGraph<CellAddress, ()>,

    /// Mapping from cell address to graph node index
    node_map: HashMap<CellAddress, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        DependencyGraph {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Get or create a node for the given cell address
    fn get_or_create_node(&mut self, address: CellAddress) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&address) {
            idx
        } else {
            let idx = self.graph.add_node(address);
            self.node_map.insert(address, idx);
            idx
        }
    }

    /// Add a dependency: `from` depends on `to`
    /// E.g., if A1 contains =B1+C1, call add_dependency(A1, B1) and add_dependency(A1, C1)
    pub fn add_dependency(&mut self, from: CellAddress, to: CellAddress) {
        let from_idx = self.get_or_create_node(from);
        let to_idx = self.get_or_create_node(to);
        self.graph.add_edge(from_idx, to_idx, ());
    }

    /// Remove all dependencies for a cell (when its formula changes or is deleted)
    pub fn remove_dependencies_for(&mut self, address: &CellAddress) {
        if let Some(&idx) = self.node_map.get(address) {
            // Remove all outgoing edges (dependencies)
            let edges: Vec<_> = self.graph.edges(idx).map(|e| e.id()).collect();
            for edge in edges {
                self.graph.remove_edge(edge);
            }
        }
    }

    /// Remove a cell completely from the graph
    pub fn remove_cell(&mut self, address: &CellAddress) {
        if let Some(idx) = self.node_map.remove(address) {
            self.graph.remove_node(idx);
        }
    }

    /// Get all cells that depend on the given cell (cells that reference this cell)
    pub fn get_dependents(&self, address: &CellAddress) -> Vec<CellAddress> {
        if let Some(&idx) = self.node_map.get(address) {
            // Find nodes with edges TO this node (incoming edges)
            self.graph
                .node_indices()
                .filter(|&node| self.graph.edges(node).any(|e| e.target() == idx))
                .map(|node| self.graph[node])
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Get every cell that transitively depends on `address`: not just its
    /// direct dependents, but theirs, and so on. This is the full set that
    /// must be recalculated when `address` changes.
    pub fn get_all_dependents(&self, address: &CellAddress) -> HashSet<CellAddress> {
        let mut seen = HashSet::new();
        let mut stack = vec![*address];
        while let Some(current) = stack.pop() {
            for dependent in self.get_dependents(&current) {
                if seen.insert(dependent) {
                    stack.push(dependent);
                }
            }
        }
        seen
    }

    /// Get all cells that this cell depends on (cells referenced by this cell)
    pub fn get_dependencies(&self, address: &CellAddress) -> Vec<CellAddress> {
        if let Some(&idx) = self.node_map.get(address) {
            self.graph
                .edges(idx)
                .map(|e| self.graph[e.target()])
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Get the calculation order for all cells.
    ///
    /// A cycle anywhere in the graph never aborts the whole sort: see
    /// [`Self::calculation_order_with_cycles`] for the partitioned form
    /// that also reports which cells are cyclic.
    pub fn get_calculation_order(&self) -> Result<Vec<CellAddress>> {
        Ok(self.calculation_order_with_cycles().0)
    }

    /// Computes a calculation order covering every cell in the graph,
    /// partitioning by strongly-connected component so that a cycle only
    /// poisons the cells inside it rather than aborting the sort entirely.
    ///
    /// Returns `(order, cyclic_cells)`: `order` lists every cell once,
    /// dependency-first, with the cells of any cyclic component grouped
    /// together (their relative order within the component is arbitrary).
    /// `cyclic_cells` contains every cell that belongs to a nontrivial SCC
    /// or has a self-loop; callers should mark these `#CIRC!` instead of
    /// evaluating their formulas.
    pub fn calculation_order_with_cycles(&self) -> (Vec<CellAddress>, HashSet<CellAddress>) {
        let sccs = tarjan_scc(&self.graph);

        let mut node_to_scc = HashMap::with_capacity(self.graph.node_count());
        for (scc_id, component) in sccs.iter().enumerate() {
            for &node in component {
                node_to_scc.insert(node, scc_id);
            }
        }

        let is_cyclic: Vec<bool> = sccs
            .iter()
            .map(|component| {
                component.len() > 1
                    || self
                        .graph
                        .find_edge(component[0], component[0])
                        .is_some()
            })
            .collect();

        // Condensation graph: one node per SCC, edges induced from
        // inter-component edges of the original graph. This is always a
        // DAG, so toposorting it can never fail.
        let mut condensation: DiGraph<usize, ()> = DiGraph::new();
        let scc_nodes: Vec<NodeIndex> = (0..sccs.len())
            .map(|scc_id| condensation.add_node(scc_id))
            .collect();
        let mut seen_edges = HashSet::new();
        for edge in self.graph.edge_references() {
            let source_scc = node_to_scc[&edge.source()];
            let target_scc = node_to_scc[&edge.target()];
            if source_scc != target_scc && seen_edges.insert((source_scc, target_scc)) {
                condensation.add_edge(scc_nodes[source_scc], scc_nodes[target_scc], ());
            }
        }

        let component_order = toposort(&condensation, None)
            .expect("condensation of a graph's SCCs is always acyclic");

        let mut order = Vec::with_capacity(self.graph.node_count());
        let mut cyclic_cells = HashSet::new();
        // component_order lists dependent components before the ones they
        // depend on (same convention as the original graph); reverse it so
        // dependencies are calculated before their dependents.
        for &comp_node in component_order.iter().rev() {
            let scc_id = condensation[comp_node];
            for &node in &sccs[scc_id] {
                let address = self.graph[node];
                order.push(address);
                if is_cyclic[scc_id] {
                    cyclic_cells.insert(address);
                }
            }
        }

        (order, cyclic_cells)
    }

    /// Check if adding a dependency would create a cycle
    pub fn would_create_cycle(&self, from: &CellAddress, to: &CellAddress) -> bool {
        // If 'to' doesn't exist in the graph, it can't create a cycle
        let Some(&to_idx) = self.node_map.get(to) else {
            return false;
        };

        // If 'from' doesn't exist, it can't create a cycle
        let Some(&from_idx) = self.node_map.get(from) else {
            return false;
        };

        // Check if there's already a path from 'to' to 'from'
        // If there is, adding 'from' -> 'to' would create a cycle
        petgraph::algo::has_path_connecting(&self.graph, to_idx, from_idx, None)
    }

    /// Clear all dependencies
    pub fn clear(&mut self) {
        self.graph.clear();
        self.node_map.clear();
    }

    /// Get the number of cells in the dependency graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
