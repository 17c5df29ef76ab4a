use std::collections::BTreeMap;

use log::warn;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::augmenting_path::PathSearch;
use crate::common::{zero, Capacity, Label, VertexId};
use crate::vertex_store::{Vertex, VertexStore};

/// A directed capacitated network together with the flow currently routed through it.
///
/// Every declared edge `u -> v` keeps two entries: the flow sent on it in
/// `u`'s flow adjacency, and its remaining capacity in `u`'s residual
/// adjacency. Inserting it also creates the reverse residual arc `v -> u`
/// (initially zero) through which committed flow can later be cancelled.
///
/// Flow and residual state accumulate across computations. Changing the
/// source or sink after `max_flow` continues from the current residual graph.
#[derive(Debug, Clone)]
pub struct FlowNetwork<L: Label, C: Capacity> {
    pub(crate) store: VertexStore<L, C>,
    pub(crate) source: Option<VertexId>,
    pub(crate) sink: Option<VertexId>,
    pub(crate) search: PathSearch<C>,
}

impl<L: Label, C: Capacity> FlowNetwork<L, C> {
    pub fn new() -> Self {
        FlowNetwork {
            store: VertexStore::new(),
            source: None,
            sink: None,
            search: PathSearch::new(),
        }
    }

    /// Builds a network from every edge of `graph`, in edge index order.
    pub fn from_graph(graph: &Graph<L, C>) -> Self {
        let mut network = Self::new();
        for edge in graph.edge_references() {
            network.add_edge(&graph[edge.source()], &graph[edge.target()], *edge.weight());
        }
        network
    }

    /// Declares the edge `source -> dest`. Missing endpoints are created.
    /// Declaring the same ordered pair again replaces its capacity and resets its flow.
    pub fn add_edge(&mut self, source: &L, dest: &L, capacity: C) {
        let src = self.store.get_or_create(source);
        let dst = self.store.get_or_create(dest);
        if let Some(vertex) = self.store.get_mut(src) {
            vertex.flow_adj_mut().insert(dst, zero());
            vertex.residual_adj_mut().insert(dst, capacity);
        }
        // an existing entry is either a declared edge or an earlier reverse arc
        if let Some(vertex) = self.store.get_mut(dst) {
            vertex.residual_adj_mut().entry(src).or_insert_with(zero);
        }
    }

    pub fn set_source(&mut self, label: &L) -> bool {
        let Some(id) = self.find_vertex(label) else {
            warn!("cannot set source: no vertex labelled {:?}", label);
            return false;
        };
        self.source = Some(id);
        true
    }

    pub fn set_sink(&mut self, label: &L) -> bool {
        let Some(id) = self.find_vertex(label) else {
            warn!("cannot set sink: no vertex labelled {:?}", label);
            return false;
        };
        self.sink = Some(id);
        true
    }

    pub fn source(&self) -> Option<&L> {
        self.source.and_then(|id| self.store.label(id))
    }

    pub fn sink(&self) -> Option<&L> {
        self.sink.and_then(|id| self.store.label(id))
    }

    pub fn find_vertex(&self, label: &L) -> Option<VertexId> {
        self.store.find(label)
    }

    pub fn vertex_store(&self) -> &VertexStore<L, C> {
        &self.store
    }

    pub fn vertex_count(&self) -> usize {
        self.store.len()
    }

    /// Number of declared edges. Reverse residual arcs are not counted.
    pub fn edge_count(&self) -> usize {
        self.store
            .iter()
            .map(|(_, vertex)| vertex.flow_adj().len())
            .sum()
    }

    /// Vertex labels in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &L> + '_ {
        self.store.iter().map(|(_, vertex)| vertex.label())
    }

    pub fn flow(&self, from: &L, to: &L) -> Option<C> {
        self.store.flow(self.find_vertex(from)?, self.find_vertex(to)?)
    }

    pub fn residual(&self, from: &L, to: &L) -> Option<C> {
        self.store
            .residual(self.find_vertex(from)?, self.find_vertex(to)?)
    }

    /// `(neighbor, flow)` for every declared edge leaving `label`.
    pub fn flow_adjacency(&self, label: &L) -> Option<impl Iterator<Item = (&L, C)> + '_> {
        let vertex = self.store.get(self.find_vertex(label)?)?;
        Some(self.labelled(vertex.flow_adj()))
    }

    /// `(neighbor, remaining capacity)` for every residual arc leaving `label`.
    pub fn residual_adjacency(&self, label: &L) -> Option<impl Iterator<Item = (&L, C)> + '_> {
        let vertex = self.store.get(self.find_vertex(label)?)?;
        Some(self.labelled(vertex.residual_adj()))
    }

    fn labelled<'a>(
        &'a self,
        adjacency: &'a BTreeMap<VertexId, C>,
    ) -> impl Iterator<Item = (&'a L, C)> + 'a {
        adjacency
            .iter()
            .filter_map(|(&id, &value)| self.store.label(id).map(|label| (label, value)))
    }

    /// Snapshot of the declared edges weighted by their current flow.
    pub fn flow_graph(&self) -> Graph<L, C> {
        self.snapshot(Vertex::flow_adj)
    }

    /// Snapshot of every residual arc weighted by its remaining capacity.
    pub fn residual_graph(&self) -> Graph<L, C> {
        self.snapshot(Vertex::residual_adj)
    }

    fn snapshot(&self, adjacency: fn(&Vertex<L, C>) -> &BTreeMap<VertexId, C>) -> Graph<L, C> {
        let mut graph = Graph::new();
        let mut nodes: BTreeMap<VertexId, NodeIndex> = BTreeMap::new();
        for (id, vertex) in self.store.iter() {
            nodes.insert(id, graph.add_node(vertex.label().clone()));
        }
        for (id, vertex) in self.store.iter() {
            for (neighbor, &value) in adjacency(vertex) {
                if let (Some(&a), Some(&b)) = (nodes.get(&id), nodes.get(neighbor)) {
                    graph.add_edge(a, b, value);
                }
            }
        }
        graph
    }

    /// Removes every vertex and forgets the source and sink.
    pub fn clear(&mut self) {
        self.store.clear();
        self.source = None;
        self.sink = None;
        self.search = PathSearch::new();
    }
}

impl<L: Label, C: Capacity> Default for FlowNetwork<L, C> {
    fn default() -> Self {
        Self::new()
    }
}
