use std::collections::{HashSet, VecDeque};

use log::{debug, trace, warn};
use pathfinding::prelude::bfs_reach;

use crate::common::{zero, Capacity, Label, MissingEdgeError, Result, VertexId};
use crate::network::FlowNetwork;

/// Per-search distances and back-pointers, indexed by `VertexId`.
/// `None` distance means unreached.
#[derive(Debug, Clone)]
pub(crate) struct PathSearch<C> {
    dist: Vec<Option<C>>,
    predecessor: Vec<Option<VertexId>>,
}

impl<C: Capacity> PathSearch<C> {
    pub(crate) fn new() -> Self {
        PathSearch {
            dist: Vec::new(),
            predecessor: Vec::new(),
        }
    }
    fn reset(&mut self, num_vertices: usize) {
        self.dist.clear();
        self.dist.resize(num_vertices, None);
        self.predecessor.clear();
        self.predecessor.resize(num_vertices, None);
    }
    fn dist(&self, id: VertexId) -> Option<C> {
        self.dist.get(id).copied().flatten()
    }
    fn predecessor(&self, id: VertexId) -> Option<VertexId> {
        self.predecessor.get(id).copied().flatten()
    }
    fn start(&mut self, id: VertexId) {
        self.dist[id] = Some(zero());
    }
    fn relax(&mut self, id: VertexId, dist: C, predecessor: VertexId) {
        self.dist[id] = Some(dist);
        self.predecessor[id] = Some(predecessor);
    }
}

/// One augmentation step: the path taken, source first, and the flow pushed along it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augmentation<L, C> {
    pub path: Vec<L>,
    pub amount: C,
}

impl<L: Label, C: Capacity> FlowNetwork<L, C> {
    /// Augments until no path remains and returns the total flow on the edges
    /// leaving the source. Flow already committed by earlier calls is included.
    pub fn max_flow(&mut self) -> Result<C> {
        let mut steps = 0usize;
        while self.augment()?.is_some() {
            steps += 1;
        }
        let total = self.outflow_from_source();
        debug!("max flow {:?} after {} augmentations", total, steps);
        Ok(total)
    }

    /// Runs a single search, bottleneck and adjustment round. Returns `None`
    /// when there is nothing left to push.
    pub fn augment(&mut self) -> Result<Option<Augmentation<L, C>>> {
        if !self.establish_next_flow_path() {
            return Ok(None);
        }
        let limit = self.limiting_flow_on_path()?;
        if limit <= zero() {
            return Ok(None);
        }
        let path = self.path_labels()?;
        if !self.adjust_path_by_cost(limit) {
            warn!("could not adjust augmenting path {:?}", path);
            return Ok(None);
        }
        debug!("pushed {:?} along {:?}", limit, path);
        Ok(Some(Augmentation {
            path,
            amount: limit,
        }))
    }

    /// Declared edges leaving the vertices still reachable from the source in
    /// the residual graph. After `max_flow` their capacities sum to the flow value.
    pub fn min_cut(&self) -> Vec<(L, L)> {
        let Some(source) = self.source else {
            return vec![];
        };
        let source_side: HashSet<VertexId> = bfs_reach(source, |&id| {
            self.store
                .get(id)
                .into_iter()
                .flat_map(|vertex| vertex.residual_adj().iter())
                .filter(|(_, &capacity)| capacity > zero())
                .map(|(&next, _)| next)
                .collect::<Vec<_>>()
        })
        .collect();
        let mut cut = Vec::new();
        for (id, vertex) in self.store.iter() {
            if !source_side.contains(&id) {
                continue;
            }
            for &to in vertex.flow_adj().keys() {
                if source_side.contains(&to) {
                    continue;
                }
                if let Some(to_label) = self.store.label(to) {
                    cut.push((vertex.label().clone(), to_label.clone()));
                }
            }
        }
        cut
    }

    fn outflow_from_source(&self) -> C {
        let Some(source) = self.source.and_then(|id| self.store.get(id)) else {
            return zero();
        };
        source
            .flow_adj()
            .values()
            .fold(zero(), |total: C, flow| {
                total.checked_add(flow).unwrap_or_else(C::max_value)
            })
    }

    /// Label-correcting search from the source over positive residual arcs.
    /// The distance of a path is the sum of its residual capacities; vertices
    /// re-enter the queue whenever their distance improves.
    pub(crate) fn establish_next_flow_path(&mut self) -> bool {
        let Some(source) = self.source else {
            return false;
        };
        self.search.reset(self.store.len());
        self.search.start(source);

        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            if Some(v) == self.sink {
                return true;
            }
            let (Some(vertex), Some(dist_v)) = (self.store.get(v), self.search.dist(v)) else {
                continue;
            };
            for (&w, &capacity) in vertex.residual_adj() {
                if capacity <= zero() {
                    continue;
                }
                // distances saturate instead of overflowing on huge capacities
                let candidate = dist_v
                    .checked_add(&capacity)
                    .unwrap_or_else(C::max_value);
                if self.search.dist(w).map_or(true, |dist_w| candidate < dist_w) {
                    trace!("relax {} -> {}: dist {:?}", v, w, candidate);
                    self.search.relax(w, candidate, v);
                    queue.push_back(w);
                }
            }
        }
        false
    }

    /// Edges of the last found path as `(predecessor, vertex)`, walking from the sink back.
    fn path_edges(&self) -> Result<Vec<(VertexId, VertexId)>> {
        let (Some(source), Some(sink)) = (self.source, self.sink) else {
            return Ok(vec![]);
        };
        let mut edges = Vec::new();
        let mut current = sink;
        while current != source {
            // a simple path never has more edges than there are vertices
            if edges.len() >= self.store.len() {
                return Err(MissingEdgeError::BrokenPath { at: current });
            }
            let previous = self
                .search
                .predecessor(current)
                .ok_or(MissingEdgeError::BrokenPath { at: current })?;
            edges.push((previous, current));
            current = previous;
        }
        Ok(edges)
    }

    fn path_labels(&self) -> Result<Vec<L>> {
        let edges = self.path_edges()?;
        let mut path = Vec::with_capacity(edges.len() + 1);
        path.extend(self.source.and_then(|id| self.store.label(id)).cloned());
        for &(_, to) in edges.iter().rev() {
            path.extend(self.store.label(to).cloned());
        }
        Ok(path)
    }

    /// Smallest residual capacity on the last found path. An empty path has limit zero.
    pub(crate) fn limiting_flow_on_path(&self) -> Result<C> {
        let mut limit: Option<C> = None;
        for (from, to) in self.path_edges()? {
            let capacity = self
                .store
                .residual(from, to)
                .ok_or(MissingEdgeError::Residual { from, to })?;
            limit = Some(limit.map_or(capacity, |limit| limit.min(capacity)));
        }
        Ok(limit.unwrap_or_default())
    }

    /// Pushes `cost` along the last found path. Nothing is modified unless every
    /// edge on the path has a forward residual arc and a flow entry in one direction.
    /// A missing reverse arc is skipped.
    pub(crate) fn adjust_path_by_cost(&mut self, cost: C) -> bool {
        let Ok(edges) = self.path_edges() else {
            return false;
        };
        let consistent = edges.iter().all(|&(from, to)| {
            self.store.residual(from, to).is_some()
                && (self.store.flow(from, to).is_some() || self.store.flow(to, from).is_some())
        });
        if !consistent {
            return false;
        }
        for (from, to) in edges {
            if let Some(residual) = self.store.residual_mut(from, to) {
                *residual -= cost;
            }
            if let Some(residual) = self.store.residual_mut(to, from) {
                *residual += cost;
            }
            if self.store.flow(from, to).is_some() {
                if let Some(flow) = self.store.flow_mut(from, to) {
                    *flow += cost;
                }
            } else if let Some(flow) = self.store.flow_mut(to, from) {
                // the arc is the reverse of a declared edge: cancel flow on it
                *flow -= cost;
            }
        }
        true
    }
}
