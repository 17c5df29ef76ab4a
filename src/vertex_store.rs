use std::collections::BTreeMap;

use crate::common::{Capacity, Label, VertexId};

#[derive(Debug, Clone)]
pub struct Vertex<L: Label, C: Capacity> {
    label: L,
    flow_adj: BTreeMap<VertexId, C>,
    residual_adj: BTreeMap<VertexId, C>,
}

impl<L: Label, C: Capacity> Vertex<L, C> {
    fn new(label: L) -> Self {
        Vertex {
            label,
            flow_adj: BTreeMap::new(),
            residual_adj: BTreeMap::new(),
        }
    }
    pub fn label(&self) -> &L {
        &self.label
    }
    /// Flow currently sent on each declared edge leaving this vertex.
    pub fn flow_adj(&self) -> &BTreeMap<VertexId, C> {
        &self.flow_adj
    }
    /// Remaining capacity on each residual arc leaving this vertex, reverse arcs included.
    pub fn residual_adj(&self) -> &BTreeMap<VertexId, C> {
        &self.residual_adj
    }
    pub(crate) fn flow_adj_mut(&mut self) -> &mut BTreeMap<VertexId, C> {
        &mut self.flow_adj
    }
    pub(crate) fn residual_adj_mut(&mut self) -> &mut BTreeMap<VertexId, C> {
        &mut self.residual_adj
    }
}

/// Owns every vertex record. Ids are indices into `vertices`, and `index`
/// maps each label to the single record carrying it.
#[derive(Debug, Clone)]
pub struct VertexStore<L: Label, C: Capacity> {
    vertices: Vec<Vertex<L, C>>,
    index: BTreeMap<L, VertexId>,
}

impl<L: Label, C: Capacity> VertexStore<L, C> {
    pub fn new() -> Self {
        VertexStore {
            vertices: Vec::new(),
            index: BTreeMap::new(),
        }
    }
    pub fn get_or_create(&mut self, label: &L) -> VertexId {
        if let Some(id) = self.find(label) {
            return id;
        }
        let id = self.vertices.len();
        self.vertices.push(Vertex::new(label.clone()));
        self.index.insert(label.clone(), id);
        id
    }
    pub fn find(&self, label: &L) -> Option<VertexId> {
        self.index.get(label).copied()
    }
    pub fn get(&self, id: VertexId) -> Option<&Vertex<L, C>> {
        self.vertices.get(id)
    }
    pub(crate) fn get_mut(&mut self, id: VertexId) -> Option<&mut Vertex<L, C>> {
        self.vertices.get_mut(id)
    }
    pub fn label(&self, id: VertexId) -> Option<&L> {
        self.get(id).map(|vertex| vertex.label())
    }
    pub fn flow(&self, from: VertexId, to: VertexId) -> Option<C> {
        self.get(from)?.flow_adj.get(&to).copied()
    }
    pub fn residual(&self, from: VertexId, to: VertexId) -> Option<C> {
        self.get(from)?.residual_adj.get(&to).copied()
    }
    pub(crate) fn flow_mut(&mut self, from: VertexId, to: VertexId) -> Option<&mut C> {
        self.get_mut(from)?.flow_adj.get_mut(&to)
    }
    pub(crate) fn residual_mut(&mut self, from: VertexId, to: VertexId) -> Option<&mut C> {
        self.get_mut(from)?.residual_adj.get_mut(&to)
    }
    /// Vertices in label order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex<L, C>)> + '_ {
        self.index
            .values()
            .map(|&id| (id, &self.vertices[id]))
    }
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.index.clear();
    }
}

impl<L: Label, C: Capacity> Default for VertexStore<L, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut store = VertexStore::<&str, i64>::new();
        let a = store.get_or_create(&"a");
        let b = store.get_or_create(&"b");
        assert_ne!(a, b);
        assert_eq!(store.get_or_create(&"a"), a);
        assert_eq!(store.len(), 2);
        assert_eq!(store.label(b), Some(&"b"));
    }

    #[test]
    fn test_new_vertex_is_empty() {
        let mut store = VertexStore::<String, i64>::new();
        let x = store.get_or_create(&"x".to_owned());
        let vertex = store.get(x).unwrap();
        assert!(vertex.flow_adj().is_empty());
        assert!(vertex.residual_adj().is_empty());
    }

    #[test]
    fn test_find_does_not_create() {
        let mut store = VertexStore::<&str, i64>::new();
        assert_eq!(store.find(&"missing"), None);
        assert!(store.is_empty());
        let id = store.get_or_create(&"present");
        assert_eq!(store.find(&"present"), Some(id));
        assert_eq!(store.find(&"missing"), None);
    }

    #[test]
    fn test_iter_in_label_order() {
        let mut store = VertexStore::<&str, i64>::new();
        for label in ["t", "s", "b", "a"] {
            store.get_or_create(&label);
        }
        let labels: Vec<_> = store.iter().map(|(_, vertex)| *vertex.label()).collect();
        assert_eq!(labels, vec!["a", "b", "s", "t"]);
    }

    #[test]
    fn test_edge_accessors() {
        let mut store = VertexStore::<u32, i64>::new();
        let u = store.get_or_create(&1);
        let v = store.get_or_create(&2);
        store.get_mut(u).unwrap().residual_adj_mut().insert(v, 5);
        store.get_mut(u).unwrap().flow_adj_mut().insert(v, 0);
        *store.residual_mut(u, v).unwrap() -= 2;
        *store.flow_mut(u, v).unwrap() += 2;
        assert_eq!(store.residual(u, v), Some(3));
        assert_eq!(store.flow(u, v), Some(2));
        assert_eq!(store.residual(v, u), None);
        assert_eq!(store.flow(7, u), None);
    }

    #[test]
    fn test_clear() {
        let mut store = VertexStore::<&str, i64>::new();
        store.get_or_create(&"a");
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.find(&"a"), None);
        assert_eq!(store.get_or_create(&"b"), 0);
    }
}
