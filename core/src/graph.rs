use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{GraphError, Result};

/// Index of a label slot in the graph's label arena.
///
/// Both arcs of an undirected edge point at the same slot, which is what makes
/// a label mutated through `a -> b` visible through `b -> a`.
pub type LabelId = usize;

/// In-memory labeled graph: adjacency maps in both directions + label arena.
///
/// `outgoing[a][b]` and `incoming[b][a]` hold the same `LabelId` for the arc
/// `a -> b`. Every vertex has an entry (possibly empty) in both maps, so the
/// key set of `outgoing` is the vertex set.
///
/// The arena only grows. Overwriting an arc allocates a new slot and the old
/// one stays allocated (see `num_labels`), which suits graphs that are built
/// once and then queried.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    outgoing: HashMap<V, HashMap<V, LabelId>>,
    incoming: HashMap<V, HashMap<V, LabelId>>,
    labels: Vec<E>,
}

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            labels: Vec::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize, label_count: usize) -> Self {
        Self {
            outgoing: HashMap::with_capacity(vertex_count),
            incoming: HashMap::with_capacity(vertex_count),
            labels: Vec::with_capacity(label_count),
        }
    }

    /// Add a vertex. No-op if it is already present.
    pub fn insert_vertex(&mut self, vertex: V) {
        if self.outgoing.contains_key(&vertex) {
            return;
        }
        self.outgoing.insert(vertex.clone(), HashMap::new());
        self.incoming.insert(vertex, HashMap::new());
    }

    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.outgoing.contains_key(vertex)
    }

    /// `Ok(())` if the vertex is present, `VertexNotFound` otherwise.
    pub fn require_vertex(&self, vertex: &V) -> Result<()> {
        if self.has_vertex(vertex) {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound(format!("{:?}", vertex)))
        }
    }

    /// Add or overwrite the arc `from -> to`. Both endpoints must exist.
    ///
    /// Overwriting gives the arc a fresh label slot; the reverse arc of an
    /// earlier undirected insertion keeps the old one.
    pub fn insert_directed(&mut self, from: V, to: V, label: E) -> Result<LabelId> {
        self.require_vertex(&from)?;
        self.require_vertex(&to)?;
        let id = self.push_label(label);
        self.link(from, to, id);
        Ok(id)
    }

    /// Add `a -> b` and `b -> a` sharing a single label slot. Both endpoints
    /// must exist.
    pub fn insert_undirected(&mut self, a: V, b: V, label: E) -> Result<LabelId> {
        self.require_vertex(&a)?;
        self.require_vertex(&b)?;
        let id = self.push_label(label);
        self.link(a.clone(), b.clone(), id);
        self.link(b, a, id);
        Ok(id)
    }

    /// Fetch the label on `a -> b`, or create an undirected edge with `make()`
    /// as its label if there is none yet. Returns the label for in-place
    /// accumulation.
    pub fn undirected_label_or_insert_with<F>(&mut self, a: V, b: V, make: F) -> Result<&mut E>
    where
        F: FnOnce() -> E,
    {
        let id = match self.label_id(&a, &b) {
            Some(id) => id,
            None => self.insert_undirected(a, b, make())?,
        };
        Ok(&mut self.labels[id])
    }

    /// Bulk load undirected edges, creating endpoints as needed.
    pub fn extend_undirected<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (V, V, E)>,
    {
        for (a, b, label) in edges {
            self.insert_vertex(a.clone());
            self.insert_vertex(b.clone());
            let id = self.push_label(label);
            self.link(a.clone(), b.clone(), id);
            self.link(b, a, id);
        }
    }

    /// Insert `from -> to`, adding missing endpoints first.
    pub(crate) fn insert_arc(&mut self, from: V, to: V, label: E) -> LabelId {
        self.insert_vertex(from.clone());
        self.insert_vertex(to.clone());
        let id = self.push_label(label);
        self.link(from, to, id);
        id
    }

    /// Label slot of `from -> to`, if the arc exists.
    pub fn label_id(&self, from: &V, to: &V) -> Option<LabelId> {
        self.outgoing.get(from)?.get(to).copied()
    }

    /// Label on `from -> to`. `None` means there is no such arc.
    pub fn label(&self, from: &V, to: &V) -> Option<&E> {
        self.label_id(from, to).map(|id| &self.labels[id])
    }

    /// Mutable label on `from -> to`. For undirected edges this is the slot
    /// shared with `to -> from`.
    pub fn label_mut(&mut self, from: &V, to: &V) -> Option<&mut E> {
        let id = self.label_id(from, to)?;
        Some(&mut self.labels[id])
    }

    /// Vertices `x` with an arc `vertex -> x`. Empty for an absent vertex.
    pub fn out_neighbors<'a>(&'a self, vertex: &V) -> impl Iterator<Item = &'a V> + 'a {
        self.outgoing.get(vertex).into_iter().flat_map(|m| m.keys())
    }

    /// Vertices `x` with an arc `x -> vertex`. Empty for an absent vertex.
    pub fn in_neighbors<'a>(&'a self, vertex: &V) -> impl Iterator<Item = &'a V> + 'a {
        self.incoming.get(vertex).into_iter().flat_map(|m| m.keys())
    }

    pub fn out_degree(&self, vertex: &V) -> usize {
        self.outgoing.get(vertex).map_or(0, |m| m.len())
    }

    pub fn in_degree(&self, vertex: &V) -> usize {
        self.incoming.get(vertex).map_or(0, |m| m.len())
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.outgoing.keys()
    }

    pub fn num_vertices(&self) -> usize {
        self.outgoing.len()
    }

    /// Directed arc count. An undirected edge counts twice.
    pub fn num_arcs(&self) -> usize {
        self.outgoing.values().map(|m| m.len()).sum()
    }

    /// Number of label slots allocated, including ones orphaned by overwrites.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Approximate memory usage in bytes (labels counted by their inline size).
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let arc = size_of::<V>() + size_of::<LabelId>() + 8;
        let vertex_mem = self.outgoing.len() * 2 * (size_of::<V>() + 48);
        let out_arcs: usize = self.outgoing.values().map(|m| m.len() * arc).sum();
        let in_arcs: usize = self.incoming.values().map(|m| m.len() * arc).sum();
        let label_mem = self.labels.len() * size_of::<E>();

        vertex_mem + out_arcs + in_arcs + label_mem
    }

    fn push_label(&mut self, label: E) -> LabelId {
        self.labels.push(label);
        self.labels.len() - 1
    }

    fn link(&mut self, from: V, to: V, id: LabelId) {
        self.outgoing
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), id);
        self.incoming.entry(to).or_default().insert(from, id);
    }
}

impl<V, E> Default for Graph<V, E>
where
    V: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
