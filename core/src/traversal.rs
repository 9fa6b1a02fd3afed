use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeResult<V> {
    pub vertex: V,
    pub in_degree: usize,
    pub out_degree: usize,
}

/// Average separation of a vertex from everything it can reach.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparationResult<V> {
    pub vertex: V,
    pub average_separation: f64,
    /// Vertices reachable from `vertex`, not counting itself.
    pub reachable: usize,
}

/// Build the BFS shortest-path tree of `graph` rooted at `source`.
///
/// The result holds exactly the vertices reachable from `source`. Each
/// non-root vertex has one outgoing arc, to its BFS parent, labeled with a
/// clone of the source graph's `parent -> vertex` label. The root has
/// out-degree 0, so walking out-arcs from any vertex ends at `source`.
///
/// When several shortest paths exist the parent is whichever neighbor was
/// dequeued first, which depends on neighbor iteration order.
///
/// Returns an empty graph if `source` is not in `graph`.
pub fn bfs<V, E>(graph: &Graph<V, E>, source: &V) -> Graph<V, E>
where
    V: Eq + Hash + Clone + Debug,
    E: Clone,
{
    let mut tree = Graph::new();
    if !graph.has_vertex(source) {
        return tree;
    }

    // parents maps vertex → BFS parent; the source maps to None.
    let mut parents: HashMap<V, Option<V>> = HashMap::new();
    let mut queue: VecDeque<V> = VecDeque::new();

    parents.insert(source.clone(), None);
    queue.push_back(source.clone());

    while let Some(current) = queue.pop_front() {
        for next in graph.out_neighbors(&current) {
            if !parents.contains_key(next) {
                parents.insert(next.clone(), Some(current.clone()));
                queue.push_back(next.clone());
            }
        }
        tree.insert_vertex(current);
    }

    for (vertex, parent) in &parents {
        let Some(parent) = parent else { continue };
        if let Some(label) = graph.label(parent, vertex) {
            tree.insert_arc(vertex.clone(), parent.clone(), label.clone());
        }
    }

    debug!(
        source = ?source,
        vertices = tree.num_vertices(),
        "bfs tree built"
    );
    tree
}

/// Walk parent arcs from `start` to the root of a BFS tree.
///
/// Returns the vertices from `start` to the root, both inclusive; the hop
/// count is `len - 1`.
pub fn get_path<V, E>(tree: &Graph<V, E>, start: &V) -> Result<Vec<V>>
where
    V: Eq + Hash + Clone + Debug,
{
    tree.require_vertex(start)?;

    let mut path = vec![start.clone()];
    let mut current = start;

    while let Some(parent) = tree.out_neighbors(current).next() {
        if path.len() >= tree.num_vertices() {
            return Err(GraphError::NotATree(format!("{:?}", start)));
        }
        path.push(parent.clone());
        current = parent;
    }

    Ok(path)
}

/// All vertices ordered by descending in-degree.
///
/// Stable over `vertices()` order, so equal in-degree vertices come out in
/// whatever order the graph iterates them.
pub fn vertices_by_in_degree<V, E>(graph: &Graph<V, E>) -> Vec<V>
where
    V: Eq + Hash + Clone + Debug,
{
    let mut vertices: Vec<V> = graph.vertices().cloned().collect();
    vertices.sort_by_key(|v| std::cmp::Reverse(graph.in_degree(v)));
    vertices
}

/// Return vertices ranked by in-degree.
///
/// If `top_n` is 0, returns all vertices. Otherwise returns the top N.
pub fn highest_in_degree<V, E>(graph: &Graph<V, E>, top_n: usize) -> Vec<DegreeResult<V>>
where
    V: Eq + Hash + Clone + Debug,
{
    let mut ranked = vertices_by_in_degree(graph);
    if top_n > 0 && top_n < ranked.len() {
        ranked.truncate(top_n);
    }

    ranked
        .into_iter()
        .map(|vertex| DegreeResult {
            in_degree: graph.in_degree(&vertex),
            out_degree: graph.out_degree(&vertex),
            vertex,
        })
        .collect()
}

/// Mean hop distance from `root` to every other vertex of a BFS tree.
///
/// Children of a vertex are its in-neighbors (arcs point child → parent), so
/// depths are accumulated by descending through `in_neighbors`. The sum is
/// divided by `num_vertices() - 1`.
///
/// Errors if `root` is absent, or if the tree holds nothing but the root.
pub fn average_separation<V, E>(tree: &Graph<V, E>, root: &V) -> Result<f64>
where
    V: Eq + Hash + Clone + Debug,
{
    tree.require_vertex(root)?;
    if tree.num_vertices() <= 1 {
        return Err(GraphError::SingleVertexTree);
    }

    let total = depth_sum(tree, root);
    Ok(total as f64 / (tree.num_vertices() - 1) as f64)
}

/// Sum of depths below `root`, iterative so deep trees don't overflow the
/// call stack. Each vertex is counted once.
fn depth_sum<V, E>(tree: &Graph<V, E>, root: &V) -> u64
where
    V: Eq + Hash + Clone + Debug,
{
    let mut total = 0u64;
    let mut seen: HashSet<&V> = HashSet::new();
    let mut stack: Vec<(&V, u64)> = vec![(root, 0)];
    seen.insert(root);

    while let Some((vertex, depth)) = stack.pop() {
        total += depth;
        for child in tree.in_neighbors(vertex) {
            if seen.insert(child) {
                stack.push((child, depth + 1));
            }
        }
    }

    total
}

/// Average separation of `source` computed straight from BFS distances.
///
/// Equivalent to `average_separation(&bfs(graph, source), source)` without
/// materializing the tree or cloning labels. Returns None when nothing but
/// `source` itself is reachable.
fn separation_from<V, E>(graph: &Graph<V, E>, source: &V) -> Option<(f64, usize)>
where
    V: Eq + Hash + Clone + Debug,
{
    let mut distance: HashMap<&V, u64> = HashMap::new();
    let mut queue: VecDeque<&V> = VecDeque::new();
    let mut total = 0u64;

    distance.insert(source, 0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let depth = distance[current];
        total += depth;
        for next in graph.out_neighbors(current) {
            if !distance.contains_key(next) {
                distance.insert(next, depth + 1);
                queue.push_back(next);
            }
        }
    }

    let reachable = distance.len() - 1;
    if reachable == 0 {
        return None;
    }
    Some((total as f64 / reachable as f64, reachable))
}

/// Rank vertices by the average separation of their own BFS tree, smallest
/// first.
///
/// Runs one BFS per vertex, O(V·(V+E)) per call; nothing is cached between
/// calls. Vertices that reach nothing have no defined separation and are left
/// out. If `top_n` is 0, returns every ranked vertex.
pub fn lowest_average_separation<V, E>(graph: &Graph<V, E>, top_n: usize) -> Vec<SeparationResult<V>>
where
    V: Eq + Hash + Clone + Debug,
{
    debug!(vertices = graph.num_vertices(), "ranking by average separation");

    let mut results: Vec<SeparationResult<V>> = graph
        .vertices()
        .filter_map(|vertex| {
            let (average_separation, reachable) = separation_from(graph, vertex)?;
            Some(SeparationResult {
                vertex: vertex.clone(),
                average_separation,
                reachable,
            })
        })
        .collect();

    results.sort_by(|a, b| a.average_separation.total_cmp(&b.average_separation));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}

/// Vertices of `graph` that are not in `subgraph`.
///
/// With `subgraph = bfs(graph, s)` this is the set unreachable from `s`.
pub fn missing_vertices<V, E>(graph: &Graph<V, E>, subgraph: &Graph<V, E>) -> HashSet<V>
where
    V: Eq + Hash + Clone + Debug,
{
    graph
        .vertices()
        .filter(|v| !subgraph.has_vertex(v))
        .cloned()
        .collect()
}

/// Random walk of up to `steps` hops from `start`.
///
/// Each hop picks uniformly among the current vertex's out-neighbors. A
/// 0-step walk is `[start]`. The walk stops early at a vertex with no
/// out-neighbors. Returns an empty walk if `start` is absent or has no
/// out-neighbors at all.
pub fn random_walk<V, E, R>(graph: &Graph<V, E>, start: &V, steps: usize, rng: &mut R) -> Vec<V>
where
    V: Eq + Hash + Clone + Debug,
    R: Rng + ?Sized,
{
    let mut walk = Vec::new();
    if graph.out_degree(start) == 0 {
        return walk;
    }

    walk.push(start.clone());
    let mut current = start;

    for _ in 0..steps {
        let neighbors: Vec<&V> = graph.out_neighbors(current).collect();
        let Some(&next) = neighbors.choose(rng) else {
            break;
        };
        walk.push(next.clone());
        current = next;
    }

    walk
}
