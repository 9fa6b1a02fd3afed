//! separation-core: generic labeled graph + shortest-path separation queries.
//!
//! A pure Rust library that maintains adjacency maps in both directions and
//! provides BFS shortest-path trees, path reconstruction, degree ranking,
//! average separation and random walks over them. No I/O; callers build the
//! graph and read results back as plain vectors and numbers.
//!
//! Single-threaded by design. Algorithms never mutate their input; `bfs`
//! returns a freshly allocated tree.

mod error;
mod graph;
mod traversal;

pub use error::{GraphError, Result};
pub use graph::{Graph, LabelId};
pub use traversal::{
    average_separation, bfs, get_path, highest_in_degree, lowest_average_separation,
    missing_vertices, random_walk, vertices_by_in_degree, DegreeResult, SeparationResult,
};
