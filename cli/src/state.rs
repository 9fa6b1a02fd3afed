use rand::rngs::StdRng;
use rand::SeedableRng;
use separation_core::bfs;
use tracing::info;

use crate::command::CommandError;
use crate::load::CostarGraph;

/// The current center and its shortest-path tree.
pub struct Universe {
    pub center: String,
    pub tree: CostarGraph,
}

/// Everything a command can read or change, passed explicitly to handlers.
pub struct GameState {
    pub graph: CostarGraph,
    pub universe: Option<Universe>,
    pub top_n: usize,
    pub running: bool,
    pub rng: StdRng,
}

impl GameState {
    pub fn new(graph: CostarGraph, top_n: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            graph,
            universe: None,
            top_n,
            running: true,
            rng,
        }
    }

    /// Make `name` the center, rebuilding the BFS tree from the full graph.
    pub fn set_center(&mut self, name: &str) -> Result<&Universe, CommandError> {
        let center = name.to_string();
        if !self.graph.has_vertex(&center) {
            return Err(CommandError::NotInGraph(center));
        }

        let tree = bfs(&self.graph, &center);
        info!(center = %center, connected = tree.num_vertices() - 1, "universe center changed");

        Ok(&*self.universe.insert(Universe { center, tree }))
    }

    /// The current universe, or `NoUniverse` if no center was chosen yet.
    pub fn universe(&self) -> Result<&Universe, CommandError> {
        self.universe.as_ref().ok_or(CommandError::NoUniverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn graph() -> CostarGraph {
        let mut g = CostarGraph::new();
        g.extend_undirected(vec![(
            "A".to_string(),
            "B".to_string(),
            BTreeSet::from(["M".to_string()]),
        )]);
        g.insert_vertex("C".to_string());
        g
    }

    #[test]
    fn test_no_universe_initially() {
        let state = GameState::new(graph(), 5, Some(1));
        assert!(matches!(state.universe(), Err(CommandError::NoUniverse)));
        assert!(state.running);
    }

    #[test]
    fn test_set_center() {
        let mut state = GameState::new(graph(), 5, Some(1));
        let universe = state.set_center("A").unwrap();
        assert_eq!(universe.center, "A");
        assert_eq!(universe.tree.num_vertices(), 2);
        assert_eq!(state.universe().unwrap().center, "A");
    }

    #[test]
    fn test_set_unknown_center_keeps_previous() {
        let mut state = GameState::new(graph(), 5, Some(1));
        state.set_center("A").unwrap();
        assert!(matches!(
            state.set_center("Nobody"),
            Err(CommandError::NotInGraph(_))
        ));
        assert_eq!(state.universe().unwrap().center, "A");
    }
}
