use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use separation_core::{Graph, GraphError};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

/// Actors keyed by name; each edge label is the set of movie titles two
/// actors share.
pub type CostarGraph = Graph<String, BTreeSet<String>>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: expected two '{delimiter}'-separated fields, got {content:?}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        delimiter: char,
        content: String,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Counters reported after a load.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadStats {
    pub actors: usize,
    pub movies: usize,
    pub credits: usize,
    /// Credits dropped because their movie or actor id is unknown.
    pub skipped: usize,
    pub load_time_ms: f64,
}

/// Load the three relation files named in `config` and build the costar graph.
pub fn load_graph(config: &Config) -> Result<(CostarGraph, LoadStats), LoadError> {
    let start = Instant::now();

    let actors: HashMap<String, String> =
        read_pairs(&config.actors_path, config.delimiter)?.into_iter().collect();
    let movies: HashMap<String, String> =
        read_pairs(&config.movies_path, config.delimiter)?.into_iter().collect();
    let credits = read_pairs(&config.movie_actors_path, config.delimiter)?;

    let (graph, mut stats) = build_graph(&actors, &movies, &credits)?;
    stats.load_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!(
        actors = stats.actors,
        movies = stats.movies,
        credits = stats.credits,
        skipped = stats.skipped,
        vertices = graph.num_vertices(),
        arcs = graph.num_arcs(),
        load_time_ms = stats.load_time_ms,
        "costar graph loaded"
    );

    Ok((graph, stats))
}

/// Build the costar graph from already-parsed relations.
///
/// `actors` maps actor id → name, `movies` maps movie id → title, `credits`
/// holds `(movie id, actor id)` pairs. Every actor becomes a vertex, and
/// every pair of actors credited in the same movie gets an undirected edge
/// whose title set grows in place as more shared movies are seen.
pub fn build_graph(
    actors: &HashMap<String, String>,
    movies: &HashMap<String, String>,
    credits: &[(String, String)],
) -> Result<(CostarGraph, LoadStats), LoadError> {
    let mut stats = LoadStats {
        actors: actors.len(),
        movies: movies.len(),
        credits: credits.len(),
        ..LoadStats::default()
    };

    // Group credited actor names by movie id. Titles are not unique (remakes
    // share them), so they only show up in edge labels.
    let mut casts: HashMap<&str, (&str, BTreeSet<&str>)> = HashMap::new();
    for (movie_id, actor_id) in credits {
        let (Some(title), Some(name)) = (movies.get(movie_id), actors.get(actor_id)) else {
            warn!(movie_id = %movie_id, actor_id = %actor_id, "skipping credit with unknown id");
            stats.skipped += 1;
            continue;
        };
        casts
            .entry(movie_id.as_str())
            .or_insert_with(|| (title.as_str(), BTreeSet::new()))
            .1
            .insert(name.as_str());
    }

    let mut graph = CostarGraph::with_capacity(actors.len(), credits.len());
    for name in actors.values() {
        graph.insert_vertex(name.clone());
    }

    for (title, cast) in casts.values() {
        let cast: Vec<&str> = cast.iter().copied().collect();
        for (i, a) in cast.iter().enumerate() {
            for b in &cast[i + 1..] {
                graph
                    .undirected_label_or_insert_with(a.to_string(), b.to_string(), BTreeSet::new)?
                    .insert(title.to_string());
            }
        }
    }

    Ok((graph, stats))
}

/// Read `id<delimiter>value` records. Blank lines are skipped, fields past the
/// second are ignored.
fn read_pairs(path: &Path, delimiter: char) -> Result<Vec<(String, String)>, LoadError> {
    let io_err = |source: io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut pairs = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        let trimmed = line.trim_end_matches('\r');
        if trimmed.trim().is_empty() {
            continue;
        }

        let mut fields = trimmed.split(delimiter);
        match (fields.next(), fields.next()) {
            (Some(id), Some(value)) => pairs.push((id.trim().to_string(), value.trim().to_string())),
            _ => {
                return Err(LoadError::Malformed {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    delimiter,
                    content: trimmed.to_string(),
                })
            }
        }
    }

    Ok(pairs)
}
