use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_MOVIES_FILE: &str = "movies.txt";
pub const DEFAULT_ACTORS_FILE: &str = "actors.txt";
pub const DEFAULT_MOVIE_ACTORS_FILE: &str = "movie-actors.txt";
pub const DEFAULT_DELIMITER: char = '|';
pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_WALK_STEPS: usize = 5;

/// Command-line arguments for the `bacon` binary.
#[derive(Debug, Parser)]
#[command(
    name = "bacon",
    version,
    about = "Find how many movies separate any actor from the center of the universe"
)]
pub struct Args {
    /// Directory the relation files are resolved against.
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Movie file, one `movieId|title` per line.
    #[arg(long, default_value = DEFAULT_MOVIES_FILE)]
    pub movies: PathBuf,

    /// Actor file, one `actorId|name` per line.
    #[arg(long, default_value = DEFAULT_ACTORS_FILE)]
    pub actors: PathBuf,

    /// Credit file, one `movieId|actorId` per line.
    #[arg(long, default_value = DEFAULT_MOVIE_ACTORS_FILE)]
    pub movie_actors: PathBuf,

    /// Field delimiter used by all three files.
    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Actor to place at the center on startup.
    #[arg(long)]
    pub center: Option<String>,

    /// How many actors the ranking commands print.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Seed for random walks. Unset = seeded from the OS.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set (e.g. `info`, `separation_core=debug`).
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub movies_path: PathBuf,
    pub actors_path: PathBuf,
    pub movie_actors_path: PathBuf,
    pub delimiter: char,
    pub center: Option<String>,
    pub top_n: usize,
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movies_path: PathBuf::from(DEFAULT_MOVIES_FILE),
            actors_path: PathBuf::from(DEFAULT_ACTORS_FILE),
            movie_actors_path: PathBuf::from(DEFAULT_MOVIE_ACTORS_FILE),
            delimiter: DEFAULT_DELIMITER,
            center: None,
            top_n: DEFAULT_TOP_N,
            seed: None,
            log_level: "warn".to_string(),
        }
    }
}

impl From<Args> for Config {
    /// File arguments are joined onto `data_dir`; absolute paths win.
    fn from(args: Args) -> Self {
        Self {
            movies_path: args.data_dir.join(&args.movies),
            actors_path: args.data_dir.join(&args.actors),
            movie_actors_path: args.data_dir.join(&args.movie_actors),
            delimiter: args.delimiter,
            center: args.center.filter(|c| !c.trim().is_empty()),
            top_n: args.top_n,
            seed: args.seed,
            log_level: args.log_level,
        }
    }
}
