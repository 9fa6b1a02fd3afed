use std::error::Error;
use std::io;

use clap::Parser;
use separation_cli::command::Command;
use separation_cli::config::{Args, Config};
use separation_cli::handlers;
use separation_cli::load::load_graph;
use separation_cli::state::GameState;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let config: Config = Args::parse().into();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let (graph, stats) = load_graph(&config)?;
    println!(
        "Loaded {} actors, {} movies, {} credits in {:.1}ms",
        stats.actors, stats.movies, stats.credits, stats.load_time_ms
    );

    let mut state = GameState::new(graph, config.top_n, config.seed);
    let mut stdout = io::stdout().lock();

    if let Some(center) = config.center.clone() {
        if let Err(e) = handlers::execute(&mut state, Command::Universe(center), &mut stdout) {
            eprintln!("Error: {}", e);
        }
    }

    handlers::run(&mut state, io::stdin().lock(), &mut stdout)?;
    Ok(())
}
