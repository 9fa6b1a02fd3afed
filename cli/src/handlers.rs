use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use separation_core::{
    average_separation, get_path, highest_in_degree, lowest_average_separation,
    missing_vertices, random_walk,
};
use tracing::debug;

use crate::command::{walk_target, Command, CommandError};
use crate::state::GameState;

pub const HELP: &str = "\
Commands:
\tq = quit game
\tu <name> = make <name> the center of the universe
\tp <name> = shortest path from <name> to the center
\ta = average separation of actors connected to the center
\ts = number of actors connected to the center
\ti = actors with infinite separation from the center
\td = actors with the most costars
\tl = actors with the lowest average separation (slow on large graphs)
\tw <name> [steps] = random walk through costars
\th = show this list";

/// Read commands from `input` until EOF or `q`, writing results to `out`.
///
/// Command errors are reported on `out` and the loop continues; only I/O
/// failures end it early.
pub fn run<R: BufRead, W: Write>(state: &mut GameState, input: R, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Welcome to the Kevin Bacon Game!")?;
    writeln!(out, "{}", HELP)?;
    writeln!(out)?;

    for line in input.lines() {
        let line = line?;
        match line.parse::<Command>().and_then(|cmd| execute(state, cmd, out)) {
            Ok(()) => {}
            Err(CommandError::Empty) => continue,
            Err(CommandError::Output(e)) => return Err(e),
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        writeln!(out)?;
        if !state.running {
            break;
        }
    }

    Ok(())
}

/// Execute a single command against the game state.
pub fn execute<W: Write>(state: &mut GameState, command: Command, out: &mut W) -> Result<(), CommandError> {
    debug!(?command, "executing command");

    match command {
        Command::Quit => {
            state.running = false;
            writeln!(out, "Goodbye!")?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Universe(name) => {
            let connected = state.set_center(&name)?.tree.num_vertices() - 1;
            writeln!(
                out,
                "{} is now the center of the universe, connected to {}/{} actors",
                name,
                connected,
                state.graph.num_vertices() - 1
            )?;
        }
        Command::Path(name) => render_path(state, &name, out)?,
        Command::Average => {
            let universe = state.universe()?;
            let avg = average_separation(&universe.tree, &universe.center)?;
            writeln!(out, "The average separation from {} is {:.4}", universe.center, avg)?;
        }
        Command::Size => {
            let universe = state.universe()?;
            writeln!(
                out,
                "{} actors are connected to {}",
                universe.tree.num_vertices() - 1,
                universe.center
            )?;
        }
        Command::Infinite => {
            let universe = state.universe()?;
            let missing: BTreeSet<String> =
                missing_vertices(&state.graph, &universe.tree).into_iter().collect();
            writeln!(
                out,
                "{} actors have infinite separation from {}",
                missing.len(),
                universe.center
            )?;
            for name in &missing {
                writeln!(out, "\t{}", name)?;
            }
        }
        Command::Degree => {
            writeln!(out, "The actors with the top {} most costars are:", state.top_n)?;
            for (rank, dr) in highest_in_degree(&state.graph, state.top_n).iter().enumerate() {
                writeln!(out, "\t{}. {} ({} costars)", rank + 1, dr.vertex, dr.in_degree)?;
            }
        }
        Command::Lowest => {
            writeln!(
                out,
                "The actors with the lowest {} average separation values are:",
                state.top_n
            )?;
            for (rank, sr) in lowest_average_separation(&state.graph, state.top_n)
                .iter()
                .enumerate()
            {
                writeln!(
                    out,
                    "\t{}. {} ({:.4} over {} actors)",
                    rank + 1,
                    sr.vertex,
                    sr.average_separation,
                    sr.reachable
                )?;
            }
        }
        Command::Walk(arg) => {
            let (name, steps) = walk_target(&arg, |n| state.graph.has_vertex(&n.to_string()));
            let name = name.to_string();
            if !state.graph.has_vertex(&name) {
                return Err(CommandError::NotInGraph(name));
            }
            let walk = random_walk(&state.graph, &name, steps, &mut state.rng);
            if walk.is_empty() {
                writeln!(out, "{} has no costars to walk to", name)?;
            } else {
                writeln!(out, "{}", walk.join(" -> "))?;
            }
        }
    }

    Ok(())
}

/// Print `name`'s number and the movie that links each hop toward the center.
fn render_path<W: Write>(state: &GameState, name: &str, out: &mut W) -> Result<(), CommandError> {
    let universe = state.universe()?;
    let name = name.to_string();

    if !state.graph.has_vertex(&name) {
        return Err(CommandError::NotInGraph(name));
    }
    if !universe.tree.has_vertex(&name) {
        return Err(CommandError::NotConnected {
            name,
            center: universe.center.clone(),
        });
    }

    let path = get_path(&universe.tree, &name)?;
    writeln!(out, "{}'s number is {}", name, path.len() - 1)?;

    for hop in path.windows(2) {
        let movies = universe
            .tree
            .label(&hop[0], &hop[1])
            .map(|titles| titles.iter().map(String::as_str).collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        writeln!(out, "{} appeared in [{}] with {}", hop[0], movies, hop[1])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::CostarGraph;
    use std::collections::BTreeSet;
    use std::io::Cursor;

    fn titles(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// Bacon–Hanks (Apollo 13), Hanks–Ryan (Sleepless, You've Got Mail),
    /// Streep–Bacon (The River Wild); Loner has no costars.
    fn fixture() -> GameState {
        let mut g = CostarGraph::new();
        g.extend_undirected(vec![
            ("Kevin Bacon".to_string(), "Tom Hanks".to_string(), titles(&["Apollo 13"])),
            (
                "Tom Hanks".to_string(),
                "Meg Ryan".to_string(),
                titles(&["Sleepless in Seattle", "You've Got Mail"]),
            ),
            ("Meryl Streep".to_string(), "Kevin Bacon".to_string(), titles(&["The River Wild"])),
        ]);
        g.insert_vertex("Loner".to_string());
        GameState::new(g, 2, Some(9))
    }

    fn exec(state: &mut GameState, line: &str) -> Result<String, CommandError> {
        let mut out = Vec::new();
        execute(state, line.parse()?, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_universe_and_path() {
        let mut state = fixture();
        let out = exec(&mut state, "u Kevin Bacon").unwrap();
        assert!(out.contains("Kevin Bacon is now the center of the universe"));
        assert!(out.contains("connected to 3/4 actors"));

        let out = exec(&mut state, "p Meg Ryan").unwrap();
        assert_eq!(
            out,
            "Meg Ryan's number is 2\n\
             Meg Ryan appeared in [Sleepless in Seattle, You've Got Mail] with Tom Hanks\n\
             Tom Hanks appeared in [Apollo 13] with Kevin Bacon\n"
        );
    }

    #[test]
    fn test_path_of_center_is_zero() {
        let mut state = fixture();
        exec(&mut state, "u Kevin Bacon").unwrap();
        assert_eq!(exec(&mut state, "p Kevin Bacon").unwrap(), "Kevin Bacon's number is 0\n");
    }

    #[test]
    fn test_path_errors() {
        let mut state = fixture();
        assert!(matches!(exec(&mut state, "p Tom Hanks"), Err(CommandError::NoUniverse)));

        exec(&mut state, "u Kevin Bacon").unwrap();
        assert!(matches!(exec(&mut state, "p Nobody"), Err(CommandError::NotInGraph(_))));
        assert!(matches!(
            exec(&mut state, "p Loner"),
            Err(CommandError::NotConnected { .. })
        ));
    }

    #[test]
    fn test_average_and_size() {
        let mut state = fixture();
        exec(&mut state, "u Kevin Bacon").unwrap();
        // Hanks 1, Streep 1, Ryan 2
        assert_eq!(
            exec(&mut state, "a").unwrap(),
            "The average separation from Kevin Bacon is 1.3333\n"
        );
        assert_eq!(
            exec(&mut state, "s").unwrap(),
            "3 actors are connected to Kevin Bacon\n"
        );
    }

    #[test]
    fn test_average_of_isolated_center() {
        let mut state = fixture();
        exec(&mut state, "u Loner").unwrap();
        assert!(matches!(
            exec(&mut state, "a"),
            Err(CommandError::Graph(separation_core::GraphError::SingleVertexTree))
        ));
    }

    #[test]
    fn test_infinite() {
        let mut state = fixture();
        exec(&mut state, "u Tom Hanks").unwrap();
        assert_eq!(
            exec(&mut state, "i").unwrap(),
            "1 actors have infinite separation from Tom Hanks\n\tLoner\n"
        );
    }

    #[test]
    fn test_degree_ranking() {
        let mut state = fixture();
        let out = exec(&mut state, "d").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "The actors with the top 2 most costars are:");
        assert!(lines[1].ends_with("(2 costars)"));
        assert!(lines[2].ends_with("(2 costars)"));
    }

    #[test]
    fn test_lowest_ranking() {
        let mut state = fixture();
        let out = exec(&mut state, "l").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        // Bacon and Hanks tie at (1+1+2)/3
        assert!(lines[1].contains("(1.3333 over 3 actors)"));
        assert!(lines[2].contains("(1.3333 over 3 actors)"));
    }

    #[test]
    fn test_walk() {
        let mut state = fixture();
        let out = exec(&mut state, "w Meg Ryan 1").unwrap();
        assert_eq!(out, "Meg Ryan -> Tom Hanks\n");

        let out = exec(&mut state, "w Loner 3").unwrap();
        assert_eq!(out, "Loner has no costars to walk to\n");
        assert!(matches!(exec(&mut state, "w Nobody"), Err(CommandError::NotInGraph(_))));
    }

    #[test]
    fn test_walk_name_ending_in_number() {
        let mut state = fixture();
        state.graph.insert_vertex("Agent 47".to_string());

        let out = exec(&mut state, "w Agent 47").unwrap();
        assert_eq!(out, "Agent 47 has no costars to walk to\n");

        match exec(&mut state, "w Agent 48") {
            Err(CommandError::NotInGraph(name)) => assert_eq!(name, "Agent"),
            other => panic!("expected NotInGraph, got {:?}", other),
        }
    }

    #[test]
    fn test_run_loop() {
        let mut state = fixture();
        let input = Cursor::new("u Kevin Bacon\n\nbogus\ns\nq\np Tom Hanks\n");
        let mut out = Vec::new();
        run(&mut state, input, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("Welcome to the Kevin Bacon Game!"));
        assert!(out.contains("Error: unknown command 'bogus', type h for help"));
        assert!(out.contains("3 actors are connected to Kevin Bacon"));
        assert!(out.contains("Goodbye!"));
        // loop stops at q
        assert!(!out.contains("Tom Hanks's number"));
        assert!(!state.running);
    }
}
