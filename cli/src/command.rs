use std::io;
use std::str::FromStr;

use separation_core::GraphError;
use thiserror::Error;

use crate::config::DEFAULT_WALK_STEPS;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    /// `u <name>`: make `name` the center of the universe.
    Universe(String),
    /// `p <name>`: shortest path from `name` to the center.
    Path(String),
    /// `a`: average separation from the center.
    Average,
    /// `s`: number of actors connected to the center.
    Size,
    /// `i`: actors with infinite separation (not connected to the center).
    Infinite,
    /// `d`: actors with the most costars.
    Degree,
    /// `l`: actors with the lowest average separation.
    Lowest,
    /// `w <name> [steps]`: random walk through costars. Holds the whole
    /// argument; [`walk_target`] splits it once the graph is known.
    Walk(String),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '{0}', type h for help")]
    Unknown(String),

    #[error("command '{0}' needs an actor name")]
    MissingArgument(char),

    #[error("no center selected, use 'u <name>' first")]
    NoUniverse,

    #[error("{0} is not in the graph")]
    NotInGraph(String),

    #[error("{name} is not connected to {center}")]
    NotConnected { name: String, center: String },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl FromStr for Command {
    type Err = CommandError;

    /// The first word must be a single letter (case-insensitive); the rest
    /// of the line is the argument.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let mut chars = word.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_lowercase(),
            _ => return Err(CommandError::Unknown(word.to_string())),
        };

        let name = || {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(letter))
            } else {
                Ok(rest.to_string())
            }
        };

        match letter {
            'q' => Ok(Command::Quit),
            'h' => Ok(Command::Help),
            'u' => Ok(Command::Universe(name()?)),
            'p' => Ok(Command::Path(name()?)),
            'a' => Ok(Command::Average),
            's' => Ok(Command::Size),
            'i' => Ok(Command::Infinite),
            'd' => Ok(Command::Degree),
            'l' => Ok(Command::Lowest),
            'w' => Ok(Command::Walk(name()?)),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

/// Split a `w` argument into an actor name and a step count.
///
/// An argument that names an actor as a whole is taken as-is, so `Apollo 13`
/// stays a name when such an actor exists. Otherwise a trailing integer is
/// the step count.
pub fn walk_target<F>(arg: &str, is_actor: F) -> (&str, usize)
where
    F: Fn(&str) -> bool,
{
    if !is_actor(arg) {
        if let Some((name, last)) = arg.rsplit_once(char::is_whitespace) {
            if let Ok(steps) = last.parse::<usize>() {
                return (name.trim_end(), steps);
            }
        }
    }
    (arg, DEFAULT_WALK_STEPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        line.parse().unwrap()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("q"), Command::Quit);
        assert_eq!(parse("Q"), Command::Quit);
        assert_eq!(parse("a"), Command::Average);
        assert_eq!(parse("  s  "), Command::Size);
        assert_eq!(parse("d"), Command::Degree);
        assert_eq!(parse("L"), Command::Lowest);
        assert_eq!(parse("i"), Command::Infinite);
        assert_eq!(parse("h"), Command::Help);
    }

    #[test]
    fn test_name_arguments() {
        assert_eq!(parse("u Kevin Bacon"), Command::Universe("Kevin Bacon".into()));
        assert_eq!(parse("P   Tom Hanks "), Command::Path("Tom Hanks".into()));
    }

    #[test]
    fn test_missing_argument() {
        assert!(matches!(
            "u".parse::<Command>(),
            Err(CommandError::MissingArgument('u'))
        ));
        assert!(matches!(
            "p   ".parse::<Command>(),
            Err(CommandError::MissingArgument('p'))
        ));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert!(matches!("".parse::<Command>(), Err(CommandError::Empty)));
        assert!(matches!("x".parse::<Command>(), Err(CommandError::Unknown(_))));
        assert!(matches!("quit".parse::<Command>(), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn test_walk_keeps_whole_argument() {
        assert_eq!(parse("w  Kevin Bacon 12 "), Command::Walk("Kevin Bacon 12".into()));
        assert!(matches!(
            "w".parse::<Command>(),
            Err(CommandError::MissingArgument('w'))
        ));
    }

    #[test]
    fn test_walk_target_steps() {
        let none = |_: &str| false;
        assert_eq!(walk_target("Kevin Bacon 12", none), ("Kevin Bacon", 12));
        assert_eq!(walk_target("Kevin Bacon", none), ("Kevin Bacon", DEFAULT_WALK_STEPS));
        assert_eq!(walk_target("1984", none), ("1984", DEFAULT_WALK_STEPS));
    }

    #[test]
    fn test_walk_target_name_ending_in_number() {
        let is_actor = |n: &str| n == "Apollo 13";
        assert_eq!(walk_target("Apollo 13", is_actor), ("Apollo 13", DEFAULT_WALK_STEPS));
        assert_eq!(walk_target("Apollo 13 4", is_actor), ("Apollo 13", 4));
        assert_eq!(walk_target("Apollo 7", is_actor), ("Apollo", 7));
    }
}
