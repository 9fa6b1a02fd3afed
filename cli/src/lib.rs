//! separation-cli: the "center of the universe" game over separation-core.
//!
//! Loads actors, movies and credits from pipe-delimited files into a costar
//! graph, then answers line-oriented commands (set the center, print a
//! path, separation statistics, rankings) against it.

pub mod command;
pub mod config;
pub mod handlers;
pub mod load;
pub mod state;
