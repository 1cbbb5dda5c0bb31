//! Obstacle candidate generators for the pathfinding visualizer.
//!
//! A generator only proposes coordinates; it never touches a grid. The caller
//! decides which candidates to paint (skipping endpoints and occupied cells)
//! and how fast.

pub mod mapgen;

pub use mapgen::{MazeGen, Orientation};
