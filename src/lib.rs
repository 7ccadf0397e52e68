//! **mazescape** is a tile maze generation, route finding and text persistence library.
//!
//! A maze is a rectangular grid of `Wall`/`Open` tiles. Generation carves a
//! perfect maze (a spanning tree over the odd-indexed cell lattice) and punches
//! one entrance into the left and right border columns. Solving finds a route
//! between the two entrances with an exhaustive depth first search.

pub mod cells;
pub mod displays;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod maze;
pub mod pathing;
pub mod storage;
pub mod units;
mod utils;
