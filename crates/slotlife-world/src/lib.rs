//! World simulation engine.
//!
//! This module implements the toroidal grid of slots where creatures move,
//! fight, mate and die.

pub mod chance;
pub mod creature;
pub mod grid;
pub mod render;
pub mod simulation;

pub use chance::Chance;
pub use creature::{Creature, Offspring, Withdrawal};
pub use grid::{Cell, Grid, Traversal};
pub use render::{EnergyBand, Glyph, Tint};
pub use simulation::Simulation;
