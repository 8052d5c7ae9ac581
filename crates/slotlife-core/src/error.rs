//! Error types for the simulation.

use crate::{CreatureId, Position};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("Cell {0} is already occupied")]
    Occupied(Position),

    #[error("Cell {0} has no occupant")]
    Vacant(Position),

    #[error("Offspring {offspring} is not being carried by {mother}")]
    NotCarried {
        offspring: CreatureId,
        mother: CreatureId,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
