//! Error types for the driver-facing API.
//!
//! Numeric trouble inside a tick is never reported through these; it is
//! substituted in place (see `geometry`). Errors only describe misuse of the
//! handle API or a bad configuration.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// The handle refers to an organism that has already been despawned.
    #[error("Stale organism handle")]
    StaleHandle,

    #[error("Unknown organism: {0}")]
    UnknownOrganism(uuid::Uuid),

    /// An animal-only operation was applied to a tree.
    #[error("Organism {0} is not an animal")]
    NotAnAnimal(uuid::Uuid),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
