//! Core data structures for the Oasis simulation.

pub mod entity;
pub mod environment;
pub mod vector;
