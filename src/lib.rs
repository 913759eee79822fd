//! Headless driver for the Oasis living-entity simulation.
//!
//! `oasis_core` decides how a single organism behaves; this crate owns the
//! population. [`model::world::World`] stores organisms in a `hecs` arena,
//! lends them the shared occupancy map, clock and RNG each tick, and reports
//! what happened as [`oasis_data::LiveEvent`]s. [`app::App`] runs a world at a
//! fixed frame rate for the `oasis` binary.

pub mod app;
pub mod model;
