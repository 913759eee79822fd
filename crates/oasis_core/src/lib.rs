//! # Oasis Core
//!
//! Deterministic rules for the Oasis living-entity simulation.
//!
//! This crate holds everything that decides how organisms behave, independent
//! of how they are stored or presented:
//! - Grid occupancy with one owner per cell
//! - Organism creation, aging, expiry and destruction
//! - Tree growth toward capped trunk and foliage sizes
//! - The animal state machine (steering, sleep cycle, gaze)
//! - A clamped global time scale and the game clock
//! - Configuration, metrics and structured logging
//!
//! Systems operate on component references and take the RNG as a parameter,
//! so a seeded `ChaCha8Rng` reproduces a run exactly.
//!
//! ## Example
//!
//! ```
//! use oasis_core::config::SimConfig;
//! use oasis_core::lifecycle::{advance, create_tree_with_rng, Advance};
//! use oasis_core::systems::plant;
//! use oasis_data::{OrganismBody, Vec3};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = SimConfig::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut tree = create_tree_with_rng(Vec3::new(4.0, 0.0, -2.0), &config, &mut rng);
//!
//! if let Advance::Step(dt) = advance(&mut tree.vitals, 1.0) {
//!     if let OrganismBody::Plant(body) = &mut tree.body {
//!         plant::grow(body, dt, &config.plant);
//!     }
//! }
//! assert_eq!(tree.vitals.age, 1.0);
//! ```

/// Global time scale and game clock
pub mod clock;
/// Configuration management for simulation parameters
pub mod config;
/// Typed errors for world operations
pub mod error;
/// Heading math and position validation
pub mod geometry;
/// Organism lifecycle (creation, aging, destruction, views)
pub mod lifecycle;
/// Tick metrics and logging setup
pub mod metrics;
/// One-owner-per-cell grid reservations
pub mod occupancy;
/// Per-kind behavior systems (plant growth, animal behavior)
pub mod systems;

pub use clock::{GameTime, SimulationClock};
pub use error::SimError;
pub use metrics::{init_logging, Metrics};
pub use occupancy::SpatialOccupancy;
