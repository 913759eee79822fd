use crate::model::clock::SimulationClock;
use crate::model::config::SimConfig;
use crate::model::metrics::Metrics;
use crate::model::occupancy::SpatialOccupancy;
use oasis_data::LiveEvent;
use rand_chacha::ChaCha8Rng;

pub mod init;
pub mod logic;
pub mod state;
pub mod update;

pub use state::{AnimalComponents, OrganismComponents};

/// The set of living organisms and the shared state they act on.
///
/// Organisms are hecs entities carrying `Identity`, `Placement`, `Vitals` and
/// exactly one of `PlantBody` or `AnimalState`. Everything that must be seen
/// by more than one organism (the occupancy map, the clock, the RNG) is owned
/// here and lent to the systems for the duration of a phase.
pub struct World {
    pub tick: u64,
    pub ecs: hecs::World,
    pub occupancy: SpatialOccupancy,
    pub clock: SimulationClock,
    pub config: SimConfig,
    pub rng: ChaCha8Rng,
    pub metrics: Metrics,
    /// Events raised between ticks (spawn, destroy); drained by the next `update`.
    pending_events: Vec<LiveEvent>,
}
