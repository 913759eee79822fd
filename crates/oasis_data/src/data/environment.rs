use super::entity::OrganismKind;
use super::vector::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Something that happened during a tick, reported to the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum LiveEvent {
    /// A new organism entered the world.
    Spawned {
        id: Uuid,
        kind: OrganismKind,
        tick: u64,
        position: Vec3,
    },
    /// An organism reached the end of its lifespan.
    Expired {
        id: Uuid,
        kind: OrganismKind,
        tick: u64,
        age: f64,
    },
    /// An organism was removed by the driver.
    Destroyed { id: Uuid, tick: u64 },
    FellAsleep { id: Uuid, tick: u64 },
    Woke { id: Uuid, tick: u64 },
    /// A move was refused because another organism held the cell.
    Retreated { id: Uuid, tick: u64, from: Vec3 },
}
