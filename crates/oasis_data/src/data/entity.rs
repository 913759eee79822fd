use super::vector::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Species of a mobile organism. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Prey,
    Predator,
}

/// What an organism is, as reported to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganismKind {
    Tree,
    Animal(AnimalKind),
}

/// Unique identification of an organism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub kind: OrganismKind,
}

/// Integer ground-plane cell `(round(x), round(z))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridKey {
    pub x: i32,
    pub z: i32,
}

impl GridKey {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell under a world position. Halves round to even.
    ///
    /// Non-finite coordinates saturate (NaN maps to 0); positions are validated
    /// before they reach here, so this only matters for direct callers.
    pub fn from_position(pos: Vec3) -> Self {
        Self {
            x: pos.x.round_ties_even() as i32,
            z: pos.z.round_ties_even() as i32,
        }
    }
}

/// Where an organism stands and which occupancy cell it holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub grid_key: GridKey,
}

impl Placement {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            grid_key: GridKey::from_position(position),
        }
    }
}

/// Lifecycle counters and resource gauges shared by every organism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub age: f64,
    pub lifespan_remaining: f64,
    /// 0-100. Never consumed yet.
    pub water: f64,
    /// 0-100. Never consumed yet.
    pub nutrition: f64,
    pub alive: bool,
    pub enabled: bool,
}

impl Vitals {
    pub fn new(lifespan: f64, water: f64, nutrition: f64) -> Self {
        Self {
            age: 0.0,
            lifespan_remaining: lifespan,
            water,
            nutrition,
            alive: true,
            enabled: true,
        }
    }

    /// True while the organism still takes part in ticks.
    pub fn is_active(&self) -> bool {
        self.alive && self.enabled
    }
}

/// Tree visual parts whose size the simulation governs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantBody {
    pub trunk_scale: Vec3,
    pub foliage_scale: Vec3,
    /// Foliage sits on top of the trunk.
    pub foliage_offset: Vec3,
}

/// Sleep/wake state. Each variant carries its own countdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Activity {
    Awake { remaining: f64 },
    Sleeping { remaining: f64 },
}

/// Independent eye-look state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gaze {
    pub target: Option<Vec3>,
    /// Degrees, relative to the body heading.
    pub yaw: f64,
    /// Degrees; positive looks down.
    pub pitch: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimalState {
    kind: AnimalKind,
    pub scale: Vec3,
    /// Yaw in degrees, `[0, 360)`. 0 faces +z.
    pub heading: f64,
    pub speed: f64,
    pub rotation_speed: f64,
    pub target: Option<Vec3>,
    pub moving: bool,
    pub activity: Activity,
    pub gaze: Gaze,
}

impl AnimalState {
    pub fn new(kind: AnimalKind, scale: Vec3, awake_duration: f64) -> Self {
        Self {
            kind,
            scale,
            heading: 0.0,
            speed: 0.0,
            rotation_speed: 0.0,
            target: None,
            moving: false,
            activity: Activity::Awake {
                remaining: awake_duration,
            },
            gaze: Gaze::default(),
        }
    }

    pub fn kind(&self) -> AnimalKind {
        self.kind
    }

    pub fn is_sleeping(&self) -> bool {
        matches!(self.activity, Activity::Sleeping { .. })
    }

    pub fn sleep_time_remaining(&self) -> f64 {
        match self.activity {
            Activity::Sleeping { remaining } => remaining,
            Activity::Awake { .. } => 0.0,
        }
    }

    pub fn awake_time_remaining(&self) -> f64 {
        match self.activity {
            Activity::Awake { remaining } => remaining,
            Activity::Sleeping { .. } => 0.0,
        }
    }
}

/// Behavior-specific state, dispatched by the tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrganismBody {
    Plant(PlantBody),
    Animal(AnimalState),
}

/// An organism as a bundle of components, before it is placed in a world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub identity: Identity,
    pub placement: Placement,
    pub vitals: Vitals,
    pub body: OrganismBody,
}

/// Coarse state used by presentation to pick an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganismStatus {
    Dead,
    Disabled,
    Growing,
    Sleeping,
    Moving,
    Idle,
}

/// Per-tick read-only view handed to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrganismView {
    pub id: Uuid,
    pub kind: OrganismKind,
    pub position: Vec3,
    pub heading: f64,
    /// Body scale for animals, trunk scale for trees.
    pub scale: Vec3,
    pub sleeping: bool,
    pub moving: bool,
    pub alive: bool,
    pub enabled: bool,
    pub age: f64,
    pub lifespan_remaining: f64,
    pub status: OrganismStatus,
}
