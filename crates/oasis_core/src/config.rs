//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `oasis.toml` file. Every tunable the update rules read lives here.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `oasis.toml` file (overrides defaults)
//! 3. Command-line flags on the `oasis` binary (seed, time scale)
//!
//! ## Example `oasis.toml`
//!
//! ```toml
//! [world]
//! half_extent = 100.0
//! initial_trees = 8
//! initial_prey = 6
//! initial_predators = 2
//! seed = 42
//!
//! [animal]
//! max_step_dt = 0.1
//! speed_range = [2.0, 8.0]
//!
//! [prey]
//! lifespan_range = [30, 90]
//! ```

use oasis_data::{AnimalKind, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World-level driver configuration: extent, initial population and arrivals.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    /// Organisms spawn uniformly in `[-half_extent, half_extent]` on x and z.
    pub half_extent: f64,
    pub initial_trees: usize,
    pub initial_prey: usize,
    pub initial_predators: usize,
    pub tree_spawn_chance: f64,
    pub prey_spawn_chance: f64,
    pub predator_spawn_chance: f64,
    /// No random arrivals once the world holds this many organisms.
    pub max_population: usize,
    pub seed: Option<u64>,
    /// Occupancy maintenance runs every this many ticks.
    pub compact_interval: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            half_extent: 100.0,
            initial_trees: 8,
            initial_prey: 6,
            initial_predators: 2,
            tree_spawn_chance: 0.05,
            prey_spawn_chance: 0.03,
            predator_spawn_chance: 0.005,
            max_population: 2000,
            seed: None,
            compact_interval: 1,
        }
    }
}

/// Numeric sanity limits used by position validation.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BoundsConfig {
    pub position_limit: f64,
    /// Random targets and replacement positions fall in `[-safe_zone_half, safe_zone_half]`.
    pub safe_zone_half: f64,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            position_limit: 1000.0,
            safe_zone_half: 50.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ClockConfig {
    pub initial_time_scale: f64,
    pub min_time_scale: f64,
    pub max_time_scale: f64,
    /// Game clock reading at tick zero, in seconds.
    pub start_seconds: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            initial_time_scale: 1.0,
            min_time_scale: 0.0,
            max_time_scale: 100_000.0,
            start_seconds: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlantConfig {
    /// Inclusive, whole seconds.
    pub lifespan_range: (u32, u32),
    pub trunk_initial: Vec3,
    pub trunk_max: Vec3,
    pub foliage_initial: Vec3,
    pub foliage_max: Vec3,
    pub foliage_initial_offset: Vec3,
    pub growth_rate: f64,
    pub initial_water: f64,
    pub initial_nutrition: f64,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            lifespan_range: (50, 1000),
            trunk_initial: Vec3::new(0.1, 0.5, 0.1),
            trunk_max: Vec3::new(0.5, 4.0, 0.5),
            foliage_initial: Vec3::new(0.5, 0.25, 0.5),
            foliage_max: Vec3::new(2.0, 5.0, 2.0),
            foliage_initial_offset: Vec3::new(0.0, 1.0, 0.0),
            growth_rate: 0.01,
            initial_water: 100.0,
            initial_nutrition: 100.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GazeConfig {
    /// Degrees, applied to both yaw and pitch.
    pub max_eye_angle: f64,
    pub reroll_chance: f64,
    pub tracking_rate: f64,
    /// Gaze targets float this far above the ground.
    pub height_offset: f64,
    /// Added to each component of a target that sits on top of the animal.
    pub degenerate_nudge: f64,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            max_eye_angle: 45.0,
            reroll_chance: 0.02,
            tracking_rate: 5.0,
            height_offset: 1.0,
            degenerate_nudge: 0.1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AnimalConfig {
    /// Upper bound on a single behavior step, in seconds.
    pub max_step_dt: f64,
    pub speed_range: (f64, f64),
    /// Degrees per second.
    pub rotation_speed_range: (f64, f64),
    /// Degrees. Larger heading errors rotate in place.
    pub heading_tolerance: f64,
    /// Ground distance under which a target counts as reached.
    pub arrival_epsilon: f64,
    pub retreat_distance: f64,
    pub awake_duration: f64,
    pub sleep_duration: f64,
    pub body_growth_rate: f64,
    pub max_growth_factor: f64,
    pub initial_water: f64,
    pub initial_nutrition: f64,
    pub gaze: GazeConfig,
}

impl Default for AnimalConfig {
    fn default() -> Self {
        Self {
            max_step_dt: 0.1,
            speed_range: (2.0, 8.0),
            rotation_speed_range: (45.0, 180.0),
            heading_tolerance: 5.0,
            arrival_epsilon: 0.001,
            retreat_distance: 5.0,
            awake_duration: 10.0,
            sleep_duration: 5.0,
            body_growth_rate: 0.02,
            max_growth_factor: 0.1,
            initial_water: 100.0,
            initial_nutrition: 100.0,
            gaze: GazeConfig::default(),
        }
    }
}

/// Per-species template for animals.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpeciesConfig {
    /// Inclusive, whole seconds.
    pub lifespan_range: (u32, u32),
    pub birth_scale: f64,
    pub adult_scale: f64,
    /// RGB, for the renderer.
    pub color: [u8; 3],
}

impl SpeciesConfig {
    pub fn prey() -> Self {
        Self {
            lifespan_range: (30, 90),
            birth_scale: 0.3,
            adult_scale: 1.0,
            color: [255, 0, 0],
        }
    }

    pub fn predator() -> Self {
        Self {
            lifespan_range: (60, 120),
            birth_scale: 0.6,
            adult_scale: 1.7,
            color: [0, 0, 255],
        }
    }
}

fn default_prey() -> SpeciesConfig {
    SpeciesConfig::prey()
}

fn default_predator() -> SpeciesConfig {
    SpeciesConfig::predator()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub bounds: BoundsConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub plant: PlantConfig,
    #[serde(default)]
    pub animal: AnimalConfig,
    #[serde(default = "default_prey")]
    pub prey: SpeciesConfig,
    #[serde(default = "default_predator")]
    pub predator: SpeciesConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            bounds: BoundsConfig::default(),
            clock: ClockConfig::default(),
            plant: PlantConfig::default(),
            animal: AnimalConfig::default(),
            prey: SpeciesConfig::prey(),
            predator: SpeciesConfig::predator(),
        }
    }
}

fn ensure_range<T: PartialOrd>(range: (T, T), name: &str) -> anyhow::Result<()> {
    anyhow::ensure!(range.0 <= range.1, "{name} lower bound exceeds upper bound");
    Ok(())
}

/// Largest accepted world or bounds extent. Keeps uniform sampling over
/// `[-extent, extent]` well inside the range `rand` can represent.
pub const MAX_EXTENT: f64 = 1e12;

fn ensure_extent(value: f64, name: &str) -> anyhow::Result<()> {
    anyhow::ensure!(
        value.is_finite() && value <= MAX_EXTENT,
        "{name} must be finite and at most {MAX_EXTENT}"
    );
    Ok(())
}

impl SimConfig {
    pub fn species(&self, kind: AnimalKind) -> &SpeciesConfig {
        match kind {
            AnimalKind::Prey => &self.prey,
            AnimalKind::Predator => &self.predator,
        }
    }

    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World
        anyhow::ensure!(
            self.world.half_extent > 0.0,
            "World half extent must be positive"
        );
        ensure_extent(self.world.half_extent, "World half extent")?;
        for (chance, name) in [
            (self.world.tree_spawn_chance, "Tree spawn chance"),
            (self.world.prey_spawn_chance, "Prey spawn chance"),
            (self.world.predator_spawn_chance, "Predator spawn chance"),
        ] {
            anyhow::ensure!((0.0..=1.0).contains(&chance), "{name} must be in [0.0, 1.0]");
        }
        anyhow::ensure!(
            self.world.compact_interval > 0,
            "Compact interval must be positive"
        );

        // Bounds
        anyhow::ensure!(
            self.bounds.position_limit > 0.0,
            "Position limit must be positive"
        );
        anyhow::ensure!(
            self.bounds.safe_zone_half > 0.0,
            "Safe zone must be positive"
        );
        ensure_extent(self.bounds.position_limit, "Position limit")?;
        ensure_extent(self.bounds.safe_zone_half, "Safe zone")?;
        // A corner of the safe square must itself pass validation.
        anyhow::ensure!(
            self.bounds.safe_zone_half * std::f64::consts::SQRT_2 <= self.bounds.position_limit,
            "Safe zone must lie inside the position limit"
        );

        // Clock
        anyhow::ensure!(
            self.clock.min_time_scale >= 0.0,
            "Minimum time scale must be non-negative"
        );
        anyhow::ensure!(
            self.clock.min_time_scale <= self.clock.max_time_scale,
            "Minimum time scale exceeds maximum"
        );
        anyhow::ensure!(
            (self.clock.min_time_scale..=self.clock.max_time_scale)
                .contains(&self.clock.initial_time_scale),
            "Initial time scale outside [min, max]"
        );

        // Plant
        ensure_range(self.plant.lifespan_range, "Plant lifespan range")?;
        anyhow::ensure!(
            self.plant.lifespan_range.0 > 0,
            "Plant lifespan must be positive"
        );
        anyhow::ensure!(
            self.plant.growth_rate >= 0.0,
            "Plant growth rate must be non-negative"
        );
        anyhow::ensure!(
            self.plant.trunk_initial.is_finite() && self.plant.trunk_max.is_finite(),
            "Trunk scales must be finite"
        );
        anyhow::ensure!(
            self.plant.foliage_initial.is_finite() && self.plant.foliage_max.is_finite(),
            "Foliage scales must be finite"
        );

        // Animal
        anyhow::ensure!(
            self.animal.max_step_dt > 0.0,
            "Max step dt must be positive"
        );
        ensure_range(self.animal.speed_range, "Speed range")?;
        ensure_range(self.animal.rotation_speed_range, "Rotation speed range")?;
        anyhow::ensure!(
            self.animal.speed_range.0 >= 0.0,
            "Speed must be non-negative"
        );
        anyhow::ensure!(
            self.animal.rotation_speed_range.0 >= 0.0,
            "Rotation speed must be non-negative"
        );
        anyhow::ensure!(
            (0.0..180.0).contains(&self.animal.heading_tolerance),
            "Heading tolerance must be in [0, 180)"
        );
        anyhow::ensure!(
            self.animal.arrival_epsilon > 0.0,
            "Arrival epsilon must be positive"
        );
        anyhow::ensure!(
            self.animal.awake_duration > 0.0 && self.animal.sleep_duration > 0.0,
            "Sleep cycle durations must be positive"
        );
        anyhow::ensure!(
            self.animal.body_growth_rate.is_finite() && self.animal.body_growth_rate >= 0.0,
            "Body growth rate must be finite and non-negative"
        );
        anyhow::ensure!(
            self.animal.max_growth_factor >= 0.0 && self.animal.max_growth_factor <= 1.0,
            "Max growth factor must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=90.0).contains(&self.animal.gaze.max_eye_angle),
            "Max eye angle must be in [0, 90]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.animal.gaze.reroll_chance),
            "Gaze reroll chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.animal.gaze.tracking_rate.is_finite() && self.animal.gaze.tracking_rate >= 0.0,
            "Gaze tracking rate must be finite and non-negative"
        );
        anyhow::ensure!(
            self.animal.gaze.degenerate_nudge > 0.0,
            "Gaze nudge must be positive"
        );

        // Species
        for (species, name) in [(&self.prey, "Prey"), (&self.predator, "Predator")] {
            ensure_range(species.lifespan_range, name)?;
            anyhow::ensure!(species.lifespan_range.0 > 0, "{name} lifespan must be positive");
            anyhow::ensure!(
                species.birth_scale > 0.0 && species.adult_scale > 0.0,
                "{name} scales must be positive"
            );
            anyhow::ensure!(
                species.adult_scale <= self.bounds.position_limit,
                "{name} adult scale exceeds the position limit"
            );
        }

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Hash of the behavioral sections; two runs with equal fingerprints and
    /// seeds evolve identically.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.bounds).as_bytes());
        hasher.update(format!("{:?}", self.plant).as_bytes());
        hasher.update(format!("{:?}", self.animal).as_bytes());
        hasher.update(format!("{:?}", self.prey).as_bytes());
        hasher.update(format!("{:?}", self.predator).as_bytes());
        hex::encode(hasher.finalize())
    }
}
