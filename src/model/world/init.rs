use crate::model::clock::SimulationClock;
use crate::model::config::SimConfig;
use crate::model::metrics::Metrics;
use crate::model::occupancy::SpatialOccupancy;
use crate::model::world::World;
use crate::model::SimError;
use oasis_data::{AnimalKind, OrganismKind, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

impl World {
    /// Builds a world from a validated config and spawns the initial population.
    pub fn new(config: SimConfig) -> anyhow::Result<Self> {
        config
            .validate()
            .map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        let rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };

        let mut world = Self {
            tick: 0,
            ecs: hecs::World::new(),
            occupancy: SpatialOccupancy::new(),
            clock: SimulationClock::new(&config.clock),
            config,
            rng,
            metrics: Metrics::new(),
            pending_events: Vec::new(),
        };

        let initial = [
            (OrganismKind::Tree, world.config.world.initial_trees),
            (
                OrganismKind::Animal(AnimalKind::Prey),
                world.config.world.initial_prey,
            ),
            (
                OrganismKind::Animal(AnimalKind::Predator),
                world.config.world.initial_predators,
            ),
        ];
        for (kind, count) in initial {
            for _ in 0..count {
                let position = world.random_ground_point();
                world.spawn(kind, position);
            }
        }

        tracing::info!(
            population = world.population_count(),
            seed = ?world.config.world.seed,
            fingerprint = %world.config.fingerprint(),
            "World created"
        );
        Ok(world)
    }

    /// Uniform point in the spawn square at ground level.
    pub(crate) fn random_ground_point(&mut self) -> Vec3 {
        let h = self.config.world.half_extent;
        Vec3::new(
            self.rng.gen_range(-h..=h),
            0.0,
            self.rng.gen_range(-h..=h),
        )
    }
}
