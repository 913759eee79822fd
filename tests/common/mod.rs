pub mod macros;

use oasis_data::{AnimalKind, AnimalState, Vec3};
use oasis_lib::model::config::SimConfig;
use oasis_lib::model::world::World;

type WorldMod = Box<dyn FnOnce(&mut World)>;

/// Builds a quiet world: no initial population, no random arrivals, fixed seed.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: SimConfig,
    spawns: Vec<(Option<AnimalKind>, Vec3)>,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = SimConfig::default();
        config.world.initial_trees = 0;
        config.world.initial_prey = 0;
        config.world.initial_predators = 0;
        config.world.tree_spawn_chance = 0.0;
        config.world.prey_spawn_chance = 0.0;
        config.world.predator_spawn_chance = 0.0;
        config.world.seed = Some(42);
        Self {
            config,
            spawns: Vec::new(),
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_tree(mut self, position: Vec3) -> Self {
        self.spawns.push((None, position));
        self
    }

    pub fn with_animal(mut self, kind: AnimalKind, position: Vec3) -> Self {
        self.spawns.push((Some(kind), position));
        self
    }

    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.mods.push(Box::new(move |world| {
            world.set_time_scale(scale);
        }));
        self
    }

    /// Returns the world and the handles of the organisms spawned by the
    /// builder, in `with_*` order.
    pub fn build(self) -> (World, Vec<hecs::Entity>) {
        let mut world = World::new(self.config).expect("Failed to create world");
        let handles = self
            .spawns
            .into_iter()
            .map(|(kind, position)| match kind {
                Some(kind) => world.spawn_animal(kind, position),
                None => world.spawn_tree(position),
            })
            .collect();
        for m in self.mods {
            m(&mut world);
        }
        (world, handles)
    }
}

/// Overwrites part of an animal's state in place.
#[allow(dead_code)]
pub fn edit_animal<F>(world: &mut World, handle: hecs::Entity, edit: F)
where
    F: FnOnce(&mut AnimalState),
{
    let state = world
        .ecs
        .query_one_mut::<&mut AnimalState>(handle)
        .expect("handle must be an animal");
    edit(state);
}
