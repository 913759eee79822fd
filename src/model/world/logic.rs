use crate::model::lifecycle;
use crate::model::world::World;
use crate::model::SimError;
use oasis_data::{
    AnimalKind, Identity, LiveEvent, OrganismBody, OrganismKind, Placement, Vec3, Vitals,
};
use rand::Rng;

impl World {
    /// Creates an organism of `kind` at `position` (validated) and claims its cell.
    pub fn spawn(&mut self, kind: OrganismKind, position: Vec3) -> hecs::Entity {
        let organism =
            lifecycle::create_organism_with_rng(position, kind, &self.config, &mut self.rng);
        lifecycle::occupy(
            &organism.identity,
            &organism.placement,
            &organism.vitals,
            &mut self.occupancy,
        );

        let handle = match organism.body {
            OrganismBody::Plant(body) => self.ecs.spawn((
                organism.identity,
                organism.placement,
                organism.vitals,
                body,
            )),
            OrganismBody::Animal(state) => self.ecs.spawn((
                organism.identity,
                organism.placement,
                organism.vitals,
                state,
            )),
        };

        tracing::debug!(
            id = %organism.identity.id,
            ?kind,
            position = ?organism.placement.position,
            "Organism spawned"
        );
        self.metrics.increment_counter("spawned");
        self.pending_events.push(LiveEvent::Spawned {
            id: organism.identity.id,
            kind,
            tick: self.tick,
            position: organism.placement.position,
        });
        handle
    }

    pub fn spawn_tree(&mut self, position: Vec3) -> hecs::Entity {
        self.spawn(OrganismKind::Tree, position)
    }

    pub fn spawn_animal(&mut self, kind: AnimalKind, position: Vec3) -> hecs::Entity {
        self.spawn(OrganismKind::Animal(kind), position)
    }

    /// Destroys an organism now. Its cell is released immediately; the record
    /// is despawned at the start of the next tick.
    ///
    /// Returns `Ok(false)` if it was already destroyed.
    pub fn destroy(&mut self, handle: hecs::Entity) -> Result<bool, SimError> {
        let (identity, placement, vitals) = self
            .ecs
            .query_one_mut::<(&Identity, &Placement, &mut Vitals)>(handle)
            .map_err(|_| SimError::StaleHandle)?;
        if !lifecycle::destroy(identity, placement, vitals, &mut self.occupancy) {
            return Ok(false);
        }
        tracing::debug!(id = %identity.id, "Organism destroyed");
        self.metrics.increment_counter("destroyed");
        self.pending_events.push(LiveEvent::Destroyed {
            id: identity.id,
            tick: self.tick,
        });
        Ok(true)
    }

    /// Freezes or thaws an organism. A frozen organism keeps its cell, but the
    /// claim is flagged so the next compaction drops it.
    ///
    /// Returns `Ok(false)` for destroyed organisms, which cannot be thawed.
    pub fn set_enabled(&mut self, handle: hecs::Entity, enabled: bool) -> Result<bool, SimError> {
        let (identity, placement, vitals) = self
            .ecs
            .query_one_mut::<(&Identity, &Placement, &mut Vitals)>(handle)
            .map_err(|_| SimError::StaleHandle)?;
        if !vitals.alive {
            return Ok(false);
        }
        vitals.enabled = enabled;
        let id = identity.id;
        if !self.occupancy.set_enabled(placement.grid_key, id, enabled)
            && enabled
            && !self.occupancy.is_blocked_for(placement.grid_key, id)
        {
            // Claim was compacted away while frozen; take the cell back if free.
            self.occupancy.reserve(placement.grid_key, id, true);
        }
        Ok(true)
    }

    /// Despawns records destroyed on an earlier tick. Returns how many went.
    pub(crate) fn prune_destroyed(&mut self) -> usize {
        let dead: Vec<hecs::Entity> = self
            .ecs
            .query::<&Vitals>()
            .iter()
            .filter(|(_, v)| !v.alive)
            .map(|(h, _)| h)
            .collect();
        for &handle in &dead {
            let _ = self.ecs.despawn(handle);
        }
        dead.len()
    }

    /// Random arrivals at the per-kind spawn chances, up to the population cap.
    pub(crate) fn spawn_arrivals(&mut self) {
        let world = &self.config.world;
        let chances = [
            (OrganismKind::Tree, world.tree_spawn_chance),
            (
                OrganismKind::Animal(AnimalKind::Prey),
                world.prey_spawn_chance,
            ),
            (
                OrganismKind::Animal(AnimalKind::Predator),
                world.predator_spawn_chance,
            ),
        ];
        let cap = world.max_population;

        for (kind, chance) in chances {
            if !self.rng.gen_bool(chance) {
                continue;
            }
            if self.population_count() >= cap {
                tracing::trace!(?kind, cap, "Population cap reached, arrival skipped");
                continue;
            }
            let position = self.random_ground_point();
            self.spawn(kind, position);
        }
    }

    pub(crate) fn maybe_compact(&mut self) {
        if self.tick % self.config.world.compact_interval.max(1) == 0 {
            let removed = self.occupancy.compact();
            self.metrics.add_to_counter("compacted", removed as u64);
        }
    }

    /// Takes events raised outside `update` without advancing time.
    pub fn drain_events(&mut self) -> Vec<LiveEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn time_scale(&self) -> f64 {
        self.clock.time_scale()
    }

    pub fn set_time_scale(&mut self, scale: f64) -> f64 {
        self.clock.set_time_scale(scale)
    }
}
