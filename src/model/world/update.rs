use crate::model::lifecycle::{self, Advance};
use crate::model::config::SimConfig;
use crate::model::systems::animal::{
    self, AnimalContext, AnimalEntity, MoveOutcome, SleepTransition,
};
use crate::model::systems::plant;
use crate::model::world::{AnimalComponents, World};
use oasis_data::{AnimalState, Identity, LiveEvent, Placement, PlantBody, Vitals};
use rayon::prelude::*;
use std::time::Instant;

fn age_and_grow(
    vitals: &mut Vitals,
    plant: Option<&mut PlantBody>,
    animal: Option<&mut AnimalState>,
    dt: f64,
    config: &SimConfig,
) -> Advance {
    let outcome = lifecycle::advance(vitals, dt);
    if let Advance::Step(dt) = outcome {
        if let Some(body) = plant {
            plant::grow(body, dt, &config.plant);
        }
        if let Some(state) = animal {
            animal::prepare(state, vitals, dt, config);
        }
    }
    outcome
}

impl World {
    /// Advances the simulation by one frame of `dt` real seconds.
    ///
    /// Order within a tick:
    /// 1. Despawn records destroyed on earlier ticks
    /// 2. Random arrivals and occupancy compaction
    /// 3. Aging and growth for every organism, in parallel
    /// 4. Expiry and animal behavior, one organism at a time in identity order
    ///
    /// # Returns
    /// Events raised since the previous call, including spawns and destroys
    /// requested between ticks.
    pub fn update(&mut self, dt: f64) -> Vec<LiveEvent> {
        let start = Instant::now();
        self.tick += 1;

        self.prune_destroyed();
        self.spawn_arrivals();
        self.maybe_compact();
        let mut events = std::mem::take(&mut self.pending_events);

        let scaled = self.clock.advance(dt);
        let outcomes = self.pass_vitals_and_growth(scaled);
        for (handle, outcome) in outcomes {
            match outcome {
                Advance::Inert => {}
                Advance::Expired => self.expire(handle, &mut events),
                Advance::Step(dt) => self.behave_animal(handle, dt, &mut events),
            }
        }

        let animals = self
            .ecs
            .query::<(&Vitals, &AnimalState)>()
            .iter()
            .filter(|(_, (v, _))| v.alive)
            .count();
        self.metrics
            .record_tick(start.elapsed(), self.population_count(), animals);
        events
    }

    /// Rng-free per-organism work. Returns what each organism should do next,
    /// ordered by identity.
    fn pass_vitals_and_growth(&mut self, dt: f64) -> Vec<(hecs::Entity, Advance)> {
        let config = &self.config;
        let mut query = self.ecs.query::<(
            &Identity,
            &mut Vitals,
            Option<&mut PlantBody>,
            Option<&mut AnimalState>,
        )>();
        let mut data: Vec<_> = query.iter().collect();
        data.sort_by_key(|(_h, (ident, ..))| ident.id);

        let outcomes: Vec<_> = data
            .par_iter_mut()
            .map(|(handle, (_, vitals, plant, animal))| {
                let outcome = age_and_grow(
                    vitals,
                    plant.as_deref_mut(),
                    animal.as_deref_mut(),
                    dt,
                    config,
                );
                (*handle, outcome)
            })
            .collect();
        outcomes
    }

    fn expire(&mut self, handle: hecs::Entity, events: &mut Vec<LiveEvent>) {
        let Ok((identity, placement, vitals)) = self
            .ecs
            .query_one_mut::<(&Identity, &Placement, &mut Vitals)>(handle)
        else {
            return;
        };
        if lifecycle::destroy(identity, placement, vitals, &mut self.occupancy) {
            tracing::debug!(id = %identity.id, age = vitals.age, "Organism expired");
            self.metrics.increment_counter("expired");
            events.push(LiveEvent::Expired {
                id: identity.id,
                kind: identity.kind,
                tick: self.tick,
                age: vitals.age,
            });
        }
    }

    fn behave_animal(&mut self, handle: hecs::Entity, dt: f64, events: &mut Vec<LiveEvent>) {
        // Plants have no sequential work.
        let Ok((identity, placement, vitals, state)) =
            self.ecs.query_one_mut::<AnimalComponents>(handle)
        else {
            return;
        };
        let id = identity.id;
        let from = placement.position;

        let mut entity = AnimalEntity {
            identity,
            placement,
            vitals,
            state,
        };
        let mut ctx = AnimalContext {
            config: &self.config,
            occupancy: &mut self.occupancy,
            rng: &mut self.rng,
        };
        let report = animal::behave(&mut entity, &mut ctx, dt);

        let tick = self.tick;
        if report.movement == Some(MoveOutcome::Retreated) {
            self.metrics.increment_counter("retreated");
            events.push(LiveEvent::Retreated { id, tick, from });
        }
        match report.transition {
            Some(SleepTransition::FellAsleep) => events.push(LiveEvent::FellAsleep { id, tick }),
            Some(SleepTransition::Woke) => events.push(LiveEvent::Woke { id, tick }),
            None => {}
        }
    }
}
