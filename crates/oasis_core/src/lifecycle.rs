use crate::config::SimConfig;
use crate::geometry::validate_position;
use crate::occupancy::SpatialOccupancy;
use oasis_data::{
    AnimalKind, AnimalState, Identity, Organism, OrganismBody, OrganismKind, OrganismStatus,
    OrganismView, Placement, PlantBody, Vec3, Vitals,
};
use rand::Rng;
use uuid::Uuid;

/// What the driver should do with an organism after aging it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// Disabled or already dead; nothing changed.
    Inert,
    /// Lifespan ran out this tick; the organism must be destroyed.
    Expired,
    /// Still alive; run the behavior step with this delta.
    Step(f64),
}

fn random_lifespan<R: Rng>(range: (u32, u32), rng: &mut R) -> f64 {
    f64::from(rng.gen_range(range.0..=range.1))
}

fn new_identity<R: Rng>(kind: OrganismKind, rng: &mut R) -> Identity {
    Identity {
        id: Uuid::from_u128(rng.gen::<u128>()),
        kind,
    }
}

pub fn create_tree_with_rng<R: Rng>(position: Vec3, config: &SimConfig, rng: &mut R) -> Organism {
    let plant = &config.plant;
    let position = validate_position(position, &config.bounds, rng);
    let lifespan = random_lifespan(plant.lifespan_range, rng);
    Organism {
        identity: new_identity(OrganismKind::Tree, rng),
        placement: Placement::at(position),
        vitals: Vitals::new(lifespan, plant.initial_water, plant.initial_nutrition),
        body: OrganismBody::Plant(PlantBody {
            trunk_scale: plant.trunk_initial,
            foliage_scale: plant.foliage_initial,
            foliage_offset: plant.foliage_initial_offset,
        }),
    }
}

pub fn create_animal_with_rng<R: Rng>(
    position: Vec3,
    kind: AnimalKind,
    config: &SimConfig,
    rng: &mut R,
) -> Organism {
    let species = config.species(kind);
    let animal = &config.animal;
    let position = validate_position(position, &config.bounds, rng);
    let lifespan = random_lifespan(species.lifespan_range, rng);
    let mut state = AnimalState::new(
        kind,
        Vec3::splat(species.birth_scale),
        animal.awake_duration,
    );
    let vitals = Vitals::new(lifespan, animal.initial_water, animal.initial_nutrition);
    crate::systems::animal::update_attributes(&mut state, &vitals, animal);
    Organism {
        identity: new_identity(OrganismKind::Animal(kind), rng),
        placement: Placement::at(position),
        vitals,
        body: OrganismBody::Animal(state),
    }
}

pub fn create_organism_with_rng<R: Rng>(
    position: Vec3,
    kind: OrganismKind,
    config: &SimConfig,
    rng: &mut R,
) -> Organism {
    match kind {
        OrganismKind::Tree => create_tree_with_rng(position, config, rng),
        OrganismKind::Animal(a) => create_animal_with_rng(position, a, config, rng),
    }
}

/// Ages an organism by `dt` simulated seconds.
///
/// `dt` is assumed non-negative; the clock clamps it.
pub fn advance(vitals: &mut Vitals, dt: f64) -> Advance {
    if !vitals.is_active() {
        return Advance::Inert;
    }
    vitals.lifespan_remaining -= dt;
    vitals.age += dt;
    if vitals.lifespan_remaining <= 0.0 {
        Advance::Expired
    } else {
        Advance::Step(dt)
    }
}

/// Marks an organism dead and gives up its occupancy cell.
///
/// Idempotent. Returns `false` if it was already dead.
pub fn destroy(
    identity: &Identity,
    placement: &Placement,
    vitals: &mut Vitals,
    occupancy: &mut SpatialOccupancy,
) -> bool {
    if !vitals.alive {
        return false;
    }
    vitals.alive = false;
    vitals.enabled = false;
    occupancy.release_owned(placement.grid_key, identity.id);
    true
}

/// Claims the organism's current cell.
pub fn occupy(
    identity: &Identity,
    placement: &Placement,
    vitals: &Vitals,
    occupancy: &mut SpatialOccupancy,
) {
    occupancy.reserve(placement.grid_key, identity.id, vitals.enabled);
}

pub fn calculate_status(vitals: &Vitals, body: &OrganismBody) -> OrganismStatus {
    if !vitals.alive {
        return OrganismStatus::Dead;
    }
    if !vitals.enabled {
        return OrganismStatus::Disabled;
    }
    match body {
        OrganismBody::Plant(_) => OrganismStatus::Growing,
        OrganismBody::Animal(a) if a.is_sleeping() => OrganismStatus::Sleeping,
        OrganismBody::Animal(a) if a.moving => OrganismStatus::Moving,
        OrganismBody::Animal(_) => OrganismStatus::Idle,
    }
}

pub fn view_components(
    identity: &Identity,
    placement: &Placement,
    vitals: &Vitals,
    body: &OrganismBody,
) -> OrganismView {
    let (heading, scale, sleeping, moving) = match body {
        OrganismBody::Plant(p) => (0.0, p.trunk_scale, false, false),
        OrganismBody::Animal(a) => (a.heading, a.scale, a.is_sleeping(), a.moving),
    };
    OrganismView {
        id: identity.id,
        kind: identity.kind,
        position: placement.position,
        heading,
        scale,
        sleeping,
        moving,
        alive: vitals.alive,
        enabled: vitals.enabled,
        age: vitals.age,
        lifespan_remaining: vitals.lifespan_remaining,
        status: calculate_status(vitals, body),
    }
}

pub fn view(organism: &Organism) -> OrganismView {
    view_components(
        &organism.identity,
        &organism.placement,
        &organism.vitals,
        &organism.body,
    )
}
