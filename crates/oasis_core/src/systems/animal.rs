use crate::config::{AnimalConfig, BoundsConfig, SimConfig, SpeciesConfig};
use crate::geometry::{
    forward, heading_towards, lerp, normalize_angle, random_safe_point, right, validate_position,
    wrap_heading,
};
use crate::occupancy::SpatialOccupancy;
use oasis_data::{Activity, AnimalState, GridKey, Identity, Placement, Vec3, Vitals};
use rand::Rng;

pub struct AnimalContext<'a, R: Rng> {
    pub config: &'a SimConfig,
    pub occupancy: &'a mut SpatialOccupancy,
    pub rng: &'a mut R,
}

pub struct AnimalEntity<'a> {
    pub identity: &'a Identity,
    pub placement: &'a mut Placement,
    pub vitals: &'a Vitals,
    pub state: &'a mut AnimalState,
}

/// Result of one steering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No target yet; one was picked and the animal waited.
    PickedTarget,
    /// Target reached (or unusable); a new one was picked.
    Arrived,
    /// Heading was off by more than the tolerance; rotated in place.
    Turned,
    /// Stepped forward and now holds a new position.
    Advanced,
    /// The next cell belonged to someone else; turned the target around.
    Retreated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepTransition {
    FellAsleep,
    Woke,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub movement: Option<MoveOutcome>,
    pub transition: Option<SleepTransition>,
}

/// Derives speed from hydration and nutrition, and turning speed from age.
pub fn update_attributes(state: &mut AnimalState, vitals: &Vitals, config: &AnimalConfig) {
    let water_factor = (vitals.water / 100.0).clamp(0.0, 1.0);
    let nutrition_factor = (vitals.nutrition / 100.0).clamp(0.0, 1.0);
    let lifespan_factor = if vitals.lifespan_remaining > 0.0 {
        (vitals.age / vitals.lifespan_remaining).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let (min_speed, max_speed) = config.speed_range;
    let (min_turn, max_turn) = config.rotation_speed_range;
    state.speed = lerp(min_speed, max_speed, (water_factor + nutrition_factor) / 2.0);
    state.rotation_speed = lerp(min_turn, max_turn, lifespan_factor);
}

/// Moves body scale towards the species' adult size. `dt` is time-scaled and
/// not clamped; the growth fraction is capped instead.
pub fn grow_body(
    state: &mut AnimalState,
    dt: f64,
    species: &SpeciesConfig,
    config: &AnimalConfig,
) {
    let factor = (dt * config.body_growth_rate).clamp(0.0, config.max_growth_factor);
    state.scale = state.scale.approach(Vec3::splat(species.adult_scale), factor);
}

/// Rng-free half of a step: attributes and growth. Safe to run in parallel.
pub fn prepare(state: &mut AnimalState, vitals: &Vitals, dt: f64, config: &SimConfig) {
    update_attributes(state, vitals, &config.animal);
    grow_body(state, dt, config.species(state.kind()), &config.animal);
}

/// Sequential half of a step: sanity checks, sleep cycle, steering and gaze.
///
/// Touches the shared occupancy map, so it must run one animal at a time.
pub fn behave<R: Rng>(
    entity: &mut AnimalEntity,
    ctx: &mut AnimalContext<R>,
    dt: f64,
) -> StepReport {
    let config = ctx.config;
    let dt = dt.min(config.animal.max_step_dt);
    entity.state.scale = validate_position(entity.state.scale, &config.bounds, ctx.rng);

    let mut report = StepReport::default();
    match entity.state.activity {
        Activity::Sleeping { remaining } => {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                entity.state.activity = Activity::Awake {
                    remaining: config.animal.awake_duration,
                };
                report.transition = Some(SleepTransition::Woke);
            } else {
                entity.state.activity = Activity::Sleeping { remaining };
            }
        }
        Activity::Awake { .. } => {
            report.movement = Some(update_movement(entity, ctx, dt));
            update_gaze(
                entity.state,
                entity.placement.position,
                &config.animal,
                &config.bounds,
                ctx.rng,
                dt,
            );
            // Steering never changes the activity, so the countdown is still ours.
            if let Activity::Awake { remaining } = entity.state.activity {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    entity.state.activity = Activity::Sleeping {
                        remaining: config.animal.sleep_duration,
                    };
                    entity.state.moving = false;
                    report.transition = Some(SleepTransition::FellAsleep);
                } else {
                    entity.state.activity = Activity::Awake { remaining };
                }
            }
        }
    }
    report
}

/// One full behavior step for a single animal.
pub fn step<R: Rng>(entity: &mut AnimalEntity, ctx: &mut AnimalContext<R>, dt: f64) -> StepReport {
    prepare(entity.state, entity.vitals, dt, ctx.config);
    behave(entity, ctx, dt)
}

/// Turns towards the movement target, then walks at it once facing it.
///
/// Rotation and translation never happen in the same call.
pub fn update_movement<R: Rng>(
    entity: &mut AnimalEntity,
    ctx: &mut AnimalContext<R>,
    dt: f64,
) -> MoveOutcome {
    let animal = &ctx.config.animal;
    let bounds = &ctx.config.bounds;
    let state = &mut *entity.state;

    let Some(target) = state.target else {
        state.target = Some(random_safe_point(ctx.rng, bounds));
        state.moving = false;
        return MoveOutcome::PickedTarget;
    };

    let position = entity.placement.position;
    let to_target = (target - position).flat();
    let distance = to_target.length();
    // NaN distance means a poisoned target; treat it like an arrival.
    if distance.is_nan() || distance < animal.arrival_epsilon {
        state.target = Some(random_safe_point(ctx.rng, bounds));
        state.moving = false;
        return MoveOutcome::Arrived;
    }

    let desired = heading_towards(to_target, state.heading);
    let diff = normalize_angle(desired - state.heading);
    if diff.abs() > animal.heading_tolerance {
        let max_rotation = (state.rotation_speed * dt).max(0.0);
        state.heading = wrap_heading(state.heading + diff.clamp(-max_rotation, max_rotation));
        state.moving = false;
        return MoveOutcome::Turned;
    }

    let stride = (state.speed * dt).max(0.0);
    let candidate = if distance <= stride {
        Vec3::new(target.x, position.y, target.z)
    } else {
        position + forward(state.heading) * stride
    };
    let candidate = validate_position(candidate, bounds, ctx.rng);
    let cell = GridKey::from_position(candidate);
    let id = entity.identity.id;

    if ctx.occupancy.is_blocked_for(cell, id) {
        state.target = Some(position - forward(state.heading) * animal.retreat_distance);
        state.moving = false;
        tracing::trace!(%id, ?cell, "Cell taken, retreating");
        return MoveOutcome::Retreated;
    }

    ctx.occupancy.release_owned(entity.placement.grid_key, id);
    entity.placement.position = candidate;
    entity.placement.grid_key = cell;
    ctx.occupancy.reserve(cell, id, entity.vitals.enabled);
    state.moving = true;
    MoveOutcome::Advanced
}

/// Eye-tracking towards a wandering look target, independent of the body.
pub fn update_gaze<R: Rng>(
    state: &mut AnimalState,
    position: Vec3,
    config: &AnimalConfig,
    bounds: &BoundsConfig,
    rng: &mut R,
    dt: f64,
) {
    let gaze = &config.gaze;
    let reroll = match state.gaze.target {
        Some(t) if t.is_finite() => rng.gen_bool(gaze.reroll_chance),
        _ => true,
    };
    let mut target = match state.gaze.target {
        Some(t) if !reroll => t,
        _ => random_safe_point(rng, bounds) + Vec3::UP * gaze.height_offset,
    };

    let mut direction = target - position;
    if !(direction.length() >= 0.001) {
        target += Vec3::splat(gaze.degenerate_nudge);
        direction = target - position;
    }
    state.gaze.target = Some(target);

    let local = Vec3::new(
        direction.dot(right(state.heading)),
        direction.dot(Vec3::UP),
        direction.dot(forward(state.heading)),
    )
    .normalized();
    if !local.is_finite() {
        return;
    }

    let max = gaze.max_eye_angle;
    let yaw = local.x.atan2(local.z).to_degrees().clamp(-max, max);
    let pitch = local.y.clamp(-1.0, 1.0).asin().to_degrees().clamp(-max, max);
    let t = (dt * gaze.tracking_rate).clamp(0.0, 1.0);
    state.gaze.yaw = lerp(state.gaze.yaw, yaw, t);
    state.gaze.pitch = lerp(state.gaze.pitch, -pitch, t);
}
