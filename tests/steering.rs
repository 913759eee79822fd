mod common;

use common::{edit_animal, WorldBuilder};
use oasis_data::{AnimalKind, GridKey, Vec3};

#[test]
fn test_turns_before_walking() {
    let (mut world, handles) = WorldBuilder::new()
        .with_config(|c| c.animal.rotation_speed_range = (180.0, 180.0))
        .with_animal(AnimalKind::Prey, Vec3::ZERO)
        .build();
    let handle = handles[0];
    edit_animal(&mut world, handle, |state| {
        state.heading = 0.0;
        state.target = Some(Vec3::new(10.0, 0.0, 0.0));
    });

    world.update(0.1);

    let view = world.view(handle).expect("view");
    assert_eq!(view.position, Vec3::ZERO);
    assert_close!(view.heading, 18.0, 1e-9);
    assert!(!view.moving);
}

#[test]
fn test_reaches_target_without_overshoot() {
    let (mut world, handles) = WorldBuilder::new()
        .with_animal(AnimalKind::Prey, Vec3::ZERO)
        .build();
    let handle = handles[0];
    let target = Vec3::new(0.0, 0.0, 3.0);
    edit_animal(&mut world, handle, |state| {
        state.heading = 0.0;
        state.target = Some(target);
    });

    // Speed 8 with full gauges: 0.8 per 0.1 s step, so four steps reach z = 3.
    for _ in 0..4 {
        world.update(0.1);
        let z = world.view(handle).expect("view").position.z;
        assert!(z <= target.z + 1e-9, "Overshot to z = {z}");
    }
    let organism = world.organism(handle).expect("organism");
    assert_close!(organism.placement.position.z, 3.0, 1e-9);
    assert_eq!(organism.placement.grid_key, GridKey::new(0, 3));
    assert_cell_owner!(world, GridKey::new(0, 3), organism.identity.id);

    // Next step sees the arrival and picks a new target in the safe zone.
    world.update(0.1);
    let state = world.animal_state(handle).expect("animal");
    let next = state.target.expect("new target");
    assert!(next.x.abs() <= 50.0 && next.z.abs() <= 50.0);
}

#[test]
fn test_leaving_a_cell_releases_it() {
    let (mut world, handles) = WorldBuilder::new()
        .with_animal(AnimalKind::Prey, Vec3::ZERO)
        .build();
    let handle = handles[0];
    edit_animal(&mut world, handle, |state| {
        state.heading = 90.0;
        state.target = Some(Vec3::new(30.0, 0.0, 0.0));
    });
    for _ in 0..10 {
        world.update(0.1);
    }
    let id = world.view(handle).expect("view").id;
    let cells = world.occupancy.cells_of(id);
    assert_eq!(cells.len(), 1, "Exactly one claim per organism");
    assert_eq!(cells[0], GridKey::new(8, 0));
    assert!(world.occupancy.occupant(GridKey::new(0, 0)).is_none());
}

#[test]
fn test_positions_stay_within_limit_over_long_run() {
    let (mut world, _) = WorldBuilder::new()
        .with_seed(2024)
        .with_config(|c| {
            c.world.initial_prey = 12;
            c.world.initial_predators = 4;
        })
        .with_time_scale(20.0)
        .build();
    for _ in 0..500 {
        world.update(0.1);
        for view in world.views() {
            assert!(view.position.is_finite());
            assert!(view.position.length() <= world.config.bounds.position_limit);
            assert!((0.0..360.0).contains(&view.heading));
        }
    }
}
