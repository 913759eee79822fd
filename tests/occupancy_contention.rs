mod common;

use common::{edit_animal, WorldBuilder};
use oasis_data::{AnimalKind, GridKey, LiveEvent, Vec3};
use std::collections::HashMap;

#[test]
fn test_second_mover_into_contested_cell_retreats() {
    let (mut world, handles) = WorldBuilder::new()
        .with_animal(AnimalKind::Prey, Vec3::new(4.4, 0.0, 0.0))
        .with_animal(AnimalKind::Prey, Vec3::new(5.6, 0.0, 0.0))
        .build();
    let (a, b) = (handles[0], handles[1]);
    edit_animal(&mut world, a, |s| {
        s.heading = 90.0;
        s.target = Some(Vec3::new(20.0, 0.0, 0.0));
    });
    edit_animal(&mut world, b, |s| {
        s.heading = 270.0;
        s.target = Some(Vec3::new(-20.0, 0.0, 0.0));
    });
    let id_a = world.view(a).expect("view").id;
    let id_b = world.view(b).expect("view").id;
    world.drain_events();

    let events = world.update(0.1);

    // Behavior runs in identity order: the lower id moves first.
    let (first, second, second_id, second_start) = if id_a < id_b {
        (a, b, id_b, Vec3::new(5.6, 0.0, 0.0))
    } else {
        (b, a, id_a, Vec3::new(4.4, 0.0, 0.0))
    };
    let contested = GridKey::new(5, 0);
    let first_org = world.organism(first).expect("organism");
    assert_eq!(first_org.placement.grid_key, contested);
    assert_cell_owner!(world, contested, first_org.identity.id);

    let second_org = world.organism(second).expect("organism");
    assert_eq!(second_org.placement.position, second_start);
    assert_eq!(
        events,
        vec![LiveEvent::Retreated {
            id: second_id,
            tick: 1,
            from: second_start,
        }]
    );

    let state = world.animal_state(second).expect("animal");
    let retreat = state.target.expect("retreat target");
    assert_close!((retreat - second_start).flat().length(), 5.0, 1e-9);
    assert!(!state.moving);
}

#[test]
fn test_no_cell_has_two_enabled_owners() {
    let (mut world, _) = WorldBuilder::new()
        .with_seed(77)
        .with_config(|c| {
            c.world.half_extent = 6.0;
            c.world.initial_prey = 20;
            c.world.initial_predators = 6;
            c.world.initial_trees = 10;
            c.bounds.safe_zone_half = 6.0;
        })
        .build();

    for _ in 0..300 {
        world.update(0.1);

        // Every claim points at an organism that stands in that cell.
        let mut holders: HashMap<GridKey, uuid::Uuid> = HashMap::new();
        for claim in world.occupancy.iter() {
            assert!(holders.insert(claim.cell, claim.owner).is_none());
            let handle = world.find(claim.owner).expect("claim owner exists");
            let organism = world.organism(handle).expect("organism");
            assert!(organism.vitals.alive, "Dead organisms hold no cells");
            assert_eq!(organism.placement.grid_key, claim.cell);
        }
        // Each organism holds at most one cell.
        let mut per_owner: HashMap<uuid::Uuid, usize> = HashMap::new();
        for claim in world.occupancy.iter() {
            *per_owner.entry(claim.owner).or_default() += 1;
        }
        assert!(per_owner.values().all(|&n| n == 1));
    }
}
