mod common;

use common::WorldBuilder;
use oasis_data::{AnimalKind, OrganismBody, Vec3};

fn within(v: Vec3, max: Vec3) -> bool {
    v.x <= max.x && v.y <= max.y && v.z <= max.z
}

#[test]
fn test_tree_growth_is_capped() {
    let (mut world, handles) = WorldBuilder::new()
        .with_config(|c| c.plant.lifespan_range = (5_000, 5_000))
        .with_tree(Vec3::new(-7.0, 0.0, 12.0))
        .with_time_scale(100.0)
        .build();
    let tree = handles[0];
    let trunk_max = world.config.plant.trunk_max;
    let foliage_max = world.config.plant.foliage_max;

    let mut last_trunk = Vec3::ZERO;
    for _ in 0..400 {
        world.update(0.1);
        let OrganismBody::Plant(body) = world.organism(tree).expect("tree").body else {
            panic!("tree must have a plant body");
        };
        assert!(within(body.trunk_scale, trunk_max));
        assert!(within(body.foliage_scale, foliage_max));
        assert!(body.trunk_scale.y >= last_trunk.y);
        assert_eq!(body.foliage_offset, Vec3::new(0.0, body.trunk_scale.y, 0.0));
        last_trunk = body.trunk_scale;
    }
    assert!((last_trunk - trunk_max).length() < 1e-6);
}

#[test]
fn test_huge_frame_lands_exactly_on_max() {
    let (mut world, handles) = WorldBuilder::new()
        .with_config(|c| c.plant.lifespan_range = (5_000, 5_000))
        .with_tree(Vec3::ZERO)
        .build();
    world.update(200.0);
    let OrganismBody::Plant(body) = world.organism(handles[0]).expect("tree").body else {
        panic!("tree must have a plant body");
    };
    assert_eq!(body.trunk_scale, world.config.plant.trunk_max);
    assert_eq!(body.foliage_scale, world.config.plant.foliage_max);
}

#[test]
fn test_animals_grow_to_species_size() {
    let (mut world, handles) = WorldBuilder::new()
        .with_config(|c| {
            c.prey.lifespan_range = (5_000, 5_000);
            c.predator.lifespan_range = (5_000, 5_000);
        })
        .with_animal(AnimalKind::Prey, Vec3::new(-20.0, 0.0, 0.0))
        .with_animal(AnimalKind::Predator, Vec3::new(20.0, 0.0, 0.0))
        .with_time_scale(50.0)
        .build();
    let prey_adult = world.config.prey.adult_scale;
    let predator_adult = world.config.predator.adult_scale;

    for _ in 0..600 {
        world.update(0.1);
        assert!(world.view(handles[0]).expect("view").scale.max_abs() <= prey_adult);
        assert!(world.view(handles[1]).expect("view").scale.max_abs() <= predator_adult);
    }
    assert!((world.view(handles[0]).expect("view").scale.x - prey_adult).abs() < 1e-3);
    assert!((world.view(handles[1]).expect("view").scale.x - predator_adult).abs() < 1e-3);
}
