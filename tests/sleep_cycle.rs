mod common;

use common::WorldBuilder;
use oasis_data::{AnimalKind, LiveEvent, OrganismStatus, Vec3};

#[test]
fn test_awake_ten_seconds_then_sleeps() {
    let (mut world, handles) = WorldBuilder::new()
        .with_animal(AnimalKind::Prey, Vec3::ZERO)
        .build();
    let handle = handles[0];

    let mut fell_asleep_at = None;
    for tick in 1..=110u64 {
        let events = world.update(0.1);
        if events
            .iter()
            .any(|e| matches!(e, LiveEvent::FellAsleep { .. }))
        {
            fell_asleep_at = Some(tick);
        }
    }

    let state = world.animal_state(handle).expect("animal");
    assert!(state.is_sleeping());
    let remaining = state.sleep_time_remaining();
    assert!(
        (3.95..=4.15).contains(&remaining),
        "Sleep remaining {remaining} after 11 simulated seconds"
    );
    let at = fell_asleep_at.expect("must fall asleep");
    assert!((100..=101).contains(&at), "Fell asleep at tick {at}");
    assert_eq!(
        world.view(handle).expect("view").status,
        OrganismStatus::Sleeping
    );
}

#[test]
fn test_sleeping_animal_does_not_move_and_wakes() {
    let (mut world, handles) = WorldBuilder::new()
        .with_animal(AnimalKind::Predator, Vec3::new(2.0, 0.0, 2.0))
        .build();
    let handle = handles[0];
    common::edit_animal(&mut world, handle, |state| {
        state.activity = oasis_data::Activity::Sleeping { remaining: 1.0 };
    });

    let position = world.view(handle).expect("view").position;
    let mut woke = false;
    for _ in 0..9 {
        let events = world.update(0.1);
        woke |= events.iter().any(|e| matches!(e, LiveEvent::Woke { .. }));
        assert_eq!(world.view(handle).expect("view").position, position);
    }
    assert!(!woke);

    for _ in 0..2 {
        let events = world.update(0.1);
        woke |= events.iter().any(|e| matches!(e, LiveEvent::Woke { .. }));
    }
    assert!(woke);
    let state = world.animal_state(handle).expect("animal");
    assert!(!state.is_sleeping());
    assert!(state.awake_time_remaining() > 9.5);
}

#[test]
fn test_large_frame_is_clamped_per_step() {
    let (mut world, handles) = WorldBuilder::new()
        .with_animal(AnimalKind::Prey, Vec3::ZERO)
        .build();
    // A single 5 s frame only advances the sleep cycle by the step clamp.
    world.update(5.0);
    let state = world.animal_state(handles[0]).expect("animal");
    assert!(!state.is_sleeping());
    assert!((state.awake_time_remaining() - 9.9).abs() < 1e-9);
    // Aging is not clamped.
    assert!((world.view(handles[0]).expect("view").age - 5.0).abs() < 1e-9);
}
