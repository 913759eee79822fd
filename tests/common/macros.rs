/// Asserts that the organism with the given ID is no longer in the world.
#[macro_export]
macro_rules! assert_organism_gone {
    ($world:expr, $id:expr) => {
        assert!(
            $world.find($id).is_none(),
            "Organism {} should be despawned but was found",
            $id
        );
    };
}

/// Asserts that the live population count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.population_count(), $count, "Population count mismatch");
    };
}

/// Asserts that `cell` is held by `id` in the occupancy map.
#[macro_export]
macro_rules! assert_cell_owner {
    ($world:expr, $cell:expr, $id:expr) => {
        assert_eq!(
            $world.occupancy.occupant($cell),
            Some($id),
            "Cell {:?} is not held by {}",
            $cell,
            $id
        );
    };
}

/// Asserts that two floats are within `eps` of each other.
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, $eps:expr) => {
        let (a, b): (f64, f64) = ($a, $b);
        assert!((a - b).abs() <= $eps, "{} is not within {} of {}", a, $eps, b);
    };
}
