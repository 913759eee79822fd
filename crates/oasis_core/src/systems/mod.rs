//! Per-organism update rules, dispatched by the world driver each tick.

pub mod animal;
pub mod plant;
