//! Plain data components shared by the Oasis simulation crates.
//!
//! Nothing in here owns behavior beyond small value helpers; the update rules
//! live in `oasis_core`.

pub mod data;

pub use data::entity::*;
pub use data::environment::*;
pub use data::vector::Vec3;
