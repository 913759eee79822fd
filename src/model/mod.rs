pub use oasis_core::SimError;
pub mod clock {
    pub use oasis_core::clock::*;
}
pub mod config {
    pub use oasis_core::config::*;
}
pub mod geometry {
    pub use oasis_core::geometry::*;
}
pub mod lifecycle {
    pub use oasis_core::lifecycle::*;
}
pub mod metrics {
    pub use oasis_core::metrics::*;
}
pub mod occupancy {
    pub use oasis_core::occupancy::*;
}
pub mod systems {
    pub use oasis_core::systems::*;
}

pub mod world;
