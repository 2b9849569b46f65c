pub mod collision;
pub mod simulation;
pub mod spatial_hash;
pub mod table;
pub mod time;

pub use collision::{resolve_pair, CollisionResolver};
pub use simulation::Simulation;
pub use spatial_hash::SpatialHash;
pub use table::Table;
pub use time::FixedTimestep;
