pub mod api;
pub mod core;
pub mod components;
pub mod rules;
pub mod events;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, PhysicsConfig, PoolConfig, ShotConfig, TableConfig};
pub use api::session::{MatchPhase, MatchState, PoolMatch};
pub use components::ball::{Ball, BallCategory, BallId};
pub use components::palette::{BallColor, BALL_PALETTE};
pub use components::rack::{rack_positions, standard_rack, RACK_ORDER};
pub use core::collision::CollisionResolver;
pub use core::simulation::Simulation;
pub use core::spatial_hash::SpatialHash;
pub use core::table::Table;
pub use core::time::FixedTimestep;
pub use events::{ContactListener, EventQueue, TableEvent};
pub use renderer::snapshot::{BallInstance, SnapshotBuffer};
pub use rules::{GameRules, Player, PlayerGroup, TurnResolution};
