pub mod config;
pub mod session;

pub use config::{ConfigError, PhysicsConfig, PoolConfig, ShotConfig, TableConfig};
pub use session::{MatchPhase, MatchState, PoolMatch};
