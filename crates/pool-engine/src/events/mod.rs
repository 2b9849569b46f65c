pub mod queue;

pub use queue::{ContactListener, EventQueue, TableEvent};
