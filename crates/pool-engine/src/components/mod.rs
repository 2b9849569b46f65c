pub mod ball;
pub mod palette;
pub mod rack;

pub use ball::{Ball, BallCategory, BallId};
pub use palette::{BallColor, BALL_PALETTE};
pub use rack::{rack_positions, standard_rack, RACK_ORDER};
