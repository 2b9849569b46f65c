pub mod game_rules;
pub mod turn;

pub use game_rules::{GameRules, Player, PlayerGroup};
pub use turn::TurnResolution;
