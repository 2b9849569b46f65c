use serde::{Deserialize, Serialize};

/// Outcome of a finished shot, handed back to whoever drives the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResolution {
    /// The other player shoots next.
    pub switch_player: bool,
    /// The incoming player may place the cue ball anywhere legal.
    pub cue_ball_in_hand: bool,
    /// The 8-ball went down and the game is decided.
    pub game_won: bool,
    /// Meaningful when `game_won`; otherwise tracks who shoots next.
    pub winner_is_player_one: bool,
    pub message: String,
}

impl TurnResolution {
    pub fn new(
        switch_player: bool,
        cue_ball_in_hand: bool,
        game_won: bool,
        winner_is_player_one: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            switch_player,
            cue_ball_in_hand,
            game_won,
            winner_is_player_one,
            message: message.into(),
        }
    }

    /// A foul that handed the table over: the opponent gets ball in hand.
    pub fn is_foul(&self) -> bool {
        self.switch_player && self.cue_ball_in_hand && !self.game_won
    }
}
