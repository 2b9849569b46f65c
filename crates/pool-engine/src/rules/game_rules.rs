use serde::{Deserialize, Serialize};

use crate::components::ball::{Ball, BallCategory, BallId};
use crate::events::ContactListener;
use crate::rules::turn::TurnResolution;

const BREAK_STATUS: &str = "Break!";

/// Which half of the object balls a player is on.
/// `Unknown` means the table is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerGroup {
    #[default]
    Unknown,
    Solids,
    Stripes,
}

impl PlayerGroup {
    pub fn opponent(self) -> Self {
        match self {
            PlayerGroup::Unknown => PlayerGroup::Unknown,
            PlayerGroup::Solids => PlayerGroup::Stripes,
            PlayerGroup::Stripes => PlayerGroup::Solids,
        }
    }

    /// Group a pocketed ball counts towards. Cue and 8 belong to nobody.
    pub fn of_category(category: BallCategory) -> Self {
        match category {
            BallCategory::Solid => PlayerGroup::Solids,
            BallCategory::Stripe => PlayerGroup::Stripes,
            BallCategory::Cue | BallCategory::Eight => PlayerGroup::Unknown,
        }
    }

    /// Ball category a player on this group must hit first.
    pub fn category(self) -> Option<BallCategory> {
        match self {
            PlayerGroup::Unknown => None,
            PlayerGroup::Solids => Some(BallCategory::Solid),
            PlayerGroup::Stripes => Some(BallCategory::Stripe),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn from_turn(player_one_turn: bool) -> Self {
        if player_one_turn {
            Player::One
        } else {
            Player::Two
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn is_one(self) -> bool {
        self == Player::One
    }
}

/// What happened during the shot currently on the table.
#[derive(Debug, Clone, Default)]
struct TurnContext {
    first_contact: Option<BallCategory>,
    cue_ball_pocketed: bool,
    /// Balls sunk this shot, in the order they dropped.
    pocketed: Vec<(BallId, BallCategory)>,
}

impl TurnContext {
    fn clear(&mut self) {
        self.first_contact = None;
        self.cue_ball_pocketed = false;
        self.pocketed.clear();
    }
}

/// Running tally of one shot's pocket results.
#[derive(Debug, Default)]
struct Tally {
    foul: bool,
    legal_pocket: bool,
    eight_pocketed: bool,
    eight_legal: bool,
}

/// 8-ball rules: tracks whose turn it is, group assignment and the winner,
/// and judges each shot once the table has come to rest.
#[derive(Debug, Clone)]
pub struct GameRules {
    player_one_turn: bool,
    player_one_group: PlayerGroup,
    game_over: bool,
    winner_is_player_one: bool,
    status: String,
    turn: TurnContext,
}

impl GameRules {
    pub fn new() -> Self {
        Self {
            player_one_turn: true,
            player_one_group: PlayerGroup::Unknown,
            game_over: false,
            winner_is_player_one: false,
            status: BREAK_STATUS.to_string(),
            turn: TurnContext::default(),
        }
    }

    /// Start a fresh game: player one breaks on an open table.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Forget the previous shot. Call right before the cue ball is struck.
    pub fn begin_turn(&mut self) {
        self.turn.clear();
    }

    pub fn player_one_turn(&self) -> bool {
        self.player_one_turn
    }

    pub fn current_player(&self) -> Player {
        Player::from_turn(self.player_one_turn)
    }

    pub fn player_one_group(&self) -> PlayerGroup {
        self.player_one_group
    }

    /// Group of the player at the table.
    pub fn shooter_group(&self) -> PlayerGroup {
        if self.player_one_turn {
            self.player_one_group
        } else {
            self.player_one_group.opponent()
        }
    }

    pub fn table_open(&self) -> bool {
        self.player_one_group == PlayerGroup::Unknown
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner_is_player_one(&self) -> bool {
        self.winner_is_player_one
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Category of the first ball the cue ball touched this shot.
    pub fn first_contact(&self) -> Option<BallCategory> {
        self.turn.first_contact
    }

    /// Record a ball-ball contact. Only the cue ball's first touch on a ball
    /// still on the table matters.
    pub fn register_collision(&mut self, a: &Ball, b: &Ball) {
        if self.turn.first_contact.is_some() {
            return;
        }
        let target = if a.is_cue() && !b.pocketed {
            b
        } else if b.is_cue() && !a.pocketed {
            a
        } else {
            return;
        };
        log::debug!("first contact: ball {} ({:?})", target.id.0, target.category);
        self.turn.first_contact = Some(target.category);
    }

    pub fn register_pocket(&mut self, ball: &Ball) {
        log::debug!("pocketed ball {}", ball.id.0);
        self.turn.pocketed.push((ball.id, ball.category));
        if ball.is_cue() {
            self.turn.cue_ball_pocketed = true;
        }
    }

    /// Judge the shot that just came to rest and advance the match.
    ///
    /// `balls` is the whole set, pocketed balls included; it is only read to
    /// see which of the shooter's balls are still on the table.
    pub fn complete_turn(&mut self, balls: &[Ball]) -> TurnResolution {
        if self.game_over {
            return TurnResolution::new(false, false, true, self.winner_is_player_one, self.status.clone());
        }

        let resolution = self.evaluate(balls);

        if resolution.game_won {
            self.game_over = true;
            self.winner_is_player_one = resolution.winner_is_player_one;
            log::info!("game over: {}", resolution.message);
        } else if resolution.switch_player {
            self.player_one_turn = !self.player_one_turn;
        }
        self.status = resolution.message.clone();

        resolution
    }

    fn evaluate(&mut self, balls: &[Ball]) -> TurnResolution {
        let shooter = self.current_player();
        let mut group = self.shooter_group();
        let mut tally = Tally::default();

        let pocketed = std::mem::take(&mut self.turn.pocketed);
        for &(id, category) in &pocketed {
            match category {
                BallCategory::Cue => {}
                BallCategory::Eight => {
                    tally.eight_pocketed = true;
                    let cleared = !has_remaining(group, balls);
                    tally.eight_legal = group != PlayerGroup::Unknown && cleared;
                    if !tally.eight_legal {
                        tally.foul = true;
                    }
                    log::debug!("8-ball down, group {:?} cleared: {}", group, cleared);
                }
                BallCategory::Solid | BallCategory::Stripe => {
                    let ball_group = PlayerGroup::of_category(category);
                    if self.table_open() {
                        self.assign_groups(ball_group);
                        group = self.shooter_group();
                    }
                    if group == PlayerGroup::Unknown || group == ball_group {
                        tally.legal_pocket = true;
                    } else {
                        log::debug!("foul: ball {} belongs to {:?}", id.0, ball_group);
                        tally.foul = true;
                    }
                }
            }
        }
        self.turn.pocketed = pocketed;

        if let Some(required) = group.category() {
            match self.turn.first_contact {
                None => {
                    log::debug!("foul: cue ball hit nothing");
                    tally.foul = true;
                }
                Some(hit) if hit == required => {}
                Some(hit) => {
                    let on_the_eight = !has_remaining(group, balls);
                    if !(on_the_eight && hit == BallCategory::Eight) {
                        log::debug!("foul: first contact {:?}, needed {:?}", hit, required);
                        tally.foul = true;
                    }
                }
            }
        }

        if self.turn.cue_ball_pocketed {
            log::debug!("foul: scratch");
            tally.foul = true;
        }

        match tally {
            Tally { eight_pocketed: true, eight_legal: true, foul: false, .. } => TurnResolution::new(
                false,
                false,
                true,
                shooter.is_one(),
                format!("Player {} wins!", shooter.number()),
            ),
            Tally { eight_pocketed: true, .. } => TurnResolution::new(
                true,
                true,
                true,
                shooter.opponent().is_one(),
                format!("Player {} wins (8-ball pocketed illegally).", shooter.opponent().number()),
            ),
            Tally { foul: true, .. } => {
                TurnResolution::new(true, true, false, shooter.opponent().is_one(), "Foul: ball in hand.")
            }
            Tally { legal_pocket: true, .. } => {
                TurnResolution::new(false, false, false, shooter.is_one(), "Keep shooting.")
            }
            Tally { .. } => {
                TurnResolution::new(true, false, false, shooter.opponent().is_one(), "No ball pocketed.")
            }
        }
    }

    /// Write-once: the first legal group pocket on an open table decides
    /// both players' groups.
    fn assign_groups(&mut self, shooter_group: PlayerGroup) {
        if !self.table_open() {
            return;
        }
        self.player_one_group = if self.player_one_turn {
            shooter_group
        } else {
            shooter_group.opponent()
        };
        log::info!("groups assigned: player 1 on {:?}", self.player_one_group);
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactListener for GameRules {
    fn ball_contact(&mut self, a: &Ball, b: &Ball) {
        self.register_collision(a, b);
    }

    fn ball_pocketed(&mut self, ball: &Ball) {
        self.register_pocket(ball);
    }
}

/// Whether any ball of `group` is still on the table. An open table always
/// counts as having balls left.
fn has_remaining(group: PlayerGroup, balls: &[Ball]) -> bool {
    match group.category() {
        None => true,
        Some(category) => balls
            .iter()
            .any(|b| !b.pocketed && !b.is_cue() && b.category == category),
    }
}
