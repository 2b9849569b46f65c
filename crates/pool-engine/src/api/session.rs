use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::config::{ConfigError, PoolConfig};
use crate::core::simulation::Simulation;
use crate::events::{EventQueue, TableEvent};
use crate::rules::{GameRules, PlayerGroup, TurnResolution};

/// Where a match is in its shot cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Balls at rest, waiting for a shot.
    Aiming,
    /// A shot is running; call `update` every frame.
    Simulating,
    /// The 8-ball decided the game. `new_rack` starts another.
    GameOver,
}

/// Read-only match view for binding a scoreboard or HUD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub player_one_turn: bool,
    pub table_open: bool,
    pub game_over: bool,
    pub winner_is_player_one: bool,
    pub status: String,
    pub player_one_group: PlayerGroup,
}

/// One game of 8-ball on one table: physics, rules and the event feed,
/// driven shot by shot. Input and drawing are left to the host.
pub struct PoolMatch {
    config: PoolConfig,
    simulation: Simulation,
    rules: GameRules,
    events: EventQueue,
    phase: MatchPhase,
}

impl PoolMatch {
    /// Validate `config` and rack the first game.
    pub fn new(config: PoolConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::build(PoolConfig::from_json(json)?))
    }

    /// A match on the standard table.
    pub fn standard() -> Self {
        Self::build(PoolConfig::default())
    }

    fn build(config: PoolConfig) -> Self {
        log::info!(
            "new match on a {}x{} table",
            config.table.width,
            config.table.height
        );
        Self {
            simulation: Simulation::new(&config),
            rules: GameRules::new(),
            events: EventQueue::new(),
            phase: MatchPhase::Aiming,
            config,
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Direct table access, e.g. for a practice layout between shots.
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn state(&self) -> MatchState {
        MatchState {
            player_one_turn: self.rules.player_one_turn(),
            table_open: self.rules.table_open(),
            game_over: self.rules.game_over(),
            winner_is_player_one: self.rules.winner_is_player_one(),
            status: self.rules.status().to_string(),
            player_one_group: self.rules.player_one_group(),
        }
    }

    /// Strike the cue ball. Only accepted while aiming; returns whether the
    /// shot was taken.
    pub fn shoot(&mut self, direction: Vec2, power: f32) -> bool {
        if self.phase != MatchPhase::Aiming {
            log::warn!("shot ignored while {:?}", self.phase);
            return false;
        }

        self.rules.begin_turn();
        if self.simulation.strike(direction, power).is_none() {
            return false;
        }
        self.phase = MatchPhase::Simulating;
        true
    }

    /// Run the simulation for one rendered frame. Returns the verdict on the
    /// shot once every ball has stopped.
    pub fn update(&mut self, frame_dt: f32) -> Option<TurnResolution> {
        if self.phase != MatchPhase::Simulating {
            return None;
        }

        let mut listener = (&mut self.rules, &mut self.events);
        self.simulation.advance(frame_dt, &mut listener);
        if !self.simulation.all_sleeping() {
            return None;
        }

        Some(self.finish_turn())
    }

    fn finish_turn(&mut self) -> TurnResolution {
        self.simulation.stop_all();
        let resolution = self.rules.complete_turn(self.simulation.balls());
        log::debug!("turn complete: {:?}", resolution);

        if resolution.cue_ball_in_hand {
            self.simulation.place_cue_ball_in_hand();
        }
        self.phase = if self.rules.game_over() {
            MatchPhase::GameOver
        } else {
            MatchPhase::Aiming
        };
        self.rules.begin_turn();
        resolution
    }

    /// Re-rack and start over with player one breaking.
    pub fn new_rack(&mut self) {
        self.simulation.rerack();
        self.rules.reset();
        self.events.clear();
        self.phase = MatchPhase::Aiming;
    }

    /// Contacts, cushion hits and pockets since the last drain.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        self.events.drain()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ball::BallId;

    const FRAME: f32 = 1.0 / 60.0;

    /// Step frames until the shot resolves.
    fn play_out(game: &mut PoolMatch) -> TurnResolution {
        for _ in 0..60 * 120 {
            if let Some(res) = game.update(FRAME) {
                return res;
            }
        }
        panic!("shot never came to rest");
    }

    #[test]
    fn new_match_waits_for_the_break() {
        let game = PoolMatch::standard();
        assert_eq!(game.phase(), MatchPhase::Aiming);
        let state = game.state();
        assert!(state.player_one_turn);
        assert!(state.table_open);
        assert!(!state.game_over);
        assert_eq!(state.status, "Break!");
        assert_eq!(state.player_one_group, PlayerGroup::Unknown);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = PoolConfig::default();
        config.physics.max_substeps = 0;
        assert!(PoolMatch::new(config).is_err());
        assert!(PoolMatch::from_json(r#"{"table": {"width": -5}}"#).is_err());
        assert!(PoolMatch::from_json("{}").is_ok());
    }

    #[test]
    fn break_runs_to_rest_and_resolves() {
        let mut game = PoolMatch::standard();
        assert!(game.shoot(Vec2::X, 1.0));
        assert_eq!(game.phase(), MatchPhase::Simulating);
        // No second shot while balls roll.
        assert!(!game.shoot(Vec2::X, 1.0));

        let res = play_out(&mut game);
        assert!(game.simulation().all_sleeping());
        assert_eq!(game.state().status, res.message);
        assert!(!game.simulation().cue_ball().unwrap().pocketed);
        if res.game_won {
            assert_eq!(game.phase(), MatchPhase::GameOver);
        } else {
            assert_eq!(game.phase(), MatchPhase::Aiming);
        }

        let events = game.drain_events();
        assert!(events.iter().any(|e| matches!(e, TableEvent::BallContact { .. })));
        assert!(game.events().is_empty());
    }

    #[test]
    fn scratch_passes_the_table_with_ball_in_hand() {
        let mut game = PoolMatch::standard();
        game.simulation_mut().balls_mut()[0].position = Vec2::new(60.0, 60.0);
        assert!(game.shoot(Vec2::new(-1.0, -1.0), 0.5));

        let res = play_out(&mut game);
        assert!(res.switch_player);
        assert!(res.cue_ball_in_hand);
        assert_eq!(res.message, "Foul: ball in hand.");

        let cue = game.simulation().cue_ball().unwrap();
        assert!(!cue.pocketed);
        assert_eq!(cue.position, game.simulation().table().head_spot());
        assert!(!game.state().player_one_turn);
        assert!(game
            .drain_events()
            .contains(&TableEvent::Pocketed { ball: BallId::CUE }));
    }

    #[test]
    fn rejected_shot_keeps_aiming() {
        let mut game = PoolMatch::standard();
        assert!(!game.shoot(Vec2::ZERO, 1.0));
        assert_eq!(game.phase(), MatchPhase::Aiming);
        assert_eq!(game.update(FRAME), None);
    }

    #[test]
    fn new_rack_starts_over() {
        let mut game = PoolMatch::standard();
        game.shoot(Vec2::X, 1.0);
        game.update(0.1);
        game.new_rack();
        assert_eq!(game.phase(), MatchPhase::Aiming);
        assert!(game.simulation().all_sleeping());
        assert!(game.events().is_empty());
        assert_eq!(game.state(), PoolMatch::standard().state());
    }

    #[test]
    fn state_serializes_for_the_host() {
        let game = PoolMatch::standard();
        let json = serde_json::to_string(&game.state()).unwrap();
        assert!(json.contains(r#""status":"Break!""#));
        assert!(json.contains(r#""player_one_group":"Unknown""#));
        let back: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game.state());
    }
}
