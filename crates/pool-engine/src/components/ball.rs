use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Linear speed (world units/s) at or below which a ball counts as resting.
pub const SLEEP_LINEAR_THRESHOLD: f32 = 0.02;
/// Angular speed (rad/s) at or below which a ball counts as resting.
pub const SLEEP_ANGULAR_THRESHOLD: f32 = 0.02;

/// Ball number: 0 is the cue ball, 1-15 are object balls.
/// Doubles as the index of the ball in a racked ball set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u8);

impl BallId {
    pub const CUE: BallId = BallId(0);
    pub const EIGHT: BallId = BallId(8);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a ball counts as for the 8-ball rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallCategory {
    Cue,
    Solid,
    Stripe,
    Eight,
}

impl BallCategory {
    /// Category of a standard set ball by its number.
    pub fn for_number(number: u8) -> Self {
        match number {
            0 => BallCategory::Cue,
            8 => BallCategory::Eight,
            1..=7 => BallCategory::Solid,
            _ => BallCategory::Stripe,
        }
    }
}

/// A single pool ball: identity plus mutable physical state.
///
/// Balls live in one flat `Vec` for the whole game; pocketed balls stay in
/// the set with `pocketed` raised and are skipped by collision handling.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: BallId,
    pub category: BallCategory,
    pub radius: f32,
    pub mass: f32,
    pub position: Vec2,
    /// Linear velocity in world units per second.
    pub velocity: Vec2,
    /// Scalar spin proxy. Only ever decays.
    pub angular_velocity: f32,
    pub pocketed: bool,
}

impl Ball {
    /// Create a resting ball at the origin. The category follows the number.
    pub fn new(id: BallId, radius: f32, mass: f32) -> Self {
        Self {
            id,
            category: BallCategory::for_number(id.0),
            radius,
            mass,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            pocketed: false,
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn is_cue(&self) -> bool {
        self.category == BallCategory::Cue
    }

    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    /// Inverse mass; zero for a massless (immovable) ball.
    pub fn inv_mass(&self) -> f32 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Both linear and angular speed are at or under the resting thresholds.
    pub fn is_sleeping(&self) -> bool {
        self.velocity.length_squared() <= SLEEP_LINEAR_THRESHOLD * SLEEP_LINEAR_THRESHOLD
            && self.angular_velocity.abs() <= SLEEP_ANGULAR_THRESHOLD
    }

    /// Exponential felt friction over `dt` seconds. Speeds that fall under
    /// the resting thresholds snap to exactly zero.
    pub fn apply_damping(&mut self, dt: f32, roll_friction: f32) {
        if self.pocketed {
            self.stop();
            return;
        }

        let decay = (-roll_friction * dt).exp();
        self.velocity *= decay;
        self.angular_velocity *= decay;

        if self.velocity.length_squared() <= SLEEP_LINEAR_THRESHOLD * SLEEP_LINEAR_THRESHOLD {
            self.velocity = Vec2::ZERO;
        }
        if self.angular_velocity.abs() <= SLEEP_ANGULAR_THRESHOLD {
            self.angular_velocity = 0.0;
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
    }

    /// Put the ball back on the table at `position`, at rest.
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
        self.pocketed = false;
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball() -> Ball {
        Ball::new(BallId(3), 14.0, 0.17)
    }

    #[test]
    fn category_follows_number() {
        assert_eq!(BallCategory::for_number(0), BallCategory::Cue);
        assert_eq!(BallCategory::for_number(1), BallCategory::Solid);
        assert_eq!(BallCategory::for_number(7), BallCategory::Solid);
        assert_eq!(BallCategory::for_number(8), BallCategory::Eight);
        assert_eq!(BallCategory::for_number(9), BallCategory::Stripe);
        assert_eq!(BallCategory::for_number(15), BallCategory::Stripe);
    }

    #[test]
    fn damping_decays_exponentially() {
        let mut b = ball().with_velocity(Vec2::new(100.0, 0.0)).with_angular_velocity(10.0);
        b.apply_damping(1.0, 0.6);
        let expected = 100.0 * (-0.6f32).exp();
        assert!((b.velocity.x - expected).abs() < 1e-3, "vx was {}", b.velocity.x);
        assert!((b.angular_velocity - 10.0 * (-0.6f32).exp()).abs() < 1e-4);
    }

    #[test]
    fn slow_ball_snaps_to_rest() {
        let mut b = ball().with_velocity(Vec2::new(0.021, 0.0)).with_angular_velocity(0.021);
        assert!(!b.is_sleeping());
        b.apply_damping(0.1, 0.6);
        assert_eq!(b.velocity, Vec2::ZERO);
        assert_eq!(b.angular_velocity, 0.0);
        assert!(b.is_sleeping());
    }

    #[test]
    fn sleeping_ball_stays_asleep() {
        let mut b = ball().with_velocity(Vec2::new(0.01, 0.01));
        b.apply_damping(1.0 / 120.0, 0.6);
        assert!(b.is_sleeping());
        for _ in 0..1000 {
            b.apply_damping(1.0 / 120.0, 0.6);
            assert!(b.is_sleeping());
        }
        assert_eq!(b.velocity, Vec2::ZERO);
    }

    #[test]
    fn spinning_ball_is_not_sleeping() {
        let b = ball().with_angular_velocity(1.0);
        assert!(!b.is_sleeping());
    }

    #[test]
    fn damping_stops_pocketed_ball() {
        let mut b = ball().with_velocity(Vec2::new(50.0, 50.0));
        b.pocketed = true;
        b.apply_damping(1.0 / 120.0, 0.6);
        assert_eq!(b.velocity, Vec2::ZERO);
    }

    #[test]
    fn reset_clears_pocket_and_motion() {
        let mut b = ball().with_velocity(Vec2::new(5.0, 0.0)).with_angular_velocity(2.0);
        b.pocketed = true;
        b.reset(Vec2::new(100.0, 200.0));
        assert!(!b.pocketed);
        assert_eq!(b.position, Vec2::new(100.0, 200.0));
        assert_eq!(b.velocity, Vec2::ZERO);
        assert_eq!(b.angular_velocity, 0.0);
    }
}
