use glam::Vec2;

use crate::api::config::TableConfig;
use crate::components::ball::Ball;

/// Number of pockets on a standard table.
pub const POCKET_COUNT: usize = 6;

/// Static table geometry. Owns no balls; every operation works on a ball
/// passed in by reference.
///
/// The playing surface spans `(0, 0)..(width, height)`. Rails run along the
/// four edges; pockets sit on the corners and midway along the long rails.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    pub ball_radius: f32,
    pub pocket_radius: f32,
    pub rail_restitution: f32,
    pub ball_restitution: f32,
    pub roll_friction: f32,
    near_pocket_scale: f32,
    pockets: [Vec2; POCKET_COUNT],
}

impl Table {
    pub fn new(config: &TableConfig) -> Self {
        let (w, h) = (config.width, config.height);
        let side = config.side_pocket_offset;
        Self {
            width: w,
            height: h,
            ball_radius: config.ball_radius,
            pocket_radius: config.ball_radius * config.pocket_radius_scale,
            rail_restitution: config.rail_restitution,
            ball_restitution: config.ball_restitution,
            roll_friction: config.roll_friction,
            near_pocket_scale: config.near_pocket_scale,
            pockets: [
                // Corners
                Vec2::new(0.0, 0.0),
                Vec2::new(w, 0.0),
                Vec2::new(0.0, h),
                Vec2::new(w, h),
                // Sides, pushed out past the long rails
                Vec2::new(w / 2.0, -side),
                Vec2::new(w / 2.0, h + side),
            ],
        }
    }

    /// The standard 980 x 490 table with 14-unit balls.
    pub fn standard() -> Self {
        Self::new(&TableConfig::default())
    }

    pub fn pockets(&self) -> &[Vec2; POCKET_COUNT] {
        &self.pockets
    }

    /// Where the cue ball is placed for the break and for ball-in-hand.
    pub fn head_spot(&self) -> Vec2 {
        Vec2::new(self.width * 0.25, self.height * 0.5)
    }

    /// Apex of the rack.
    pub fn foot_spot(&self) -> Vec2 {
        Vec2::new(self.width * 0.7, self.height * 0.5)
    }

    /// Whether a ball centre at `pos` lies on the playing surface.
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Clamp a ball centre so the ball lies fully inside the rails.
    pub fn clamp_to_interior(&self, pos: Vec2) -> Vec2 {
        let r = self.ball_radius;
        pos.clamp(Vec2::splat(r), Vec2::new(self.width - r, self.height - r))
    }

    /// Capture the ball if its centre is inside a pocket. Returns the pocket
    /// index. A ball that is already pocketed is left untouched.
    pub fn try_pocket(&self, ball: &mut Ball) -> Option<usize> {
        if ball.pocketed {
            return None;
        }

        let radius_sq = self.pocket_radius * self.pocket_radius;
        let index = self
            .pockets
            .iter()
            .position(|p| ball.position.distance_squared(*p) <= radius_sq)?;

        ball.pocketed = true;
        ball.position = self.pockets[index];
        ball.stop();
        Some(index)
    }

    /// Whether the ball is close enough to a pocket mouth that cushions
    /// should leave it alone.
    pub fn is_near_pocket(&self, ball: &Ball) -> bool {
        let threshold = (self.pocket_radius + ball.radius) * self.near_pocket_scale;
        let threshold_sq = threshold * threshold;
        self.pockets
            .iter()
            .any(|p| ball.position.distance_squared(*p) <= threshold_sq)
    }

    /// Bounce the ball off any rail it has pushed into. The centre is
    /// reflected back by the penetration depth and the velocity component on
    /// that axis turned back into the table, scaled by rail restitution.
    /// Returns whether a rail was hit.
    pub fn resolve_cushion(&self, ball: &mut Ball) -> bool {
        if ball.pocketed || self.is_near_pocket(ball) {
            return false;
        }

        let r = ball.radius;
        let e = self.rail_restitution;
        let (x, vx, hit_x) = reflect_axis(ball.position.x, ball.velocity.x, r, self.width - r, e);
        let (y, vy, hit_y) = reflect_axis(ball.position.y, ball.velocity.y, r, self.height - r, e);
        ball.position = Vec2::new(x, y);
        ball.velocity = Vec2::new(vx, vy);
        hit_x || hit_y
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::standard()
    }
}

/// One axis of the cushion bounce. Returns the new coordinate, velocity and
/// whether a rail was touched.
fn reflect_axis(pos: f32, vel: f32, min: f32, max: f32, restitution: f32) -> (f32, f32, bool) {
    if pos < min {
        let penetration = min - pos;
        (min + penetration, vel.abs() * restitution, true)
    } else if pos > max {
        let penetration = pos - max;
        (max - penetration, -vel.abs() * restitution, true)
    } else {
        (pos, vel, false)
    }
}
