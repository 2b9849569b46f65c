use std::f32::consts::TAU;

use glam::Vec2;

use crate::api::config::{PoolConfig, ShotConfig};
use crate::components::ball::{Ball, BallId};
use crate::components::rack;
use crate::core::collision::CollisionResolver;
use crate::core::spatial_hash::SpatialHash;
use crate::core::table::Table;
use crate::core::time::FixedTimestep;
use crate::events::ContactListener;
use crate::renderer::snapshot::{BallInstance, SnapshotBuffer};

/// Placement tries before the cue ball is dropped wherever the search ended.
const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// One table in motion: the ball set plus everything needed to step it.
///
/// A racked set is indexed by number (`balls()[n].id == BallId(n)`), but
/// lookups go by `BallId`, so any subset in any order works. Contacts and pockets are reported to whatever listener the
/// caller passes to `step`/`advance`.
pub struct Simulation {
    balls: Vec<Ball>,
    table: Table,
    hash: SpatialHash,
    resolver: CollisionResolver,
    clock: FixedTimestep,
    shot: ShotConfig,
    /// Rolling angle per ball, for the renderer only.
    roll_angles: Vec<f32>,
}

impl Simulation {
    /// A freshly racked table.
    pub fn new(config: &PoolConfig) -> Self {
        let table = Table::new(&config.table);
        let balls = rack::standard_rack(&table, config.table.ball_mass);
        Self::with_balls(config, balls)
    }

    /// A table holding an arbitrary ball set, e.g. a practice layout.
    pub fn with_balls(config: &PoolConfig, balls: Vec<Ball>) -> Self {
        let physics = &config.physics;
        Self {
            roll_angles: vec![0.0; balls.len()],
            balls,
            table: Table::new(&config.table),
            hash: SpatialHash::new(config.cell_size()),
            resolver: CollisionResolver::new(physics.solver_iterations),
            clock: FixedTimestep::new(physics.fixed_dt, physics.max_substeps),
            shot: config.shot.clone(),
        }
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    /// Slice index of ball `id`. Checks the racked slot first.
    fn index_of(&self, id: BallId) -> Option<usize> {
        match self.balls.get(id.index()) {
            Some(ball) if ball.id == id => Some(id.index()),
            _ => self.balls.iter().position(|b| b.id == id),
        }
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.index_of(id).and_then(|i| self.balls.get(i))
    }

    pub fn ball_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        let index = self.index_of(id)?;
        self.balls.get_mut(index)
    }

    pub fn cue_ball(&self) -> Option<&Ball> {
        self.ball(BallId::CUE)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn clock(&self) -> &FixedTimestep {
        &self.clock
    }

    /// Advance exactly one fixed sub-step of `dt` seconds.
    ///
    /// Integrates, captures pocketed balls, applies felt friction, then runs
    /// the collision pass. Returns whether anything is still moving.
    pub fn step(&mut self, dt: f32, listener: &mut impl ContactListener) -> bool {
        let mut moving = false;

        for (ball, angle) in self.balls.iter_mut().zip(self.roll_angles.iter_mut()) {
            if ball.pocketed {
                continue;
            }

            ball.position += ball.velocity * dt;
            if ball.radius > 0.0 {
                *angle = (*angle + ball.velocity.length() * dt / ball.radius) % TAU;
            }

            if let Some(pocket) = self.table.try_pocket(ball) {
                log::debug!("ball {} dropped into pocket {}", ball.id.0, pocket);
                listener.ball_pocketed(ball);
                continue;
            }

            ball.apply_damping(dt, self.table.roll_friction);
            moving |= !ball.is_sleeping();
        }

        self.resolver.step(&mut self.balls, &self.table, &mut self.hash, listener);

        moving || !self.all_sleeping()
    }

    /// Feed a variable frame delta through the fixed-step clock. Stops as
    /// soon as the table comes to rest and drops the leftover time.
    /// Returns the number of sub-steps run.
    pub fn advance(&mut self, frame_dt: f32, listener: &mut impl ContactListener) -> u32 {
        let steps = self.clock.accumulate(frame_dt);
        let dt = self.clock.dt();
        for n in 0..steps {
            if !self.step(dt, listener) {
                self.clock.reset();
                return n + 1;
            }
        }
        steps
    }

    /// Every ball still on the table is at rest.
    pub fn all_sleeping(&self) -> bool {
        self.balls.iter().all(|b| b.pocketed || b.is_sleeping())
    }

    pub fn stop_all(&mut self) {
        for ball in self.balls.iter_mut().filter(|b| !b.pocketed) {
            ball.stop();
        }
    }

    /// Rack all fifteen object balls and spot the cue ball for a new break.
    pub fn rerack(&mut self) {
        rack::rerack(&mut self.balls, &self.table);
        self.roll_angles.iter_mut().for_each(|a| *a = 0.0);
        self.clock.reset();
        log::info!("table racked");
    }

    /// Hit the cue ball along `direction` with `power` in `[0, 1]`.
    ///
    /// Power under the configured floor is raised to it. A pocketed cue ball
    /// is put back in hand first. Returns the cue ball velocity, or `None`
    /// when the direction is unusable.
    pub fn strike(&mut self, direction: Vec2, power: f32) -> Option<Vec2> {
        let Some(direction) = direction.try_normalize() else {
            log::warn!("shot rejected: direction {:?} has no length", direction);
            return None;
        };

        let requested = if power.is_finite() { power } else { 0.0 };
        let power = requested.clamp(self.shot.min_shot_power, 1.0);
        if power != requested {
            log::warn!("shot power {} clamped to {}", requested, power);
        }

        if self.cue_ball()?.pocketed {
            self.place_cue_ball_in_hand();
        }

        let velocity = direction * power * self.shot.max_shot_speed;
        let cue = self.ball_mut(BallId::CUE)?;
        cue.pocketed = false;
        cue.stop();
        cue.velocity = velocity;
        self.clock.reset();
        log::debug!("strike: power {:.2}, velocity {:?}", power, velocity);
        Some(velocity)
    }

    /// Spot the cue ball near the head spot, walking down the table and then
    /// across until it clears every ball still in play.
    pub fn place_cue_ball_in_hand(&mut self) -> Vec2 {
        let head = self.table.head_spot();
        let Some(cue) = self.cue_ball() else {
            return head;
        };
        let (radius, diameter) = (cue.radius, cue.diameter());

        let mut position = head;
        let mut clear = false;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let blocked = self.balls.iter().any(|b| {
                b.id != BallId::CUE
                    && !b.pocketed
                    && position.distance(b.position) < radius + b.radius + 1.0
            });
            if !blocked {
                clear = true;
                break;
            }

            position.y += diameter * 1.1;
            if position.y > self.table.height - radius {
                position.y = radius;
                position.x += diameter * 1.2;
            }
        }
        if !clear {
            log::warn!("no free spot for the cue ball after {} tries", MAX_PLACEMENT_ATTEMPTS);
        }

        let position = self.table.clamp_to_interior(position);
        if let Some(cue) = self.ball_mut(BallId::CUE) {
            cue.reset(position);
        }
        log::debug!("cue ball in hand at {:?}", position);
        position
    }

    /// Rewrite `buffer` with one instance per ball, in ball order.
    pub fn write_snapshot(&self, buffer: &mut SnapshotBuffer) {
        buffer.clear();
        for (ball, angle) in self.balls.iter().zip(&self.roll_angles) {
            buffer.push(BallInstance::from_ball(ball, *angle));
        }
    }
}
