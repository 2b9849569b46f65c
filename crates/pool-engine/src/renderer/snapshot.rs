use bytemuck::{Pod, Zeroable};

use crate::components::ball::Ball;
use crate::components::palette::{color_for, is_striped};

/// Per-ball render data handed to the host renderer each frame.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Accumulated spin angle, radians.
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 1.0 for 9-15, else 0.0.
    pub stripe: f32,
    /// 1.0 while the ball sits in a pocket.
    pub pocketed: f32,
    pub number: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_ball(ball: &Ball, rotation: f32) -> Self {
        let color = color_for(ball.id);
        Self {
            x: ball.position.x,
            y: ball.position.y,
            radius: ball.radius,
            rotation,
            r: color.r,
            g: color.g,
            b: color.b,
            stripe: if is_striped(ball.id) { 1.0 } else { 0.0 },
            pocketed: if ball.pocketed { 1.0 } else { 0.0 },
            number: ball.id.0 as f32,
            _pad0: 0.0,
            _pad1: 0.0,
        }
    }
}

/// Snapshot of the whole table, rewritten every frame.
pub struct SnapshotBuffer {
    instances: Vec<BallInstance>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BallInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances(&self) -> &[BallInstance] {
        &self.instances
    }

    /// Flat float view for upload into a host vertex buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ball::BallId;
    use glam::Vec2;

    #[test]
    fn ball_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<BallInstance>(), 48);
        assert_eq!(BallInstance::STRIDE_BYTES, 48);
    }

    #[test]
    fn instance_carries_number_and_flags() {
        let mut ball = Ball::new(BallId(11), 14.0, 0.17).with_position(Vec2::new(30.0, 40.0));
        ball.pocketed = true;
        let inst = BallInstance::from_ball(&ball, 0.5);
        assert_eq!((inst.x, inst.y, inst.radius), (30.0, 40.0, 14.0));
        assert_eq!(inst.number, 11.0);
        assert_eq!(inst.stripe, 1.0);
        assert_eq!(inst.pocketed, 1.0);
        assert_eq!(inst.rotation, 0.5);
    }

    #[test]
    fn float_view_matches_instances() {
        let mut buf = SnapshotBuffer::new();
        buf.push(BallInstance::from_ball(&Ball::new(BallId(0), 14.0, 0.17), 0.0));
        buf.push(BallInstance::from_ball(&Ball::new(BallId(8), 14.0, 0.17), 0.0));
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 24);
        assert_eq!(buf.as_bytes().len(), 96);
        // Number of the second ball.
        assert_eq!(buf.as_floats()[12 + 9], 8.0);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
