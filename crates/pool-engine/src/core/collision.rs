use crate::components::ball::Ball;
use crate::core::spatial_hash::SpatialHash;
use crate::core::table::Table;
use crate::events::ContactListener;

/// Default number of relaxation passes per sub-step.
pub const DEFAULT_ITERATIONS: u32 = 4;

/// Narrow phase: resolves ball-ball contacts from the broad-phase candidate
/// list, then ball-cushion contacts.
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    iterations: u32,
    /// Reused pair buffer; refilled once per step.
    pairs: Vec<(usize, usize)>,
}

impl CollisionResolver {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
            pairs: Vec::with_capacity(64),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Run the collision half of one fixed sub-step.
    ///
    /// The pair list is taken once per step. Positions move during the
    /// relaxation passes but the candidate set does not.
    pub fn step(
        &mut self,
        balls: &mut [Ball],
        table: &Table,
        hash: &mut SpatialHash,
        listener: &mut impl ContactListener,
    ) {
        hash.clear();
        for (i, ball) in balls.iter().enumerate() {
            if !ball.pocketed {
                hash.insert(i, ball.position);
            }
        }

        self.pairs.clear();
        hash.pairs_into(&mut self.pairs);

        for _ in 0..self.iterations {
            for &(i, j) in &self.pairs {
                let (a, b) = pair_mut(balls, i, j);
                resolve_pair(a, b, table.ball_restitution, listener);
            }
        }

        for ball in balls.iter_mut() {
            if ball.pocketed {
                continue;
            }
            if table.resolve_cushion(ball) {
                listener.cushion_contact(ball);
            }
        }
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

/// Two distinct mutable elements of a slice.
fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = balls.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = balls.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Separate two overlapping balls and exchange momentum along the contact
/// normal. Non-touching and coincident pairs are skipped silently.
pub fn resolve_pair(
    a: &mut Ball,
    b: &mut Ball,
    restitution: f32,
    listener: &mut impl ContactListener,
) {
    if a.pocketed || b.pocketed {
        return;
    }

    let delta = b.position - a.position;
    let dist_sq = delta.length_squared();
    let combined = a.radius + b.radius;
    if dist_sq >= combined * combined || dist_sq <= 0.0 {
        return;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;
    let penetration = combined - dist;

    // Equal split regardless of mass.
    a.position -= normal * (penetration * 0.5);
    b.position += normal * (penetration * 0.5);

    let relative = (b.velocity - a.velocity).dot(normal);
    if relative >= 0.0 {
        // Already separating; still a touch for the rules.
        listener.ball_contact(a, b);
        return;
    }

    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum > 0.0 {
        let j = -(1.0 + restitution) * relative / inv_sum;
        let impulse = normal * j;
        a.velocity -= impulse * inv_a;
        b.velocity += impulse * inv_b;
    }

    listener.ball_contact(a, b);
}
