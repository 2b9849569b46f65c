/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of fixed physics sub-steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per sub-step.
    dt: f32,
    /// Most sub-steps a single frame may produce.
    max_steps: u32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        // Cap so a stalled frame cannot trigger unbounded catch-up.
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = ((self.accumulator / self.dt) as u32).min(self.max_steps);
        self.accumulator -= steps as f32 * self.dt;
        // Absorb rounding so an exact multiple of dt never leaves a sliver behind.
        if self.accumulator < self.dt * 1e-3 {
            self.accumulator = 0.0;
        }
        steps
    }

    /// Drop any leftover time, e.g. once the table comes to rest.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Interpolation alpha for rendering between sub-steps (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(1.0 / 120.0, 8)
    }
}
