use std::fmt;

use serde::{Deserialize, Serialize};

/// Table geometry and material coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Playing surface width in world units.
    pub width: f32,
    /// Playing surface height in world units.
    pub height: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    /// Pocket capture radius as a multiple of the ball radius.
    pub pocket_radius_scale: f32,
    /// How far the two side pockets sit outside the long rails.
    pub side_pocket_offset: f32,
    /// Cushions are ignored within this multiple of (pocket + ball radius)
    /// of any pocket so a ball dropping in is not bounced back out.
    pub near_pocket_scale: f32,
    pub rail_restitution: f32,
    pub ball_restitution: f32,
    /// Exponential felt friction coefficient (1/s).
    pub roll_friction: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 980.0,
            height: 490.0,
            ball_radius: 14.0,
            ball_mass: 0.17,
            pocket_radius_scale: 2.2,
            side_pocket_offset: 10.0,
            near_pocket_scale: 1.35,
            rail_restitution: 0.95,
            ball_restitution: 0.95,
            roll_friction: 0.6,
        }
    }
}

/// Fixed-step integration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Sub-step length in seconds.
    pub fixed_dt: f32,
    /// Most sub-steps a single frame may run.
    pub max_substeps: u32,
    /// Relaxation passes over the pair list per sub-step.
    pub solver_iterations: u32,
    /// Broad-phase cell size as a multiple of the ball radius.
    pub cell_size_scale: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 120.0,
            max_substeps: 8,
            solver_iterations: 4,
            cell_size_scale: 4.0,
        }
    }
}

/// Cue strike tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    /// Cue ball speed at full power.
    pub max_shot_speed: f32,
    /// Power floor; weaker strikes are raised to it.
    pub min_shot_power: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            max_shot_speed: 1700.0,
            min_shot_power: 0.05,
        }
    }
}

/// Complete configuration for one table. Loaded from JSON at runtime or
/// taken from `Default` for the standard table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub table: TableConfig,
    pub physics: PhysicsConfig,
    pub shot: ShotConfig,
}

/// Why a configuration was rejected.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::Invalid { field, reason } => write!(f, "{} {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: "must be finite and > 0" })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: "must be within [0, 1]" })
    }
}

impl PoolConfig {
    /// Parse and validate a configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PoolConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.table;
        positive("table.width", t.width)?;
        positive("table.height", t.height)?;
        positive("table.ball_radius", t.ball_radius)?;
        positive("table.ball_mass", t.ball_mass)?;
        positive("table.pocket_radius_scale", t.pocket_radius_scale)?;
        positive("table.near_pocket_scale", t.near_pocket_scale)?;
        unit_interval("table.rail_restitution", t.rail_restitution)?;
        unit_interval("table.ball_restitution", t.ball_restitution)?;
        if !t.side_pocket_offset.is_finite() {
            return Err(ConfigError::Invalid {
                field: "table.side_pocket_offset",
                reason: "must be finite",
            });
        }
        if !t.roll_friction.is_finite() || t.roll_friction < 0.0 {
            return Err(ConfigError::Invalid {
                field: "table.roll_friction",
                reason: "must be finite and >= 0",
            });
        }
        if t.width < t.ball_radius * 4.0 || t.height < t.ball_radius * 4.0 {
            return Err(ConfigError::Invalid {
                field: "table",
                reason: "must be at least two ball diameters in each direction",
            });
        }

        let p = &self.physics;
        positive("physics.fixed_dt", p.fixed_dt)?;
        if p.max_substeps == 0 {
            return Err(ConfigError::Invalid { field: "physics.max_substeps", reason: "must be >= 1" });
        }
        if p.solver_iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "physics.solver_iterations",
                reason: "must be >= 1",
            });
        }
        // Broad phase only guarantees neighbours within one cell of each other.
        if !p.cell_size_scale.is_finite() || p.cell_size_scale < 4.0 {
            return Err(ConfigError::Invalid {
                field: "physics.cell_size_scale",
                reason: "must be >= 4 (two ball diameters)",
            });
        }

        positive("shot.max_shot_speed", self.shot.max_shot_speed)?;
        if !(self.shot.min_shot_power > 0.0 && self.shot.min_shot_power <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "shot.min_shot_power",
                reason: "must be within (0, 1]",
            });
        }
        Ok(())
    }

    /// Broad-phase cell edge length in world units.
    pub fn cell_size(&self) -> f32 {
        self.table.ball_radius * self.physics.cell_size_scale
    }
}
