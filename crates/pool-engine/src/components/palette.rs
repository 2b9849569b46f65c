//! Ball colours: a read-only mapping from ball number to RGB.

use crate::components::ball::{BallCategory, BallId};

/// RGB colour in the 0..1 range, as handed to the host renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BallColor {
    pub const WHITE: BallColor = BallColor::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Colour of every ball in a standard set, indexed by ball number.
/// Stripes 9-15 reuse the colours of solids 1-7.
pub const BALL_PALETTE: [BallColor; 16] = [
    BallColor::WHITE,               // cue
    BallColor::new(1.0, 0.8, 0.0),  // 1 yellow
    BallColor::new(0.0, 0.4, 1.0),  // 2 blue
    BallColor::new(0.8, 0.0, 0.0),  // 3 red
    BallColor::new(0.6, 0.0, 0.8),  // 4 purple
    BallColor::new(1.0, 0.4, 0.0),  // 5 orange
    BallColor::new(0.0, 0.6, 0.4),  // 6 green
    BallColor::new(0.5, 0.0, 0.25), // 7 maroon
    BallColor::new(0.0, 0.0, 0.0),  // 8 black
    BallColor::new(1.0, 0.8, 0.0),  // 9
    BallColor::new(0.0, 0.4, 1.0),  // 10
    BallColor::new(0.8, 0.0, 0.0),  // 11
    BallColor::new(0.6, 0.0, 0.8),  // 12
    BallColor::new(1.0, 0.4, 0.0),  // 13
    BallColor::new(0.0, 0.6, 0.4),  // 14
    BallColor::new(0.5, 0.0, 0.25), // 15
];

/// Colour for a ball; numbers outside the standard set render white.
pub fn color_for(id: BallId) -> BallColor {
    BALL_PALETTE.get(id.index()).copied().unwrap_or(BallColor::WHITE)
}

/// Whether the renderer should draw a stripe band for this ball.
pub fn is_striped(id: BallId) -> bool {
    BallCategory::for_number(id.0) == BallCategory::Stripe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripes_share_solid_colors() {
        for n in 1..=7u8 {
            assert_eq!(color_for(BallId(n)), color_for(BallId(n + 8)));
        }
    }

    #[test]
    fn cue_white_eight_black() {
        assert_eq!(color_for(BallId::CUE), BallColor::WHITE);
        assert_eq!(color_for(BallId::EIGHT), BallColor::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn unknown_number_falls_back_to_white() {
        assert_eq!(color_for(BallId(42)), BallColor::WHITE);
    }

    #[test]
    fn striped_flag() {
        assert!(!is_striped(BallId(0)));
        assert!(!is_striped(BallId(8)));
        assert!(is_striped(BallId(9)));
        assert!(is_striped(BallId(15)));
    }
}
