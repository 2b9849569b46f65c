//! Standard 8-ball rack layout.

use glam::Vec2;

use crate::components::ball::{Ball, BallId};
use crate::core::table::Table;

/// Ball numbers in rack order, row by row from the apex.
///
/// ```text
///  1                 <- apex (row 0, toward the cue ball)
///  10  3
///  12  5  8          <- 8-ball at the end of row 2
///  2   11  4  14
///  6   13  7  15  9
/// ```
pub const RACK_ORDER: [u8; 15] = [1, 10, 3, 12, 5, 8, 2, 11, 4, 14, 6, 13, 7, 15, 9];

/// Number of balls in a full set, cue included.
pub const BALL_COUNT: usize = 16;

/// Triangle positions for the fifteen object balls with the apex at `apex`.
/// Rows spread away from the cue ball along +X; balls in a row touch.
pub fn rack_positions(apex: Vec2, ball_radius: f32) -> [(BallId, Vec2); 15] {
    let diameter = ball_radius * 2.0;
    let row_spacing = diameter * 0.866_025_4; // sqrt(3)/2 for an equilateral triangle

    let mut positions = [(BallId::CUE, Vec2::ZERO); 15];
    let mut index = 0;
    for row in 0..5 {
        for col in 0..=row {
            let x = apex.x + row_spacing * row as f32;
            let y = apex.y - diameter * row as f32 * 0.5 + diameter * col as f32;
            positions[index] = (BallId(RACK_ORDER[index]), Vec2::new(x, y));
            index += 1;
        }
    }
    positions
}

/// A full set ready for the break: cue ball on the head spot, object balls
/// racked on the foot spot. `balls[n].id == BallId(n)` for every ball.
pub fn standard_rack(table: &Table, ball_mass: f32) -> Vec<Ball> {
    let mut balls: Vec<Ball> = (0..BALL_COUNT as u8)
        .map(|n| Ball::new(BallId(n), table.ball_radius, ball_mass))
        .collect();
    rerack(&mut balls, table);
    balls
}

/// Put every ball of an existing set back in its break position. Balls are
/// matched by number, so any subset in any order is fine; numbers outside
/// the standard set are left where they are.
pub fn rerack(balls: &mut [Ball], table: &Table) {
    let racked = rack_positions(table.foot_spot(), table.ball_radius);
    for ball in balls.iter_mut() {
        let spot = if ball.id == BallId::CUE {
            Some(table.head_spot())
        } else {
            racked.iter().find(|(id, _)| *id == ball.id).map(|&(_, pos)| pos)
        };
        if let Some(pos) = spot {
            ball.reset(pos);
        }
    }
}
