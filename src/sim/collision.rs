//! Collision detection between the bird and walls
//!
//! The bird is a circle; walls are rectangles with a gap. While the bird's
//! center is inside a wall's horizontal band we test plain vertical
//! clearance. On either side of the band we test the distance to the two gap
//! corners on the facing edge, which rounds off the corners the bird can
//! graze.

use glam::Vec2;

use super::bird::Bird;
use super::obstacle::ObstaclePair;
use crate::config::GameConfig;

/// Which part of a wall the bird overlaps horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Bird center within the wall's band
    Inside,
    /// Wall's right edge is left of the bird center
    Trailing,
    /// Wall's left edge is right of the bird center
    Leading,
}

/// Classify horizontal overlap, `None` when the wall is out of reach
pub fn overlap(bird: &Bird, wall: &ObstaclePair) -> Option<Overlap> {
    let left = wall.x - wall.half_width();
    let right = wall.x + wall.half_width();

    if left >= bird.x + bird.radius || right <= bird.x - bird.radius {
        return None;
    }

    if left <= bird.x && right >= bird.x {
        Some(Overlap::Inside)
    } else if right < bird.x {
        Some(Overlap::Trailing)
    } else {
        Some(Overlap::Leading)
    }
}

/// Check whether the bird left the play area vertically
#[inline]
pub fn out_of_bounds(bird: &Bird, config: &GameConfig) -> bool {
    bird.y + bird.radius >= config.height || bird.y < 0.0
}

/// Check if either gap corner at horizontal distance `dx` is inside the bird
fn hits_corner(bird: &Bird, wall: &ObstaclePair, dx: f32) -> bool {
    let top = Vec2::new(dx, wall.gap_top() - bird.y);
    let bottom = Vec2::new(dx, wall.gap_bottom() - bird.y);
    top.length() < bird.radius || bottom.length() < bird.radius
}

/// Check collision between the bird and a single wall
pub fn bird_wall_collision(bird: &Bird, wall: &ObstaclePair) -> bool {
    match overlap(bird, wall) {
        None => false,
        Some(Overlap::Inside) => {
            bird.y - bird.radius < wall.gap_top() || bird.y + bird.radius > wall.gap_bottom()
        }
        Some(Overlap::Trailing) => {
            let dx = bird.x - (wall.x + wall.half_width());
            hits_corner(bird, wall, dx)
        }
        Some(Overlap::Leading) => {
            let dx = wall.x - wall.half_width() - bird.x;
            hits_corner(bird, wall, dx)
        }
    }
}

/// Full collision test: play-area bounds first, then every wall
pub fn detect_collision(bird: &Bird, walls: &[ObstaclePair], config: &GameConfig) -> bool {
    if out_of_bounds(bird, config) {
        return true;
    }
    walls.iter().any(|wall| bird_wall_collision(bird, wall))
}
