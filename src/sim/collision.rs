//! Collision tests for the ball against walls, paddle and bricks
//!
//! All colliders are axis-aligned, so responses are sign changes on one
//! velocity component. Speed is never scaled.

use glam::Vec2;

use super::state::{Ball, Brick, Geometry, Paddle};
use crate::config::Config;

/// Which velocity components a wall contact flips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallContact {
    pub side: bool,
    pub top: bool,
}

/// Check the projected center `next` against the side and top walls.
///
/// There is no bottom wall: the paddle always sits under the ball.
pub fn wall_contact(next: Vec2, radius: f32, geometry: &Geometry, config: &Config) -> WallContact {
    let left = config.padding;
    let right = geometry.canvas_width - config.padding;
    WallContact {
        side: next.x - radius < left || next.x + radius > right,
        top: next.y - radius < config.padding,
    }
}

/// The ball crossed the paddle's top edge this tick while falling
#[inline]
pub fn crosses_paddle(ball: &Ball, next: Vec2, paddle: &Paddle) -> bool {
    ball.vel.y > 0.0 && next.y + ball.radius >= paddle.y && ball.pos.y + ball.radius < paddle.y
}

/// Circle vs axis-aligned rectangle: distance from the circle center to the
/// closest point of the rectangle is below the radius
pub fn circle_rect_intersects(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    let closest = center.clamp(min, max);
    center.distance_squared(closest) < radius * radius
}

/// First clearable brick touching the ball, in brick order
pub fn first_brick_hit(
    center: Vec2,
    radius: f32,
    bricks: &[Brick],
    size: f32,
    ghost_mode: bool,
) -> Option<usize> {
    bricks.iter().position(|brick| {
        brick.is_clearable(ghost_mode) && {
            let min = Vec2::new(brick.x, brick.y);
            circle_rect_intersects(center, radius, min, min + Vec2::splat(size))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BrickStatus;

    fn geometry() -> Geometry {
        Geometry {
            canvas_width: 200.0,
            canvas_height: 200.0,
            paddle_y: 170.0,
        }
    }

    #[test]
    fn test_circle_rect_overlap() {
        let min = Vec2::new(10.0, 10.0);
        let max = Vec2::new(20.0, 20.0);

        // Center inside the rectangle
        assert!(circle_rect_intersects(Vec2::new(15.0, 15.0), 1.0, min, max));
        // Edge contact within the radius
        assert!(circle_rect_intersects(Vec2::new(15.0, 24.0), 5.0, min, max));
        // Exactly touching is not a hit
        assert!(!circle_rect_intersects(Vec2::new(15.0, 25.0), 5.0, min, max));
        // Corner: distance sqrt(18) > 4
        assert!(!circle_rect_intersects(Vec2::new(23.0, 23.0), 4.0, min, max));
        assert!(circle_rect_intersects(Vec2::new(23.0, 23.0), 4.5, min, max));
    }

    #[test]
    fn test_wall_contact() {
        let config = Config::default();
        let geometry = geometry();
        let r = config.ball_radius;

        let inside = wall_contact(Vec2::new(100.0, 100.0), r, &geometry, &config);
        assert_eq!(inside, WallContact::default());

        let left = wall_contact(Vec2::new(config.padding + r - 0.5, 100.0), r, &geometry, &config);
        assert!(left.side && !left.top);

        let right = wall_contact(Vec2::new(200.0 - config.padding - r + 0.5, 100.0), r, &geometry, &config);
        assert!(right.side);

        let corner = wall_contact(Vec2::new(config.padding, config.padding), r, &geometry, &config);
        assert!(corner.side && corner.top);
    }

    #[test]
    fn test_crosses_paddle_only_when_falling() {
        let paddle = Paddle {
            x: 50.0,
            y: 170.0,
            width: 75.0,
            height: 10.0,
        };
        let mut ball = Ball {
            pos: Vec2::new(80.0, 158.0),
            vel: Vec2::new(3.0, 7.0),
            radius: 8.0,
        };
        assert!(crosses_paddle(&ball, ball.pos + ball.vel, &paddle));

        // Moving up through the same band
        ball.vel.y = -7.0;
        assert!(!crosses_paddle(&ball, ball.pos + Vec2::new(3.0, 7.0), &paddle));

        // Already past the edge on the previous tick
        ball.vel.y = 7.0;
        ball.pos.y = 165.0;
        assert!(!crosses_paddle(&ball, ball.pos + ball.vel, &paddle));
    }

    #[test]
    fn test_first_brick_hit_order_and_filters() {
        let mut bricks = vec![
            Brick::new(10.0, 10.0, 1, false),
            Brick::new(10.0, 10.0, 2, true),
            Brick::new(10.0, 10.0, 3, true),
        ];
        let center = Vec2::new(15.0, 15.0);

        assert_eq!(first_brick_hit(center, 4.0, &bricks, 10.0, false), Some(0));
        // Ghost mode skips the inactive brick
        assert_eq!(first_brick_hit(center, 4.0, &bricks, 10.0, true), Some(1));

        bricks[1].status = BrickStatus::Hidden;
        assert_eq!(first_brick_hit(center, 4.0, &bricks, 10.0, true), Some(2));

        assert_eq!(first_brick_hit(Vec2::new(90.0, 90.0), 4.0, &bricks, 10.0, false), None);
    }
}
