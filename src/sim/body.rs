//! Motion and boundary reflection for axis-aligned bodies
//!
//! A body moves in a straight line each tick and bounces elastically off the
//! walls of its rectangular frame. Contacts are resolved with a single swept
//! pass per tick: the fraction of the tick at which each axis first touches a
//! wall is computed up front, the earlier contact is handled first, and the
//! remainder of the tick continues along the reflected velocity.
//!
//! The pass handles at most one contact per axis per tick. A velocity larger
//! than half the free space on an axis could need more and will under-reflect,
//! leaving the body outside the frame for that tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A moving rectangle confined to a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in frame coordinates
    pub position: Vec2,
    /// Displacement per tick
    pub velocity: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Frame origin in window coordinates (added when drawing and hit-testing)
    pub offset: Vec2,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, size: Vec2, offset: Vec2) -> Self {
        Self {
            position,
            velocity,
            size,
            offset,
        }
    }

    /// Window-space top-left corner
    #[inline]
    pub fn screen_position(&self) -> Vec2 {
        self.position + self.offset
    }

    /// Advance one tick inside the frame at `bound` with the given `extent`
    pub fn update(&mut self, bound: Vec2, extent: Vec2) {
        let fx = contact_fraction(
            self.position.x,
            self.velocity.x,
            self.size.x,
            bound.x,
            extent.x,
        );
        let fy = contact_fraction(
            self.position.y,
            self.velocity.y,
            self.size.y,
            bound.y,
            extent.y,
        );

        let mut pos;
        if fx <= fy {
            pos = self.position + fx * self.velocity;
            if fx < 1.0 {
                self.velocity.x *= -1.0;
                pos += (fy - fx) * self.velocity;
            }
            if fy < 1.0 {
                self.velocity.y *= -1.0;
                pos += (1.0 - fy) * self.velocity;
            }
        } else {
            pos = self.position + fy * self.velocity;
            if fy < 1.0 {
                self.velocity.y *= -1.0;
                pos += (fx - fy) * self.velocity;
            }
            if fx < 1.0 {
                self.velocity.x *= -1.0;
                pos += (1.0 - fx) * self.velocity;
            }
        }
        self.position = pos;
    }

    /// Point-in-rectangle test in window coordinates, half-open on the far edges
    pub fn collides_with(&self, point: Vec2) -> bool {
        let local = point - self.offset;
        local.x >= self.position.x
            && local.x < self.position.x + self.size.x
            && local.y >= self.position.y
            && local.y < self.position.y + self.size.y
    }
}

/// Fraction of this tick after which one axis touches a wall, or 1.0 if it doesn't
///
/// A zero velocity never produces a contact.
fn contact_fraction(pos: f32, vel: f32, size: f32, low: f32, extent: f32) -> f32 {
    if vel == 0.0 {
        return 1.0;
    }
    let next = pos + vel;
    let high = low + extent - size;
    if next < low {
        (low - pos) / vel
    } else if next > high {
        (high - pos) / vel
    } else {
        1.0
    }
}
