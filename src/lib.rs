//! Flash Match - a two-panel flashcard matching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile motion, colour/angle pools, matching)
//! - `vector`: 2D vector helpers on top of `glam::Vec2`
//! - `deck`: Deck file loading
//! - `settings`: Command line surface and immutable game configuration
//! - `renderer`: Drawing surface seam and the terminal front-end

pub mod deck;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod vector;

pub use error::{FlashMatchError, Result};
pub use settings::{Args, Chances, MatchPolicy, MotionConfig};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Target simulation steps per second
    pub const DEFAULT_FPS: u32 = 60;

    /// The goal panel takes this fraction of the window width; the field gets the rest
    pub const PANEL_WIDTH_FRACTION: f32 = 0.25;

    /// Tile speed in field units per tick at `--speed 1`
    pub const BASE_SPEED: f32 = 0.25;

    /// Tile padding = text height * BOX_FACTOR (split evenly around the text)
    pub const BOX_FACTOR: f32 = 2.0;

    /// Score for a correct match
    pub const MATCH_REWARD: i64 = 100;
    /// Score lost for each wrong guess
    pub const WRONG_GUESS_PENALTY: i64 = 10;
    /// Extra score lost when an entry runs out of guesses
    pub const EXHAUSTED_PENALTY: i64 = 100;
}

/// Convert a launch angle in degrees and a speed to a velocity vector
#[inline]
pub fn angle_to_velocity(degrees: f32, speed: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(theta.cos() * speed, theta.sin() * speed)
}

/// Where the goal panel and the play field sit inside the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub window: Vec2,
    pub panel: Vec2,
    pub field: Vec2,
    /// Field origin in window coordinates
    pub field_offset: Vec2,
}

impl Layout {
    /// Panel on the left quarter, field on the rest
    pub fn from_window(window: Vec2) -> Self {
        let panel_w = (window.x * consts::PANEL_WIDTH_FRACTION).floor();
        Self {
            window,
            panel: Vec2::new(panel_w, window.y),
            field: Vec2::new(window.x - panel_w, window.y),
            field_offset: Vec2::new(panel_w, 0.0),
        }
    }
}
