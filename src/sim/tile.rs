//! Tiles: the bouncing cards on the field

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::palette::Rgb;
use super::pool::TilePools;
use crate::angle_to_velocity;
use crate::consts::BOX_FACTOR;
use crate::error::Result;
use crate::settings::MotionConfig;

/// One deck entry on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub key: String,
    pub value: String,
    pub body: Body,
    pub color: Rgb,
    /// Text colour chosen for contrast against `color`
    pub text_color: Rgb,
    /// Text inset from the tile's top-left corner
    pub text_inset: f32,
}

impl Tile {
    /// Build a tile showing `key`, whose rendered text measures `text_size`.
    ///
    /// Takes one colour and one angle out of `pools`.
    pub fn new<R: Rng>(
        key: impl Into<String>,
        value: impl Into<String>,
        text_size: Vec2,
        motion: &MotionConfig,
        pools: &mut TilePools,
        rng: &mut R,
    ) -> Result<Self> {
        let angle = pools.angles.allocate(rng)?;
        let color = pools.colors.allocate(rng)?;

        let padding = (text_size.y * BOX_FACTOR).floor();
        let size = text_size + Vec2::splat(padding);
        let text_inset = (text_size.y * BOX_FACTOR / 2.0).floor();

        Ok(Self {
            key: key.into(),
            value: value.into(),
            body: Body::new(
                motion.launch_point,
                angle_to_velocity(angle, motion.speed),
                size,
                motion.offset,
            ),
            color,
            text_color: color.contrast(),
            text_inset,
        })
    }

    /// Window-space position of the label
    pub fn text_position(&self) -> Vec2 {
        self.body.screen_position() + Vec2::splat(self.text_inset)
    }
}
