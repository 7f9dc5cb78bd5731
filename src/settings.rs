//! Command line surface and game configuration
//!
//! Arguments are parsed once and turned into immutable configuration values
//! that are handed to the tiles and the match engine at construction.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BASE_SPEED, DEFAULT_FPS};
use crate::vector::VectorExt;

/// Play a new game of Flash Match
#[derive(Debug, Clone, Parser, Serialize)]
#[command(name = "flash-match", version, about)]
pub struct Args {
    /// A file with key-value pairs, one pair per line, separated by
    /// whitespace, with optional notes afterward
    #[arg(value_name = "DECK_FILE")]
    pub deck: PathBuf,

    /// The speed of pieces on the board
    #[arg(long, value_name = "X", default_value_t = 1)]
    pub speed: u32,

    /// The number of guesses allowed for each card (-1 or 0 means unlimited)
    #[arg(long, value_name = "N", default_value_t = -1, allow_negative_numbers = true)]
    pub chances: i32,

    /// Keep the same card until it is matched or out of guesses
    #[arg(long)]
    pub wait: bool,

    /// Do not clear resolved cards from the board
    #[arg(long)]
    pub noclear: bool,

    /// Show the correct match's background color
    #[arg(long)]
    pub colorhint: bool,

    /// Seed for tile colours, angles and goal order (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulation steps per second
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,
}

impl Args {
    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy {
            chances: Chances::from_arg(self.chances),
            wait: self.wait,
            noclear: self.noclear,
            colorhint: self.colorhint,
        }
    }
}

/// Guesses allowed per goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Chances {
    #[default]
    Unlimited,
    Limited(u32),
}

impl Chances {
    /// Non-positive counts mean unlimited
    pub fn from_arg(n: i32) -> Self {
        if n <= 0 {
            Chances::Unlimited
        } else {
            Chances::Limited(n as u32)
        }
    }
}

/// How the match engine reacts to guesses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MatchPolicy {
    pub chances: Chances,
    /// Wrong guesses keep the current goal instead of drawing a new one
    pub wait: bool,
    /// Resolved tiles stay on the board
    pub noclear: bool,
    /// The goal panel shows the target tile's colour
    pub colorhint: bool,
}

/// Launch parameters shared by every tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Field units per tick
    pub speed: f32,
    /// Where tiles start, in field coordinates
    pub launch_point: Vec2,
    /// Field origin in window coordinates
    pub offset: Vec2,
}

impl MotionConfig {
    /// Tiles launch from the middle of a field of `field_extent`
    pub fn new(speed: u32, field_extent: Vec2, offset: Vec2) -> Self {
        Self {
            speed: speed as f32 * BASE_SPEED,
            launch_point: field_extent.floor_div(2.0),
            offset,
        }
    }
}
