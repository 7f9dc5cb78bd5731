//! Finite attribute pools for tiles
//!
//! Every tile takes one colour and one launch angle, each drawn without
//! replacement, so no two tiles in a session look or move alike. Running a
//! pool dry is fatal: the deck is larger than the game can tell apart.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::palette::{Rgb, web_safe_palette};
use crate::error::{FlashMatchError, Result};

/// Launch angles in degrees: every even degree
const ANGLE_STEP_DEGREES: u16 = 2;

/// Which pool ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolKind {
    Colors,
    Angles,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKind::Colors => f.write_str("colors"),
            PoolKind::Angles => f.write_str("angles"),
        }
    }
}

/// A bag of values handed out uniformly at random, each at most once
#[derive(Debug, Clone)]
pub struct Pool<T> {
    kind: PoolKind,
    available: Vec<T>,
}

impl<T> Pool<T> {
    pub fn new(kind: PoolKind, available: Vec<T>) -> Self {
        Self { kind, available }
    }

    /// Remove and return a random unused entry
    pub fn allocate<R: Rng>(&mut self, rng: &mut R) -> Result<T> {
        if self.available.is_empty() {
            return Err(FlashMatchError::PoolExhausted { pool: self.kind });
        }
        let i = rng.random_range(0..self.available.len());
        Ok(self.available.swap_remove(i))
    }

    pub fn remaining(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

/// The colour and angle pools shared by every tile built in one session
#[derive(Debug, Clone)]
pub struct TilePools {
    pub colors: Pool<Rgb>,
    pub angles: Pool<f32>,
}

impl TilePools {
    pub fn new() -> Self {
        let angles = (0..360u16)
            .step_by(ANGLE_STEP_DEGREES as usize)
            .map(f32::from)
            .collect();
        Self {
            colors: Pool::new(PoolKind::Colors, web_safe_palette()),
            angles: Pool::new(PoolKind::Angles, angles),
        }
    }

    /// Most tiles these pools can supply
    pub fn capacity(&self) -> usize {
        self.colors.remaining().min(self.angles.remaining())
    }
}

impl Default for TilePools {
    fn default() -> Self {
        Self::new()
    }
}
