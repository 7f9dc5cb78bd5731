//! Error types
//!
//! Every failure here happens while loading or building a session; a running
//! game never produces one.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::pool::PoolKind;

pub type Result<T> = std::result::Result<T, FlashMatchError>;

#[derive(Debug, Error)]
pub enum FlashMatchError {
    #[error("failed to read deck file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("deck line {line} has a key but no value")]
    MissingValue { line: usize },

    #[error("ran out of {pool} while making a new tile")]
    PoolExhausted { pool: PoolKind },

    #[error("field {width}x{height} is too small for a {tile_width}x{tile_height} tile")]
    FieldTooSmall {
        width: f32,
        height: f32,
        tile_width: f32,
        tile_height: f32,
    },
}
