//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (tile insertion order)
//! - No rendering or platform dependencies

pub mod body;
pub mod matcher;
pub mod palette;
pub mod pool;
pub mod state;
pub mod tick;
pub mod tile;

pub use body::Body;
pub use matcher::{DONE_TEXT, DeckEntry, GoalDisplay, MatchEngine, NEUTRAL_COLOR, Transition};
pub use palette::Rgb;
pub use pool::{Pool, PoolKind, TilePools};
pub use state::{GameState, PanelView};
pub use tick::{InputEvent, TickInput, TickOutcome, tick};
pub use tile::Tile;
