//! Game state: the live tiles, the match engine and the session RNG

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::matcher::{GoalDisplay, MatchEngine, Transition};
use super::pool::TilePools;
use super::tile::Tile;
use crate::Layout;
use crate::deck::DeckCard;
use crate::error::{FlashMatchError, Result};
use crate::settings::{MatchPolicy, MotionConfig};

/// Everything the goal panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub goal: GoalDisplay,
    pub score: i64,
    pub progress: usize,
    pub total: usize,
    pub paused: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub layout: Layout,
    /// Live tiles in insertion order; later tiles are drawn on top
    pub tiles: Vec<Tile>,
    pub engine: MatchEngine,
    pub paused: bool,
    /// Physics steps taken
    pub time_ticks: u64,
}

impl GameState {
    /// Build one tile per card, then the match engine over those tiles.
    ///
    /// `measure` returns the rendered size of a label.
    pub fn new(
        cards: &[DeckCard],
        measure: impl Fn(&str) -> Vec2,
        layout: Layout,
        speed: u32,
        policy: MatchPolicy,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut pools = TilePools::new();
        let motion = MotionConfig::new(speed, layout.field, layout.field_offset);
        let room = layout.field - motion.launch_point;

        let mut tiles = Vec::with_capacity(cards.len());
        for card in cards {
            let tile = Tile::new(
                card.key.as_str(),
                card.value.as_str(),
                measure(&card.key),
                &motion,
                &mut pools,
                &mut rng,
            )?;
            let size = tile.body.size;
            if size.x > room.x || size.y > room.y {
                return Err(FlashMatchError::FieldTooSmall {
                    width: layout.field.x,
                    height: layout.field.y,
                    tile_width: size.x,
                    tile_height: size.y,
                });
            }
            tiles.push(tile);
        }

        let engine = MatchEngine::new(&tiles, policy, &mut rng);
        log::debug!("Match policy: {:?}", engine.policy());
        log::info!(
            "Game initialized with seed {}: {} tiles, field {}x{}",
            seed,
            tiles.len(),
            layout.field.x,
            layout.field.y
        );

        Ok(Self {
            seed,
            rng,
            layout,
            tiles,
            engine,
            paused: false,
            time_ticks: 0,
        })
    }

    /// Top-most live tile under a window-space point
    pub fn tile_at(&self, point: Vec2) -> Option<&Tile> {
        self.tiles.iter().rev().find(|t| t.body.collides_with(point))
    }

    /// Resolve a click to a tile and score it. Clicks on empty space do nothing.
    pub fn click_at(&mut self, point: Vec2) -> Option<Transition> {
        let value = self.tile_at(point)?.value.clone();
        Some(self.register_click(&value))
    }

    /// Score a guess of `value` and clear its tile if the engine says so
    pub fn register_click(&mut self, value: &str) -> Transition {
        let transition = self.engine.register_click(value, &mut self.rng);
        match &transition {
            Transition::Matched { clear: Some(v) } | Transition::Exhausted { clear: Some(v) } => {
                self.remove_last_matching(v);
            }
            _ => {}
        }
        if transition != Transition::Ignored {
            let total = self.engine.total();
            let percent = if total == 0 {
                0.0
            } else {
                100.0 * self.engine.progress as f64 / total as f64
            };
            log::info!(
                "{} / {} = {:.2}% - score = {}",
                self.engine.progress,
                total,
                percent,
                self.engine.score
            );
        }
        transition
    }

    /// Remove the most recently inserted live tile with `value`
    pub fn remove_last_matching(&mut self, value: &str) -> Option<Tile> {
        let i = self.tiles.iter().rposition(|t| t.value == value)?;
        Some(self.tiles.remove(i))
    }

    /// Move every live tile one tick
    pub fn advance(&mut self) {
        let field = self.layout.field;
        for tile in &mut self.tiles {
            tile.body.update(Vec2::ZERO, field);
        }
        self.time_ticks += 1;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.engine.mark_dirty();
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    pub fn panel_view(&self) -> PanelView {
        PanelView {
            goal: self.engine.display(),
            score: self.engine.score,
            progress: self.engine.progress,
            total: self.engine.total(),
            paused: self.paused,
        }
    }
}
