//! Rendering seam
//!
//! The simulation never draws. A [`Surface`] measures labels, draws tiles and
//! the goal panel, and presents the finished frame.

pub mod terminal;

use glam::Vec2;

use crate::sim::{GameState, PanelView, Tile};

pub use terminal::TerminalSurface;

pub trait Surface {
    /// Rendered size of a label
    fn text_size(&self, text: &str) -> Vec2;

    /// Blank the field (window coordinates) before tiles are drawn
    fn clear_field(&mut self, origin: Vec2, extent: Vec2);

    /// Draw one tile inside the field at `bound` with `extent`
    fn draw_tile(&mut self, tile: &Tile, bound: Vec2, extent: Vec2);

    /// Draw the goal panel
    fn draw_panel(&mut self, origin: Vec2, extent: Vec2, view: &PanelView);

    /// Show the frame
    fn present(&mut self) -> std::io::Result<()>;
}

/// Draw one frame. The field is only redrawn while the game runs; the panel
/// only when it changed.
pub fn render_frame<S: Surface>(surface: &mut S, state: &mut GameState) -> std::io::Result<()> {
    let layout = state.layout;
    if !state.paused {
        surface.clear_field(layout.field_offset, layout.field);
        for tile in &state.tiles {
            surface.draw_tile(tile, Vec2::ZERO, layout.field);
        }
    }
    if state.engine.is_dirty() {
        surface.draw_panel(Vec2::ZERO, layout.panel, &state.panel_view());
        state.engine.clear_dirty();
    }
    surface.present()
}
