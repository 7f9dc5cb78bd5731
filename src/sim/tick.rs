//! Fixed timestep simulation tick
//!
//! One tick applies the frame's input in arrival order, then advances every
//! live tile unless the game is paused. Input is still handled while paused,
//! so unpausing stays responsive.

use glam::Vec2;

use super::matcher::Transition;
use super::state::GameState;

/// Input events the game understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click released at window coordinates
    Click(Vec2),
    TogglePause,
    Quit,
}

/// Input collected for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

/// What happened during a tick
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub transitions: Vec<Transition>,
    /// Tiles moved this tick (false while paused)
    pub advanced: bool,
    pub quit: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    for event in &input.events {
        match *event {
            InputEvent::Click(point) => {
                if let Some(t) = state.click_at(point) {
                    outcome.transitions.push(t);
                }
            }
            InputEvent::TogglePause => state.toggle_pause(),
            InputEvent::Quit => {
                outcome.quit = true;
                return outcome;
            }
        }
    }

    if !state.paused {
        state.advance();
        outcome.advanced = true;
    }
    outcome
}
