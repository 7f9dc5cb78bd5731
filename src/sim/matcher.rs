//! Goal selection and guess scoring
//!
//! The engine holds the deck entries that are still unmatched, draws one of
//! them at random as the current goal, and scores every click against it.
//! What a wrong guess does depends on the [`MatchPolicy`]: it may requeue the
//! goal and draw another, keep the goal until it is matched, or use up one of
//! a limited number of guesses.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::palette::Rgb;
use super::tile::Tile;
use crate::consts::{EXHAUSTED_PENALTY, MATCH_REWARD, WRONG_GUESS_PENALTY};
use crate::settings::{Chances, MatchPolicy};

/// Text shown in the goal box once every entry is resolved
pub const DONE_TEXT: &str = "DONE!";

/// Goal box colour when no hint is shown
pub const NEUTRAL_COLOR: Rgb = Rgb::BLACK;

/// An unmatched deck entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub value: String,
    pub color: Rgb,
    pub remaining_guesses: Chances,
}

/// What a click did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// No goal is active
    Ignored,
    /// Correct guess. `clear` names the value whose tile leaves the board.
    Matched { clear: Option<String> },
    /// Wrong guess with guesses left; `redrawn` if a new goal was drawn
    Missed { redrawn: bool },
    /// Wrong guess that used up the goal's last chance
    Exhausted { clear: Option<String> },
}

/// What the goal panel should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDisplay {
    pub text: String,
    pub color: Rgb,
}

/// The matching state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEngine {
    policy: MatchPolicy,
    remaining: Vec<DeckEntry>,
    goal: Option<DeckEntry>,
    pub score: i64,
    pub progress: usize,
    total: usize,
    /// Set on every transition, cleared by whoever redraws the panel
    #[serde(skip)]
    dirty: bool,
}

impl MatchEngine {
    /// One entry per tile, then draw the first goal
    pub fn new<R: Rng>(tiles: &[Tile], policy: MatchPolicy, rng: &mut R) -> Self {
        let remaining: Vec<DeckEntry> = tiles
            .iter()
            .map(|tile| DeckEntry {
                value: tile.value.clone(),
                color: tile.color,
                remaining_guesses: policy.chances,
            })
            .collect();
        let total = remaining.len();

        let mut engine = Self {
            policy,
            remaining,
            goal: None,
            score: 0,
            progress: 0,
            total,
            dirty: true,
        };
        engine.new_goal(true, rng);
        engine
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    pub fn goal(&self) -> Option<&DeckEntry> {
        self.goal.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.goal.is_none()
    }

    /// Entries still waiting to become the goal (excludes the goal itself)
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Number of entries the engine started with
    pub fn total(&self) -> usize {
        self.total
    }

    /// Score a click on a tile with `value`
    pub fn register_click<R: Rng>(&mut self, value: &str, rng: &mut R) -> Transition {
        let Some(goal) = self.goal.as_mut() else {
            return Transition::Ignored;
        };
        self.dirty = true;

        if value == goal.value {
            let value = goal.value.clone();
            self.progress += 1;
            self.score += MATCH_REWARD;
            self.new_goal(true, rng);
            return Transition::Matched {
                clear: self.clear_target(value),
            };
        }

        self.score -= WRONG_GUESS_PENALTY;
        match goal.remaining_guesses {
            Chances::Unlimited => Transition::Missed {
                redrawn: self.redraw_unless_waiting(rng),
            },
            Chances::Limited(n) => {
                let left = n.saturating_sub(1);
                goal.remaining_guesses = Chances::Limited(left);
                if left == 0 {
                    let value = goal.value.clone();
                    self.score -= EXHAUSTED_PENALTY;
                    self.new_goal(true, rng);
                    Transition::Exhausted {
                        clear: self.clear_target(value),
                    }
                } else {
                    Transition::Missed {
                        redrawn: self.redraw_unless_waiting(rng),
                    }
                }
            }
        }
    }

    /// Draw the next goal. Without `discard` the current goal goes back into
    /// the pool first and may be drawn again straight away.
    ///
    /// An empty pool finishes the game, even when the current goal would
    /// have been put back.
    pub fn new_goal<R: Rng>(&mut self, discard: bool, rng: &mut R) {
        self.dirty = true;
        if self.remaining.is_empty() {
            self.goal = None;
            log::info!("Deck exhausted: score {}", self.score);
            return;
        }
        if !discard {
            if let Some(goal) = self.goal.take() {
                self.remaining.push(goal);
            }
        }
        let i = rng.random_range(0..self.remaining.len());
        let goal = self.remaining.swap_remove(i);
        log::debug!("New goal: {}", goal.value);
        self.goal = Some(goal);
    }

    /// Text and colour for the goal box
    pub fn display(&self) -> GoalDisplay {
        match &self.goal {
            None => GoalDisplay {
                text: DONE_TEXT.to_string(),
                color: NEUTRAL_COLOR,
            },
            Some(goal) => GoalDisplay {
                text: goal.value.clone(),
                color: if self.policy.colorhint {
                    goal.color
                } else {
                    NEUTRAL_COLOR
                },
            },
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the panel as drawn
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Ask for a panel redraw without a transition
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn redraw_unless_waiting<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.policy.wait {
            return false;
        }
        self.new_goal(false, rng);
        true
    }

    fn clear_target(&self, value: String) -> Option<String> {
        (!self.policy.noclear).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MotionConfig;
    use crate::sim::pool::TilePools;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn tiles(values: &[&str], rng: &mut Pcg32) -> Vec<Tile> {
        let motion = MotionConfig::new(1, Vec2::new(90.0, 40.0), Vec2::ZERO);
        let mut pools = TilePools::new();
        values
            .iter()
            .map(|v| Tile::new(*v, *v, Vec2::new(2.0, 1.0), &motion, &mut pools, &mut *rng).unwrap())
            .collect()
    }

    fn setup(values: &[&str], policy: MatchPolicy, seed: u64) -> (MatchEngine, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let tiles = tiles(values, &mut rng);
        let engine = MatchEngine::new(&tiles, policy, &mut rng);
        (engine, rng)
    }

    fn goal_value(engine: &MatchEngine) -> String {
        engine.goal().unwrap().value.clone()
    }

    /// Any value in the deck other than the goal
    fn wrong_value(engine: &MatchEngine, values: &[&str]) -> String {
        let goal = goal_value(engine);
        values.iter().find(|v| **v != goal).unwrap().to_string()
    }

    #[test]
    fn test_first_goal_drawn_on_construction() {
        let (engine, _) = setup(&["a", "b", "c"], MatchPolicy::default(), 1);
        assert!(!engine.is_finished());
        assert_eq!(engine.remaining(), 2);
        assert_eq!(engine.total(), 3);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.progress, 0);
    }

    #[test]
    fn test_correct_match() {
        let (mut engine, mut rng) = setup(&["a", "b", "c"], MatchPolicy::default(), 2);
        let goal = goal_value(&engine);
        let t = engine.register_click(&goal, &mut rng);
        assert_eq!(t, Transition::Matched { clear: Some(goal) });
        assert_eq!(engine.score, 100);
        assert_eq!(engine.progress, 1);
        assert_eq!(engine.remaining(), 1);
        assert!(!engine.is_finished());
    }

    #[test]
    fn test_wrong_guess_requeues_goal() {
        let values = ["a", "b", "c"];
        let (mut engine, mut rng) = setup(&values, MatchPolicy::default(), 3);
        let wrong = wrong_value(&engine, &values);
        let t = engine.register_click(&wrong, &mut rng);
        assert_eq!(t, Transition::Missed { redrawn: true });
        assert_eq!(engine.score, -10);
        assert_eq!(engine.progress, 0);
        // Nothing was lost: goal + pool still hold every entry
        assert_eq!(engine.remaining() + 1, 3);
    }

    #[test]
    fn test_two_chances_exhaust() {
        let values = ["a", "b", "c"];
        let policy = MatchPolicy {
            chances: Chances::Limited(2),
            wait: true,
            ..Default::default()
        };
        let (mut engine, mut rng) = setup(&values, policy, 4);
        let goal = goal_value(&engine);
        let wrong = wrong_value(&engine, &values);

        assert_eq!(
            engine.register_click(&wrong, &mut rng),
            Transition::Missed { redrawn: false }
        );
        assert_eq!(goal_value(&engine), goal);
        assert_eq!(
            engine.goal().unwrap().remaining_guesses,
            Chances::Limited(1)
        );

        let t = engine.register_click(&wrong, &mut rng);
        assert_eq!(t, Transition::Exhausted { clear: Some(goal.clone()) });
        assert_eq!(engine.score, -10 - 10 - 100);
        assert_eq!(engine.progress, 0);
        assert_ne!(goal_value(&engine), goal);
        assert_eq!(engine.remaining(), 1);
    }

    #[test]
    fn test_limited_chances_without_wait_keeps_count_across_requeue() {
        let values = ["a", "b"];
        let policy = MatchPolicy {
            chances: Chances::Limited(3),
            ..Default::default()
        };
        let (mut engine, mut rng) = setup(&values, policy, 5);
        let first = goal_value(&engine);
        let wrong = wrong_value(&engine, &values);
        engine.register_click(&wrong, &mut rng);
        assert_eq!(engine.score, -10);

        // Whichever goal is up now, the requeued one carries its decrement
        let requeued_guesses = if goal_value(&engine) == first {
            engine.goal().unwrap().remaining_guesses
        } else {
            engine.remaining.iter().find(|e| e.value == first).unwrap().remaining_guesses
        };
        assert_eq!(requeued_guesses, Chances::Limited(2));
    }

    #[test]
    fn test_wait_keeps_goal() {
        let values = ["a", "b", "c"];
        let policy = MatchPolicy {
            wait: true,
            ..Default::default()
        };
        let (mut engine, mut rng) = setup(&values, policy, 6);
        let goal = goal_value(&engine);
        let wrong = wrong_value(&engine, &values);
        for _ in 0..5 {
            assert_eq!(
                engine.register_click(&wrong, &mut rng),
                Transition::Missed { redrawn: false }
            );
            assert_eq!(goal_value(&engine), goal);
        }
        assert_eq!(engine.score, -50);
    }

    #[test]
    fn test_noclear_never_asks_for_removal() {
        let policy = MatchPolicy {
            noclear: true,
            chances: Chances::Limited(1),
            ..Default::default()
        };
        let values = ["a", "b"];
        let (mut engine, mut rng) = setup(&values, policy, 7);
        let wrong = wrong_value(&engine, &values);
        assert_eq!(
            engine.register_click(&wrong, &mut rng),
            Transition::Exhausted { clear: None }
        );
        let goal = goal_value(&engine);
        assert_eq!(
            engine.register_click(&goal, &mut rng),
            Transition::Matched { clear: None }
        );
        assert!(engine.is_finished());
    }

    #[test]
    fn test_termination() {
        let values = ["a", "b", "c", "d"];
        let (mut engine, mut rng) = setup(&values, MatchPolicy::default(), 8);
        while !engine.is_finished() {
            let goal = goal_value(&engine);
            engine.register_click(&goal, &mut rng);
        }
        assert_eq!(engine.progress, values.len());
        assert_eq!(engine.score, 400);
        assert_eq!(engine.register_click("a", &mut rng), Transition::Ignored);
        assert_eq!(engine.score, 400);
        assert_eq!(engine.display().text, DONE_TEXT);
        assert_eq!(engine.display().color, NEUTRAL_COLOR);
    }

    #[test]
    fn test_wrong_guess_on_last_entry_finishes() {
        let values = ["a", "b"];
        let (mut engine, mut rng) = setup(&values, MatchPolicy::default(), 9);
        let first = goal_value(&engine);
        engine.register_click(&first, &mut rng);
        assert_eq!(engine.remaining(), 0);

        // The matched value is now a wrong guess for the last goal
        let t = engine.register_click(&first, &mut rng);
        assert_eq!(t, Transition::Missed { redrawn: true });
        assert!(engine.is_finished());
        assert_eq!(engine.score, 90);
        assert_eq!(engine.progress, 1);
        assert_eq!(engine.display().text, DONE_TEXT);
    }

    #[test]
    fn test_wrong_guess_on_last_entry_with_wait_keeps_it() {
        let values = ["a", "b"];
        let policy = MatchPolicy {
            wait: true,
            ..Default::default()
        };
        let (mut engine, mut rng) = setup(&values, policy, 9);
        let first = goal_value(&engine);
        engine.register_click(&first, &mut rng);
        let last = goal_value(&engine);
        engine.register_click(&first, &mut rng);
        assert!(!engine.is_finished());
        assert_eq!(goal_value(&engine), last);
    }

    #[test]
    fn test_empty_deck_starts_finished() {
        let (mut engine, mut rng) = setup(&[], MatchPolicy::default(), 12);
        assert!(engine.is_finished());
        assert_eq!(engine.progress, 0);
        assert_eq!(engine.total(), 0);
        assert_eq!(engine.display().text, DONE_TEXT);
        assert_eq!(engine.register_click("a", &mut rng), Transition::Ignored);
    }

    #[test]
    fn test_colorhint_display() {
        let (engine, _) = setup(&["a", "b"], MatchPolicy::default(), 10);
        let shown = engine.display();
        assert_eq!(shown.text, goal_value(&engine));
        assert_eq!(shown.color, NEUTRAL_COLOR);

        let policy = MatchPolicy {
            colorhint: true,
            ..Default::default()
        };
        let (engine, _) = setup(&["a", "b"], policy, 10);
        assert_eq!(engine.display().color, engine.goal().unwrap().color);
    }

    #[test]
    fn test_dirty_flag() {
        let (mut engine, mut rng) = setup(&["a", "b"], MatchPolicy::default(), 11);
        assert!(engine.is_dirty());
        engine.clear_dirty();
        assert!(!engine.is_dirty());
        let goal = goal_value(&engine);
        engine.register_click(&goal, &mut rng);
        assert!(engine.is_dirty());
    }

    proptest! {
        #[test]
        fn prop_score_tracks_outcomes(
            seed in any::<u64>(),
            clicks in proptest::collection::vec(0usize..4, 0..60),
            chances in -1i32..4,
            wait in any::<bool>(),
        ) {
            let values = ["a", "b", "c", "d"];
            let policy = MatchPolicy {
                chances: Chances::from_arg(chances),
                wait,
                ..Default::default()
            };
            let (mut engine, mut rng) = setup(&values, policy, seed);
            let mut expected = 0i64;
            let mut resolved = 0usize;
            for i in clicks {
                let before = engine.progress;
                match engine.register_click(values[i], &mut rng) {
                    Transition::Ignored => {
                        prop_assert!(engine.is_finished());
                    }
                    Transition::Matched { .. } => {
                        expected += 100;
                        resolved += 1;
                        prop_assert_eq!(engine.progress, before + 1);
                    }
                    Transition::Missed { .. } => {
                        expected -= 10;
                        // A miss on the last entry ends the game and drops it
                        if engine.is_finished() {
                            resolved += 1;
                        }
                    }
                    Transition::Exhausted { .. } => {
                        expected -= 110;
                        resolved += 1;
                    }
                }
                prop_assert_eq!(engine.score, expected);
                // Entries only leave when matched, exhausted, or missed last
                let live = engine.remaining() + usize::from(!engine.is_finished());
                prop_assert_eq!(live + resolved, values.len());
            }
        }
    }
}
