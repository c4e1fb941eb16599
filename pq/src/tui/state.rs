//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.

use tracing::debug;

use crate::answer::Score;
use crate::content::{ContentProvider, Registry, Topic};
use crate::view::AnswerSlot;

/// Which screen is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Landing screen, shown until the user starts
    #[default]
    Intro,
    /// Topic tabs with quiz and chart
    Browsing,
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Typing into the focused answer field
    AnswerInput,
    /// Help overlay
    Help,
}

/// Dashboard state owned by the App
#[derive(Debug, Clone)]
pub struct UiState {
    pub screen: Screen,
    pub interaction_mode: InteractionMode,

    /// Id of the selected topic, always present in the registry
    pub selected_topic: String,

    /// Show the good chart instead of the bad one
    pub show_good: bool,

    /// One slot per question of the selected topic
    pub answers: Vec<AnswerSlot>,

    /// Question receiving keyboard input
    pub focused_question: usize,

    /// Score of the last check, cleared when answers change
    pub last_score: Option<Score>,

    pub should_quit: bool,
}

impl UiState {
    /// Initial state showing the given topic
    pub fn new(topic: &Topic) -> Self {
        debug!(topic = %topic.id, "UiState::new: called");
        let mut state = Self {
            screen: Screen::Intro,
            interaction_mode: InteractionMode::Normal,
            selected_topic: String::new(),
            show_good: false,
            answers: Vec::new(),
            focused_question: 0,
            last_score: None,
            should_quit: false,
        };
        state.select(topic);
        state
    }

    /// Initial state for a registry, starting at its first topic
    pub fn for_registry(registry: &Registry) -> Self {
        Self::new(registry.first())
    }

    /// Point the state at a topic and reset everything tied to the old one
    pub fn select(&mut self, topic: &Topic) {
        debug!(from = %self.selected_topic, to = %topic.id, "UiState::select: called");
        self.selected_topic = topic.id.clone();
        self.show_good = false;
        self.answers = vec![AnswerSlot::default(); topic.questions().len()];
        self.focused_question = 0;
        self.last_score = None;
    }

    /// Submitted text for a question, None when out of range
    pub fn submitted(&self, index: usize) -> Option<&str> {
        self.answers.get(index).map(|slot| slot.text.as_str())
    }

    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    /// Move focus to the previous question
    pub fn focus_prev(&mut self) {
        self.focused_question = self.focused_question.saturating_sub(1);
    }

    /// Move focus to the next question, stopping at the last
    pub fn focus_next(&mut self) {
        if self.focused_question + 1 < self.answers.len() {
            self.focused_question += 1;
        }
    }

    /// Move focus to the next question, wrapping to the first
    pub fn focus_next_wrapping(&mut self) {
        if !self.answers.is_empty() {
            self.focused_question = (self.focused_question + 1) % self.answers.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Validity;

    fn registry() -> Registry {
        Registry::builtin().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let registry = registry();
        let state = UiState::for_registry(&registry);

        assert_eq!(state.screen, Screen::Intro);
        assert_eq!(state.selected_topic, "states");
        assert!(!state.show_good);
        assert_eq!(state.question_count(), registry.first().questions().len());
        assert!(state.answers.iter().all(|s| s.text.is_empty() && s.validity == Validity::Unknown));
    }

    #[test]
    fn test_select_resets_everything() {
        let registry = registry();
        let mut state = UiState::for_registry(&registry);
        state.show_good = true;
        state.answers[0].text = "California".to_string();
        state.answers[0].validity = Validity::Correct;
        state.focused_question = 2;

        let olympics = registry.get_topic("olympics").unwrap();
        state.select(olympics);

        assert_eq!(state.selected_topic, "olympics");
        assert!(!state.show_good);
        assert_eq!(state.focused_question, 0);
        assert_eq!(state.question_count(), olympics.questions().len());
        assert!(state.answers.iter().all(|s| *s == AnswerSlot::default()));
    }

    #[test]
    fn test_focus_movement() {
        let mut state = UiState::for_registry(&registry());
        state.focus_prev();
        assert_eq!(state.focused_question, 0);

        state.focus_next();
        state.focus_next();
        state.focus_next();
        assert_eq!(state.focused_question, 2);

        state.focus_next_wrapping();
        assert_eq!(state.focused_question, 0);
    }

    #[test]
    fn test_submitted_out_of_range() {
        let state = UiState::for_registry(&registry());
        assert_eq!(state.submitted(0), Some(""));
        assert_eq!(state.submitted(99), None);
    }
}
