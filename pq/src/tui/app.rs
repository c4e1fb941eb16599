//! TUI application - event handling and state management
//!
//! The App owns the UiState and turns keyboard events into [`Action`]s.
//! Each action is handled by exactly one method. It does not do any
//! rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use super::state::{InteractionMode, Screen, UiState};
use crate::answer::{Score, TrimMode, check_answer_with};
use crate::content::{ContentError, ContentProvider, Registry, Topic};
use crate::view::{RenderedView, render_view};

/// A discrete user intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the intro screen
    Start,
    /// Switch to another topic tab
    SelectTopic(String),
    /// Flip between the bad and the good chart
    ToggleChart,
    /// Replace the text of one answer field
    EditAnswer { index: usize, text: String },
    /// Check every answer of the current topic
    CheckAnswers,
    Quit,
}

/// TUI application
#[derive(Debug)]
pub struct App {
    registry: Registry,
    state: UiState,
    trim: TrimMode,
}

impl App {
    /// Create an app showing the first topic
    pub fn new(registry: Registry) -> Self {
        let state = UiState::for_registry(&registry);
        Self {
            registry,
            state,
            trim: TrimMode::default(),
        }
    }

    /// Create an app starting at `start_topic`
    ///
    /// Unknown topics fall back to the first one with a warning.
    pub fn with_options(registry: Registry, start_topic: Option<&str>, trim: TrimMode) -> Self {
        debug!(?start_topic, ?trim, "App::with_options: called");
        let topic = match start_topic {
            Some(id) => registry.resolve_or_first(id),
            None => registry.first(),
        };
        let state = UiState::new(topic);
        Self { registry, state, trim }
    }

    /// Get reference to state
    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The selected topic
    pub fn current_topic(&self) -> &Topic {
        self.registry.resolve_or_first(&self.state.selected_topic)
    }

    /// Render data for the selected topic
    pub fn view(&self) -> Result<RenderedView<'_>, ContentError> {
        render_view(
            &self.registry,
            &self.state.selected_topic,
            self.state.show_good,
            &self.state.answers,
        )
    }

    /// Apply one action
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, screen = ?self.state.screen, "App::dispatch: called");
        match (self.state.screen, action) {
            (_, Action::Quit) => self.state.should_quit = true,
            (Screen::Intro, Action::Start) => self.start(),
            (Screen::Intro, other) => {
                debug!(?other, "App::dispatch: ignored on intro screen");
            }
            (Screen::Browsing, Action::Start) => {
                debug!("App::dispatch: already started");
            }
            (Screen::Browsing, Action::SelectTopic(id)) => self.select_topic(&id),
            (Screen::Browsing, Action::ToggleChart) => self.toggle_chart(),
            (Screen::Browsing, Action::EditAnswer { index, text }) => self.edit_answer(index, text),
            (Screen::Browsing, Action::CheckAnswers) => self.check_answers(),
        }
    }

    fn start(&mut self) {
        info!(topic = %self.state.selected_topic, "Dashboard started");
        self.state.screen = Screen::Browsing;
    }

    fn select_topic(&mut self, id: &str) {
        let topic = self.registry.resolve_or_first(id);
        self.state.select(topic);
        self.state.interaction_mode = InteractionMode::Normal;
    }

    fn toggle_chart(&mut self) {
        self.state.show_good = !self.state.show_good;
        debug!(show_good = self.state.show_good, "App::toggle_chart: toggled");
    }

    fn edit_answer(&mut self, index: usize, text: String) {
        let Some(slot) = self.state.answers.get_mut(index) else {
            warn!(index, count = self.state.answers.len(), "Answer index out of range");
            return;
        };
        slot.text = text;
        slot.validity = Default::default();
        self.state.last_score = None;
    }

    fn check_answers(&mut self) {
        let topic = self.registry.resolve_or_first(&self.state.selected_topic);
        for (slot, qa) in self.state.answers.iter_mut().zip(topic.questions()) {
            slot.validity = check_answer_with(Some(slot.text.as_str()), &qa.answer, self.trim);
        }
        let results: Vec<_> = self.state.answers.iter().map(|s| s.validity).collect();
        let score = Score::from_results(&results);
        info!(topic = %topic.id, %score, "Answers checked");
        self.state.last_score = Some(score);
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true; // Force quit
        }

        let action = match (self.state.screen, self.state.interaction_mode) {
            (Screen::Intro, _) => self.intro_key(key),
            (Screen::Browsing, InteractionMode::Normal) => self.normal_key(key),
            (Screen::Browsing, InteractionMode::AnswerInput) => self.input_key(key),
            (Screen::Browsing, InteractionMode::Help) => self.help_key(key),
        };

        if let Some(action) = action {
            self.dispatch(action);
        }
        self.state.should_quit
    }

    fn intro_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => Some(Action::Start),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    /// Handle key in normal mode
    fn normal_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),

            // === Help ===
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
                None
            }

            // === Tabs ===
            KeyCode::Left | KeyCode::Char('h') => self.adjacent_topic(-1),
            KeyCode::Right | KeyCode::Char('l') => self.adjacent_topic(1),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.registry.get_index(index).map(|t| Action::SelectTopic(t.id.clone()))
            }

            // === Chart ===
            KeyCode::Char('t') | KeyCode::Char(' ') => Some(Action::ToggleChart),

            // === Questions ===
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.focus_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.focus_next();
                None
            }
            KeyCode::Enter | KeyCode::Char('i') => {
                if self.state.question_count() > 0 {
                    self.state.interaction_mode = InteractionMode::AnswerInput;
                }
                None
            }
            KeyCode::Char('c') => Some(Action::CheckAnswers),

            _ => None,
        }
    }

    /// Handle key while typing an answer
    fn input_key(&mut self, key: KeyEvent) -> Option<Action> {
        let index = self.state.focused_question;
        let current = self.state.submitted(index).unwrap_or_default().to_string();
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.state.interaction_mode = InteractionMode::Normal;
                None
            }
            KeyCode::Tab => {
                self.state.focus_next_wrapping();
                None
            }
            KeyCode::Backspace => {
                let mut text = current;
                text.pop()?;
                Some(Action::EditAnswer { index, text })
            }
            KeyCode::Char(c) if !is_control_chord(key.modifiers) => Some(Action::EditAnswer {
                index,
                text: format!("{}{}", current, c),
            }),
            _ => None,
        }
    }

    fn help_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Normal;
                None
            }
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    /// Action selecting the tab `step` positions away, wrapping around
    fn adjacent_topic(&self, step: isize) -> Option<Action> {
        let count = self.registry.len() as isize;
        let current = self.registry.index_of(&self.state.selected_topic).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(count) as usize;
        self.registry.get_index(next).map(|t| Action::SelectTopic(t.id.clone()))
    }
}

/// Ctrl without Alt is a shortcut; Ctrl+Alt is how AltGr characters arrive on Windows
fn is_control_chord(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Validity;

    fn app() -> App {
        App::new(Registry::builtin().unwrap())
    }

    fn started() -> App {
        let mut app = app();
        app.dispatch(Action::Start);
        app
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_app_new() {
        let app = app();
        assert_eq!(app.state().screen, Screen::Intro);
        assert_eq!(app.state().interaction_mode, InteractionMode::Normal);
        assert_eq!(app.current_topic().id, "states");
    }

    #[test]
    fn test_app_quit_key() {
        let mut app = app();

        // Ctrl+C always quits immediately
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key(key));
    }

    #[test]
    fn test_q_quits_from_browsing() {
        let mut app = started();
        assert!(app.handle_key(KeyEvent::from(KeyCode::Char('q'))));
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_enter_starts() {
        let mut app = app();
        app.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.state().screen, Screen::Browsing);

        // One-way: starting again changes nothing
        app.dispatch(Action::Start);
        assert_eq!(app.state().screen, Screen::Browsing);
    }

    #[test]
    fn test_actions_ignored_on_intro() {
        let mut app = app();
        app.dispatch(Action::ToggleChart);
        app.dispatch(Action::SelectTopic("olympics".to_string()));
        assert!(!app.state().show_good);
        assert_eq!(app.state().selected_topic, "states");
    }

    #[test]
    fn test_toggle_keeps_answers() {
        let mut app = started();
        app.dispatch(Action::EditAnswer {
            index: 0,
            text: "Texas".to_string(),
        });
        app.dispatch(Action::CheckAnswers);
        let before = app.state().answers.clone();

        app.handle_key(KeyEvent::from(KeyCode::Char('t')));
        assert!(app.state().show_good);
        assert_eq!(app.state().answers, before);

        app.dispatch(Action::ToggleChart);
        assert!(!app.state().show_good);
        assert_eq!(app.state().answers, before);
    }

    #[test]
    fn test_select_topic_resets() {
        let mut app = started();
        app.dispatch(Action::ToggleChart);
        app.dispatch(Action::EditAnswer {
            index: 1,
            text: "Illinois".to_string(),
        });
        app.dispatch(Action::CheckAnswers);

        app.dispatch(Action::SelectTopic("fertility".to_string()));
        let state = app.state();
        assert_eq!(state.selected_topic, "fertility");
        assert!(!state.show_good);
        assert!(state.last_score.is_none());
        assert!(state.answers.iter().all(|s| s.text.is_empty() && s.validity == Validity::Unknown));
    }

    #[test]
    fn test_select_unknown_topic_falls_back_to_first() {
        let mut app = started();
        app.dispatch(Action::SelectTopic("olympics".to_string()));
        app.dispatch(Action::SelectTopic("tab9".to_string()));
        assert_eq!(app.state().selected_topic, "states");
    }

    #[test]
    fn test_arrow_keys_cycle_tabs() {
        let mut app = started();
        app.handle_key(KeyEvent::from(KeyCode::Right));
        assert_eq!(app.state().selected_topic, "olympics");

        app.handle_key(KeyEvent::from(KeyCode::Left));
        app.handle_key(KeyEvent::from(KeyCode::Left));
        assert_eq!(app.state().selected_topic, "browsers");
    }

    #[test]
    fn test_digit_selects_tab() {
        let mut app = started();
        app.handle_key(KeyEvent::from(KeyCode::Char('3')));
        assert_eq!(app.state().selected_topic, "coronavirus");

        // Out of range digit does nothing
        app.handle_key(KeyEvent::from(KeyCode::Char('9')));
        assert_eq!(app.state().selected_topic, "coronavirus");
    }

    #[test]
    fn test_typing_answer() {
        let mut app = started();
        app.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.state().interaction_mode, InteractionMode::AnswerInput);

        type_str(&mut app, "Califx");
        app.handle_key(KeyEvent::from(KeyCode::Backspace));
        type_str(&mut app, "ornia");
        assert_eq!(app.state().submitted(0), Some("California"));

        // Typing never computes validity
        assert_eq!(app.state().answers[0].validity, Validity::Unknown);

        // 'q' and 'c' are text while typing
        type_str(&mut app, "qc");
        assert!(!app.state().should_quit);
        assert_eq!(app.state().submitted(0), Some("Californiaqc"));
    }

    #[test]
    fn test_tab_moves_to_next_question() {
        let mut app = started();
        app.handle_key(KeyEvent::from(KeyCode::Char('i')));
        type_str(&mut app, "a");
        app.handle_key(KeyEvent::from(KeyCode::Tab));
        type_str(&mut app, "b");

        assert_eq!(app.state().submitted(0), Some("a"));
        assert_eq!(app.state().submitted(1), Some("b"));
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut app = started();
        app.handle_key(KeyEvent::from(KeyCode::Enter));
        app.handle_key(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(app.state().submitted(0), Some(""));
    }

    #[test]
    fn test_check_answers_marks_each_question() {
        let mut app = started();
        app.dispatch(Action::EditAnswer {
            index: 0,
            text: "  california".to_string(),
        });
        app.dispatch(Action::EditAnswer {
            index: 1,
            text: "Illinois ".to_string(),
        });
        app.handle_key(KeyEvent::from(KeyCode::Char('c')));

        let validity: Vec<_> = app.state().answers.iter().map(|s| s.validity).collect();
        assert_eq!(validity, vec![Validity::Correct, Validity::Incorrect, Validity::Unknown]);
        assert_eq!(app.state().last_score.map(|s| s.correct), Some(1));
    }

    #[test]
    fn test_trim_both_mode_accepts_trailing_space() {
        let mut app = App::with_options(Registry::builtin().unwrap(), None, TrimMode::Both);
        app.dispatch(Action::Start);
        app.dispatch(Action::EditAnswer {
            index: 1,
            text: "Illinois ".to_string(),
        });
        app.dispatch(Action::CheckAnswers);
        assert_eq!(app.state().answers[1].validity, Validity::Correct);
    }

    #[test]
    fn test_edit_resets_that_question_only() {
        let mut app = started();
        app.dispatch(Action::EditAnswer {
            index: 0,
            text: "California".to_string(),
        });
        app.dispatch(Action::EditAnswer {
            index: 1,
            text: "Ohio".to_string(),
        });
        app.dispatch(Action::CheckAnswers);
        app.dispatch(Action::EditAnswer {
            index: 1,
            text: "Illinois".to_string(),
        });

        assert_eq!(app.state().answers[0].validity, Validity::Correct);
        assert_eq!(app.state().answers[1].validity, Validity::Unknown);
    }

    #[test]
    fn test_edit_out_of_range_ignored() {
        let mut app = started();
        app.dispatch(Action::EditAnswer {
            index: 42,
            text: "x".to_string(),
        });
        assert!(app.state().answers.iter().all(|s| s.text.is_empty()));
    }

    #[test]
    fn test_start_topic_option() {
        let app = App::with_options(Registry::builtin().unwrap(), Some("browsers"), TrimMode::Leading);
        assert_eq!(app.state().selected_topic, "browsers");

        let app = App::with_options(Registry::builtin().unwrap(), Some("nope"), TrimMode::Leading);
        assert_eq!(app.state().selected_topic, "states");
    }

    #[test]
    fn test_app_help_toggle() {
        let mut app = started();

        // Press ? to show help
        app.handle_key(KeyEvent::from(KeyCode::Char('?')));
        assert_eq!(app.state().interaction_mode, InteractionMode::Help);

        // Press ? again to hide help
        app.handle_key(KeyEvent::from(KeyCode::Char('?')));
        assert_eq!(app.state().interaction_mode, InteractionMode::Normal);
    }

    #[test]
    fn test_view_follows_toggle() {
        let mut app = started();
        let topic = app.current_topic().clone();
        assert_eq!(app.view().unwrap().chart, topic.bad_chart());
        app.dispatch(Action::ToggleChart);
        assert_eq!(app.view().unwrap().chart, topic.good_chart());
    }

    #[test]
    fn test_esc_does_not_quit_intro() {
        let mut app = app();
        assert!(!app.handle_key(KeyEvent::from(KeyCode::Esc)));
        assert_eq!(app.state().screen, Screen::Intro);
        assert!(!app.state().should_quit);
    }

    #[test]
    fn test_altgr_characters_are_typed() {
        let mut app = started();
        app.handle_key(KeyEvent::from(KeyCode::Enter));

        // AltGr arrives as Ctrl+Alt on Windows
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        app.handle_key(KeyEvent::new(KeyCode::Char('@'), altgr));
        app.handle_key(KeyEvent::new(KeyCode::Char('€'), altgr));
        assert_eq!(app.state().submitted(0), Some("@€"));

        // Plain Ctrl chords are not text
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(app.state().submitted(0), Some("@€"));
    }
}
