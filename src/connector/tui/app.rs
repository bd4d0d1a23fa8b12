use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::application::{LookupSequencer, SequencedSuggestions};
use crate::domain::{Message, SessionState, Suggestion, UserAction};

/// Work the event loop must start on behalf of the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Look up suggestions for the current input.
    Lookup { seq: u64, query: String },
    /// Run one conversation turn on a copy of the session.
    Submit {
        state: Box<SessionState>,
        action: UserAction,
    },
    Quit,
}

/// UI state of the chat window, independent of the terminal.
pub struct ChatApp {
    session: SessionState,
    input: String,
    suggestions: Vec<Suggestion>,
    selected: Option<usize>,
    loading: bool,
    /// Lines scrolled up from the bottom of the transcript.
    scroll_back: u16,
    sequencer: LookupSequencer,
    running: bool,
}

impl ChatApp {
    pub fn new(session: SessionState) -> Self {
        Self {
            session,
            input: String::new(),
            suggestions: Vec::new(),
            selected: None,
            loading: false,
            scroll_back: 0,
            sequencer: LookupSequencer::new(),
            running: true,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UiCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('d') => self.quit(),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                Some(self.lookup())
            }
            KeyCode::Backspace => {
                self.input.pop()?;
                Some(self.lookup())
            }
            KeyCode::Up => {
                self.select_previous();
                None
            }
            KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::PageUp => {
                self.scroll_back = self.scroll_back.saturating_add(5);
                None
            }
            KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(5);
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Esc if self.selected.is_some() => {
                self.selected = None;
                None
            }
            KeyCode::Esc => self.quit(),
            _ => None,
        }
    }

    /// Apply a lookup response unless a newer lookup was issued since.
    pub fn apply_suggestions(&mut self, response: SequencedSuggestions) -> bool {
        match self.sequencer.accept(response) {
            Some(hits) => {
                self.suggestions = hits;
                self.selected = None;
                true
            }
            None => false,
        }
    }

    /// Take back the session after a turn, then reset the input area and
    /// jump to the newest message.
    pub fn finish_turn(&mut self, session: SessionState) {
        self.session = session;
        self.loading = false;
        self.input.clear();
        self.suggestions.clear();
        self.selected = None;
        self.sequencer.invalidate();
        self.scroll_back = 0;
    }

    fn lookup(&mut self) -> UiCommand {
        UiCommand::Lookup {
            seq: self.sequencer.issue(),
            query: self.input.clone(),
        }
    }

    fn submit(&mut self) -> Option<UiCommand> {
        if self.loading {
            return None;
        }

        let action = match self.selected.and_then(|i| self.suggestions.get(i)) {
            Some(suggestion) => UserAction::SuggestionPicked(suggestion.clone()),
            None => UserAction::FreeText(self.input.clone()),
        };

        self.loading = true;
        self.sequencer.invalidate();
        Some(UiCommand::Submit {
            state: Box::new(self.session.clone()),
            action,
        })
    }

    fn quit(&mut self) -> Option<UiCommand> {
        self.running = false;
        Some(UiCommand::Quit)
    }

    fn select_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1).min(self.suggestions.len() - 1),
        });
    }

    fn select_previous(&mut self) {
        self.selected = match self.selected {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn history(&self) -> &[Message] {
        self.session.history()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    /// Clamp the scroll position once the view knows how far it can go.
    pub fn clamp_scroll(&mut self, max: u16) {
        self.scroll_back = self.scroll_back.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut ChatApp, text: &str) -> Vec<UiCommand> {
        text.chars()
            .filter_map(|c| app.handle_key(key(KeyCode::Char(c))))
            .collect()
    }

    fn app_with_suggestions() -> ChatApp {
        let mut app = ChatApp::new(SessionState::new("u1"));
        let commands = type_text(&mut app, "re");
        let seq = match commands.last() {
            Some(UiCommand::Lookup { seq, .. }) => *seq,
            other => panic!("expected lookup, got {other:?}"),
        };
        app.apply_suggestions(SequencedSuggestions {
            seq,
            hits: vec![
                Suggestion::new("1", "Remove SKU field", "function f(r){...}"),
                Suggestion::new("2", "Rename brand", "function g(r){...}"),
            ],
        });
        app
    }

    #[test]
    fn every_keystroke_issues_a_lookup() {
        let mut app = ChatApp::new(SessionState::new("u1"));
        let commands = type_text(&mut app, "sku");

        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[2],
            UiCommand::Lookup {
                seq: 3,
                query: "sku".into()
            }
        );
    }

    #[test]
    fn stale_lookup_does_not_overwrite_newer_results() {
        let mut app = ChatApp::new(SessionState::new("u1"));
        type_text(&mut app, "ab");

        assert!(app.apply_suggestions(SequencedSuggestions {
            seq: 2,
            hits: vec![Suggestion::new("new", "ab match", "")],
        }));
        assert!(!app.apply_suggestions(SequencedSuggestions {
            seq: 1,
            hits: vec![Suggestion::new("old", "a match", "")],
        }));
        assert_eq!(app.suggestions()[0].id(), "new");
    }

    #[test]
    fn enter_submits_free_text_when_nothing_selected() {
        let mut app = ChatApp::new(SessionState::new("u1"));
        type_text(&mut app, "discount attribute");

        match app.handle_key(key(KeyCode::Enter)) {
            Some(UiCommand::Submit { action, .. }) => {
                assert_eq!(action, UserAction::FreeText("discount attribute".into()))
            }
            other => panic!("expected submit, got {other:?}"),
        }
        assert!(app.is_loading());
    }

    #[test]
    fn enter_submits_the_selected_suggestion() {
        let mut app = app_with_suggestions();
        app.handle_key(key(KeyCode::Down));

        match app.handle_key(key(KeyCode::Enter)) {
            Some(UiCommand::Submit { action, .. }) => match action {
                UserAction::SuggestionPicked(s) => assert_eq!(s.title(), "Remove SKU field"),
                other => panic!("expected picked suggestion, got {other:?}"),
            },
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn selection_stays_within_bounds() {
        let mut app = app_with_suggestions();
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.selected(), Some(1));

        for _ in 0..5 {
            app.handle_key(key(KeyCode::Up));
        }
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn submits_are_ignored_while_loading() {
        let mut app = ChatApp::new(SessionState::new("u1"));
        assert!(app.handle_key(key(KeyCode::Enter)).is_some());
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn lookups_in_flight_at_submit_are_dropped() {
        let mut app = ChatApp::new(SessionState::new("u1"));
        type_text(&mut app, "remove");
        app.handle_key(key(KeyCode::Enter));

        assert!(!app.apply_suggestions(SequencedSuggestions {
            seq: 6,
            hits: vec![Suggestion::new("1", "Remove SKU field", "")],
        }));
    }

    #[test]
    fn finishing_a_turn_resets_the_input_area() {
        let mut app = app_with_suggestions();
        app.handle_key(key(KeyCode::PageUp));
        let state = match app.handle_key(key(KeyCode::Enter)) {
            Some(UiCommand::Submit { mut state, action }) => {
                state.apply_action(&action);
                state.push_message(Message::user(action.description()));
                state.push_message(Message::bot("reply"));
                state
            }
            other => panic!("expected submit, got {other:?}"),
        };

        app.finish_turn(*state);

        assert!(!app.is_loading());
        assert!(app.input().is_empty());
        assert!(app.suggestions().is_empty());
        assert_eq!(app.scroll_back(), 0);
        assert_eq!(app.history().len(), 2);
    }

    #[test]
    fn escape_clears_selection_before_quitting() {
        let mut app = app_with_suggestions();
        app.handle_key(key(KeyCode::Down));

        assert!(app.handle_key(key(KeyCode::Esc)).is_none());
        assert!(app.is_running());
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Some(UiCommand::Quit));
        assert!(!app.is_running());
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = ChatApp::new(SessionState::new("u1"));
        let cmd = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(cmd, Some(UiCommand::Quit));
        assert!(app.input().is_empty());
    }
}
