use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Message, Suggestion};

/// Slots extracted from the user's input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    /// The most recent user-provided description: typed text or a picked suggestion's title.
    pub transformation_request: Option<String>,
}

/// Transformation artifacts already resolved for the current topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformations {
    /// Code of a suggestion the user picked from the index.
    pub code: Option<String>,
}

/// What the user did to produce the next turn.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    FreeText(String),
    SuggestionPicked(Suggestion),
}

impl UserAction {
    /// Text recorded as the user's message and as the transformation request.
    pub fn description(&self) -> &str {
        match self {
            UserAction::FreeText(text) => text,
            UserAction::SuggestionPicked(suggestion) => suggestion.title(),
        }
    }
}

/// Per-session conversation state, owned by the chat front end and threaded
/// through each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    user_id: String,
    history: Vec<Message>,
    /// Set once the bot has asked for more detail, so it never asks twice.
    pub intent: bool,
    pub entities: Entities,
    pub transformations: Transformations,
}

impl SessionState {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            history: Vec::new(),
            intent: false,
            entities: Entities::default(),
            transformations: Transformations::default(),
        }
    }

    pub fn with_random_user() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn has_prior_turns(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn push_message(&mut self, message: Message) {
        self.history.push(message);
    }

    /// Record a user action: a typed message starts a fresh topic, a picked
    /// suggestion carries its code into the state.
    pub fn apply_action(&mut self, action: &UserAction) {
        match action {
            UserAction::FreeText(_) => {
                self.entities = Entities::default();
                self.transformations = Transformations::default();
            }
            UserAction::SuggestionPicked(suggestion) => {
                self.transformations.code = Some(suggestion.code())
                    .filter(|code| !code.is_empty())
                    .map(str::to_string);
            }
        }
        self.entities.transformation_request = Some(action.description().to_string());
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::with_random_user()
    }
}
