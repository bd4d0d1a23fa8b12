use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::TransformationGenerator;
use crate::domain::{evaluate_next_step, Message, NextStep, SessionState, UserAction};

pub const ASK_DESCRIPTION_TEXT: &str = "What kind of transformation are you trying to accomplish?";
pub const REQUEST_MORE_INFO_TEXT: &str =
    "Can you describe in detail what transformation you want and I can generate one for you?";
pub const SHOW_EXISTING_TEXT: &str = "I found a transformation that matches your request:\n";
pub const GENERATED_TEXT: &str = "Here's a AI generated transformation based on your request:";
pub const EMPTY_GENERATION_CODE: &str = "// No transformation found. Please try again.";

/// Drives one chat turn: records the user's action, decides the next step
/// and produces exactly one bot message.
pub struct ConversationUseCase {
    generator: Arc<dyn TransformationGenerator>,
}

impl ConversationUseCase {
    pub fn new(generator: Arc<dyn TransformationGenerator>) -> Self {
        Self { generator }
    }

    /// Handle a submitted message or picked suggestion.
    ///
    /// The next step is decided against the history as it stood before this
    /// turn; the user's message and the bot's reply are appended afterwards,
    /// in that order. The bot message is also returned.
    pub async fn submit(&self, state: &mut SessionState, action: UserAction) -> Message {
        state.apply_action(&action);

        let reply = self.respond(state).await;

        state.push_message(Message::user(action.description()));
        state.push_message(reply.clone());
        reply
    }

    /// Produce the bot message for the current state, applying the
    /// clarification side effect when needed.
    pub async fn respond(&self, state: &mut SessionState) -> Message {
        let step = evaluate_next_step(state);
        debug!("Next step for {}: {step}", state.user_id());

        match step {
            NextStep::AskForDescription => Message::bot(ASK_DESCRIPTION_TEXT),
            NextStep::RequestMoreInfo => {
                state.intent = true;
                Message::bot(REQUEST_MORE_INFO_TEXT)
            }
            NextStep::ShowExisting { code } => Message::bot(SHOW_EXISTING_TEXT).with_code(code),
            NextStep::GenerateNew { description } => {
                let code = self.generate_code(&description).await;
                Message::bot(GENERATED_TEXT).with_code(code)
            }
        }
    }

    async fn generate_code(&self, description: &str) -> String {
        match self.generator.generate(description).await {
            Ok(code) if code.is_empty() => EMPTY_GENERATION_CODE.to_string(),
            Ok(code) => code,
            Err(e) => {
                warn!("Error generating transformation: {e}");
                format!("// Error generating transformation: {e}")
            }
        }
    }
}
