use crate::domain::SessionState;

/// Descriptions shorter than this (in characters) are not worth searching or generating for.
pub const MIN_DESCRIPTION_LEN: usize = 6;

/// The bot's decision for the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    AskForDescription,
    RequestMoreInfo,
    ShowExisting { code: String },
    GenerateNew { description: String },
}

impl NextStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            NextStep::AskForDescription => "ask_transformation_description",
            NextStep::RequestMoreInfo => "get_more_information",
            NextStep::ShowExisting { .. } => "show_existing_transformation",
            NextStep::GenerateNew { .. } => "generate_new_transformation",
        }
    }
}

impl std::fmt::Display for NextStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the next bot action from the session state.
///
/// Checks run in strict priority: description length, an already resolved
/// code, a pending clarification, and finally generation. `history` is
/// expected to hold only the turns before the one being answered.
pub fn evaluate_next_step(state: &SessionState) -> NextStep {
    let description = match state.entities.transformation_request.as_deref() {
        Some(text) if text.chars().count() >= MIN_DESCRIPTION_LEN => text,
        _ => return NextStep::AskForDescription,
    };

    if let Some(code) = state
        .transformations
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
    {
        return NextStep::ShowExisting {
            code: code.to_string(),
        };
    }

    if !state.intent && state.has_prior_turns() {
        return NextStep::RequestMoreInfo;
    }

    NextStep::GenerateNew {
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Message;

    fn state_with_request(text: &str) -> SessionState {
        let mut state = SessionState::new("u1");
        state.entities.transformation_request = Some(text.to_string());
        state
    }

    #[test]
    fn asks_for_description_when_missing() {
        let state = SessionState::new("u1");
        assert_eq!(evaluate_next_step(&state), NextStep::AskForDescription);
    }

    #[test]
    fn asks_for_description_when_too_short() {
        let state = state_with_request("sku");
        assert_eq!(evaluate_next_step(&state), NextStep::AskForDescription);
    }

    #[test]
    fn length_is_counted_in_characters() {
        // Six characters, twelve bytes
        let state = state_with_request("éééééé");
        assert!(matches!(
            evaluate_next_step(&state),
            NextStep::GenerateNew { .. }
        ));
    }

    #[test]
    fn short_description_beats_existing_code() {
        let mut state = state_with_request("abc");
        state.transformations.code = Some("function f(r){ return r; }".into());
        assert_eq!(evaluate_next_step(&state), NextStep::AskForDescription);
    }

    #[test]
    fn existing_code_is_shown_verbatim_regardless_of_other_fields() {
        let code = "function f(r){\n  delete r.sku;\n  return r;\n}";
        for (intent, prior) in [(false, false), (false, true), (true, false), (true, true)] {
            let mut state = state_with_request("Remove SKU field");
            state.intent = intent;
            if prior {
                state.push_message(Message::user("hello there"));
                state.push_message(Message::bot("hi"));
            }
            state.transformations.code = Some(code.into());

            assert_eq!(
                evaluate_next_step(&state),
                NextStep::ShowExisting {
                    code: code.to_string()
                }
            );
        }
    }

    #[test]
    fn empty_code_is_not_an_existing_transformation() {
        let mut state = state_with_request("Remove SKU field");
        state.transformations.code = Some(String::new());
        assert_eq!(
            evaluate_next_step(&state),
            NextStep::GenerateNew {
                description: "Remove SKU field".into()
            }
        );
    }

    #[test]
    fn requests_more_info_after_a_prior_turn() {
        let mut state = state_with_request("remove sku");
        state.push_message(Message::user("discount attribute"));
        state.push_message(Message::bot("Here's a AI generated transformation"));
        assert_eq!(evaluate_next_step(&state), NextStep::RequestMoreInfo);
    }

    #[test]
    fn generates_once_intent_is_set() {
        let mut state = state_with_request("remove sku");
        state.push_message(Message::user("discount attribute"));
        state.intent = true;
        assert_eq!(
            evaluate_next_step(&state),
            NextStep::GenerateNew {
                description: "remove sku".into()
            }
        );
    }

    #[test]
    fn first_turn_generates() {
        let state = state_with_request("discount attribute");
        assert_eq!(
            evaluate_next_step(&state),
            NextStep::GenerateNew {
                description: "discount attribute".into()
            }
        );
    }
}
