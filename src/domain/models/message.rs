use serde::{Deserialize, Serialize};

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Algolia AI",
        }
    }
}

/// One entry of the chat transcript. Never mutated once appended to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    from: Sender,
    text: String,
    code: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            from: Sender::User,
            text: text.into(),
            code: None,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            from: Sender::Bot,
            text: text.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn from(&self) -> Sender {
        self.from
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn is_bot(&self) -> bool {
        self.from == Sender::Bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_message_carries_code() {
        let msg = Message::bot("Here you go").with_code("function f(r){ return r; }");
        assert!(msg.is_bot());
        assert_eq!(msg.code(), Some("function f(r){ return r; }"));
        assert_eq!(msg.from().display_name(), "Algolia AI");
    }

    #[test]
    fn user_message_has_no_code() {
        let msg = Message::user("remove the sku");
        assert_eq!(msg.from(), Sender::User);
        assert!(msg.code().is_none());
    }
}
