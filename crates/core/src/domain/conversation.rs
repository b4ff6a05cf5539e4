use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a conversation turn. `Model` covers every assistant-generated
/// message, whether free text or a serialized recommendation payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self { role: Role::Model, content: content.into() }
    }
}

/// In-memory, session-scoped turn history. Append-only: prior turns are
/// never edited or removed. Lives only for the process lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Starts a conversation seeded with the standard greeting exchange.
    pub fn with_greeting() -> Self {
        Self {
            turns: vec![
                Turn::user("Hello"),
                Turn::model(
                    "Hello! I'm SmartShop Assistant. How can I help you find the perfect product today?",
                ),
            ],
            created_at: Utc::now(),
        }
    }

    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Content of the most recent user-authored turn, if any.
    pub fn last_user_message(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(|turn| turn.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Conversation, Role, Turn};

    #[test]
    fn greeting_seed_has_user_then_model_turn() {
        let conversation = Conversation::with_greeting();
        assert_eq!(conversation.turns.len(), 2);
        assert_eq!(conversation.turns[0].role, Role::User);
        assert_eq!(conversation.turns[1].role, Role::Model);
        assert!(conversation.turns[1].content.contains("SmartShop Assistant"));
    }

    #[test]
    fn turns_append_in_order() {
        let mut conversation = Conversation::with_greeting();
        conversation.push_turn(Turn::user("show me laptops"));
        conversation.push_turn(Turn::model("{\"recommendations\":[]}"));

        let tail: Vec<_> = conversation.turns.iter().skip(2).collect();
        assert_eq!(tail[0].content, "show me laptops");
        assert_eq!(tail[1].role, Role::Model);
    }

    #[test]
    fn last_user_message_scans_in_reverse() {
        let mut conversation = Conversation::with_greeting();
        conversation.push_turn(Turn::user("first ask"));
        conversation.push_turn(Turn::model("reply"));
        conversation.push_turn(Turn::user("second ask"));

        assert_eq!(conversation.last_user_message(), Some("second ask"));
    }
}
