/// System persona sent ahead of every question.
pub const SYSTEM_PERSONA: &str =
    "You are SAHAS, a disaster alert assistant. Provide precise information about flood.";

const QUESTION_TEMPLATE: &str = "Question: {question}";

/// A prompt-level message, before any provider-specific wire shape.
#[derive(Clone, Debug)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptRole {
    System,
    User,
}

impl PromptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptRole::System => "system",
            PromptRole::User => "user",
        }
    }
}

/// The fixed two-turn template: system persona plus the user's question.
/// Bound once at startup and shared by every chain instance.
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    system: String,
    user_template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system: SYSTEM_PERSONA.to_string(),
            user_template: QUESTION_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn render(&self, question: &str) -> Vec<PromptMessage> {
        vec![
            PromptMessage {
                role: PromptRole::System,
                content: self.system.clone(),
            },
            PromptMessage {
                role: PromptRole::User,
                content: self.user_template.replace("{question}", question),
            }
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_persona_then_question() {
        let template = PromptTemplate::default();
        let messages = template.render("Is my area flood-prone?");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, PromptRole::System);
        assert_eq!(messages[0].content, SYSTEM_PERSONA);
        assert_eq!(messages[1].role, PromptRole::User);
        assert_eq!(messages[1].content, "Question: Is my area flood-prone?");
    }

    #[test]
    fn question_substitution_is_literal() {
        let template = PromptTemplate::default();
        let messages = template.render("{question}");
        assert_eq!(messages[1].content, "Question: {question}");
    }
}
