use serde::{Deserialize, Serialize};

use crate::mode::{self, ResponseMode};
use crate::models::{ChatMessage, CompletionRequest, Endpoint, Role, SamplingConfig};

pub const DEFAULT_MAX_LENGTH: usize = 4096;

/// Few-shot exchange every conversation starts with, after the system turn.
const SEED_USER: &str = "Hello";
const SEED_ASSISTANT: &str = "Hi there!";

/// Caller overrides for `ConversationContext::start`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationOptions {
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub frequency_penalty: Option<f32>,
    #[serde(default)]
    pub presence_penalty: Option<f32>,
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Only used when no known mode is selected
    #[serde(default)]
    pub system_instruction: Option<String>,
}

impl ConversationOptions {
    fn sampling(&self, mode: Option<ResponseMode>) -> SamplingConfig {
        let (temperature, top_p) = mode
            .map(|m| m.sampling_defaults())
            .unwrap_or((mode::DEFAULT_TEMPERATURE, mode::DEFAULT_TOP_P));
        SamplingConfig {
            temperature: mode::or_default(self.temperature, temperature),
            top_p: mode::or_default(self.top_p, top_p),
            frequency_penalty: mode::or_default(
                self.frequency_penalty,
                mode::DEFAULT_FREQUENCY_PENALTY,
            ),
            presence_penalty: mode::or_default(
                self.presence_penalty,
                mode::DEFAULT_PRESENCE_PENALTY,
            ),
        }
    }
}

/// Ordered turns: one system turn, the seed exchange, then appended
/// user/assistant turns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    turns: Vec<ChatMessage>,
}

impl Conversation {
    pub fn seeded(instruction: impl Into<String>) -> Self {
        Self {
            turns: vec![
                ChatMessage::new(Role::System, instruction),
                ChatMessage::new(Role::User, SEED_USER),
                ChatMessage::new(Role::Assistant, SEED_ASSISTANT),
            ],
        }
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn system_instruction(&self) -> &str {
        &self.turns[0].content
    }

    pub(crate) fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ChatMessage::new(role, content));
    }
}

/// Everything needed to keep talking to one model. Only the conversation
/// changes after `start`.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    model: String,
    endpoint: Endpoint,
    sampling: SamplingConfig,
    max_length: usize,
    mode: Option<ResponseMode>,
    pub(crate) conversation: Conversation,
}

impl ConversationContext {
    /// Build a context without touching the network. Unknown or absent
    /// mode names fall back to the custom or generic instruction.
    pub fn start(
        model: impl Into<String>,
        endpoint: Option<Endpoint>,
        mode: Option<&str>,
        options: &ConversationOptions,
    ) -> Self {
        let mode = mode.and_then(ResponseMode::parse);
        let instruction =
            mode::resolve_instruction(mode, options.system_instruction.as_deref());

        Self {
            model: model.into(),
            endpoint: endpoint.unwrap_or_default(),
            sampling: options.sampling(mode),
            max_length: options.max_length.unwrap_or(DEFAULT_MAX_LENGTH),
            mode,
            conversation: Conversation::seeded(instruction),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn sampling(&self) -> SamplingConfig {
        self.sampling
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn mode(&self) -> Option<ResponseMode> {
        self.mode
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Snapshot of the full history as the next request payload.
    pub(crate) fn request(&self) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: self.conversation.turns.clone(),
            sampling: self.sampling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_seeds_conversation() {
        let ctx = ConversationContext::start("gpt-4", None, None, &ConversationOptions::default());
        let turns = ctx.conversation().turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0], ChatMessage::new(Role::System, "You are a helpful assistant."));
        assert_eq!(turns[1], ChatMessage::new(Role::User, "Hello"));
        assert_eq!(turns[2], ChatMessage::new(Role::Assistant, "Hi there!"));
        assert_eq!(ctx.endpoint(), Endpoint::Chat);
        assert_eq!(ctx.max_length(), 4096);
        assert_eq!(ctx.mode(), None);
    }

    #[test]
    fn test_every_mode_selects_its_instruction_and_sampling() {
        for mode in ResponseMode::ALL {
            let ctx = ConversationContext::start(
                "gpt-4",
                Some(Endpoint::Completions),
                Some(mode.name()),
                &ConversationOptions::default(),
            );
            let (temperature, top_p) = mode.sampling_defaults();
            assert_eq!(ctx.mode(), Some(mode));
            assert_eq!(ctx.conversation().system_instruction(), mode.instruction());
            assert_eq!(ctx.sampling().temperature, temperature);
            assert_eq!(ctx.sampling().top_p, top_p);
            assert_eq!(ctx.sampling().frequency_penalty, 1.0);
            assert_eq!(ctx.sampling().presence_penalty, 1.0);
            assert_eq!(ctx.endpoint(), Endpoint::Completions);
        }
    }

    #[test]
    fn test_unknown_mode_uses_custom_instruction_and_default_sampling() {
        let options = ConversationOptions {
            system_instruction: Some("Answer in French".to_string()),
            ..Default::default()
        };
        let ctx = ConversationContext::start("gpt-4", None, Some("pirate"), &options);
        assert_eq!(ctx.mode(), None);
        assert_eq!(ctx.conversation().system_instruction(), "Answer in French");
        assert_eq!(ctx.sampling().temperature, 1.0);
        assert_eq!(ctx.sampling().top_p, 1.0);
    }

    #[test]
    fn test_custom_instruction_ignored_for_known_mode() {
        let options = ConversationOptions {
            system_instruction: Some("Answer in French".to_string()),
            ..Default::default()
        };
        let ctx = ConversationContext::start("gpt-4", None, Some("code"), &options);
        assert_eq!(
            ctx.conversation().system_instruction(),
            ResponseMode::Code.instruction()
        );
    }

    #[test]
    fn test_explicit_sampling_overrides_mode_defaults() {
        let options = ConversationOptions {
            temperature: Some(0.7),
            top_p: Some(0.9),
            frequency_penalty: Some(0.5),
            presence_penalty: Some(1.5),
            max_length: Some(50),
            system_instruction: None,
        };
        let ctx = ConversationContext::start("gpt-4", None, Some("yesno"), &options);
        assert_eq!(
            ctx.sampling(),
            SamplingConfig {
                temperature: 0.7,
                top_p: 0.9,
                frequency_penalty: 0.5,
                presence_penalty: 1.5,
            }
        );
        assert_eq!(ctx.max_length(), 50);
    }

    #[test]
    fn test_zero_overrides_fall_back_to_defaults() {
        let options = ConversationOptions {
            temperature: Some(0.0),
            top_p: Some(0.0),
            frequency_penalty: Some(0.0),
            presence_penalty: Some(0.0),
            ..Default::default()
        };
        let ctx = ConversationContext::start("gpt-4", None, Some("api"), &options);
        assert_eq!(
            ctx.sampling(),
            SamplingConfig {
                temperature: 0.2,
                top_p: 0.1,
                frequency_penalty: 1.0,
                presence_penalty: 1.0,
            }
        );
    }
}
