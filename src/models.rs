use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

// Chat message format, one per conversation turn
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Which completion endpoint a conversation talks to
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    #[default]
    Chat,
    Completions,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Chat => "chat/completions",
            Endpoint::Completions => "completions",
        }
    }
}

/// Sampling parameters sent with every request
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

/// Request handed to a transport: the full history plus sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub sampling: SamplingConfig,
}

// Chat API request format
#[derive(Debug, Serialize)]
pub struct ChatBody<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(flatten)]
    pub sampling: SamplingConfig,
}

// Legacy completions API request format
#[derive(Debug, Serialize)]
pub struct CompletionBody<'a> {
    pub model: &'a str,
    pub prompt: String,
    #[serde(flatten)]
    pub sampling: SamplingConfig,
}

// Chat API response format
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

// Completions API response format
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<TextChoice>,
}

#[derive(Debug, Deserialize)]
pub struct TextChoice {
    pub text: String,
}

/// One entry in the link store
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Link {
    pub short: String,
    pub long: String,
}
