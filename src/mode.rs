//! Response modes: the system instruction shown to the model and the
//! sampling defaults that go with it.

use serde::{Deserialize, Serialize};

const GENERIC_INSTRUCTION: &str = "You are a helpful assistant.";

pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TOP_P: f32 = 1.0;
const PRECISE_TEMPERATURE: f32 = 0.2;
const PRECISE_TOP_P: f32 = 0.1;
pub const DEFAULT_FREQUENCY_PENALTY: f32 = 1.0;
pub const DEFAULT_PRESENCE_PENALTY: f32 = 1.0;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    Default,
    Short,
    Long,
    YesNo,
    One,
    Api,
    Code,
}

impl ResponseMode {
    pub const ALL: [ResponseMode; 7] = [
        ResponseMode::Default,
        ResponseMode::Short,
        ResponseMode::Long,
        ResponseMode::YesNo,
        ResponseMode::One,
        ResponseMode::Api,
        ResponseMode::Code,
    ];

    /// Look up a mode by name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::Default),
            "short" => Some(Self::Short),
            "long" => Some(Self::Long),
            "yesno" => Some(Self::YesNo),
            "one" => Some(Self::One),
            "api" => Some(Self::Api),
            "code" => Some(Self::Code),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Short => "short",
            Self::Long => "long",
            Self::YesNo => "yesno",
            Self::One => "one",
            Self::Api => "api",
            Self::Code => "code",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Default => "You are a helpful and intelligent assistant",
            Self::Short => {
                "You are a helpful and intelligent assistant who answers in very short and to the point answers"
            }
            Self::Long => {
                "You are a helpful and intelligent assistant who answers in extremely long and thought out answers"
            }
            Self::YesNo => {
                "You are an assistant that answers 'Yes', 'No', or 'Unknown' based on factual information. Please ensure your responses are accurate and aligned with known facts."
            }
            Self::One => {
                "You are an assistant that must respond with only one word, no more, no less. Do not provide any additional context, explanation, or complete sentences. Only one word is allowed in your response."
            }
            Self::Api => {
                "You are an assistant that provides responses in concise JSON-like key-value pairs. Please respond to the user's queries with specific keys and values. For example, if asked about a famous show and its main actor, respond with: {'show': 'Name of the Show', 'actor': 'Name of the Actor'}."
            }
            Self::Code => {
                "You are an assistant that responds exclusively with executable code. The code must be in the language specified in the question, such as Bash, Python, Batch, or other programming languages. Your response must contain only the code itself, without any explanations, examples, or placeholders. Ensure that the code is complete, accurate, and includes all the logic requested. Do not include any comments or annotations within the code."
            }
        }
    }

    /// Default (temperature, top_p) for this mode.
    pub fn sampling_defaults(&self) -> (f32, f32) {
        match self {
            Self::YesNo | Self::Api => (PRECISE_TEMPERATURE, PRECISE_TOP_P),
            _ => (DEFAULT_TEMPERATURE, DEFAULT_TOP_P),
        }
    }
}

/// System instruction for an optional mode. Without a mode the caller's
/// custom instruction is used, then the generic one.
pub fn resolve_instruction(mode: Option<ResponseMode>, custom: Option<&str>) -> String {
    match mode {
        Some(mode) => mode.instruction().to_string(),
        None => custom.unwrap_or(GENERIC_INSTRUCTION).to_string(),
    }
}

/// Explicit value unless it is absent or zero. Zero counts as unset.
pub fn or_default(explicit: Option<f32>, default: f32) -> f32 {
    match explicit {
        Some(v) if v != 0.0 => v,
        _ => default,
    }
}
