use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::mode::ResponseMode;

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'(\w+)': '([^']+)'").expect("key/value pattern is valid")
});

/// Post-processed model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ShapedResponse {
    Text(String),
    Mapping(BTreeMap<String, String>),
}

impl ShapedResponse {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Mapping(map) => Some(map),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for ShapedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Mapping(map) => {
                for (key, value) in map {
                    writeln!(f, "{key}: {value}")?;
                }
                Ok(())
            }
        }
    }
}

pub fn shape(mode: Option<ResponseMode>, raw: &str) -> ShapedResponse {
    match mode {
        Some(ResponseMode::Api) => ShapedResponse::Mapping(key_values(raw)),
        Some(ResponseMode::YesNo) => ShapedResponse::Text(yes_no(raw).to_string()),
        _ => ShapedResponse::Text(raw.to_string()),
    }
}

/// Pull `'key': 'value'` pairs out of free text. Anything not quoted
/// exactly that way is skipped; a repeated key keeps its last value.
pub fn key_values(raw: &str) -> BTreeMap<String, String> {
    KEY_VALUE
        .captures_iter(raw)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Case-sensitive substring scan; "Yes" wins over "No".
pub fn yes_no(raw: &str) -> &'static str {
    if raw.contains("Yes") {
        "Yes"
    } else if raw.contains("No") {
        "No"
    } else {
        "Unknown"
    }
}
