pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod mode;
pub mod models;
pub mod retry;
pub mod segment;
pub mod shaping;
pub mod shortener;
pub mod text;
pub mod transport;

pub use crate::client::{ChatClient, Exchange};
pub use crate::config::Config;
pub use crate::conversation::{Conversation, ConversationContext, ConversationOptions};
pub use crate::error::{EzError, Result};
pub use crate::mode::ResponseMode;
pub use crate::models::{ChatMessage, Endpoint, Link, Role, SamplingConfig};
pub use crate::shaping::ShapedResponse;
pub use crate::shortener::{HttpLinkBackend, LinkBackend, ShortenerClient};
pub use crate::text::{trim_left_to, trim_right_from};
pub use crate::transport::{OpenAiTransport, Transport};
