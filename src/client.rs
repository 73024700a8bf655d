use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::conversation::{ConversationContext, ConversationOptions};
use crate::error::{EzError, Result};
use crate::models::{ChatMessage, Endpoint, Role};
use crate::retry::RetryPolicy;
use crate::segment;
use crate::shaping::{self, ShapedResponse};
use crate::transport::{OpenAiTransport, Transport};

/// Result of one `send`: the history after the exchange and the shaped
/// reply to the last chunk.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub conversation: Vec<ChatMessage>,
    pub response: ShapedResponse,
}

pub struct ChatClient {
    tx: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl ChatClient {
    pub fn new(tx: Arc<dyn Transport>, retry: RetryPolicy) -> Self {
        Self { tx, retry }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let transport = Arc::new(OpenAiTransport::from_config(&cfg.openai)?);
        Ok(Self::new(
            transport as Arc<dyn Transport>,
            RetryPolicy::ExponentialBackoff(cfg.retry.clone()),
        ))
    }

    /// Send `message` one sentence at a time, each with the whole history.
    ///
    /// Chunks go out strictly in order since every request carries the
    /// replies to the chunks before it. On error the turns already
    /// appended stay in `ctx`.
    pub async fn send(&self, ctx: &mut ConversationContext, message: &str) -> Result<Exchange> {
        let chunks = segment::chunks(message, ctx.max_length());
        if chunks.is_empty() {
            tracing::warn!(
                "Message of {} chars yielded no chunks within {} chars",
                message.chars().count(),
                ctx.max_length()
            );
            return Err(EzError::EmptyChunkSet);
        }

        tracing::info!("Sending {} chunk(s) to {}", chunks.len(), ctx.model());

        let endpoint = ctx.endpoint();
        let mut last = String::new();
        for chunk in chunks {
            ctx.conversation.push(Role::User, chunk);
            let req = ctx.request();
            let raw = self.retry.run(|| self.tx.complete(endpoint, &req)).await?;
            ctx.conversation.push(Role::Assistant, raw.as_str());
            last = raw;
        }

        Ok(Exchange {
            conversation: ctx.conversation().turns().to_vec(),
            response: shaping::shape(ctx.mode(), &last),
        })
    }

    /// Single-shot `start` + `send`; the conversation is discarded.
    pub async fn send_once(
        &self,
        model: &str,
        message: &str,
        endpoint: Option<Endpoint>,
        mode: Option<&str>,
        options: &ConversationOptions,
    ) -> Result<ShapedResponse> {
        let mut ctx = ConversationContext::start(model, endpoint, mode, options);
        Ok(self.send(&mut ctx, message).await?.response)
    }
}
