use anyhow::Result;
use tracing_subscriber::EnvFilter;

use ezwrap::{ChatClient, Config, ConversationOptions, ResponseMode};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the reply
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mode = match args.first() {
        Some(first) if args.len() > 1 && ResponseMode::parse(first).is_some() => {
            Some(args.remove(0))
        }
        _ => None,
    };
    if args.is_empty() {
        anyhow::bail!("usage: ezwrap [mode] <message...>");
    }
    let message = args.join(" ");

    let client = ChatClient::from_config(&config)?;
    let options = ConversationOptions {
        max_length: Some(config.conversation.max_length),
        ..Default::default()
    };

    tracing::info!(
        "main: sending {} chars with mode {}",
        message.chars().count(),
        mode.as_deref().unwrap_or("none")
    );
    let response = client
        .send_once(
            &config.openai.model,
            &message,
            None,
            mode.as_deref(),
            &options,
        )
        .await?;

    println!("{response}");
    Ok(())
}
