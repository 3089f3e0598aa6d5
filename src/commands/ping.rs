use async_trait::async_trait;
use serenity::builder::CreateCommand;
use std::time::Instant;

use crate::handlers::{Command, CommandEvent, Reply};

pub struct Ping;

#[async_trait]
impl Command for Ping {
    fn name(&self) -> &str {
        "ping"
    }

    fn register(&self, command: CreateCommand) -> CreateCommand {
        command.description("Ping Pong!")
    }

    async fn execute(&self, event: &CommandEvent) -> anyhow::Result<()> {
        let started = Instant::now();
        event
            .reply(
                Reply::text("Pinging...")
                    .silent()
                    .button("pingCheck", "Ping again"),
            )
            .await?;
        let api_latency = started.elapsed().as_millis();

        let sent_at = event.reply_time().await?;
        let latency = (sent_at - event.meta.created_at).num_milliseconds();

        event
            .edit_reply(pong("🏓 Pong!", latency, api_latency))
            .await
    }
}

pub fn pong(title: &str, latency: i64, api_latency: u128) -> String {
    format!("{title}\nLatency: {latency}ms\nAPI Latency: {api_latency}ms")
}
