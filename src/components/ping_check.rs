use async_trait::async_trait;
use chrono::Utc;
use std::time::Instant;

use crate::commands::ping::pong;
use crate::handlers::{Component, ComponentEvent};

/// The "Ping again" button attached to `/ping` replies
pub struct PingCheck;

#[async_trait]
impl Component for PingCheck {
    fn custom_id(&self) -> &str {
        "pingCheck"
    }

    async fn execute(&self, event: &ComponentEvent) -> anyhow::Result<()> {
        let started = Instant::now();
        event.defer(true).await?;
        let api_latency = started.elapsed().as_millis();

        let latency = (Utc::now() - event.meta.created_at).num_milliseconds();
        event
            .edit_reply(pong("🏓 Pong again!", latency, api_latency))
            .await
    }
}
