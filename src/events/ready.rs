use async_trait::async_trait;

use crate::handlers::{EventKind, EventListener, LifecycleEvent};

pub struct Ready;

#[async_trait]
impl EventListener for Ready {
    fn event(&self) -> EventKind {
        EventKind::Ready
    }

    fn once(&self) -> bool {
        true
    }

    async fn execute(&self, event: &LifecycleEvent) -> anyhow::Result<()> {
        if let LifecycleEvent::Ready {
            user_tag,
            guild_count,
        } = event
        {
            tracing::info!(
                "[READY] Successfully logged in as {} ({} guilds)",
                user_tag,
                guild_count
            );
        }

        Ok(())
    }
}
