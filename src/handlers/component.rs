use async_trait::async_trait;

use crate::handlers::event::ComponentEvent;

/// A message component (button, select menu) or modal handler.
///
/// Interactions are routed by custom id. A custom id of the form
/// `"<custom_id>:<args>"` reaches the component registered as `<custom_id>`.
#[async_trait]
pub trait Component: Send + Sync {
    fn custom_id(&self) -> &str;

    async fn execute(&self, event: &ComponentEvent) -> anyhow::Result<()>;
}
