use futures::FutureExt;
use futures::future::join_all;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::handlers::command::Command;
use crate::handlers::event::{AutocompleteEvent, CommandEvent, ComponentEvent, Traceable};
use crate::handlers::listener::LifecycleEvent;
use crate::handlers::platform::GlobalCommandIndex;
use crate::handlers::registry::Registry;
use crate::utils::errors::{
    DispatchError, ExecutionError, ListenerError, NotFoundError, panic_to_error,
};

/// Routes inbound interactions to exactly one registered handler, and
/// lifecycle events to every listener registered for them.
///
/// Every failure is contained to the event that caused it: handler errors
/// and panics come back as values, never as unwinding.
pub struct Dispatcher {
    registry: Arc<Registry>,
    globals: Arc<dyn GlobalCommandIndex>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, globals: Arc<dyn GlobalCommandIndex>) -> Self {
        Self { registry, globals }
    }

    pub async fn dispatch_invocation(&self, event: &CommandEvent) -> Result<(), DispatchError> {
        let command = self.resolve_command(event)?;
        tracing::debug!("[DISPATCH] Executing command \"{}\"", event.name);
        guarded(event, command.execute(event)).await
    }

    pub async fn dispatch_autocomplete(&self, event: &AutocompleteEvent) -> Result<(), DispatchError> {
        let command = self.resolve_command(event)?;
        let autocomplete = command
            .as_autocomplete()
            .ok_or_else(|| NotFoundError::Autocomplete(event.name.clone()))?;

        tracing::debug!("[DISPATCH] Autocompleting command \"{}\"", event.name);
        guarded(event, autocomplete.autocomplete(event)).await
    }

    pub async fn dispatch_component(&self, event: &ComponentEvent) -> Result<(), DispatchError> {
        let component = self
            .registry
            .component(&event.custom_id, event.meta.guild_id)
            .ok_or_else(|| NotFoundError::Component(event.custom_id.clone()))?;

        tracing::debug!("[DISPATCH] Executing component \"{}\"", event.custom_id);
        guarded(event, component.execute(event)).await
    }

    /// Run every listener of the event concurrently.
    ///
    /// Returns the failures; a failing listener does not keep the others from running.
    pub async fn dispatch_event(&self, event: &LifecycleEvent) -> Vec<ListenerError> {
        let kind = event.kind();

        let runs = self
            .registry
            .listeners()
            .lookup(kind)
            .iter()
            .filter(|mounted| mounted.claim())
            .map(|mounted| async move {
                caught(mounted.listener().execute(event))
                    .await
                    .map_err(|cause| ListenerError { event: kind, cause })
            });

        join_all(runs)
            .await
            .into_iter()
            .filter_map(Result::err)
            .collect()
    }

    /// The platform decides whether the invoked command id is global; global wins.
    fn resolve_command(&self, event: &CommandEvent) -> Result<&Arc<dyn Command>, NotFoundError> {
        let global = self.globals.is_global(event.command_id);

        self.registry
            .command(&event.name, global, event.meta.guild_id)
            .ok_or_else(|| NotFoundError::Command(event.name.clone()))
    }
}

async fn caught<F>(action: F) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    AssertUnwindSafe(action)
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(panic_to_error(payload)))
}

async fn guarded<E, F>(event: &E, action: F) -> Result<(), DispatchError>
where
    E: Traceable + ?Sized,
    F: Future<Output = anyhow::Result<()>>,
{
    caught(action).await.map_err(|cause| {
        DispatchError::Execution(ExecutionError {
            trace: event.trace(),
            cause,
        })
    })
}
