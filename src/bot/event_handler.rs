use serenity::all::{
    Guild, GuildId, Interaction, Ready, ResumedEvent, UnavailableGuild,
};
use serenity::prelude::*;
use std::sync::Arc;

use crate::bot::convert;
use crate::bot::registrar::SerenityRegistrar;
use crate::handlers::{
    AutocompleteEvent, Dispatcher, GlobalCommandCache, LifecycleEvent, Publisher, Reply,
    Responder,
};
use crate::utils::errors::{DispatchError, error_chain};

const ERROR_REPLY: &str = "An unexpected error occurred. Please try again later.";

/// Bridges serenity's gateway callbacks to the dispatcher
pub struct Gateway {
    dispatcher: Arc<Dispatcher>,
    global_commands: Arc<GlobalCommandCache>,
}

impl Gateway {
    pub fn new(dispatcher: Arc<Dispatcher>, global_commands: Arc<GlobalCommandCache>) -> Self {
        Self {
            dispatcher,
            global_commands,
        }
    }

    async fn emit(&self, event: LifecycleEvent) {
        for e in self.dispatcher.dispatch_event(&event).await {
            tracing::error!("[EVENT] {}", error_chain(&e));
        }
    }
}

/// Log a failed dispatch and, where the interaction allows it, tell the user
async fn report(error: DispatchError, responder: Option<&dyn Responder>) {
    tracing::error!("[DISPATCH] {}", error_chain(&error));

    let Some(responder) = responder else {
        return;
    };

    if let Err(send_err) = responder.reply(Reply::error(ERROR_REPLY)).await {
        tracing::error!(
            "[DISPATCH] Failed to send error response to user: {:#}",
            send_err
        );
    }
}

#[serenity::async_trait]
impl EventHandler for Gateway {
    async fn interaction_create(&self, context: Context, interaction: Interaction) {
        let http = context.http.clone();

        match interaction {
            Interaction::Command(command) => {
                let event = convert::command_event(http, command);
                if let Err(e) = self.dispatcher.dispatch_invocation(&event).await {
                    report(e, Some(event.responder.as_ref())).await;
                }
            }

            // Autocomplete requests cannot carry a message response
            Interaction::Autocomplete(command) => {
                let event = AutocompleteEvent(convert::command_event(http, command));
                if let Err(e) = self.dispatcher.dispatch_autocomplete(&event).await {
                    report(e, None).await;
                }
            }

            Interaction::Component(component) => {
                let event = convert::component_event(http, component);
                if let Err(e) = self.dispatcher.dispatch_component(&event).await {
                    report(e, Some(event.responder.as_ref())).await;
                }
            }

            Interaction::Modal(modal) => {
                let event = convert::modal_event(http, modal);
                if let Err(e) = self.dispatcher.dispatch_component(&event).await {
                    report(e, Some(event.responder.as_ref())).await;
                }
            }

            _ => tracing::debug!("[DISPATCH] Ignoring unsupported interaction type"),
        }
    }

    async fn ready(&self, context: Context, ready: Ready) {
        let registrar = Arc::new(SerenityRegistrar::new(context.http.clone()));
        let publisher = Publisher::new(registrar, self.global_commands.clone());

        match publisher.refresh().await {
            Ok(count) => tracing::info!("[READY] Tracking {} global commands", count),
            Err(e) => tracing::warn!("[READY] Failed to refresh global commands: {:#}", e),
        }

        self.emit(LifecycleEvent::Ready {
            user_tag: ready.user.tag(),
            guild_count: ready.guilds.len(),
        })
        .await;
    }

    async fn resume(&self, _context: Context, _event: ResumedEvent) {
        self.emit(LifecycleEvent::Resume).await;
    }

    async fn cache_ready(&self, _context: Context, guilds: Vec<GuildId>) {
        self.emit(LifecycleEvent::CacheReady {
            guild_count: guilds.len(),
        })
        .await;
    }

    async fn guild_create(&self, _context: Context, guild: Guild, is_new: Option<bool>) {
        self.emit(LifecycleEvent::GuildCreate {
            guild_id: guild.id,
            name: guild.name,
            is_new,
        })
        .await;
    }

    async fn guild_delete(
        &self,
        _context: Context,
        incomplete: UnavailableGuild,
        _full: Option<Guild>,
    ) {
        self.emit(LifecycleEvent::GuildDelete {
            guild_id: incomplete.id,
            unavailable: incomplete.unavailable,
        })
        .await;
    }
}
