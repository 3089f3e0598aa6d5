use anyhow::{Context as _, Result};
use serenity::prelude::*;
use std::sync::Arc;

use crate::bot::Gateway;
use crate::bot::registrar::SerenityRegistrar;
use crate::config::{Config, SourceLocations};
use crate::handlers::loader::{self, Commands, Components, Listeners};
use crate::handlers::{
    Dispatcher, GlobalCommandCache, HandlerSource, Publisher, Registry, RegistryBuilder,
    StaticCatalog,
};
use crate::utils::constants::{
    DEFAULT_CLIENT_INTENTS, DEFAULT_COMMANDS_SOURCE, DEFAULT_COMPONENTS_SOURCE,
    DEFAULT_EVENTS_SOURCE,
};
use crate::utils::errors::LoadError;
use crate::{commands, components, events};

/// Every handler compiled into the bot, under its conventional location
pub fn catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_location(DEFAULT_COMMANDS_SOURCE, commands::providers())
        .with_location(DEFAULT_COMPONENTS_SOURCE, components::providers())
        .with_location(DEFAULT_EVENTS_SOURCE, events::providers())
}

/// Load all categories and freeze the result.
///
/// Nothing can dispatch before this returns: the registry only exists once frozen.
pub fn load_registry(
    source: &dyn HandlerSource,
    locations: &SourceLocations,
) -> Result<Arc<Registry>, LoadError> {
    let mut builder = RegistryBuilder::new();

    loader::load::<Components>(source, &locations.components, &mut builder)?;
    loader::load::<Commands>(source, &locations.commands, &mut builder)?;
    loader::load::<Listeners>(source, &locations.events, &mut builder)?;

    Ok(builder.freeze())
}

/// Initialize and start the Discord bot
pub async fn start_bot() -> Result<()> {
    tracing::info!("[INIT] Starting Turnip Discord Bot");

    let config = Config::from_env()?;
    let registry = load_registry(&catalog(), &config.sources)?;

    let global_commands = Arc::new(GlobalCommandCache::new());
    let dispatcher = Arc::new(Dispatcher::new(registry.clone(), global_commands.clone()));

    let mut client = Client::builder(&config.token, DEFAULT_CLIENT_INTENTS)
        .event_handler(Gateway::new(dispatcher, global_commands.clone()))
        .await
        .context("Error creating client")?;

    let application = client
        .http
        .get_current_application_info()
        .await
        .context("Failed to fetch application info")?;
    client.http.set_application_id(application.id);

    let registrar = Arc::new(SerenityRegistrar::new(client.http.clone()));
    Publisher::new(registrar, global_commands)
        .publish(&registry)
        .await?;

    client.start().await.context("Discord client error")?;

    Ok(())
}
