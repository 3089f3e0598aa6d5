use anyhow::Context as _;
use serenity::all::GuildId;
use std::collections::{BTreeSet, HashMap};
use std::panic;
use std::sync::Arc;

use crate::handlers::command::Command;
use crate::handlers::component::Component;
use crate::handlers::listener::EventListener;
use crate::handlers::registry::RegistryBuilder;
use crate::utils::errors::{LoadError, RegistryError, panic_to_error};
use crate::utils::pluralize;

/// A constructed handler of any category
pub enum HandlerUnit {
    Command(Arc<dyn Command>),
    Component(Arc<dyn Component>),
    Listener(Arc<dyn EventListener>),
}

impl HandlerUnit {
    pub fn command(command: impl Command + 'static) -> Self {
        Self::Command(Arc::new(command))
    }

    pub fn component(component: impl Component + 'static) -> Self {
        Self::Component(Arc::new(component))
    }

    pub fn listener(listener: impl EventListener + 'static) -> Self {
        Self::Listener(Arc::new(listener))
    }
}

pub type Provide = fn() -> anyhow::Result<HandlerUnit>;

/// A named constructor for one handler
#[derive(Clone, Copy)]
pub struct ProviderEntry {
    pub name: &'static str,
    pub provide: Provide,
}

impl ProviderEntry {
    pub const fn new(name: &'static str, provide: Provide) -> Self {
        Self { name, provide }
    }
}

/// Where handler providers are discovered
pub trait HandlerSource: Send + Sync {
    /// Providers at `location`, or `None` when the location does not exist
    fn locate(&self, location: &str) -> anyhow::Result<Option<Vec<ProviderEntry>>>;
}

/// Providers declared at compile time, grouped under location names
#[derive(Default, Clone)]
pub struct StaticCatalog {
    locations: HashMap<String, Vec<ProviderEntry>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: impl Into<String>, providers: Vec<ProviderEntry>) -> Self {
        self.locations.insert(location.into(), providers);
        self
    }
}

impl HandlerSource for StaticCatalog {
    fn locate(&self, location: &str) -> anyhow::Result<Option<Vec<ProviderEntry>>> {
        Ok(self.locations.get(location).cloned())
    }
}

/// How one handler category is recognized and stored
pub trait Category {
    const NAME: &'static str;
    const PLURAL: &'static str;

    type Handler: ?Sized;

    /// Keep only units of this category
    fn accept(unit: HandlerUnit) -> Option<Arc<Self::Handler>>;

    /// Store a handler in its scope(s), logging each placement
    fn insert(registry: &mut RegistryBuilder, handler: Arc<Self::Handler>) -> Result<(), RegistryError>;
}

pub struct Commands;

impl Category for Commands {
    const NAME: &'static str = "command";
    const PLURAL: &'static str = "commands";

    type Handler = dyn Command;

    fn accept(unit: HandlerUnit) -> Option<Arc<dyn Command>> {
        match unit {
            HandlerUnit::Command(command) => Some(command),
            _ => None,
        }
    }

    fn insert(registry: &mut RegistryBuilder, command: Arc<dyn Command>) -> Result<(), RegistryError> {
        let table = registry.commands_mut();
        let name = command.name().to_string();

        if command.guild_ids().is_empty() {
            table.insert_global(&name, command)?;
            tracing::info!("[GLOBAL] Cached command \"{}\"", name);
            return Ok(());
        }

        let guild_ids: BTreeSet<GuildId> = command.guild_ids().iter().copied().collect();
        for guild_id in guild_ids {
            table.insert_scoped(guild_id, &name, command.clone())?;
            tracing::info!("[GUILD: {}] Cached command \"{}\"", guild_id, name);
        }

        Ok(())
    }
}

pub struct Components;

impl Category for Components {
    const NAME: &'static str = "component";
    const PLURAL: &'static str = "components";

    type Handler = dyn Component;

    fn accept(unit: HandlerUnit) -> Option<Arc<dyn Component>> {
        match unit {
            HandlerUnit::Component(component) => Some(component),
            _ => None,
        }
    }

    fn insert(registry: &mut RegistryBuilder, component: Arc<dyn Component>) -> Result<(), RegistryError> {
        let custom_id = component.custom_id().to_string();
        registry.components_mut().insert_global(&custom_id, component)?;
        tracing::info!("[GLOBAL] Cached component \"{}\"", custom_id);
        Ok(())
    }
}

pub struct Listeners;

impl Category for Listeners {
    const NAME: &'static str = "event listener";
    const PLURAL: &'static str = "event listeners";

    type Handler = dyn EventListener;

    fn accept(unit: HandlerUnit) -> Option<Arc<dyn EventListener>> {
        match unit {
            HandlerUnit::Listener(listener) => Some(listener),
            _ => None,
        }
    }

    fn insert(registry: &mut RegistryBuilder, listener: Arc<dyn EventListener>) -> Result<(), RegistryError> {
        let mode = if listener.once() { "ONCE" } else { "ON" };
        tracing::info!("[{}] Mounted event listener \"{}\"", mode, listener.event());
        registry.listeners_mut().insert(listener);
        Ok(())
    }
}

/// Load every handler of category `C` found at `location`. A failing provider aborts the category.
pub fn load<C: Category>(
    source: &dyn HandlerSource,
    location: &str,
    registry: &mut RegistryBuilder,
) -> Result<usize, LoadError> {
    let wrap = |cause: anyhow::Error| LoadError {
        category: C::PLURAL,
        cause,
    };

    let Some(providers) = source
        .locate(location)
        .with_context(|| format!("failed to enumerate \"{location}\""))
        .map_err(wrap)?
    else {
        tracing::info!(
            "[LOAD] Skipping {} caching: \"{}\" not found",
            C::NAME,
            location
        );
        return Ok(0);
    };

    tracing::info!("[LOAD] Caching {}...", C::PLURAL);

    let mut count = 0;
    for entry in providers {
        let unit = panic::catch_unwind(entry.provide)
            .unwrap_or_else(|payload| Err(panic_to_error(payload)))
            .with_context(|| format!("failed to instantiate \"{}\"", entry.name))
            .map_err(wrap)?;

        let Some(handler) = C::accept(unit) else {
            tracing::warn!("[LOAD] Skipped \"{}\": not a {}", entry.name, C::NAME);
            continue;
        };

        C::insert(registry, handler)
            .with_context(|| format!("failed to register \"{}\"", entry.name))
            .map_err(wrap)?;
        count += 1;
    }

    tracing::info!("[LOAD] Cached {} {}", count, pluralize(count, C::NAME));
    Ok(count)
}
