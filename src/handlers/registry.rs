use serenity::all::GuildId;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::handlers::command::Command;
use crate::handlers::component::Component;
use crate::handlers::event::component_identity;
use crate::handlers::listener::{EventKind, EventListener};
use crate::utils::errors::RegistryError;

/// Registration namespace of a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Global,
    Guild(GuildId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("GLOBAL"),
            Self::Guild(guild_id) => write!(f, "GUILD: {guild_id}"),
        }
    }
}

/// Identity-keyed handlers split into a global partition and one partition per guild.
///
/// An identity is unique inside each partition, and an identity that is
/// global never appears in any guild partition.
pub struct ScopedTable<H: ?Sized> {
    global: BTreeMap<String, Arc<H>>,
    scoped: BTreeMap<GuildId, BTreeMap<String, Arc<H>>>,
}

impl<H: ?Sized> Default for ScopedTable<H> {
    fn default() -> Self {
        Self {
            global: BTreeMap::new(),
            scoped: BTreeMap::new(),
        }
    }
}

impl<H: ?Sized> ScopedTable<H> {
    pub fn insert_global(&mut self, identity: &str, handler: Arc<H>) -> Result<(), RegistryError> {
        if self.global.contains_key(identity) {
            return Err(RegistryError::Duplicate {
                identity: identity.to_string(),
                scope: Scope::Global,
            });
        }

        if let Some(guild_id) = self
            .scoped
            .iter()
            .find(|(_, table)| table.contains_key(identity))
            .map(|(guild_id, _)| *guild_id)
        {
            return Err(RegistryError::GlobalCollision {
                identity: identity.to_string(),
                guild_id,
            });
        }

        self.global.insert(identity.to_string(), handler);
        Ok(())
    }

    pub fn insert_scoped(
        &mut self,
        guild_id: GuildId,
        identity: &str,
        handler: Arc<H>,
    ) -> Result<(), RegistryError> {
        if self.global.contains_key(identity) {
            return Err(RegistryError::GlobalCollision {
                identity: identity.to_string(),
                guild_id,
            });
        }

        let table = self.scoped.entry(guild_id).or_default();
        if table.contains_key(identity) {
            return Err(RegistryError::Duplicate {
                identity: identity.to_string(),
                scope: Scope::Guild(guild_id),
            });
        }

        table.insert(identity.to_string(), handler);
        Ok(())
    }

    /// Resolve an identity.
    ///
    /// `global` is decided by the caller: for commands the platform, not the
    /// registry, knows whether an identity is registered globally. Scoped
    /// lookups without a guild never resolve.
    pub fn lookup(&self, identity: &str, global: bool, guild_id: Option<GuildId>) -> Option<&Arc<H>> {
        if global {
            return self.global.get(identity);
        }

        self.scoped.get(&guild_id?)?.get(identity)
    }

    pub fn contains_global(&self, identity: &str) -> bool {
        self.global.contains_key(identity)
    }

    pub fn global(&self) -> impl Iterator<Item = &Arc<H>> {
        self.global.values()
    }

    /// Guild partitions in ascending guild id order
    pub fn scoped(&self) -> impl Iterator<Item = (GuildId, Vec<&Arc<H>>)> {
        self.scoped
            .iter()
            .map(|(guild_id, table)| (*guild_id, table.values().collect()))
    }

    pub fn global_len(&self) -> usize {
        self.global.len()
    }
}

/// A listener plus its "already fired" flag for `once` listeners
pub struct MountedListener {
    listener: Arc<dyn EventListener>,
    fired: AtomicBool,
}

impl MountedListener {
    fn new(listener: Arc<dyn EventListener>) -> Self {
        Self {
            listener,
            fired: AtomicBool::new(false),
        }
    }

    pub fn listener(&self) -> &Arc<dyn EventListener> {
        &self.listener
    }

    /// Whether the listener should run for this occurrence.
    ///
    /// Always true for regular listeners; true exactly once for `once` listeners.
    pub fn claim(&self) -> bool {
        if !self.listener.once() {
            return true;
        }

        !self.fired.swap(true, Ordering::AcqRel)
    }
}

/// Listeners grouped by event, in load order
#[derive(Default)]
pub struct ListenerTable {
    by_event: HashMap<EventKind, Vec<MountedListener>>,
}

impl ListenerTable {
    pub fn insert(&mut self, listener: Arc<dyn EventListener>) {
        self.by_event
            .entry(listener.event())
            .or_default()
            .push(MountedListener::new(listener));
    }

    pub fn lookup(&self, event: EventKind) -> &[MountedListener] {
        self.by_event
            .get(&event)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// The frozen handler registry shared by the dispatcher and the publisher
#[derive(Default)]
pub struct Registry {
    commands: ScopedTable<dyn Command>,
    components: ScopedTable<dyn Component>,
    listeners: ListenerTable,
}

impl Registry {
    pub fn commands(&self) -> &ScopedTable<dyn Command> {
        &self.commands
    }

    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    pub fn command(&self, name: &str, global: bool, guild_id: Option<GuildId>) -> Option<&Arc<dyn Command>> {
        self.commands.lookup(name, global, guild_id)
    }

    /// Resolve a component by its full custom id, then by the part before the first `:`.
    pub fn component(&self, custom_id: &str, guild_id: Option<GuildId>) -> Option<&Arc<dyn Component>> {
        self.component_by_identity(custom_id, guild_id).or_else(|| {
            self.component_by_identity(component_identity(custom_id), guild_id)
        })
    }

    // Components are never published, so the registry decides whether one is global
    fn component_by_identity(&self, identity: &str, guild_id: Option<GuildId>) -> Option<&Arc<dyn Component>> {
        let global = self.components.contains_global(identity);
        self.components.lookup(identity, global, guild_id)
    }
}

/// Write phase of the registry. Only the loaders hold one.
#[derive(Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands_mut(&mut self) -> &mut ScopedTable<dyn Command> {
        &mut self.registry.commands
    }

    pub fn components_mut(&mut self) -> &mut ScopedTable<dyn Component> {
        &mut self.registry.components
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerTable {
        &mut self.registry.listeners
    }

    /// End the write phase. The returned registry is read-only for the rest of the process.
    pub fn freeze(self) -> Arc<Registry> {
        Arc::new(self.registry)
    }
}
