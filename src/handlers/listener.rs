use async_trait::async_trait;
use serenity::all::GuildId;
use std::fmt;

/// Gateway lifecycle notifications a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Ready,
    Resume,
    CacheReady,
    GuildCreate,
    GuildDelete,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ready => "ready",
            Self::Resume => "resume",
            Self::CacheReady => "cacheReady",
            Self::GuildCreate => "guildCreate",
            Self::GuildDelete => "guildDelete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Ready {
        user_tag: String,
        guild_count: usize,
    },
    Resume,
    CacheReady {
        guild_count: usize,
    },
    GuildCreate {
        guild_id: GuildId,
        name: String,
        is_new: Option<bool>,
    },
    GuildDelete {
        guild_id: GuildId,
        unavailable: bool,
    },
}

impl LifecycleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Ready { .. } => EventKind::Ready,
            Self::Resume => EventKind::Resume,
            Self::CacheReady { .. } => EventKind::CacheReady,
            Self::GuildCreate { .. } => EventKind::GuildCreate,
            Self::GuildDelete { .. } => EventKind::GuildDelete,
        }
    }
}

/// Reacts to a lifecycle event. Any number of listeners may share an event;
/// all of them run each time it fires.
#[async_trait]
pub trait EventListener: Send + Sync {
    fn event(&self) -> EventKind;

    /// Run on the first occurrence only
    fn once(&self) -> bool {
        false
    }

    async fn execute(&self, event: &LifecycleEvent) -> anyhow::Result<()>;
}
