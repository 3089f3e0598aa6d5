use async_trait::async_trait;
use dashmap::DashSet;
use serenity::all::{CommandId, CreateCommand, GuildId};

/// A command as the platform registered it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedCommand {
    pub id: CommandId,
    pub name: String,
}

/// The platform's registration surface for one guild
#[async_trait]
pub trait GuildCommands: Send + Sync {
    /// Replace every command registered in the guild.
    ///
    /// `None` means the platform acknowledged nothing.
    async fn set_commands(
        &self,
        commands: Vec<CreateCommand>,
    ) -> anyhow::Result<Option<Vec<PublishedCommand>>>;
}

#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    async fn fetch_guild(&self, guild_id: GuildId) -> anyhow::Result<Box<dyn GuildCommands>>;

    /// Replace every globally registered command
    async fn set_global_commands(
        &self,
        commands: Vec<CreateCommand>,
    ) -> anyhow::Result<Option<Vec<PublishedCommand>>>;

    /// The commands currently registered globally
    async fn global_commands(&self) -> anyhow::Result<Vec<PublishedCommand>>;
}

/// Answers whether a command id is registered globally on the platform
pub trait GlobalCommandIndex: Send + Sync {
    fn is_global(&self, command_id: CommandId) -> bool;
}

/// Live set of global command ids, kept in sync by the publisher
#[derive(Debug, Default)]
pub struct GlobalCommandCache {
    ids: DashSet<CommandId>,
}

impl GlobalCommandCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the cached set for the platform's current one
    pub fn replace(&self, commands: &[PublishedCommand]) {
        self.ids.retain(|id| commands.iter().any(|command| command.id == *id));
        for command in commands {
            self.ids.insert(command.id);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

impl GlobalCommandIndex for GlobalCommandCache {
    fn is_global(&self, command_id: CommandId) -> bool {
        self.ids.contains(&command_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn published(id: u64, name: &str) -> PublishedCommand {
        PublishedCommand {
            id: CommandId::new(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_cache_replace_drops_stale_ids() {
        let cache = GlobalCommandCache::new();
        cache.replace(&[published(1, "ping"), published(2, "example")]);
        assert!(cache.is_global(CommandId::new(1)));
        assert_eq!(cache.len(), 2);

        cache.replace(&[published(3, "ping")]);
        assert!(!cache.is_global(CommandId::new(1)));
        assert!(!cache.is_global(CommandId::new(2)));
        assert!(cache.is_global(CommandId::new(3)));
        assert_eq!(cache.len(), 1);
    }
}
