use async_trait::async_trait;
use serenity::all::{CreateCommand, GuildId};

use crate::handlers::event::{AutocompleteEvent, CommandEvent};
use crate::utils::constants::{DEFAULT_COMMAND_CONTEXTS, DEFAULT_COMMAND_PERMISSIONS};

/// An application command.
///
/// Commands with an empty [`Command::guild_ids`] are published globally,
/// everything else is published to each listed guild only.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &str;

    /// Guilds the command is restricted to. Empty means global; repeats are ignored.
    fn guild_ids(&self) -> &[GuildId] {
        &[]
    }

    /// Describe the command schema on top of the defaults from [`build`].
    ///
    /// Settings applied here win over the defaults.
    fn register(&self, command: CreateCommand) -> CreateCommand {
        command
    }

    async fn execute(&self, event: &CommandEvent) -> anyhow::Result<()>;

    /// Commands that answer autocomplete requests return `Some(self)`
    fn as_autocomplete(&self) -> Option<&dyn Autocomplete> {
        None
    }
}

#[async_trait]
pub trait Autocomplete: Send + Sync {
    async fn autocomplete(&self, event: &AutocompleteEvent) -> anyhow::Result<()>;
}

/// The full schema submitted to the platform for a command
pub fn build(command: &dyn Command) -> CreateCommand {
    let base = CreateCommand::new(command.name())
        .default_member_permissions(DEFAULT_COMMAND_PERMISSIONS)
        .contexts(DEFAULT_COMMAND_CONTEXTS.to_vec());

    command.register(base)
}
