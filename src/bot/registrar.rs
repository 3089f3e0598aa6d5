use async_trait::async_trait;
use serenity::all::{Command as PlatformCommand, CreateCommand, GuildId, Http};
use std::sync::Arc;

use crate::handlers::platform::{CommandRegistrar, GuildCommands, PublishedCommand};

/// Command registration through the Discord HTTP API
pub struct SerenityRegistrar {
    http: Arc<Http>,
}

impl SerenityRegistrar {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

struct GuildHandle {
    http: Arc<Http>,
    guild_id: GuildId,
}

fn published(commands: &[PlatformCommand]) -> Vec<PublishedCommand> {
    commands
        .iter()
        .map(|command| PublishedCommand {
            id: command.id,
            name: command.name.clone(),
        })
        .collect()
}

#[async_trait]
impl GuildCommands for GuildHandle {
    async fn set_commands(
        &self,
        commands: Vec<CreateCommand>,
    ) -> anyhow::Result<Option<Vec<PublishedCommand>>> {
        let commands = self.guild_id.set_commands(&self.http, commands).await?;
        Ok(Some(published(&commands)))
    }
}

#[async_trait]
impl CommandRegistrar for SerenityRegistrar {
    async fn fetch_guild(&self, guild_id: GuildId) -> anyhow::Result<Box<dyn GuildCommands>> {
        let guild = self.http.get_guild(guild_id).await?;
        Ok(Box::new(GuildHandle {
            http: self.http.clone(),
            guild_id: guild.id,
        }))
    }

    async fn set_global_commands(
        &self,
        commands: Vec<CreateCommand>,
    ) -> anyhow::Result<Option<Vec<PublishedCommand>>> {
        let commands = PlatformCommand::set_global_commands(&self.http, commands).await?;
        Ok(Some(published(&commands)))
    }

    async fn global_commands(&self) -> anyhow::Result<Vec<PublishedCommand>> {
        let commands = PlatformCommand::get_global_commands(&self.http).await?;
        Ok(published(&commands))
    }
}
