use futures::future::join_all;
use serenity::all::{CreateCommand, GuildId};
use std::sync::Arc;

use crate::handlers::command::build;
use crate::handlers::platform::{CommandRegistrar, GlobalCommandCache, PublishedCommand};
use crate::handlers::registry::{Registry, Scope};
use crate::utils::errors::{PublishError, PublishFailure, error_chain};
use crate::utils::pluralize;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Commands acknowledged per guild
    pub guilds: Vec<(GuildId, usize)>,
    /// Commands acknowledged globally; zero when the global call was skipped
    pub global: usize,
}

/// Reconciles the registry's commands with the platform, one full replace per scope.
pub struct Publisher {
    registrar: Arc<dyn CommandRegistrar>,
    cache: Arc<GlobalCommandCache>,
}

impl Publisher {
    pub fn new(registrar: Arc<dyn CommandRegistrar>, cache: Arc<GlobalCommandCache>) -> Self {
        Self { registrar, cache }
    }

    /// Publish every guild scope, then the global scope.
    ///
    /// A failing scope does not stop the others from being attempted. All
    /// failures are returned together, each naming its scope. With no
    /// global commands the global replace is skipped entirely, since an
    /// empty replace would deregister every global command.
    pub async fn publish(&self, registry: &Registry) -> Result<PublishReport, PublishFailure> {
        tracing::info!("[PUBLISH] Publishing commands...");

        let guild_results = join_all(registry.commands().scoped().map(|(guild_id, commands)| {
            let schemas = commands.into_iter().map(|command| build(command.as_ref())).collect();
            self.publish_guild(guild_id, schemas)
        }))
        .await;

        let mut report = PublishReport::default();
        let mut errors = Vec::new();

        for result in guild_results {
            match result {
                Ok(entry) => report.guilds.push(entry),
                Err(e) => errors.push(e),
            }
        }

        let global: Vec<CreateCommand> = registry
            .commands()
            .global()
            .map(|command| build(command.as_ref()))
            .collect();

        if global.is_empty() {
            tracing::info!("[GLOBAL] No global commands to publish, skipping");
        } else {
            match self.publish_global(global).await {
                Ok(count) => report.global = count,
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            for e in &errors {
                tracing::error!("[PUBLISH] {}", error_chain(e));
            }
            return Err(PublishFailure { errors });
        }

        tracing::info!("[PUBLISH] Finished publishing commands");
        Ok(report)
    }

    /// Reload the global command cache from the platform
    pub async fn refresh(&self) -> anyhow::Result<usize> {
        let commands = self.registrar.global_commands().await?;
        self.cache.replace(&commands);
        Ok(commands.len())
    }

    async fn publish_guild(
        &self,
        guild_id: GuildId,
        schemas: Vec<CreateCommand>,
    ) -> Result<(GuildId, usize), PublishError> {
        let scope = Scope::Guild(guild_id);

        let guild = self
            .registrar
            .fetch_guild(guild_id)
            .await
            .map_err(|cause| PublishError::FetchGuild { guild_id, cause })?;

        let published = guild
            .set_commands(schemas)
            .await
            .map_err(|cause| PublishError::Rejected { scope, cause })?;
        let published = acknowledged(published, scope)?;

        tracing::info!(
            "[{}] Published {} {}",
            scope,
            published.len(),
            pluralize(published.len(), "command")
        );
        Ok((guild_id, published.len()))
    }

    async fn publish_global(&self, schemas: Vec<CreateCommand>) -> Result<usize, PublishError> {
        let scope = Scope::Global;

        let published = self
            .registrar
            .set_global_commands(schemas)
            .await
            .map_err(|cause| PublishError::Rejected { scope, cause })?;
        let published = acknowledged(published, scope)?;

        self.cache.replace(&published);

        tracing::info!(
            "[{}] Published {} {}",
            scope,
            published.len(),
            pluralize(published.len(), "command")
        );
        Ok(published.len())
    }
}

/// We only ever submit non-empty sets, so an empty answer is a failure too
fn acknowledged(
    published: Option<Vec<PublishedCommand>>,
    scope: Scope,
) -> Result<Vec<PublishedCommand>, PublishError> {
    match published {
        Some(published) if !published.is_empty() => Ok(published),
        _ => Err(PublishError::EmptyAcknowledgment { scope }),
    }
}
