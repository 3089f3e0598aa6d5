use serde::Serialize;
use serenity::all::{ChannelId, GuildId, UserId};
use std::any::Any;
use thiserror::Error;

use crate::handlers::event::InteractionMeta;
use crate::handlers::listener::EventKind;
use crate::handlers::registry::Scope;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DISCORD_TOKEN is missing or empty")]
    MissingToken,
}

/// Uniqueness violations detected while the registry is being populated
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("\"{identity}\" is already registered in scope {scope}")]
    Duplicate { identity: String, scope: Scope },
    #[error("\"{identity}\" is registered both globally and in guild {guild_id}")]
    GlobalCollision { identity: String, guild_id: GuildId },
}

/// A whole handler category failed to load. Startup cannot continue.
#[derive(Debug, Error)]
#[error("Failed to cache {category}")]
pub struct LoadError {
    pub category: &'static str,
    #[source]
    pub cause: anyhow::Error,
}

/// One scope could not be published to the platform.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to fetch guild while publishing commands [ID: {guild_id}]")]
    FetchGuild {
        guild_id: GuildId,
        #[source]
        cause: anyhow::Error,
    },
    #[error("Failed to publish {scope} commands")]
    Rejected {
        scope: Scope,
        #[source]
        cause: anyhow::Error,
    },
    #[error("Failed to publish {scope} commands: the platform returned no commands")]
    EmptyAcknowledgment { scope: Scope },
}

impl PublishError {
    pub fn scope(&self) -> Scope {
        match self {
            Self::FetchGuild { guild_id, .. } => Scope::Guild(*guild_id),
            Self::Rejected { scope, .. } | Self::EmptyAcknowledgment { scope } => *scope,
        }
    }
}

/// Every scope that failed during a publish pass, each kept separately.
#[derive(Debug, Error)]
#[error("Failed to publish commands for {} scope(s): {}", .errors.len(), describe_scopes(.errors))]
pub struct PublishFailure {
    pub errors: Vec<PublishError>,
}

fn describe_scopes(errors: &[PublishError]) -> String {
    errors
        .iter()
        .map(|e| e.scope().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Command \"{0}\" not found")]
    Command(String),
    /// The command exists but has no autocomplete behavior
    #[error("Command \"{0}\" does not have an autocomplete handler")]
    Autocomplete(String),
    #[error("Component \"{0}\" not found")]
    Component(String),
}

/// A handler failed while running. Carries the trace of the originating interaction.
#[derive(Debug, Error)]
#[error("Failed to execute interaction \"{}\"\n\n{}", .trace.interaction.name, .trace.pretty())]
pub struct ExecutionError {
    pub trace: InteractionTrace,
    #[source]
    pub cause: anyhow::Error,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

#[derive(Debug, Error)]
#[error("Event listener for \"{event}\" failed")]
pub struct ListenerError {
    pub event: EventKind,
    #[source]
    pub cause: anyhow::Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionTrace {
    pub executor_id: UserId,
    pub channel_id: Option<ChannelId>,
    pub guild_id: Option<GuildId>,
    pub interaction: TracedInteraction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TracedInteraction {
    pub name: String,
    pub options: Vec<TraceOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<serde_json::Value>,
}

impl InteractionTrace {
    pub fn new(meta: &InteractionMeta, name: &str, options: Vec<TraceOption>) -> Self {
        Self {
            executor_id: meta.actor_id,
            channel_id: meta.channel_id,
            guild_id: meta.guild_id,
            interaction: TracedInteraction {
                name: name.to_string(),
                options,
            },
        }
    }

    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Render an error and all of its causes on one line
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Turn a caught panic payload into an error with a readable message
pub fn panic_to_error(payload: Box<dyn Any + Send>) -> anyhow::Error {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "An unknown error occurred - cannot parse the panic payload".to_string()
    };

    anyhow::anyhow!("handler panicked: {message}")
}
