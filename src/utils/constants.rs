use serenity::all::{GatewayIntents, InteractionContext, Permissions};

/// Applied to every command before its own schema
pub const DEFAULT_COMMAND_PERMISSIONS: Permissions = Permissions::MANAGE_GUILD;

/// Commands are guild-only unless they say otherwise
pub const DEFAULT_COMMAND_CONTEXTS: &[InteractionContext] = &[InteractionContext::Guild];

pub const DEFAULT_CLIENT_INTENTS: GatewayIntents = GatewayIntents::GUILDS
    .union(GatewayIntents::GUILD_INTEGRATIONS)
    .union(GatewayIntents::GUILD_MESSAGES)
    .union(GatewayIntents::GUILD_MESSAGE_REACTIONS)
    .union(GatewayIntents::GUILD_MEMBERS)
    .union(GatewayIntents::DIRECT_MESSAGES)
    .union(GatewayIntents::MESSAGE_CONTENT);

pub const DEFAULT_COMMANDS_SOURCE: &str = "commands";
pub const DEFAULT_COMPONENTS_SOURCE: &str = "components";
pub const DEFAULT_EVENTS_SOURCE: &str = "events";
