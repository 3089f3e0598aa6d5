use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType,
    ComponentInteraction, ComponentInteractionDataKind, Http, ModalInteraction,
};
use std::sync::Arc;

use crate::bot::responder::{InteractionResponder, RawInteraction};
use crate::handlers::event::{CommandOption, InteractionMeta, OptionValue, snowflake_timestamp};
use crate::handlers::{CommandEvent, ComponentEvent};

pub fn command_event(http: Arc<Http>, command: CommandInteraction) -> CommandEvent {
    let meta = InteractionMeta {
        actor_id: command.user.id,
        channel_id: Some(command.channel_id),
        guild_id: command.guild_id,
        created_at: snowflake_timestamp(command.id.get()),
    };

    CommandEvent {
        meta,
        command_id: command.data.id,
        name: command.data.name.clone(),
        options: options(&command.data.options),
        responder: Arc::new(InteractionResponder::new(
            http,
            RawInteraction::Command(command),
        )),
    }
}

pub fn component_event(http: Arc<Http>, component: ComponentInteraction) -> ComponentEvent {
    let meta = InteractionMeta {
        actor_id: component.user.id,
        channel_id: Some(component.channel_id),
        guild_id: component.guild_id,
        created_at: snowflake_timestamp(component.id.get()),
    };

    let values = match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.clone(),
        _ => Vec::new(),
    };

    ComponentEvent {
        meta,
        custom_id: component.data.custom_id.clone(),
        values,
        responder: Arc::new(InteractionResponder::new(
            http,
            RawInteraction::Component(component),
        )),
    }
}

pub fn modal_event(http: Arc<Http>, modal: ModalInteraction) -> ComponentEvent {
    let meta = InteractionMeta {
        actor_id: modal.user.id,
        channel_id: Some(modal.channel_id),
        guild_id: modal.guild_id,
        created_at: snowflake_timestamp(modal.id.get()),
    };

    ComponentEvent {
        meta,
        custom_id: modal.data.custom_id.clone(),
        values: Vec::new(),
        responder: Arc::new(InteractionResponder::new(http, RawInteraction::Modal(modal))),
    }
}

fn options(options: &[CommandDataOption]) -> Vec<CommandOption> {
    options
        .iter()
        .map(|option| CommandOption::new(option.name.clone(), value(&option.value)))
        .collect()
}

fn value(value: &CommandDataOptionValue) -> OptionValue {
    match value {
        CommandDataOptionValue::Autocomplete { kind, value } => OptionValue::Focused {
            kind: type_name(*kind),
            value: value.clone(),
        },
        CommandDataOptionValue::Boolean(b) => OptionValue::Boolean(*b),
        CommandDataOptionValue::Integer(i) => OptionValue::Integer(*i),
        CommandDataOptionValue::Number(n) => OptionValue::Number(*n),
        CommandDataOptionValue::String(s) => OptionValue::String(s.clone()),
        CommandDataOptionValue::SubCommand(nested) => OptionValue::SubCommand(options(nested)),
        CommandDataOptionValue::SubCommandGroup(nested) => {
            OptionValue::SubCommandGroup(options(nested))
        }
        CommandDataOptionValue::Attachment(id) => OptionValue::Attachment(id.get()),
        CommandDataOptionValue::Channel(id) => OptionValue::Channel(id.get()),
        CommandDataOptionValue::Mentionable(id) => OptionValue::Mentionable(id.get()),
        CommandDataOptionValue::Role(id) => OptionValue::Role(id.get()),
        CommandDataOptionValue::User(id) => OptionValue::User(id.get()),
        _ => OptionValue::Unknown,
    }
}

fn type_name(kind: CommandOptionType) -> &'static str {
    match kind {
        CommandOptionType::String => "String",
        CommandOptionType::Integer => "Integer",
        CommandOptionType::Number => "Number",
        CommandOptionType::Boolean => "Boolean",
        CommandOptionType::User => "User",
        CommandOptionType::Channel => "Channel",
        CommandOptionType::Role => "Role",
        CommandOptionType::Mentionable => "Mentionable",
        CommandOptionType::Attachment => "Attachment",
        CommandOptionType::SubCommand => "Subcommand",
        CommandOptionType::SubCommandGroup => "SubcommandGroup",
        _ => "Unknown",
    }
}
