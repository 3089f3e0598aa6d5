use anyhow::bail;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::all::{
    ButtonStyle, Colour, CommandInteraction, ComponentInteraction, CreateActionRow,
    CreateAutocompleteResponse, CreateButton, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, Http, InteractionResponseFlags,
    ModalInteraction,
};
use std::sync::Arc;

use crate::handlers::event::snowflake_timestamp;
use crate::handlers::{Choice, Reply, Responder};

/// The gateway payload a responder answers
pub enum RawInteraction {
    Command(CommandInteraction),
    Component(ComponentInteraction),
    Modal(ModalInteraction),
}

/// Answers one interaction over the Discord HTTP API
pub struct InteractionResponder {
    http: Arc<Http>,
    interaction: RawInteraction,
}

impl InteractionResponder {
    pub fn new(http: Arc<Http>, interaction: RawInteraction) -> Self {
        Self { http, interaction }
    }

    async fn create_response(&self, response: CreateInteractionResponse) -> anyhow::Result<()> {
        match &self.interaction {
            RawInteraction::Command(command) => command.create_response(&self.http, response).await?,
            RawInteraction::Component(component) => {
                component.create_response(&self.http, response).await?
            }
            RawInteraction::Modal(modal) => modal.create_response(&self.http, response).await?,
        }
        Ok(())
    }
}

#[async_trait]
impl Responder for InteractionResponder {
    async fn reply(&self, reply: Reply) -> anyhow::Result<()> {
        self.create_response(CreateInteractionResponse::Message(message(reply)))
            .await
    }

    async fn defer(&self, ephemeral: bool) -> anyhow::Result<()> {
        let message = CreateInteractionResponseMessage::new().ephemeral(ephemeral);
        self.create_response(CreateInteractionResponse::Defer(message))
            .await
    }

    async fn edit_reply(&self, content: String) -> anyhow::Result<()> {
        let edit = EditInteractionResponse::new().content(content);
        match &self.interaction {
            RawInteraction::Command(command) => command.edit_response(&self.http, edit).await?,
            RawInteraction::Component(component) => component.edit_response(&self.http, edit).await?,
            RawInteraction::Modal(modal) => modal.edit_response(&self.http, edit).await?,
        };
        Ok(())
    }

    async fn reply_time(&self) -> anyhow::Result<DateTime<Utc>> {
        let message = match &self.interaction {
            RawInteraction::Command(command) => command.get_response(&self.http).await?,
            RawInteraction::Component(component) => component.get_response(&self.http).await?,
            RawInteraction::Modal(modal) => modal.get_response(&self.http).await?,
        };
        Ok(snowflake_timestamp(message.id.get()))
    }

    async fn suggest(&self, choices: Vec<Choice>) -> anyhow::Result<()> {
        let RawInteraction::Command(command) = &self.interaction else {
            bail!("only command interactions can receive autocomplete choices");
        };

        let response = choices
            .into_iter()
            .fold(CreateAutocompleteResponse::new(), |response, choice| {
                response.add_string_choice(choice.name, choice.value)
            });

        command
            .create_response(&self.http, CreateInteractionResponse::Autocomplete(response))
            .await?;
        Ok(())
    }
}

fn message(reply: Reply) -> CreateInteractionResponseMessage {
    let mut flags = InteractionResponseFlags::empty();
    if reply.ephemeral {
        flags |= InteractionResponseFlags::EPHEMERAL;
    }
    if reply.silent {
        flags |= InteractionResponseFlags::SUPPRESS_NOTIFICATIONS;
    }

    let mut message = CreateInteractionResponseMessage::new().flags(flags);

    if let Some(content) = reply.content {
        message = message.content(content);
    }

    if let Some(error) = reply.error {
        let embed = CreateEmbed::new()
            .title("Error")
            .description(error)
            .color(Colour::RED);
        message = message.embed(embed);
    }

    if !reply.buttons.is_empty() {
        let buttons = reply
            .buttons
            .into_iter()
            .map(|button| {
                CreateButton::new(button.custom_id)
                    .label(button.label)
                    .style(ButtonStyle::Secondary)
            })
            .collect();
        message = message.components(vec![CreateActionRow::Buttons(buttons)]);
    }

    message
}
