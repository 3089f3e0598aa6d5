use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, CommandId, GuildId, UserId};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::utils::errors::{InteractionTrace, TraceOption};

/// Milliseconds between the Unix epoch and the Discord epoch (2015-01-01T00:00:00Z).
const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// Creation time encoded in the upper bits of a Discord snowflake.
pub fn snowflake_timestamp(id: u64) -> DateTime<Utc> {
    let millis = (id >> 22) as i64 + DISCORD_EPOCH_MS;
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// The transport-side reply surface of a single interaction.
///
/// Handlers never see the raw gateway payload; they answer through this
/// trait so that dispatch can be exercised without a live connection.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, reply: Reply) -> anyhow::Result<()>;

    async fn defer(&self, ephemeral: bool) -> anyhow::Result<()>;

    async fn edit_reply(&self, content: String) -> anyhow::Result<()>;

    /// When the platform created the message sent as the initial reply
    async fn reply_time(&self) -> anyhow::Result<DateTime<Utc>>;

    /// Answer an autocomplete interaction with suggestion choices
    async fn suggest(&self, choices: Vec<Choice>) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
}

/// A message response to an interaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub content: Option<String>,
    /// Rendered as a red "Error" embed
    pub error: Option<String>,
    pub ephemeral: bool,
    /// Sent without push or desktop notifications
    pub silent: bool,
    pub buttons: Vec<Button>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ephemeral: true,
            ..Self::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn button(mut self, custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        self.buttons.push(Button {
            custom_id: custom_id.into(),
            label: label.into(),
        });
        self
    }
}

/// An autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub name: String,
    pub value: String,
}

impl Choice {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Who triggered an interaction, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMeta {
    pub actor_id: UserId,
    pub channel_id: Option<ChannelId>,
    /// The tenant scope; `None` in direct messages
    pub guild_id: Option<GuildId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    User(u64),
    Channel(u64),
    Role(u64),
    Mentionable(u64),
    Attachment(u64),
    /// The partially typed value of the option being autocompleted
    Focused { kind: &'static str, value: String },
    SubCommand(Vec<CommandOption>),
    SubCommandGroup(Vec<CommandOption>),
    Unknown,
}

impl OptionValue {
    /// Option type name as the platform spells it
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Integer(_) => "Integer",
            Self::Number(_) => "Number",
            Self::Boolean(_) => "Boolean",
            Self::User(_) => "User",
            Self::Channel(_) => "Channel",
            Self::Role(_) => "Role",
            Self::Mentionable(_) => "Mentionable",
            Self::Attachment(_) => "Attachment",
            Self::Focused { kind, .. } => *kind,
            Self::SubCommand(_) => "Subcommand",
            Self::SubCommandGroup(_) => "SubcommandGroup",
            Self::Unknown => "Unknown",
        }
    }

    fn trace_value(&self) -> Option<serde_json::Value> {
        match self {
            Self::String(s) => Some(s.clone().into()),
            Self::Integer(i) => Some((*i).into()),
            Self::Number(n) => Some((*n).into()),
            Self::Boolean(b) => Some((*b).into()),
            // Snowflakes are strings on the wire
            Self::User(id)
            | Self::Channel(id)
            | Self::Role(id)
            | Self::Mentionable(id)
            | Self::Attachment(id) => Some(id.to_string().into()),
            Self::Focused { value, .. } => Some(value.clone().into()),
            Self::SubCommand(_) | Self::SubCommandGroup(_) | Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: OptionValue,
}

impl CommandOption {
    pub fn new(name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

fn normalize_options(options: &[CommandOption]) -> Vec<TraceOption> {
    options
        .iter()
        .map(|option| TraceOption {
            name: option.name.clone(),
            kind: option.value.kind().to_string(),
            value: option.value.trace_value(),
        })
        .collect()
}

/// Anything that can reconstruct the failure trace of the interaction it came from
pub trait Traceable {
    fn trace(&self) -> InteractionTrace;
}

/// An application command invocation
#[derive(Clone)]
pub struct CommandEvent {
    pub meta: InteractionMeta,
    pub command_id: CommandId,
    pub name: String,
    pub options: Vec<CommandOption>,
    pub responder: Arc<dyn Responder>,
}

impl CommandEvent {
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.option(name)? {
            OptionValue::String(s) => Some(s),
            OptionValue::Focused { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.option(name)? {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.option(name)? {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.option(name)? {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub async fn reply(&self, reply: Reply) -> anyhow::Result<()> {
        self.responder.reply(reply).await
    }

    pub async fn edit_reply(&self, content: impl Into<String>) -> anyhow::Result<()> {
        self.responder.edit_reply(content.into()).await
    }

    pub async fn reply_time(&self) -> anyhow::Result<DateTime<Utc>> {
        self.responder.reply_time().await
    }
}

impl Traceable for CommandEvent {
    fn trace(&self) -> InteractionTrace {
        InteractionTrace::new(&self.meta, &self.name, normalize_options(&self.options))
    }
}

impl fmt::Debug for CommandEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEvent")
            .field("meta", &self.meta)
            .field("command_id", &self.command_id)
            .field("name", &self.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A partial-input suggestion request for an application command.
///
/// Carries the same payload as an invocation; exactly one option is
/// [`OptionValue::Focused`].
#[derive(Debug, Clone)]
pub struct AutocompleteEvent(pub CommandEvent);

impl AutocompleteEvent {
    /// The text typed so far into the focused option
    pub fn focused(&self) -> Option<&str> {
        fn find(options: &[CommandOption]) -> Option<&str> {
            options.iter().find_map(|option| match &option.value {
                OptionValue::Focused { value, .. } => Some(value.as_str()),
                OptionValue::SubCommand(nested) | OptionValue::SubCommandGroup(nested) => {
                    find(nested)
                }
                _ => None,
            })
        }

        find(&self.0.options)
    }

    pub async fn suggest(&self, choices: Vec<Choice>) -> anyhow::Result<()> {
        self.0.responder.suggest(choices).await
    }
}

impl Deref for AutocompleteEvent {
    type Target = CommandEvent;

    fn deref(&self) -> &CommandEvent {
        &self.0
    }
}

impl Traceable for AutocompleteEvent {
    fn trace(&self) -> InteractionTrace {
        self.0.trace()
    }
}

/// A button press, select menu choice or modal submission
#[derive(Clone)]
pub struct ComponentEvent {
    pub meta: InteractionMeta,
    pub custom_id: String,
    /// Selected values for select menus, empty otherwise
    pub values: Vec<String>,
    pub responder: Arc<dyn Responder>,
}

impl ComponentEvent {
    /// The argument suffix after the first `:`, if any
    pub fn args(&self) -> Option<&str> {
        self.custom_id.split_once(':').map(|(_, args)| args)
    }

    pub async fn reply(&self, reply: Reply) -> anyhow::Result<()> {
        self.responder.reply(reply).await
    }

    pub async fn defer(&self, ephemeral: bool) -> anyhow::Result<()> {
        self.responder.defer(ephemeral).await
    }

    pub async fn edit_reply(&self, content: impl Into<String>) -> anyhow::Result<()> {
        self.responder.edit_reply(content.into()).await
    }
}

pub fn component_identity(custom_id: &str) -> &str {
    custom_id
        .split_once(':')
        .map_or(custom_id, |(identity, _)| identity)
}

impl Traceable for ComponentEvent {
    fn trace(&self) -> InteractionTrace {
        InteractionTrace::new(&self.meta, &self.custom_id, Vec::new())
    }
}

impl fmt::Debug for ComponentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentEvent")
            .field("meta", &self.meta)
            .field("custom_id", &self.custom_id)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}
