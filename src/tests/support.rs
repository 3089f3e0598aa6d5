use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, CommandId, GuildId, UserId};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::handlers::event::{CommandOption, InteractionMeta};
use crate::handlers::{
    Autocomplete, AutocompleteEvent, Choice, Command, CommandEvent, Component, ComponentEvent,
    EventKind, EventListener, GlobalCommandIndex, LifecycleEvent, Reply, Responder,
};

pub const ACTOR: u64 = 1001;
pub const CHANNEL: u64 = 2002;

/// Something a handler sent back through its responder
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Reply(Reply),
    Defer(bool),
    Edit(String),
    Suggest(Vec<Choice>),
}

#[derive(Default)]
pub struct RecordingResponder {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingResponder {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn push(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn reply(&self, reply: Reply) -> anyhow::Result<()> {
        self.push(Sent::Reply(reply));
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> anyhow::Result<()> {
        self.push(Sent::Defer(ephemeral));
        Ok(())
    }

    async fn edit_reply(&self, content: String) -> anyhow::Result<()> {
        self.push(Sent::Edit(content));
        Ok(())
    }

    async fn reply_time(&self) -> anyhow::Result<DateTime<Utc>> {
        Ok(Utc::now())
    }

    async fn suggest(&self, choices: Vec<Choice>) -> anyhow::Result<()> {
        self.push(Sent::Suggest(choices));
        Ok(())
    }
}

/// A fixed set of command ids the platform reports as global
#[derive(Default)]
pub struct StaticGlobals(HashSet<CommandId>);

impl StaticGlobals {
    pub fn with(ids: &[u64]) -> Self {
        Self(ids.iter().map(|id| CommandId::new(*id)).collect())
    }
}

impl GlobalCommandIndex for StaticGlobals {
    fn is_global(&self, command_id: CommandId) -> bool {
        self.0.contains(&command_id)
    }
}

pub fn meta(guild: Option<u64>) -> InteractionMeta {
    InteractionMeta {
        actor_id: UserId::new(ACTOR),
        channel_id: Some(ChannelId::new(CHANNEL)),
        guild_id: guild.map(GuildId::new),
        created_at: Utc::now(),
    }
}

pub fn command_event(
    name: &str,
    command_id: u64,
    guild: Option<u64>,
    options: Vec<CommandOption>,
) -> (CommandEvent, Arc<RecordingResponder>) {
    let responder = Arc::new(RecordingResponder::default());
    let event = CommandEvent {
        meta: meta(guild),
        command_id: CommandId::new(command_id),
        name: name.to_string(),
        options,
        responder: responder.clone(),
    };
    (event, responder)
}

pub fn component_event(custom_id: &str, guild: Option<u64>) -> (ComponentEvent, Arc<RecordingResponder>) {
    let responder = Arc::new(RecordingResponder::default());
    let event = ComponentEvent {
        meta: meta(guild),
        custom_id: custom_id.to_string(),
        values: Vec::new(),
        responder: responder.clone(),
    };
    (event, responder)
}

#[derive(Clone, Copy)]
pub enum Behavior {
    Succeed,
    Fail(&'static str),
    Panic(&'static str),
    /// Succeed after yielding to the runtime for a while
    Slow(u64),
}

impl Behavior {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Succeed => Ok(()),
            Self::Fail(message) => Err(anyhow::anyhow!(message)),
            Self::Panic(message) => panic!("{}", message),
            Self::Slow(millis) => {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                Ok(())
            }
        }
    }
}

pub struct TestCommand {
    pub name: &'static str,
    pub guilds: Vec<GuildId>,
    pub behavior: Behavior,
    pub autocompletes: bool,
    pub calls: Arc<AtomicUsize>,
}

impl TestCommand {
    pub fn global(name: &'static str) -> Self {
        Self {
            name,
            guilds: Vec::new(),
            behavior: Behavior::Succeed,
            autocompletes: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn scoped(name: &'static str, guilds: &[u64]) -> Self {
        Self {
            guilds: guilds.iter().map(|id| GuildId::new(*id)).collect(),
            ..Self::global(name)
        }
    }

    pub fn behaving(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_autocomplete(mut self) -> Self {
        self.autocompletes = true;
        self
    }
}

#[async_trait]
impl Command for TestCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn guild_ids(&self) -> &[GuildId] {
        &self.guilds
    }

    async fn execute(&self, event: &CommandEvent) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.behavior.run().await?;
        event.reply(Reply::text(format!("ran {}", self.name))).await
    }

    fn as_autocomplete(&self) -> Option<&dyn Autocomplete> {
        if self.autocompletes { Some(self) } else { None }
    }
}

#[async_trait]
impl Autocomplete for TestCommand {
    async fn autocomplete(&self, event: &AutocompleteEvent) -> anyhow::Result<()> {
        self.behavior.run().await?;
        let focused = event.focused().unwrap_or_default();
        event.suggest(vec![Choice::new(focused, focused)]).await
    }
}

pub struct TestComponent {
    pub custom_id: &'static str,
    pub behavior: Behavior,
}

#[async_trait]
impl Component for TestComponent {
    fn custom_id(&self) -> &str {
        self.custom_id
    }

    async fn execute(&self, event: &ComponentEvent) -> anyhow::Result<()> {
        self.behavior.run().await?;
        let args = event.args().unwrap_or("none");
        event.reply(Reply::text(format!("args: {args}"))).await
    }
}

pub struct TestListener {
    pub kind: EventKind,
    pub once: bool,
    pub behavior: Behavior,
    pub calls: Arc<AtomicUsize>,
}

impl TestListener {
    pub fn on(kind: EventKind) -> Self {
        Self {
            kind,
            once: false,
            behavior: Behavior::Succeed,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl EventListener for TestListener {
    fn event(&self) -> EventKind {
        self.kind
    }

    fn once(&self) -> bool {
        self.once
    }

    async fn execute(&self, _event: &LifecycleEvent) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.behavior.run().await
    }
}
