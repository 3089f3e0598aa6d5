pub mod command;
pub mod component;
pub mod dispatcher;
pub mod event;
pub mod listener;
pub mod loader;
pub mod platform;
pub mod publisher;
pub mod registry;

pub use command::{Autocomplete, Command};
pub use component::Component;
pub use dispatcher::Dispatcher;
pub use event::{AutocompleteEvent, Choice, CommandEvent, ComponentEvent, Reply, Responder};
pub use listener::{EventKind, EventListener, LifecycleEvent};
pub use loader::{HandlerSource, HandlerUnit, ProviderEntry, StaticCatalog};
pub use platform::{CommandRegistrar, GlobalCommandCache, GlobalCommandIndex};
pub use publisher::Publisher;
pub use registry::{Registry, RegistryBuilder, Scope};
