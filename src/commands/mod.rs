mod example;
pub mod ping;

use crate::handlers::{HandlerUnit, ProviderEntry};

pub fn providers() -> Vec<ProviderEntry> {
    vec![
        ProviderEntry::new("example", || Ok(HandlerUnit::command(example::Example))),
        ProviderEntry::new("ping", || Ok(HandlerUnit::command(ping::Ping))),
    ]
}
