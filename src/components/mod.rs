mod ping_check;

use crate::handlers::{HandlerUnit, ProviderEntry};

pub fn providers() -> Vec<ProviderEntry> {
    vec![ProviderEntry::new("ping_check", || {
        Ok(HandlerUnit::component(ping_check::PingCheck))
    })]
}
