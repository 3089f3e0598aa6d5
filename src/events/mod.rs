mod ready;

use crate::handlers::{HandlerUnit, ProviderEntry};

pub fn providers() -> Vec<ProviderEntry> {
    vec![ProviderEntry::new("ready", || {
        Ok(HandlerUnit::listener(ready::Ready))
    })]
}
