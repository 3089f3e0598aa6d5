use async_trait::async_trait;
use serenity::all::CommandOptionType;
use serenity::builder::{CreateCommand, CreateCommandOption};

use crate::handlers::{Autocomplete, AutocompleteEvent, Choice, Command, CommandEvent, Reply};

const SUGGESTIONS: &[&str] = &["apple", "banana", "cherry", "date", "elderberry"];

/// A command whose `query` option is autocompleted
pub struct Example;

#[async_trait]
impl Command for Example {
    fn name(&self) -> &str {
        "example"
    }

    fn register(&self, command: CreateCommand) -> CreateCommand {
        command
            .description("An example command with autocomplete.")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "query",
                    "Type to get suggestions",
                )
                .set_autocomplete(true)
                .required(true),
            )
    }

    async fn execute(&self, event: &CommandEvent) -> anyhow::Result<()> {
        let query = event.string("query").unwrap_or_default();
        event
            .reply(Reply::text(format!("You searched for: {query}")))
            .await
    }

    fn as_autocomplete(&self) -> Option<&dyn Autocomplete> {
        Some(self)
    }
}

#[async_trait]
impl Autocomplete for Example {
    async fn autocomplete(&self, event: &AutocompleteEvent) -> anyhow::Result<()> {
        let focused = event.focused().unwrap_or_default();
        event.suggest(suggestions(focused)).await
    }
}

fn suggestions(focused: &str) -> Vec<Choice> {
    let focused = focused.to_lowercase();
    SUGGESTIONS
        .iter()
        .filter(|s| s.to_lowercase().starts_with(&focused))
        .map(|s| Choice::new(*s, *s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_filter_case_insensitively() {
        let names: Vec<_> = suggestions("B").into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["banana"]);
    }

    #[test]
    fn test_empty_input_suggests_everything() {
        assert_eq!(suggestions("").len(), SUGGESTIONS.len());
        assert!(suggestions("zucchini").is_empty());
    }
}
