#[cfg(test)]
pub mod tests {
    use serenity::all::GuildId;

    use crate::bot::init::{catalog, load_registry};
    use crate::config::SourceLocations;
    use crate::handlers::loader::{self, Commands, Components, Listeners};
    use crate::handlers::{EventKind, HandlerUnit, ProviderEntry, RegistryBuilder, StaticCatalog};
    use crate::tests::support::{TestCommand, TestComponent, TestListener, Behavior};
    use crate::utils::errors::error_chain;

    fn ping() -> anyhow::Result<HandlerUnit> {
        Ok(HandlerUnit::command(TestCommand::global("ping")))
    }

    fn stats() -> anyhow::Result<HandlerUnit> {
        Ok(HandlerUnit::command(TestCommand::scoped("stats", &[10, 20, 30])))
    }

    fn broken() -> anyhow::Result<HandlerUnit> {
        Err(anyhow::anyhow!("boom"))
    }

    fn exploding() -> anyhow::Result<HandlerUnit> {
        panic!("constructor exploded")
    }

    fn button() -> anyhow::Result<HandlerUnit> {
        Ok(HandlerUnit::component(TestComponent {
            custom_id: "page",
            behavior: Behavior::Succeed,
        }))
    }

    fn on_ready() -> anyhow::Result<HandlerUnit> {
        Ok(HandlerUnit::listener(TestListener::on(EventKind::Ready)))
    }

    fn source(providers: Vec<ProviderEntry>) -> StaticCatalog {
        StaticCatalog::new().with_location("commands", providers)
    }

    #[test]
    fn test_missing_location_loads_nothing() {
        let mut builder = RegistryBuilder::new();
        let count = loader::load::<Commands>(&StaticCatalog::new(), "commands", &mut builder).unwrap();

        assert_eq!(count, 0);
        assert_eq!(builder.freeze().commands().global_len(), 0);
    }

    #[test]
    fn test_loads_global_and_scoped_commands() {
        let source = source(vec![
            ProviderEntry::new("ping", ping),
            ProviderEntry::new("stats", stats),
        ]);

        let mut builder = RegistryBuilder::new();
        let count = loader::load::<Commands>(&source, "commands", &mut builder).unwrap();
        let registry = builder.freeze();

        assert_eq!(count, 2);
        assert!(registry.command("ping", true, None).is_some());
        for id in [10, 20, 30] {
            assert!(registry.command("stats", false, Some(GuildId::new(id))).is_some());
        }
        assert!(registry.command("stats", false, Some(GuildId::new(40))).is_none());
        assert_eq!(registry.commands().scoped().count(), 3);
    }

    #[test]
    fn test_repeated_guild_ids_register_once() {
        fn repeated() -> anyhow::Result<HandlerUnit> {
            Ok(HandlerUnit::command(TestCommand::scoped("stats", &[10, 20, 10])))
        }

        let source = source(vec![ProviderEntry::new("stats", repeated)]);

        let mut builder = RegistryBuilder::new();
        let count = loader::load::<Commands>(&source, "commands", &mut builder).unwrap();
        let registry = builder.freeze();

        assert_eq!(count, 1);
        let scopes: Vec<_> = registry
            .commands()
            .scoped()
            .map(|(guild_id, commands)| (guild_id, commands.len()))
            .collect();
        assert_eq!(scopes, vec![(GuildId::new(10), 1), (GuildId::new(20), 1)]);
    }

    #[test]
    fn test_failing_provider_aborts_category() {
        let source = source(vec![
            ProviderEntry::new("ping", ping),
            ProviderEntry::new("broken", broken),
            ProviderEntry::new("stats", stats),
        ]);

        let mut builder = RegistryBuilder::new();
        let error = loader::load::<Commands>(&source, "commands", &mut builder).unwrap_err();

        assert_eq!(error.category, "commands");
        assert_eq!(error.to_string(), "Failed to cache commands");
        let chain = error_chain(&error);
        assert!(chain.contains("\"broken\""), "{chain}");
        assert!(chain.contains("boom"), "{chain}");

        // Handlers registered before the failure are kept
        let registry = builder.freeze();
        assert!(registry.command("ping", true, None).is_some());
        assert!(registry.command("stats", false, Some(GuildId::new(10))).is_none());
    }

    #[test]
    fn test_panicking_provider_is_reported() {
        let source = source(vec![ProviderEntry::new("exploding", exploding)]);

        let mut builder = RegistryBuilder::new();
        let error = loader::load::<Commands>(&source, "commands", &mut builder).unwrap_err();

        let chain = error_chain(&error);
        assert!(chain.contains("handler panicked: constructor exploded"), "{chain}");
    }

    #[test]
    fn test_units_of_other_categories_are_skipped() {
        let source = source(vec![
            ProviderEntry::new("button", button),
            ProviderEntry::new("ping", ping),
            ProviderEntry::new("on_ready", on_ready),
        ]);

        let mut builder = RegistryBuilder::new();
        let count = loader::load::<Commands>(&source, "commands", &mut builder).unwrap();
        let registry = builder.freeze();

        assert_eq!(count, 1);
        assert!(registry.component("page", None).is_none());
        assert!(registry.listeners().lookup(EventKind::Ready).is_empty());
    }

    #[test]
    fn test_duplicate_command_fails_load() {
        let source = source(vec![
            ProviderEntry::new("ping", ping),
            ProviderEntry::new("ping_again", ping),
        ]);

        let mut builder = RegistryBuilder::new();
        let error = loader::load::<Commands>(&source, "commands", &mut builder).unwrap_err();

        let chain = error_chain(&error);
        assert!(chain.contains("\"ping_again\""), "{chain}");
        assert!(chain.contains("GLOBAL"), "{chain}");
    }

    #[test]
    fn test_components_and_listeners_load_from_their_locations() {
        let source = StaticCatalog::new()
            .with_location("components", vec![ProviderEntry::new("button", button)])
            .with_location(
                "events",
                vec![
                    ProviderEntry::new("on_ready", on_ready),
                    ProviderEntry::new("on_ready_too", on_ready),
                ],
            );

        let mut builder = RegistryBuilder::new();
        assert_eq!(
            loader::load::<Components>(&source, "components", &mut builder).unwrap(),
            1
        );
        assert_eq!(
            loader::load::<Listeners>(&source, "events", &mut builder).unwrap(),
            2
        );

        let registry = builder.freeze();
        assert!(registry.component("page", Some(GuildId::new(1))).is_some());
        assert!(registry.component("page", None).is_some());
        assert_eq!(registry.listeners().lookup(EventKind::Ready).len(), 2);
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let registry = load_registry(&catalog(), &SourceLocations::default()).unwrap();

        assert_eq!(registry.commands().global_len(), 2);
        assert!(registry.command("ping", true, None).is_some());
        assert!(
            registry
                .command("example", true, None)
                .and_then(|command| command.as_autocomplete())
                .is_some()
        );
        assert!(registry.component("pingCheck", None).is_some());

        let ready = registry.listeners().lookup(EventKind::Ready);
        assert_eq!(ready.len(), 1);
        assert!(ready[0].listener().once());
    }
}
