// The command registry maps every lowercase name and alias to its definition.
//
// Registration happens once at startup. After the dispatcher takes ownership
// the registry is read-only.

use super::command_errors::RegistryError;
use super::command_models::{CommandDefinition, CommandSource, CommandSummary};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct CommandRegistry {
    /// Lowercase name/alias -> definition. All aliases share one `Arc`.
    by_name: HashMap<String, Arc<CommandDefinition>>,
    /// Every accepted command in registration order, documentation-only ones included.
    listed: Vec<CommandSummary>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `source` and bind all of its names.
    ///
    /// `fallback_name` is used when the source declares no `name` of its own
    /// (for manifests it is the file stem).
    pub fn register(
        &mut self,
        source: CommandSource,
        fallback_name: &str,
    ) -> Result<(), RegistryError> {
        let handlers = [&source.callback, &source.execute, &source.run];
        if handlers.iter().filter(|h| h.is_some()).count() > 1 {
            return Err(RegistryError::AmbiguousHandler {
                origin: fallback_name.to_string(),
            });
        }

        let names = resolve_names(&source, fallback_name);
        if names.is_empty() {
            return Err(RegistryError::MissingName {
                origin: fallback_name.to_string(),
            });
        }

        let max_args = resolve_max_args(&source, &names[0])?;

        for name in &names {
            if let Some(existing) = self.owner_of(name) {
                return Err(RegistryError::DuplicateName {
                    name: name.clone(),
                    command: names[0].clone(),
                    existing: existing.to_string(),
                });
            }
        }

        if source.description.is_none() {
            tracing::warn!("Command \"{}\" does not have a \"description\" property", names[0]);
        }

        let handler = source
            .callback
            .clone()
            .or_else(|| source.execute.clone())
            .or_else(|| source.run.clone());

        if let Some(handler) = handler {
            let definition = Arc::new(CommandDefinition::new(
                names.clone(),
                &source,
                max_args,
                handler,
            ));
            for name in definition.names() {
                self.by_name.insert(name.clone(), Arc::clone(&definition));
            }
        } else {
            tracing::debug!(command = %names[0], "Registered documentation-only command");
        }

        self.listed.push(CommandSummary {
            names,
            description: source.description.unwrap_or_default(),
        });

        Ok(())
    }

    /// Look up a dispatchable command by any casing of any of its names.
    pub fn get(&self, name: &str) -> Option<&Arc<CommandDefinition>> {
        self.by_name.get(&name.to_lowercase())
    }

    /// One entry per registered command, in registration order.
    pub fn list_public(&self) -> &[CommandSummary] {
        &self.listed
    }

    /// Find the listing entry that owns `name` (canonical name or alias).
    pub fn find_public(&self, name: &str) -> Option<&CommandSummary> {
        let name = name.to_lowercase();
        self.listed.iter().find(|entry| entry.names.contains(&name))
    }

    /// Number of distinct commands, documentation-only ones included.
    pub fn len(&self) -> usize {
        self.listed.len()
    }

    fn owner_of(&self, name: &str) -> Option<&str> {
        self.find_public(name).map(CommandSummary::canonical_name)
    }
}

/// Explicit `commands` list, else `aliases`, else nothing; then the `name`
/// (or fallback) is prepended when it isn't already present. All lowercase.
fn resolve_names(source: &CommandSource, fallback_name: &str) -> Vec<String> {
    let explicit = source
        .commands
        .as_ref()
        .or(source.aliases.as_ref())
        .cloned()
        .unwrap_or_default();

    let mut names: Vec<String> = Vec::with_capacity(explicit.len() + 1);
    for name in explicit {
        let name = name.to_lowercase();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    let primary = source
        .name
        .as_deref()
        .unwrap_or(fallback_name)
        .to_lowercase();
    if !primary.is_empty() && !names.contains(&primary) {
        names.insert(0, primary);
    }

    names
}

fn resolve_max_args(source: &CommandSource, command: &str) -> Result<Option<usize>, RegistryError> {
    let max_args = match source.max_args {
        None | Some(-1) => None,
        Some(max) if max < 0 => {
            return Err(RegistryError::InvalidArity {
                origin: command.to_string(),
                reason: format!("maxArgs must be -1 or at least 0, got {}", max),
            });
        }
        Some(max) => Some(max as usize),
    };

    if let (Some(min), Some(max)) = (source.min_args, max_args) {
        if min > max {
            return Err(RegistryError::InvalidArity {
                origin: command.to_string(),
                reason: format!("minArgs ({}) is greater than maxArgs ({})", min, max),
            });
        }
    }

    Ok(max_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::RecordingHandler;

    fn handled(name: &str) -> CommandSource {
        CommandSource {
            name: Some(name.to_string()),
            description: Some(format!("The {} command", name)),
            ..Default::default()
        }
        .with_callback(Arc::new(RecordingHandler::default()))
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = CommandRegistry::new();
        let source = CommandSource {
            aliases: Some(vec!["P".into(), "Pong".into()]),
            ..handled("Ping")
        };
        registry.register(source, "ping").unwrap();

        let canonical = registry.get("ping").unwrap();
        for variant in ["PING", "Ping", "pInG", "p", "P", "pong", "PONG"] {
            let found = registry.get(variant).unwrap();
            assert!(Arc::ptr_eq(canonical, found), "{} resolved elsewhere", variant);
        }
        assert_eq!(canonical.names(), ["ping", "p", "pong"]);
    }

    #[test]
    fn test_name_is_prepended_to_commands_list() {
        let mut registry = CommandRegistry::new();
        let source = CommandSource {
            commands: Some(vec!["add".into(), "plus".into()]),
            aliases: Some(vec!["ignored".into()]),
            ..handled("Sum")
        };
        registry.register(source, "sum_file").unwrap();

        let cmd = registry.get("add").unwrap();
        assert_eq!(cmd.names(), ["sum", "add", "plus"]);
        assert!(registry.get("ignored").is_none());
    }

    #[test]
    fn test_name_already_in_list_is_not_duplicated() {
        let mut registry = CommandRegistry::new();
        let source = CommandSource {
            aliases: Some(vec!["b".into(), "ban".into()]),
            ..handled("BAN")
        };
        registry.register(source, "ban").unwrap();

        assert_eq!(registry.get("ban").unwrap().names(), ["b", "ban"]);
    }

    #[test]
    fn test_fallback_name_is_used_without_explicit_name() {
        let mut registry = CommandRegistry::new();
        let source = CommandSource {
            name: None,
            ..handled("unused")
        };
        registry.register(source, "Fallback").unwrap();

        assert_eq!(registry.get("fallback").unwrap().canonical_name(), "fallback");
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let mut registry = CommandRegistry::new();
        let source = CommandSource {
            name: None,
            aliases: Some(vec![]),
            ..handled("x")
        };

        let err = registry.register(source, "").unwrap_err();
        assert!(matches!(err, RegistryError::MissingName { .. }));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_more_than_one_handler_is_rejected() {
        let mut registry = CommandRegistry::new();
        let mut source = handled("double");
        source.execute = Some(Arc::new(RecordingHandler::default()));

        let err = registry.register(source, "double").unwrap_err();
        assert!(matches!(err, RegistryError::AmbiguousHandler { .. }));
        assert!(registry.get("double").is_none());
    }

    #[test]
    fn test_any_single_handler_spelling_is_accepted() {
        let mut registry = CommandRegistry::new();
        let mut source = handled("runner");
        source.run = source.callback.take();
        registry.register(source, "runner").unwrap();

        assert!(registry.get("runner").is_some());
    }

    #[test]
    fn test_documentation_only_command_is_listed_but_not_dispatchable() {
        let mut registry = CommandRegistry::new();
        let source = CommandSource {
            name: Some("rules".into()),
            description: Some("Read the server rules".into()),
            ..Default::default()
        };
        registry.register(source, "rules").unwrap();

        assert!(registry.get("rules").is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list_public()[0].description, "Read the server rules");
        assert!(registry.find_public("RULES").is_some());
    }

    #[test]
    fn test_alias_collision_fails_loudly() {
        let mut registry = CommandRegistry::new();
        let first = CommandSource {
            aliases: Some(vec!["h".into()]),
            ..handled("help")
        };
        registry.register(first, "help").unwrap();

        let second = CommandSource {
            aliases: Some(vec!["H".into()]),
            ..handled("hug")
        };
        let err = registry.register(second, "hug").unwrap_err();

        match err {
            RegistryError::DuplicateName {
                name,
                command,
                existing,
            } => {
                assert_eq!(name, "h");
                assert_eq!(command, "hug");
                assert_eq!(existing, "help");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Nothing of the rejected command was bound
        assert!(registry.get("hug").is_none());
        assert_eq!(registry.get("h").unwrap().canonical_name(), "help");
    }

    #[test]
    fn test_list_public_has_one_entry_per_command() {
        let mut registry = CommandRegistry::new();
        let ping = CommandSource {
            aliases: Some(vec!["p".into(), "pong".into()]),
            ..handled("ping")
        };
        registry.register(ping, "ping").unwrap();
        registry.register(handled("echo"), "echo").unwrap();

        let listed = registry.list_public();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].names, ["ping", "p", "pong"]);
        assert_eq!(listed[1].canonical_name(), "echo");
        assert_eq!(registry.find_public("pong").unwrap().canonical_name(), "ping");
    }

    #[test]
    fn test_missing_description_still_registers() {
        let mut registry = CommandRegistry::new();
        let source = CommandSource {
            description: None,
            ..handled("quiet")
        };
        registry.register(source, "quiet").unwrap();

        assert!(registry.get("quiet").is_some());
        assert_eq!(registry.list_public()[0].description, "");
    }

    #[test]
    fn test_invalid_bounds_are_rejected() {
        let mut registry = CommandRegistry::new();

        let err = registry
            .register(handled("a").with_args(0, -2), "a")
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArity { .. }));

        let err = registry
            .register(handled("b").with_args(3, 1), "b")
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArity { .. }));

        registry
            .register(handled("c").with_args(3, -1), "c")
            .unwrap();
        assert!(registry.get("c").unwrap().accepts_arity(100));
    }
}
