// Loads command definitions from a directory of JSON manifests.
//
// A manifest describes a command's names and argument bounds. Its handler
// field (`callback`, `execute` or `run`) names an entry in the
// `HandlerCatalog`, since code itself cannot be loaded from disk.
//
// {
//   "aliases": ["p"],
//   "description": "Replies with Pong!",
//   "maxArgs": 0,
//   "callback": "ping"
// }

use crate::core::commands::{
    CommandHandler, CommandRegistry, CommandSource, HandlerCatalog, RegistryError,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// `"commands": "ping"` and `"commands": ["ping", "p"]` are both accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameList {
    One(String),
    Many(Vec<String>),
}

impl NameList {
    fn into_vec(self) -> Vec<String> {
        match self {
            NameList::One(name) => vec![name],
            NameList::Many(names) => names,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommandManifest {
    name: Option<String>,
    commands: Option<NameList>,
    aliases: Option<NameList>,
    description: Option<String>,
    min_args: Option<usize>,
    max_args: Option<i64>,
    expected_args: Option<String>,
    syntax_error: Option<String>,
    callback: Option<String>,
    execute: Option<String>,
    run: Option<String>,
}

impl CommandManifest {
    fn into_source(
        self,
        origin: &str,
        catalog: &HandlerCatalog,
    ) -> Result<CommandSource, RegistryError> {
        type Resolved = Result<Option<Arc<dyn CommandHandler>>, RegistryError>;
        let resolve = |key: Option<String>| -> Resolved {
            match key {
                None => Ok(None),
                Some(key) => catalog
                    .get(&key)
                    .map(Some)
                    .ok_or_else(|| RegistryError::UnknownHandler {
                        origin: origin.to_string(),
                        handler: key,
                    }),
            }
        };

        Ok(CommandSource {
            callback: resolve(self.callback)?,
            execute: resolve(self.execute)?,
            run: resolve(self.run)?,
            name: self.name,
            commands: self.commands.map(NameList::into_vec),
            aliases: self.aliases.map(NameList::into_vec),
            description: self.description,
            min_args: self.min_args,
            max_args: self.max_args,
            expected_args: self.expected_args,
            syntax_error: self.syntax_error,
        })
    }
}

/// Read every `*.json` manifest under `dir` (recursively, sorted by path).
///
/// Each result is paired with its fallback name, the file stem.
pub fn load_definitions(
    dir: &Path,
    catalog: &HandlerCatalog,
) -> Result<Vec<(CommandSource, String)>, RegistryError> {
    if !dir.is_dir() {
        return Err(RegistryError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    collect_manifests(dir, &mut files)?;
    files.sort();

    files
        .into_iter()
        .map(|path| {
            let fallback_name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            let text = fs::read_to_string(&path).map_err(|error| RegistryError::Io {
                path: path.clone(),
                error,
            })?;
            let manifest: CommandManifest =
                serde_json::from_str(&text).map_err(|error| RegistryError::Parse {
                    path: path.clone(),
                    error,
                })?;

            let source = manifest.into_source(&fallback_name, catalog)?;
            Ok((source, fallback_name))
        })
        .collect()
}

/// Load `dir` and register everything in it. Returns how many commands were added.
pub fn load_into(
    registry: &mut CommandRegistry,
    dir: &Path,
    catalog: &HandlerCatalog,
) -> Result<usize, RegistryError> {
    let definitions = load_definitions(dir, catalog)?;
    let amount = definitions.len();

    for (source, fallback_name) in definitions {
        registry.register(source, &fallback_name)?;
    }

    tracing::info!(
        "Loaded {} command{} from {}",
        amount,
        if amount == 1 { "" } else { "s" },
        dir.display()
    );
    Ok(amount)
}

fn collect_manifests(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), RegistryError> {
    let io_error = |error: std::io::Error| RegistryError::Io {
        path: dir.to_path_buf(),
        error,
    };

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            collect_manifests(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::RecordingHandler;
    use tempfile::TempDir;

    fn catalog() -> HandlerCatalog {
        let mut catalog = HandlerCatalog::new();
        catalog.insert("ping", Arc::new(RecordingHandler::default()));
        catalog.insert("echo", Arc::new(RecordingHandler::default()));
        catalog
    }

    fn write(dir: &Path, relative: &str, body: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let Err(err) = load_definitions(&missing, &catalog()) else {
            panic!("expected a load error");
        };
        assert!(matches!(err, RegistryError::MissingDirectory(path) if path == missing));
    }

    #[test]
    fn test_loads_nested_manifests_with_file_stem_fallback() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "ping.json",
            r#"{ "aliases": "p", "description": "Pong", "maxArgs": 0, "callback": "ping" }"#,
        );
        write(
            dir.path(),
            "fun/echo.json",
            r#"{ "name": "Say", "commands": ["echo"], "minArgs": 1, "maxArgs": -1, "run": "echo" }"#,
        );
        write(dir.path(), "notes.txt", "not a manifest");

        let mut registry = CommandRegistry::new();
        let loaded = load_into(&mut registry, dir.path(), &catalog()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(registry.get("P").unwrap().names(), ["ping", "p"]);
        let echo = registry.get("say").unwrap();
        assert_eq!(echo.names(), ["say", "echo"]);
        assert!(echo.accepts_arity(10));
        assert!(!echo.accepts_arity(0));
    }

    #[test]
    fn test_manifest_without_handler_is_documentation_only() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "rules.json", r#"{ "description": "Be nice" }"#);

        let mut registry = CommandRegistry::new();
        load_into(&mut registry, dir.path(), &catalog()).unwrap();

        assert!(registry.get("rules").is_none());
        assert_eq!(registry.find_public("rules").unwrap().description, "Be nice");
    }

    #[test]
    fn test_two_handler_fields_are_ambiguous() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "both.json",
            r#"{ "callback": "ping", "execute": "echo" }"#,
        );

        let mut registry = CommandRegistry::new();
        let err = load_into(&mut registry, dir.path(), &catalog()).unwrap_err();
        assert!(matches!(err, RegistryError::AmbiguousHandler { origin } if origin == "both"));
    }

    #[test]
    fn test_unknown_handler_key() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "mystery.json", r#"{ "callback": "nobody" }"#);

        let Err(err) = load_definitions(dir.path(), &catalog()) else {
            panic!("expected a load error");
        };
        assert!(matches!(
            err,
            RegistryError::UnknownHandler { handler, .. } if handler == "nobody"
        ));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "broken.json", "{ not json");

        let Err(err) = load_definitions(dir.path(), &catalog()) else {
            panic!("expected a load error");
        };
        match err {
            RegistryError::Parse { path, .. } => assert!(path.ends_with("broken.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
