// This is the entry point of the command bot.
//
// **Architecture Overview:**
// - `core/` = Registry and dispatch engine (platform-agnostic)
// - `infra/` = Implementations of core traits (SQLite, in-memory, manifest loading)
// - `discord/` = Discord-specific adapters (handlers, message events)
//
// This file's job is to:
// 1. Load configuration
// 2. Build the registry from built-ins and the commands directory
// 3. Hydrate per-guild settings
// 4. Set up the Discord framework and route messages to the dispatcher

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::commands::{CommandRegistry, DispatchConfig, Dispatcher, Tokenizer};
use crate::discord::commands::{builtin_sources, handler_catalog};
use crate::discord::message_events;
use crate::discord::{Data, Error};
use crate::infra::commands::definition_loader;
use crate::infra::commands::StoreBackend;
use poise::serenity_prelude as serenity;
use std::path::Path;
use std::sync::Arc;

/// Event handler for non-command Discord events.
/// Every prefix command arrives here as a plain message.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        message_events::handle_message(ctx, data, new_message).await?;
    }

    Ok(())
}

/// Dispatch settings from the environment. Unset or empty values keep the defaults.
fn dispatch_config_from_env() -> DispatchConfig {
    let mut config = DispatchConfig::default();

    if let Some(prefix) = non_empty_var("DEFAULT_PREFIX") {
        config = config.with_default_prefix(prefix);
    }
    if let Some(template) = non_empty_var("SYNTAX_ERROR") {
        config = config.with_syntax_error(template);
    }
    if let Some(notice) = non_empty_var("DISABLED_NOTICE") {
        config = config.with_disabled_notice(notice);
    }

    let legacy_tokenizer = std::env::var("LEGACY_TOKENIZER")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);
    if legacy_tokenizer {
        config = config.with_tokenizer(Tokenizer::SingleSpace);
    }

    config
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let token = std::env::var("DISCORD_TOKEN").expect(
        "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.",
    );
    let commands_dir = std::env::var("COMMANDS_DIR").unwrap_or_else(|_| "commands".to_string());
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let store_backend =
        StoreBackend::from_setting(std::env::var("COMMAND_STORE").ok().as_deref(), &data_dir);

    let config = dispatch_config_from_env();

    // ========================================================================
    // COMMAND REGISTRY
    // ========================================================================
    // Any load error stops the process here, before we connect.

    let mut registry = CommandRegistry::new();
    for (source, fallback_name) in builtin_sources() {
        registry
            .register(source, &fallback_name)
            .expect("Failed to register built-in command");
    }
    definition_loader::load_into(&mut registry, Path::new(&commands_dir), &handler_catalog())
        .expect("Failed to load command definitions");

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let (disabled_store, prefix_store) = store_backend
        .open()
        .await
        .expect("Failed to initialize command store");

    let dispatcher = Arc::new(Dispatcher::new(
        config,
        registry,
        disabled_store,
        prefix_store,
    ));
    tracing::info!(
        default_prefix = dispatcher.config().default_prefix(),
        tokenizer = ?dispatcher.config().tokenizer(),
        "Dispatcher ready"
    );

    // A failed hydration would silently leave every command enabled
    dispatcher
        .hydrate()
        .await
        .expect("Failed to load persisted prefixes and disabled commands");

    let data = Data { dispatcher };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!(
                    "🤖 {} is ready with {} commands",
                    ready.user.name,
                    data.dispatcher.registry().len()
                );
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .expect("Error creating client");

    client.start().await.expect("Error running bot");
}
