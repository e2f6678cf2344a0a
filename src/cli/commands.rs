//! CLI command handlers for models, check, select, and show.

use crate::catalog::CatalogResolver;
use crate::config::CatalogConfig;
use crate::diagnostics::ConnectionChecker;
use crate::settings::{redact_key, AiSettings, SettingsStore};

use super::{CheckCommands, KeyArgs};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Pick the first non-blank credential: flag, saved settings, environment.
pub fn pick_credential(
    flag: Option<&str>,
    saved: Option<&str>,
    env: Option<&str>,
) -> Option<String> {
    [flag, saved, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|k| !k.is_empty())
        .map(str::to_string)
}

fn generation_credential(key: &KeyArgs, settings: &AiSettings, config: &CatalogConfig) -> String {
    pick_credential(
        key.api_key.as_deref(),
        settings.generation_api_key.as_deref(),
        config.generation_api_key.as_deref(),
    )
    .unwrap_or_default()
}

/// Handle `gemini-catalog models`.
pub async fn handle_models(
    key: &KeyArgs,
    json: bool,
    store: &dyn SettingsStore,
    config: &CatalogConfig,
) -> CliResult {
    let settings = store.load()?.unwrap_or_default();
    let credential = generation_credential(key, &settings, config);

    let resolution = CatalogResolver::from_config(config).resolve(&credential).await;
    if let Some(message) = resolution.error_message() {
        eprintln!("warning: {message}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution.catalog)?);
        return Ok(());
    }

    let selected = settings.model_or_default();
    for (id, name) in resolution.catalog.options() {
        let marker = if id == selected { "*" } else { " " };
        println!("{marker} {id:<36} {name}");
    }
    Ok(())
}

/// Handle `gemini-catalog check <target>`.
pub async fn handle_check(
    target: &CheckCommands,
    store: &dyn SettingsStore,
    config: &CatalogConfig,
) -> CliResult {
    let settings = store.load()?.unwrap_or_default();
    let checker = ConnectionChecker::from_config(config);

    let result = match target {
        CheckCommands::Generation { key, model } => {
            let credential = generation_credential(key, &settings, config);
            let model = model
                .as_deref()
                .unwrap_or_else(|| settings.model_or_default());
            checker.check_generation(&credential, model).await
        }
        CheckCommands::Vision { key } => {
            let credential = pick_credential(
                key.api_key.as_deref(),
                settings.vision_api_key.as_deref(),
                config.vision_api_key.as_deref(),
            )
            .unwrap_or_default();
            checker.check_vision(&credential).await
        }
    };

    if result.success {
        println!("ok: {}", result.message);
        Ok(())
    } else {
        Err(format!("{} check failed: {}", result.target, result.message).into())
    }
}

/// Handle `gemini-catalog select <model>`.
pub async fn handle_select(
    model: &str,
    key: &KeyArgs,
    store: &dyn SettingsStore,
    config: &CatalogConfig,
) -> CliResult {
    let mut settings = store.load()?.unwrap_or_default();
    let credential = generation_credential(key, &settings, config);

    let resolution = CatalogResolver::from_config(config).resolve(&credential).await;
    if let Some(message) = resolution.error_message() {
        eprintln!("warning: {message}");
    }

    settings.select_model(&resolution.catalog, model)?;
    if let Some(api_key) = key.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        settings.generation_api_key = Some(api_key.trim().to_string());
    }
    store.save(&settings)?;
    println!("selected {}", settings.model_or_default());
    Ok(())
}

/// Handle `gemini-catalog show`.
pub fn handle_show(store: &dyn SettingsStore) -> CliResult {
    let Some(settings) = store.load()? else {
        println!("no saved settings");
        return Ok(());
    };

    let show_key = |key: Option<&str>| key.map(redact_key).unwrap_or_else(|| "(not set)".into());
    println!("model:          {}", settings.model_or_default());
    println!("generation key: {}", show_key(settings.generation_api_key.as_deref()));
    println!("vision key:     {}", show_key(settings.vision_api_key.as_deref()));
    Ok(())
}
