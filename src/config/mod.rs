//! Configuration system for the ichnome front-end.
//!
//! Provides a layered configuration hierarchy:
//!
//! 1. **Built-in defaults**: [`schema::FrontConfig::default()`]
//! 2. **User global config**: `~/.ichnome-front/config.toml`
//! 3. **Project local config**: `.ichnome-front.toml` in the current directory
//! 4. **Environment variables**: `ICHNOME_*` overrides (highest precedence)
//!
//! Later layers override earlier ones key by key. The result is read once at
//! startup and handed to the API client and the renderer explicitly.

pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::FrontConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
pub fn load() -> FrontConfig {
    let layers = [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .filter_map(|path| load_toml_file(&path).map(|value| (path, value)));
    let mut config = resolve_layers(layers);
    apply_env_overrides(&mut config);
    config
}

/// Fold file layers over the built-in defaults.
///
/// A layer that does not fit the schema is skipped with a warning; the
/// layers before and after it still apply.
fn resolve_layers(layers: impl IntoIterator<Item = (PathBuf, toml::Value)>) -> FrontConfig {
    let mut config = FrontConfig::default();
    for (path, overlay) in layers {
        let mut candidate = match toml::Value::try_from(&config) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize config layer");
                continue;
            }
        };
        merge_values(&mut candidate, overlay);
        let merged: Result<FrontConfig, _> = candidate.try_into();
        match merged {
            Ok(merged) => config = merged,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            }
        }
    }
    config
}

/// Read a TOML file as an untyped value.
///
/// Missing or malformed files yield `None` and are skipped; a broken user
/// file must not keep the server from starting.
fn load_toml_file(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

/// Overlay `overlay` onto `base`, table by table.
///
/// Only keys present in the overlay replace the base, so a file that sets
/// `api.endpoint_url` leaves `server.address` from earlier layers intact.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ichnome-front").join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".ichnome-front.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `ICHNOME_API_ENDPOINT_URL`: backend base URL
/// - `ICHNOME_FRONT_ADDRESS`: listen address
/// - `ICHNOME_FRONT_APP_NAME`: application name in page titles
/// - `ICHNOME_FRONT_VOCABULARY`: `group` or `namespace`
fn apply_env_overrides(config: &mut FrontConfig) {
    apply_overrides(config, |name| std::env::var(name).ok());
}

/// Apply overrides from `lookup`; empty values are ignored.
fn apply_overrides(config: &mut FrontConfig, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(name).filter(|val| !val.is_empty());

    if let Some(val) = var("ICHNOME_API_ENDPOINT_URL") {
        config.api.endpoint_url = val;
    }
    if let Some(val) = var("ICHNOME_FRONT_ADDRESS") {
        config.server.address = val;
    }
    if let Some(val) = var("ICHNOME_FRONT_APP_NAME") {
        config.general.application_name = val;
    }
    if let Some(vocabulary) =
        var("ICHNOME_FRONT_VOCABULARY").and_then(|val| schema::Vocabulary::parse(&val))
    {
        config.general.vocabulary = vocabulary;
    }
}

// ---------------------------------------------------------------------------
// Config init / set / show
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.ichnome-front/config.toml`.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.ichnome-front/ directory")?;
    }

    fs::write(&path, FrontConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted key (e.g. `api.endpoint_url`) in the global config file.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config as TOML value")?
    } else {
        toml::Value::try_from(FrontConfig::default()).context("failed to serialize defaults")?
    };

    set_toml_value(&mut root, key, value)?;

    // Reject values the schema would not accept.
    let _: FrontConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("invalid value for '{key}': '{value}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// Missing sections are created; an existing integer or boolean leaf keeps
/// its type.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("invalid config key: '{key}'");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        let table = current
            .as_table_mut()
            .with_context(|| format!("expected table above '{part}' in '{key}'"))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    let leaf = parts[parts.len() - 1];
    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{key}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(matches!(
            raw_value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}
