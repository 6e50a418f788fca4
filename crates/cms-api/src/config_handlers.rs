//! Handlers for the `cms config` subcommands.

use std::path::PathBuf;

use cms_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::ApiConfig;

/// Dispatches a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => {
            let value = cmd_config_get(config_path, &key)?;
            println!("{value}");
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = cmd_config_init(file.as_deref(), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = ApiConfig::load(config_path)?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        ConfigAction::Export { docker_env } => {
            let config = ApiConfig::load(config_path)?;
            for line in export_lines(&config, docker_env) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Prints the resolved config file path, noting when it does not exist.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = ApiConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!(
            "(file does not exist; run `{} config init` to create it)",
            ApiConfig::project_name()
        );
    }
    Ok(())
}

/// Looks up a value of the effective configuration by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = ApiConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Writes a default config file and returns its path.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => ApiConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, ApiConfig::default().to_toml_string()?)?;
    tracing::debug!(path = %path.display(), "Wrote default config");
    Ok(path)
}

/// Environment assignments for `config export`.
pub fn export_lines(config: &ApiConfig, docker_env: bool) -> Vec<String> {
    config
        .to_env_vars()
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect()
}

/// Walks a dotted key path through nested TOML tables.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Renders a TOML value for stdout: scalars bare, tables as TOML.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}
