use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use gamedeck_core::config::{AppConfig, LoadOptions};
use secrecy::{ExposeSecret, SecretString};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let tokens = if config.auth.api_tokens.is_empty() {
        "<none, gate open>".to_string()
    } else {
        config.auth.api_tokens.iter().map(redact_secret).collect::<Vec<_>>().join(", ")
    };
    let client_token = config
        .client
        .api_token
        .as_ref()
        .map(redact_secret)
        .unwrap_or_else(|| "<unset>".to_string());

    let entries: [(&str, String, &str); 10] = [
        ("database.url", config.database.url.clone(), "GAMEDECK_DATABASE_URL"),
        (
            "database.max_connections",
            config.database.max_connections.to_string(),
            "GAMEDECK_DATABASE_MAX_CONNECTIONS",
        ),
        (
            "database.timeout_secs",
            config.database.timeout_secs.to_string(),
            "GAMEDECK_DATABASE_TIMEOUT_SECS",
        ),
        ("server.bind_address", config.server.bind_address.clone(), "GAMEDECK_SERVER_BIND_ADDRESS"),
        ("server.port", config.server.port.to_string(), "GAMEDECK_SERVER_PORT"),
        ("auth.api_tokens", tokens, "GAMEDECK_AUTH_API_TOKENS"),
        ("client.base_url", config.client.base_url.clone(), "GAMEDECK_CLIENT_BASE_URL"),
        ("client.api_token", client_token, "GAMEDECK_CLIENT_API_TOKEN"),
        ("logging.level", config.logging.level.clone(), "GAMEDECK_LOGGING_LEVEL"),
        ("logging.format", format!("{:?}", config.logging.format), "GAMEDECK_LOGGING_FORMAT"),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, value, env_key) in entries {
        let source =
            field_source(key, env_key, config_file_doc.as_ref(), config_file_path.as_deref());
        lines.push(render_line(key, &value, source));
    }

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("gamedeck.toml"), PathBuf::from("config/gamedeck.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: &str,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if env::var_os(env_key).is_some() {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_secret(secret: &SecretString) -> String {
    redact_token(secret.expose_secret())
}

/// Keep a short prefix so operators can tell tokens apart.
fn redact_token(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    match trimmed.split_once('-') {
        Some((prefix, _)) => format!("{prefix}-***"),
        None => "<redacted>".to_string(),
    }
}
