use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

/// Bearer tokens accepted by the catalog routes. Empty means the gate is open.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    pub api_tokens: Vec<SecretString>,
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: Option<SecretString>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub log_level: Option<String>,
    pub server_port: Option<u16>,
    pub auth_api_tokens: Option<Vec<String>>,
    pub client_base_url: Option<String>,
    pub client_api_token: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://gamedeck.db?mode=rwc".to_string(),
                max_connections: 5,
                timeout_secs: 30,
            },
            server: ServerConfig { bind_address: "127.0.0.1".to_string(), port: 3000 },
            auth: AuthConfig::default(),
            client: ClientConfig { base_url: "http://127.0.0.1:3000".to_string(), api_token: None },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

fn secret_list(values: Vec<String>) -> Vec<SecretString> {
    values.into_iter().map(secret_value).collect()
}

fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|token| !token.is_empty()).map(str::to_string).collect()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AuthConfig {
    pub fn is_enabled(&self) -> bool {
        !self.api_tokens.is_empty()
    }

    /// Checks every configured token without short-circuiting on the first match.
    pub fn accepts(&self, presented: &str) -> bool {
        self.api_tokens.iter().fold(false, |matched, token| {
            matched | tokens_match(token.expose_secret().as_bytes(), presented.as_bytes())
        })
    }
}

// Walks the longer input in full so timing does not reveal the matching prefix or length.
fn tokens_match(expected: &[u8], presented: &[u8]) -> bool {
    let width = expected.len().max(presented.len());
    let mut diff = expected.len() ^ presented.len();
    for index in 0..width {
        let left = expected.get(index).copied().unwrap_or(0);
        let right = presented.get(index).copied().unwrap_or(0);
        diff |= usize::from(left ^ right);
    }
    diff == 0
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("gamedeck.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(database) = patch.database {
            if let Some(url) = database.url {
                self.database.url = url;
            }
            if let Some(max_connections) = database.max_connections {
                self.database.max_connections = max_connections;
            }
            if let Some(timeout_secs) = database.timeout_secs {
                self.database.timeout_secs = timeout_secs;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(auth) = patch.auth {
            if let Some(api_tokens) = auth.api_tokens {
                self.auth.api_tokens = secret_list(api_tokens);
            }
        }

        if let Some(client) = patch.client {
            if let Some(base_url) = client.base_url {
                self.client.base_url = base_url;
            }
            if let Some(client_api_token_value) = client.api_token {
                self.client.api_token = Some(secret_value(client_api_token_value));
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("GAMEDECK_DATABASE_URL") {
            self.database.url = value;
        }
        if let Some(value) = read_env("GAMEDECK_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections =
                parse_u32("GAMEDECK_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("GAMEDECK_DATABASE_TIMEOUT_SECS") {
            self.database.timeout_secs = parse_u64("GAMEDECK_DATABASE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("GAMEDECK_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("GAMEDECK_SERVER_PORT") {
            self.server.port = parse_u16("GAMEDECK_SERVER_PORT", &value)?;
        }

        if let Some(value) = read_env("GAMEDECK_AUTH_API_TOKENS") {
            self.auth.api_tokens = secret_list(split_tokens(&value));
        }

        if let Some(value) = read_env("GAMEDECK_CLIENT_BASE_URL") {
            self.client.base_url = value;
        }
        if let Some(value) = read_env("GAMEDECK_CLIENT_API_TOKEN") {
            self.client.api_token = Some(secret_value(value));
        }

        let log_level =
            read_env("GAMEDECK_LOGGING_LEVEL").or_else(|| read_env("GAMEDECK_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("GAMEDECK_LOGGING_FORMAT").or_else(|| read_env("GAMEDECK_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(database_url) = overrides.database_url {
            self.database.url = database_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(port) = overrides.server_port {
            self.server.port = port;
        }
        if let Some(api_tokens) = overrides.auth_api_tokens {
            self.auth.api_tokens = secret_list(api_tokens);
        }
        if let Some(base_url) = overrides.client_base_url {
            self.client.base_url = base_url;
        }
        if let Some(client_api_token) = overrides.client_api_token {
            self.client.api_token = Some(secret_value(client_api_token));
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_database(&self.database)?;
        validate_server(&self.server)?;
        validate_auth(&self.auth)?;
        validate_client(&self.client)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("gamedeck.toml"), PathBuf::from("config/gamedeck.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_database(database: &DatabaseConfig) -> Result<(), ConfigError> {
    let url = database.url.trim();
    let sqlite_url =
        url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:";
    if !sqlite_url {
        return Err(ConfigError::Validation(
            "database.url must be a sqlite URL (`sqlite://...`, `sqlite::...`, or `:memory:`)"
                .to_string(),
        ));
    }

    if database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    if database.timeout_secs == 0 || database.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "database.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    Ok(())
}

fn validate_auth(auth: &AuthConfig) -> Result<(), ConfigError> {
    let malformed = auth.api_tokens.iter().any(|token| {
        let value = token.expose_secret();
        value.trim().is_empty() || value.chars().any(char::is_whitespace)
    });
    if malformed {
        return Err(ConfigError::Validation(
            "auth.api_tokens entries must be non-empty and contain no whitespace".to_string(),
        ));
    }

    Ok(())
}

fn validate_client(client: &ClientConfig) -> Result<(), ConfigError> {
    let base_url = client.base_url.trim();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "client.base_url must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    database: Option<DatabasePatch>,
    server: Option<ServerPatch>,
    auth: Option<AuthPatch>,
    client: Option<ClientPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabasePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthPatch {
    api_tokens: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct ClientPatch {
    base_url: Option<String>,
    api_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{
        tokens_match, AppConfig, AuthConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat,
    };

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_GAMEDECK_TOKEN", "deck-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("gamedeck.toml");
            fs::write(
                &path,
                r#"
[auth]
api_tokens = ["${TEST_GAMEDECK_TOKEN}"]

[client]
api_token = "${TEST_GAMEDECK_TOKEN}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.auth.accepts("deck-from-env"), "auth token should come from env")?;
            ensure(
                config.client.api_token.as_ref().map(|token| token.expose_secret())
                    == Some("deck-from-env"),
                "client token should come from env",
            )?;
            Ok(())
        })();

        clear_vars(&["TEST_GAMEDECK_TOKEN"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GAMEDECK_LOG_LEVEL", "warn");
        env::set_var("GAMEDECK_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["GAMEDECK_LOG_LEVEL", "GAMEDECK_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GAMEDECK_DATABASE_URL", "sqlite://from-env.db");
        env::set_var("GAMEDECK_SERVER_PORT", "4100");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("gamedeck.toml");
            fs::write(
                &path,
                r#"
[database]
url = "sqlite://from-file.db"

[server]
port = 4000
bind_address = "0.0.0.0"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    database_url: Some("sqlite://from-override.db".to_string()),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.database.url == "sqlite://from-override.db",
                "override database url should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.server.port == 4100, "env port should win over file and defaults")?;
            ensure(config.server.bind_address == "0.0.0.0", "file bind address should apply")?;
            Ok(())
        })();

        clear_vars(&["GAMEDECK_DATABASE_URL", "GAMEDECK_SERVER_PORT"]);
        result
    }

    #[test]
    fn auth_tokens_env_is_comma_separated() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GAMEDECK_AUTH_API_TOKENS", "alpha, beta,,");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.auth.api_tokens.len() == 2, "two tokens should be parsed")?;
            ensure(config.auth.accepts("alpha"), "first token should be accepted")?;
            ensure(config.auth.accepts("beta"), "second token should be accepted")?;
            ensure(!config.auth.accepts("gamma"), "unknown token should be rejected")?;
            Ok(())
        })();

        clear_vars(&["GAMEDECK_AUTH_API_TOKENS"]);
        result
    }

    #[test]
    fn token_check_rejects_prefixes_and_extensions() -> Result<(), String> {
        let auth = AuthConfig {
            api_tokens: vec!["deck-admin".to_string().into(), "deck-ops".to_string().into()],
        };

        ensure(auth.accepts("deck-admin"), "exact token should be accepted")?;
        ensure(auth.accepts("deck-ops"), "later token should be accepted")?;
        ensure(!auth.accepts("deck-"), "prefix of a token should be rejected")?;
        ensure(!auth.accepts("deck-admin2"), "extended token should be rejected")?;
        ensure(!auth.accepts(""), "empty token should be rejected")?;
        ensure(!AuthConfig::default().accepts(""), "no tokens accept nothing")?;
        ensure(!tokens_match(b"abc", b"abc\0"), "trailing zero byte should not match")?;
        ensure(tokens_match(b"", b""), "two empty inputs match")
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GAMEDECK_CLIENT_BASE_URL", "ftp://catalog.local");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("client.base_url")
            );
            ensure(has_message, "validation failure should mention client.base_url")
        })();

        clear_vars(&["GAMEDECK_CLIENT_BASE_URL"]);
        result
    }

    #[test]
    fn invalid_numeric_env_override_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GAMEDECK_SERVER_PORT", "not-a-port");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected env override failure".to_string()),
                Err(error) => error,
            };
            let names_variable = matches!(
                error,
                ConfigError::InvalidEnvOverride { ref key, .. } if key == "GAMEDECK_SERVER_PORT"
            );
            ensure(names_variable, "error should name the offending variable")
        })();

        clear_vars(&["GAMEDECK_SERVER_PORT"]);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("GAMEDECK_AUTH_API_TOKENS", "server-secret-value");
        env::set_var("GAMEDECK_CLIENT_API_TOKEN", "client-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(
                !debug.contains("server-secret-value"),
                "debug output should not contain server token",
            )?;
            ensure(
                !debug.contains("client-secret-value"),
                "debug output should not contain client token",
            )?;
            ensure(
                matches!(config.logging.format, LogFormat::Compact),
                "default logging format should be compact",
            )?;
            Ok(())
        })();

        clear_vars(&["GAMEDECK_AUTH_API_TOKENS", "GAMEDECK_CLIENT_API_TOKEN"]);
        result
    }
}
