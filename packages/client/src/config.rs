use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// API endpoint configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Server origin. Default: "http://127.0.0.1:8080".
    #[serde(default = "default_api_origin")]
    pub origin: String,
    /// Path prefix under the origin. Default: "/api".
    #[serde(default = "default_api_base_path")]
    pub base_path: String,
}

fn default_api_origin() -> String {
    "http://127.0.0.1:8080".into()
}
fn default_api_base_path() -> String {
    "/api".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: default_api_origin(),
            base_path: default_api_base_path(),
        }
    }
}

impl ApiConfig {
    /// Origin and base path joined, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.origin.trim_end_matches('/'),
            self.base_path.trim_matches('/')
        )
    }
}

/// Polling periods, in milliseconds.
#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    /// Submission list refresh. Default: 2000.
    #[serde(default = "default_submissions_ms")]
    pub submissions_ms: u64,
    /// Code history refresh. Default: 3000.
    #[serde(default = "default_code_history_ms")]
    pub code_history_ms: u64,
}

fn default_submissions_ms() -> u64 {
    2000
}
fn default_code_history_ms() -> u64 {
    3000
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            submissions_ms: default_submissions_ms(),
            code_history_ms: default_code_history_ms(),
        }
    }
}

/// Editor wiring configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfigOptions {
    /// Quiescence window before the editor rebinds after a preference
    /// change. Default: 500 ms.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for EditorConfigOptions {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Network-identity probe configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ProbeConfig {
    /// STUN server to query. Default: "stun.l.google.com:19302".
    #[serde(default = "default_stun_server")]
    pub stun_server: String,
    /// Hard timeout; the probe never blocks auth flows. Default: 2000 ms.
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_stun_server() -> String {
    "stun.l.google.com:19302".into()
}
fn default_probe_timeout_ms() -> u64 {
    2000
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            stun_server: default_stun_server(),
            timeout_ms: default_probe_timeout_ms(),
        }
    }
}

/// Client application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub editor: EditorConfigOptions,
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Durable store location; resolved to the user data dir when unset.
    #[serde(default)]
    pub local_store_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CRESS_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("api.origin", "http://127.0.0.1:8080")?
            .set_default("api.base_path", "/api")?
            .set_default("poll.submissions_ms", 2000_i64)?
            .set_default("poll.code_history_ms", 3000_i64)?
            .set_default("editor.debounce_ms", 500_i64)?
            .set_default("probe.stun_server", "stun.l.google.com:19302")?
            .set_default("probe.timeout_ms", 2000_i64)?
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("CRESS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
