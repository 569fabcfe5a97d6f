use serde::{Deserialize, Serialize};

/// Main configuration structure for Negin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Client-side gateway (where the relay lives)
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Relay server configuration
    #[serde(default)]
    pub relay: RelayConfig,

    /// Third-party drug site the relay forwards to
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// AI summarisation service the relay forwards to
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Autocomplete behaviour
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gateway client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GatewayConfig {
    /// Base URL of the relay, e.g. `http://localhost:3000`
    #[serde(default = "default_gateway_url")]
    pub base_url: String,
}

fn default_gateway_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
        }
    }
}

/// Relay server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RelayConfig {
    /// Host to bind to
    #[serde(default = "default_relay_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_relay_port")]
    pub port: u16,

    /// Whether to allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_relay_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_relay_port() -> u16 {
    3000
}

const fn default_true() -> bool {
    true
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_relay_host(),
            port: default_relay_port(),
            enable_cors: default_true(),
        }
    }
}

/// Drug site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpstreamConfig {
    /// Base URL of the drug site
    #[serde(default = "default_drugs_base_url")]
    pub base_url: String,

    /// User-Agent sent with interaction checks
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_drugs_base_url() -> String {
    "https://www.drugs.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_drugs_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

/// AI summarisation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SummarizerConfig {
    /// Base URL of the generative language API
    #[serde(default = "default_summarizer_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_summarizer_model")]
    pub model: String,

    /// API key; without one every summarize request fails
    #[serde(default)]
    pub api_key: Option<String>,

    /// Report text beyond this many characters is cut before summarising
    #[serde(default = "default_max_report_chars")]
    pub max_report_chars: usize,
}

fn default_summarizer_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_summarizer_model() -> String {
    "gemini-1.5-flash".to_string()
}

const fn default_max_report_chars() -> usize {
    30_000
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: default_summarizer_url(),
            model: default_summarizer_model(),
            api_key: None,
            max_report_chars: default_max_report_chars(),
        }
    }
}

/// Autocomplete behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Quiet period before a query is sent, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed query length that triggers a lookup
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_min_query_len() -> usize {
    1
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_log_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_log_rotation(),
        }
    }
}
