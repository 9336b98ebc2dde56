//! Server configuration, loaded from environment variables at startup.

use std::fmt;

use dhansathi_format::{Rule, Sanitizer};

/// What happens to a chat turn when its history record cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// The turn fails and the reply is discarded.
    #[default]
    Required,
    /// The failure is logged and the reply is still returned.
    BestEffort,
}

impl HistoryPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "required" => Some(Self::Required),
            "best-effort" | "best_effort" => Some(Self::BestEffort),
            _ => None,
        }
    }
}

/// Runtime configuration for dhansathi-server.
///
/// Every field except the completion credential has a default, so the
/// server starts without any environment variables set.
#[derive(Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:$PORT"`, `PORT` default 5000).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://dhansathi.db"`).
    pub database_url: String,

    /// Upper bound on pooled database connections.
    pub db_max_connections: u32,

    /// Completion-service credential. `None` disables chat turns.
    pub groq_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible completion endpoint.
    pub groq_base_url: String,

    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,

    /// Comma-separated list of allowed CORS origins.
    pub cors_allowed_origins: Option<String>,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    /// Split paragraphs at every sentence boundary before a capital letter.
    pub sentence_breaks: bool,

    pub history_policy: HistoryPolicy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("database_url", &self.database_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<redacted>"))
            .field("groq_base_url", &self.groq_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("top_p", &self.top_p)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("enable_swagger", &self.enable_swagger)
            .field("sentence_breaks", &self.sentence_breaks)
            .field("history_policy", &self.history_policy)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_owned(),
            database_url: "sqlite://dhansathi.db".to_owned(),
            db_max_connections: 5,
            groq_api_key: None,
            groq_base_url: "https://api.groq.com/openai/v1".to_owned(),
            model: "openai/gpt-oss-120b".to_owned(),
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 1.0,
            cors_allowed_origins: Some("http://localhost:5173".to_owned()),
            log_level: "info".to_owned(),
            log_json: false,
            enable_swagger: true,
            sentence_breaks: true,
            history_policy: HistoryPolicy::Required,
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parse_or = |key: &str, default: f64| {
            get(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .unwrap_or(default)
        };
        let flag_or = |key: &str, default: bool| {
            get(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        let bind_address = get("DHANSATHI_BIND").unwrap_or_else(|| match get("PORT") {
            Some(port) => format!("0.0.0.0:{}", port.trim()),
            None => defaults.bind_address.clone(),
        });

        Self {
            bind_address,
            database_url: get("DHANSATHI_DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: get("DHANSATHI_DB_MAX_CONNECTIONS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.db_max_connections),
            groq_api_key: get("GROQ_API_KEY"),
            groq_base_url: get("GROQ_BASE_URL").unwrap_or(defaults.groq_base_url),
            model: get("DHANSATHI_MODEL").unwrap_or(defaults.model),
            temperature: parse_or("DHANSATHI_TEMPERATURE", f64::from(defaults.temperature)) as f32,
            max_tokens: get("DHANSATHI_MAX_TOKENS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_tokens),
            top_p: parse_or("DHANSATHI_TOP_P", f64::from(defaults.top_p)) as f32,
            cors_allowed_origins: get("DHANSATHI_CORS_ORIGINS").or(defaults.cors_allowed_origins),
            log_level: get("DHANSATHI_LOG").unwrap_or(defaults.log_level),
            log_json: flag_or("DHANSATHI_LOG_JSON", defaults.log_json),
            enable_swagger: flag_or("DHANSATHI_ENABLE_SWAGGER", defaults.enable_swagger),
            sentence_breaks: flag_or("DHANSATHI_SENTENCE_BREAKS", defaults.sentence_breaks),
            history_policy: get("DHANSATHI_HISTORY_POLICY")
                .and_then(|v| HistoryPolicy::parse(&v))
                .unwrap_or(defaults.history_policy),
        }
    }

    /// The reply sanitizer selected by this configuration.
    pub fn sanitizer(&self) -> Sanitizer {
        if self.sentence_breaks {
            Sanitizer::new()
        } else {
            Sanitizer::new().without(Rule::SentenceBreaks)
        }
    }
}
