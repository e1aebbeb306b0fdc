#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings for one listing-search session.
///
/// Built once at startup and handed to `CarsClient::new` explicitly; nothing
/// in the library reads the environment on its own.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// API origin without a trailing slash, e.g. `"https://vinfreak.onrender.com"`.
    pub api_base: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Page size used by interactive searches and the listing session.
    pub page_size: u32,
    /// Page size used when draining every page with `fetch_all`.
    pub bulk_page_size: u32,
}
