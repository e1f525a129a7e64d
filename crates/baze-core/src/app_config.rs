use std::net::SocketAddr;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_base_url: String,
    pub airtable_request_timeout_secs: u64,
    pub airtable_user_agent: String,
    /// Maximum number of profiles fetched per review session.
    pub candidates_page_size: u32,
    /// Comma-separated bearer tokens accepted by the server.
    pub api_keys: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("airtable_api_key", &"[redacted]")
            .field("airtable_base_id", &self.airtable_base_id)
            .field("airtable_base_url", &self.airtable_base_url)
            .field(
                "airtable_request_timeout_secs",
                &self.airtable_request_timeout_secs,
            )
            .field("airtable_user_agent", &self.airtable_user_agent)
            .field("candidates_page_size", &self.candidates_page_size)
            .field("api_keys", &format!("[{} redacted]", self.api_keys.len()))
            .finish()
    }
}
