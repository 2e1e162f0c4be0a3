use std::net::SocketAddr;
use std::path::PathBuf;

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
    pub inventory_url: String,
    pub inventory_api_key: String,
    pub primary_table: String,
    pub access_table: String,
    pub inventory_timeout_secs: u64,
    pub classifier_url: Option<String>,
    pub classifier_timeout_ms: u64,
    pub training_data_path: Option<PathBuf>,
    pub localities_path: Option<PathBuf>,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("inventory_url", &self.inventory_url)
            .field("inventory_api_key", &"[redacted]")
            .field("primary_table", &self.primary_table)
            .field("access_table", &self.access_table)
            .field("inventory_timeout_secs", &self.inventory_timeout_secs)
            .field("classifier_url", &self.classifier_url)
            .field("classifier_timeout_ms", &self.classifier_timeout_ms)
            .field("training_data_path", &self.training_data_path)
            .field("localities_path", &self.localities_path)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
