pub const DB_ENV: &str = "TRADEJOURNAL_DB";
pub const USER_ENV: &str = "TRADEJOURNAL_USER";
pub const LOG_ENV: &str = "TRADEJOURNAL_LOG";

const DEFAULT_DB: &str = "./tradejournal.db";
const DEFAULT_USER: &str = "local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    pub user_id: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            db_path: get(DB_ENV, DEFAULT_DB),
            user_id: get(USER_ENV, DEFAULT_USER),
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(mut self, db_path: Option<String>, user_id: Option<String>) -> Self {
        if let Some(db) = db_path {
            self.db_path = db;
        }
        if let Some(user) = user_id {
            self.user_id = user;
        }
        self
    }
}
