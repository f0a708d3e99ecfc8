use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,

    /// Drop the orders table once the server has shut down gracefully.
    pub drop_on_shutdown: bool,
}

impl Settings {
    /// In-memory store, never reads the environment.
    pub fn for_tests() -> Settings {
        Settings {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            drop_on_shutdown: false,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite::memory:".to_string());

    let db_max_connections = env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(5);

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let drop_on_shutdown = env::var("DROP_ON_SHUTDOWN")
        .ok()
        .and_then(|s| parse_bool(&s))
        .unwrap_or(true);

    Settings {
        database_url,
        db_max_connections,
        host,
        port,
        drop_on_shutdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_settings_are_in_memory() {
        assert!(Settings::for_tests().is_in_memory());

        let mut file_backed = Settings::for_tests();
        file_backed.database_url = "sqlite://orders.db?mode=rwc".to_string();
        assert!(!file_backed.is_in_memory());
    }
}
