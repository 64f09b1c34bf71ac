use std::{env, path::PathBuf, time::Duration};

const RENDER_DATA_DIR: &str = "/opt/render/data";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub receipts_dir: PathBuf,
    pub public_base_url: String,
    /// Reject non-numeric cost/price/margin/stock instead of coercing them.
    pub strict_numeric_validation: bool,
    pub idempotency_window: Duration,
    pub whatsapp_country_code: String,
    pub body_limit_bytes: usize,
    pub run_migrations_on_start: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        // Render mounts its persistent disk at a fixed path; anywhere else the
        // data lives next to the working directory.
        let data_dir = match env::var("DATA_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ if env::var("RENDER").is_ok() => PathBuf::from(RENDER_DATA_DIR),
            _ => PathBuf::from("data"),
        };

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            format!("sqlite://{}", data_dir.join("database.sqlite").display())
        });
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(5);
        let receipts_dir = env::var("RECEIPTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("cupons"));
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://localhost:{port}"));
        let idempotency_window = env::var("IDEMPOTENCY_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(600));
        let whatsapp_country_code = env::var("WHATSAPP_COUNTRY_CODE")
            .map(|code| code.chars().filter(char::is_ascii_digit).collect())
            .unwrap_or_else(|_| "55".to_string());
        let body_limit_bytes = env::var("BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(50 * 1024 * 1024);

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            data_dir,
            receipts_dir,
            public_base_url,
            strict_numeric_validation: env_flag("STRICT_NUMERIC_VALIDATION"),
            idempotency_window,
            whatsapp_country_code,
            body_limit_bytes,
            run_migrations_on_start: env_flag("RUN_MIGRATIONS_ON_START"),
        })
    }

    /// Configuration for tests and tools that keep everything under `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>, database_url: impl Into<String>) -> Self {
        let data_dir = data_dir.into();
        Self {
            database_url: database_url.into(),
            database_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 3000,
            receipts_dir: data_dir.join("cupons"),
            data_dir,
            public_base_url: "http://localhost:3000".to_string(),
            strict_numeric_validation: false,
            idempotency_window: Duration::from_secs(600),
            whatsapp_country_code: "55".to_string(),
            body_limit_bytes: 50 * 1024 * 1024,
            run_migrations_on_start: false,
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
