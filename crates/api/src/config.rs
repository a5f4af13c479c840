use sagashelf_sgdb::client::DEFAULT_BASE_URL;
use sagashelf_sgdb::SgdbConfig;
use sagashelf_store::RecordStoreConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. The clients
/// receive their part of it at construction; nothing else reads the
/// environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SteamGridDB credentials and endpoint.
    pub sgdb: SgdbConfig,
    /// Record store location; saga endpoints are unavailable without it.
    pub record_store: Option<RecordStoreConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                            |
    /// | `PORT`                 | `3000`                               |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `SGDB_KEY`             | empty                                |
    /// | `SGDB_BASE_URL`        | `https://www.steamgriddb.com/api/v2` |
    /// | `RECORD_STORE_URL`     | unset                                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let sgdb = SgdbConfig::new(std::env::var("SGDB_KEY").unwrap_or_default()).with_base_url(
            std::env::var("SGDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        );

        let record_store = std::env::var("RECORD_STORE_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .map(RecordStoreConfig::new);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            sgdb,
            record_store,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
