use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Raw error text is only exposed to clients in development.
    pub development_mode: bool,
    pub identity_file: Option<String>,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://hotels.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let development_mode = env::var("APP_ENV")
            .map(|value| value.eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        let identity_file = env::var("IDENTITY_FILE").ok().filter(|p| !p.is_empty());

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name =
            env::var("SERVICE_NAME").unwrap_or_else(|_| "hotel-directory".to_string());

        let metrics_port = match env::var("METRICS_PORT") {
            Ok(port) => Some(port.parse().map_err(|_| ConfigError::InvalidMetricsPort)?),
            Err(_) => None,
        };

        Ok(Config {
            database_url,
            server_host,
            server_port,
            development_mode,
            identity_file,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid metrics port number")]
    InvalidMetricsPort,
}
