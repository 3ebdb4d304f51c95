//! Configuration module
//!
//! Settings are read from the environment (a `.env` file is loaded first when
//! present). Optional values fall back to the defaults below; `DATABASE_URL`
//! and `JWT_SECRET` are required.

use std::env;
use std::path::PathBuf;

const SERVER_PORT: u16 = 5000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_FILE_SIZE_MB: usize = 10;
const MAX_FILES_PER_REQUEST: usize = 10;
const UPLOAD_DIR: &str = "public/uploads";
const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub request_timeout_secs: u64,
    pub environment: String,
    pub log_format: String,
}

/// Settings for the content service and its blob store
#[derive(Clone, Debug)]
pub struct ContentServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub uploads_url_prefix: String,
    pub max_file_size_bytes: usize,
    pub max_files_per_request: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ContentServiceConfig>);

impl Config {
    fn inner(&self) -> &ContentServiceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ContentServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().base.jwt_secret
    }

    pub fn jwt_expiry_hours(&self) -> i64 {
        self.inner().base.jwt_expiry_hours
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.inner().base.request_timeout_secs
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.inner().base.log_format
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.inner().upload_dir
    }

    pub fn uploads_url_prefix(&self) -> &str {
        &self.inner().uploads_url_prefix
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.inner().max_file_size_bytes
    }

    pub fn max_files_per_request(&self) -> usize {
        self.inner().max_files_per_request
    }

    /// Upper bound for a whole multipart body: every file at its limit plus
    /// a megabyte for the text fields.
    pub fn max_request_body_bytes(&self) -> usize {
        self.max_file_size_bytes()
            .saturating_mul(self.max_files_per_request())
            .saturating_add(1024 * 1024)
    }
}

impl ContentServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            environment,
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        };

        Ok(ContentServiceConfig {
            base,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            upload_dir: PathBuf::from(
                env::var("UPLOAD_DIR").unwrap_or_else(|_| UPLOAD_DIR.to_string()),
            ),
            uploads_url_prefix: env::var("UPLOADS_URL_PREFIX")
                .unwrap_or_else(|_| UPLOADS_URL_PREFIX.to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_files_per_request: env::var("MAX_FILES_PER_REQUEST")
                .unwrap_or_else(|_| MAX_FILES_PER_REQUEST.to_string())
                .parse()
                .unwrap_or(MAX_FILES_PER_REQUEST),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if !(self.database_url.starts_with("postgresql://")
            || self.database_url.starts_with("postgres://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.base.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }

        if self.max_file_size_bytes == 0 || self.max_files_per_request == 0 {
            return Err(anyhow::anyhow!(
                "MAX_FILE_SIZE_MB and MAX_FILES_PER_REQUEST must be greater than zero"
            ));
        }

        if !self.uploads_url_prefix.starts_with('/') {
            return Err(anyhow::anyhow!("UPLOADS_URL_PREFIX must start with '/'"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContentServiceConfig {
        ContentServiceConfig {
            base: BaseConfig {
                server_port: SERVER_PORT,
                cors_origins: vec!["*".to_string()],
                db_max_connections: MAX_CONNECTIONS,
                db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
                jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
                jwt_expiry_hours: JWT_EXPIRY_HOURS,
                request_timeout_secs: REQUEST_TIMEOUT_SECS,
                environment: "development".to_string(),
                log_format: "pretty".to_string(),
            },
            database_url: "postgres://localhost/panchayat".to_string(),
            upload_dir: PathBuf::from(UPLOAD_DIR),
            uploads_url_prefix: UPLOADS_URL_PREFIX.to_string(),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            max_files_per_request: MAX_FILES_PER_REQUEST,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let mut cfg = sample();
        cfg.base.jwt_secret = "short".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_non_postgres_url_rejected() {
        let mut cfg = sample();
        cfg.database_url = "mongodb://localhost/panchayat".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_body_limit_covers_all_files() {
        let cfg = Config(Box::new(sample()));
        assert!(cfg.max_request_body_bytes() > 10 * 10 * 1024 * 1024);
        assert!(!cfg.is_production());
    }
}
