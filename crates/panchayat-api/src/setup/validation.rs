//! Configuration validation
//!
//! Checks that go beyond what `Config::validate` can see on its own.

use anyhow::Result;
use panchayat_core::Config;

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.request_timeout_secs() == 0 {
        return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS cannot be 0"));
    }

    if config.max_file_size_bytes() > 100 * 1024 * 1024 {
        tracing::warn!(
            max_file_size_mb = config.max_file_size_bytes() / 1024 / 1024,
            "MAX_FILE_SIZE_MB is unusually large for image uploads"
        );
    }

    Ok(())
}
