use crate::config::types::{Config, CrawlerConfig, OutputConfig, RendererConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_seeds(config)?;
    validate_renderer_config(&config.renderer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl scope and pacing
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if config.start_paths.is_empty() {
        return Err(ConfigError::Validation(
            "start-paths must contain at least one path".to_string(),
        ));
    }

    // max_depth >= 0 is always true for u32, so no check needed

    if !config.request_delay.is_finite() || config.request_delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "request-delay must be a finite number >= 0, got {}",
            config.request_delay
        )));
    }

    if let Some(index) = config.exclude_patterns.iter().position(|p| p.is_empty()) {
        return Err(ConfigError::Validation(format!(
            "exclude-patterns[{}] is empty and would exclude every URL",
            index
        )));
    }

    Ok(())
}

/// Validates that every seed built from the start paths is a usable URL
fn validate_seeds(config: &Config) -> Result<(), ConfigError> {
    for seed in config.seed_urls() {
        Url::parse(&seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;
    }
    Ok(())
}

/// Validates browser timing
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.navigation_timeout == 0 {
        return Err(ConfigError::Validation(
            "navigation-timeout must be >= 1 second".to_string(),
        ));
    }

    if config.ready_timeout == 0 {
        return Err(ConfigError::Validation(
            "ready-timeout must be >= 1 second".to_string(),
        ));
    }

    if let Some(path) = &config.chrome_executable {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "chrome-executable cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.jsonl_file.is_empty() {
        return Err(ConfigError::Validation(
            "jsonl-file cannot be empty".to_string(),
        ));
    }

    if config.jsonl_file.contains('/') || config.jsonl_file.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "jsonl-file must be a bare file name, got '{}'",
            config.jsonl_file
        )));
    }

    Ok(())
}
