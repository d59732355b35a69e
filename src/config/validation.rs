use crate::config::types::{CrawlTarget, Settings};
use crate::ConfigError;

/// Validates ambient settings
pub fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.image_cap < 1 || settings.image_cap > 50 {
        return Err(ConfigError::Validation(format!(
            "image-cap must be between 1 and 50, got {}",
            settings.image_cap
        )));
    }

    if settings.image_timeout_secs < 1 || settings.image_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "image-timeout-secs must be between 1 and 120, got {}",
            settings.image_timeout_secs
        )));
    }

    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if settings.results_root.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "results-root cannot be empty".to_string(),
        ));
    }

    if settings.excluded_domains_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "excluded-domains-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a crawl target assembled from user input
///
/// Depth bounds apply even for shallow sessions so a later `--deepcrawl`
/// rerun with the same arguments cannot surprise. Render flags combine
/// freely with either crawl mode: `--save-pdf` without `--deepcrawl` simply
/// applies to the single seed page.
pub fn validate_target(target: &CrawlTarget) -> Result<(), ConfigError> {
    if target.seed_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "seed URL cannot be empty".to_string(),
        ));
    }

    if target.depth < 1 || target.depth > 10 {
        return Err(ConfigError::Validation(format!(
            "depth must be between 1 and 10, got {}",
            target.depth
        )));
    }

    Ok(())
}
