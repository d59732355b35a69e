use crate::config::types::Settings;
use crate::config::validation::validate_settings;
use crate::ConfigError;
use std::path::Path;

/// Loads settings from a TOML file, falling back to defaults when no path
/// is given
///
/// # Arguments
///
/// * `path` - Optional path to a TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Loaded (or default) and validated settings
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let settings = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)?;
            toml::from_str(&content)?
        }
        None => Settings::default(),
    };

    validate_settings(&settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_settings(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.image_cap, 5);
    }

    #[test]
    fn test_load_valid_settings() {
        let content = r#"
results-root = "/tmp/harvest"
image-cap = 3
image-timeout-secs = 20
user-agent = "TestHarvester/1.0"
"#;
        let file = create_temp_settings(content);
        let settings = load_settings(Some(file.path())).unwrap();

        assert_eq!(settings.results_root.to_str().unwrap(), "/tmp/harvest");
        assert_eq!(settings.image_cap, 3);
        assert_eq!(settings.image_timeout_secs, 20);
        assert_eq!(settings.user_agent, "TestHarvester/1.0");
        // Unspecified fields keep their defaults
        assert_eq!(
            settings.excluded_domains_path.to_str().unwrap(),
            "./excluded_domains.txt"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_settings(Some(Path::new("/nonexistent/harvest.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_settings("this is not valid TOML {{{");
        let result = load_settings(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let file = create_temp_settings("image-cap = 0");
        let result = load_settings(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
