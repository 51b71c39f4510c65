use crate::config::types::{CatalogueConfig, Config, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalogue_config(&config.catalogue)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates catalogue configuration
fn validate_catalogue_config(config: &CatalogueConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.page_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "page-suffix cannot be empty".to_string(),
        ));
    }

    if config.link_class.is_empty() {
        return Err(ConfigError::Validation(
            "link-class cannot be empty".to_string(),
        ));
    }

    if config.link_class.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "link-class must be a single class name, got '{}'",
            config.link_class
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results-path cannot be empty".to_string(),
        ));
    }

    if config.images_dir.is_empty() {
        return Err(ConfigError::Validation(
            "images-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            catalogue: CatalogueConfig {
                base_url: "https://chem.example.com/products".to_string(),
                page_suffix: "?page=".to_string(),
                link_class: "product-link".to_string(),
            },
            output: OutputConfig {
                results_path: "./products.json".to_string(),
                images_dir: "./images".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_unparseable_base_url_rejected() {
        let mut config = valid_config();
        config.catalogue.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = valid_config();
        config.catalogue.base_url = "ftp://chem.example.com/products".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_page_suffix_rejected() {
        let mut config = valid_config();
        config.catalogue.page_suffix = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_link_class_rejected() {
        let mut config = valid_config();
        config.catalogue.link_class = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_link_class_with_whitespace_rejected() {
        let mut config = valid_config();
        config.catalogue.link_class = "product link".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_results_path_rejected() {
        let mut config = valid_config();
        config.output.results_path = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_images_dir_rejected() {
        let mut config = valid_config();
        config.output.images_dir = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
