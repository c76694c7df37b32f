use crate::config::DEFAULT_COMMENT;
use crate::core::ConfigProvider;
use crate::utils::error::{FulfillmentError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentConfig {
    pub api_key: String,
    pub secret_key: String,
    pub endpoint: String,
    /// 每個 SKU 的數量上限；未設定則不限制
    pub max_quantity_failsafe: Option<u32>,
    #[serde(default)]
    pub development_mode: bool,
    pub pacing_delay_ms: Option<u64>,
    pub request_timeout_seconds: Option<u64>,
    pub comment: Option<String>,
}

impl FulfillmentConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FulfillmentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FulfillmentError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FBA_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FulfillmentError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("api_key", &self.api_key)?;
        validation::validate_non_empty_string("secret_key", &self.secret_key)?;

        for (field, value) in [("api_key", &self.api_key), ("secret_key", &self.secret_key)] {
            if value.starts_with("${") {
                return Err(FulfillmentError::MissingConfigError {
                    field: format!("{} (unresolved {})", field, value),
                });
            }
        }

        if let Some(max) = self.max_quantity_failsafe {
            validation::validate_positive_number("max_quantity_failsafe", u64::from(max), 1)?;
        }
        if let Some(timeout) = self.request_timeout_seconds {
            validation::validate_positive_number("request_timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}

impl ConfigProvider for FulfillmentConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn secret_key(&self) -> &str {
        &self.secret_key
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn max_quantity_failsafe(&self) -> Option<u32> {
        self.max_quantity_failsafe
    }

    fn development_mode(&self) -> bool {
        self.development_mode
    }

    fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms.unwrap_or(1000))
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.unwrap_or(30))
    }

    fn comment(&self) -> &str {
        self.comment.as_deref().unwrap_or(DEFAULT_COMMENT)
    }
}

impl Validate for FulfillmentConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio_test::{assert_err, assert_ok};

    const BASIC: &str = r#"
api_key = "AKIAEXAMPLE"
secret_key = "s3cr3t"
endpoint = "https://fulfillment.example.com/"
"#;

    #[test]
    fn test_parse_basic_config_with_defaults() {
        let config = FulfillmentConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.api_key(), "AKIAEXAMPLE");
        assert_eq!(config.max_quantity_failsafe(), None);
        assert!(!config.development_mode());
        assert_eq!(config.pacing_delay(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.comment(), "Thank you for your order.");
        assert_ok!(config.validate());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
api_key = "AKIAEXAMPLE"
secret_key = "s3cr3t"
endpoint = "https://fulfillment.example.com/"
max_quantity_failsafe = 3
development_mode = true
pacing_delay_ms = 250
comment = "Thanks!"
"#;
        let config = FulfillmentConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.max_quantity_failsafe(), Some(3));
        assert!(config.development_mode());
        assert_eq!(config.pacing_delay(), Duration::from_millis(250));
        assert_eq!(config.comment(), "Thanks!");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FULFILLMENT_TEST_SECRET", "from-env");

        let toml_content = r#"
api_key = "AKIAEXAMPLE"
secret_key = "${FULFILLMENT_TEST_SECRET}"
endpoint = "https://fulfillment.example.com/"
"#;
        let config = FulfillmentConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.secret_key, "from-env");

        std::env::remove_var("FULFILLMENT_TEST_SECRET");
    }

    #[test]
    fn test_unresolved_credentials_fail_validation() {
        let toml_content = r#"
api_key = "${FULFILLMENT_TEST_UNSET_KEY}"
secret_key = "s3cr3t"
endpoint = "https://fulfillment.example.com/"
"#;
        let config = FulfillmentConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(FulfillmentError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let mut config = FulfillmentConfig::from_toml_str(BASIC).unwrap();
        config.endpoint = "invalid-url".to_string();
        assert_err!(config.validate());

        let mut config = FulfillmentConfig::from_toml_str(BASIC).unwrap();
        config.max_quantity_failsafe = Some(0);
        assert_err!(config.validate());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = FulfillmentConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.endpoint, "https://fulfillment.example.com/");
    }
}
