use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::core::fraud::FraudKeywordSet;
use crate::core::prompt::DEFAULT_HISTORY_LIMIT;
use crate::utils::error::{FinmateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const LOG_FORMATS: &[&str] = &["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub chat: ChatConfig,
    pub fraud: Option<FraudConfig>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub endpoint: String,
    pub name: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            name: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub history_limit: usize,
    pub data_dir: String,
    pub system_prompt: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            data_dir: "./.finmate".to_string(),
            system_prompt: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FraudConfig {
    /// Replaces the built-in phrase list when present.
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FinmateError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Like `from_file`, but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "No config file at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FinmateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})
    /// Unset variables are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FinmateError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The configured key, falling back to `GEMINI_API_KEY` when the config
    /// leaves it blank or unresolved.
    pub fn api_key(&self) -> Option<String> {
        let configured = self
            .model
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.contains("${"));

        match configured {
            Some(key) => Some(key.to_string()),
            None => std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn require_api_key(&self) -> Result<String> {
        self.api_key().ok_or_else(|| FinmateError::MissingConfigError {
            field: format!("model.api_key (or {})", API_KEY_ENV),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.model.timeout_seconds)
    }

    pub fn fraud_keywords(&self) -> FraudKeywordSet {
        match self.fraud.as_ref().and_then(|f| f.keywords.as_ref()) {
            Some(keywords) => FraudKeywordSet::new(keywords),
            None => FraudKeywordSet::default(),
        }
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("model.endpoint", &self.model.endpoint)?;
        validation::validate_path("chat.data_dir", &self.chat.data_dir)?;
        validation::validate_positive_number("chat.history_limit", self.chat.history_limit, 1)?;
        validation::validate_positive_number(
            "model.timeout_seconds",
            self.model.timeout_seconds as usize,
            1,
        )?;
        validation::validate_one_of("logging.format", &self.logging.format, LOG_FORMATS)?;

        if self.model.name.trim().is_empty() {
            return Err(FinmateError::InvalidConfigValueError {
                field: "model.name".to_string(),
                value: self.model.name.clone(),
                reason: "Model name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.model.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model.name, "gemini-2.0-flash");
        assert_eq!(config.chat.history_limit, 10);
        assert_eq!(config.fraud_keywords(), FraudKeywordSet::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[model]
endpoint = "https://llm.example.com/v1beta"
name = "gemini-1.5-pro"
api_key = "literal-key"
timeout_seconds = 15

[chat]
history_limit = 4
data_dir = "/tmp/finmate"

[fraud]
keywords = ["Lottery", "inheritance"]

[logging]
format = "json"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model.name, "gemini-1.5-pro");
        assert_eq!(config.api_key().as_deref(), Some("literal-key"));
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.chat.history_limit, 4);
        assert_eq!(config.fraud_keywords().keywords(), &["lottery", "inheritance"]);
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FINMATE_TEST_ENDPOINT", "https://test.api.com");

        let toml_content = r#"
[model]
endpoint = "${FINMATE_TEST_ENDPOINT}"
api_key = "${FINMATE_TEST_UNSET_KEY}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model.endpoint, "https://test.api.com");
        assert_eq!(
            config.model.api_key.as_deref(),
            Some("${FINMATE_TEST_UNSET_KEY}")
        );

        std::env::remove_var("FINMATE_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = AppConfig::from_toml_str("[model]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_limit = AppConfig::from_toml_str("[chat]\nhistory_limit = 0\n").unwrap();
        assert!(bad_limit.validate().is_err());

        let bad_format = AppConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let err = AppConfig::from_toml_str("[model\nname = ").unwrap_err();
        assert!(matches!(err, FinmateError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[chat]\ndata_dir = \"./history\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.chat.data_dir, "./history");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_or_default("/definitely/not/here/finmate.toml").unwrap();
        assert_eq!(config.chat.history_limit, DEFAULT_HISTORY_LIMIT);
    }
}
