use crate::core::ConfigProvider;
use crate::domain::model::{DatePolicy, ExtractorOptions, Selectors};
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{
    validate_basename, validate_output_formats, validate_path, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub selectors: Selectors,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Saved order-history page. May be supplied on the command line instead.
    pub input: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub strict_dates: bool,
    pub currency_symbol: String,
    pub order_number_label: String,
    pub delivery_address_label: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        let defaults = ExtractorOptions::default();
        Self {
            strict_dates: false,
            currency_symbol: defaults.currency_symbol,
            order_number_label: defaults.order_number_label,
            delivery_address_label: defaults.delivery_address_label,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub basename: String,
    pub output_formats: Vec<String>,
    pub annotate_page: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            basename: "orders".to_string(),
            output_formats: vec!["csv".to_string()],
            annotate_page: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let input = validate_required_field("source.input", &self.source.input)?;
        validate_path("source.input", input)?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_basename("load.basename", &self.load.basename)?;
        validate_output_formats("load.output_formats", &self.load.output_formats)?;
        self.extractor_options().validate()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.source.input.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn basename(&self) -> &str {
        &self.load.basename
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn annotate_page(&self) -> bool {
        self.load.annotate_page
    }

    fn extractor_options(&self) -> ExtractorOptions {
        ExtractorOptions {
            selectors: self.selectors.clone(),
            date_policy: if self.extract.strict_dates {
                DatePolicy::Strict
            } else {
                DatePolicy::Permissive
            },
            order_number_label: self.extract.order_number_label.clone(),
            delivery_address_label: self.extract.delivery_address_label.clone(),
            currency_symbol: self.extract.currency_symbol.clone(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
