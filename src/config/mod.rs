pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{DatePolicy, ExtractorOptions};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_basename, validate_non_empty_string, validate_output_formats, validate_path,
    validate_selector, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "order-export")]
#[command(about = "Export orders from a saved order-history page to CSV")]
pub struct CliConfig {
    #[arg(short, long, help = "Saved order-history HTML page")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "orders", help = "File name stem of the exports")]
    pub basename: String,

    #[arg(long, value_delimiter = ',', default_value = "csv", help = "csv, tsv, json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Also write a copy of the page with the CSV in a textarea")]
    pub annotate: bool,

    #[arg(long, help = "Fail when an order date cannot be parsed")]
    pub strict_dates: bool,

    #[arg(long, default_value = "$")]
    pub currency_symbol: String,

    #[arg(long, help = "Print the CSV to stdout when done")]
    pub stdout: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn basename(&self) -> &str {
        &self.basename
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn annotate_page(&self) -> bool {
        self.annotate
    }

    fn extractor_options(&self) -> ExtractorOptions {
        ExtractorOptions {
            date_policy: if self.strict_dates {
                DatePolicy::Strict
            } else {
                DatePolicy::Permissive
            },
            currency_symbol: self.currency_symbol.clone(),
            ..ExtractorOptions::default()
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output_path", &self.output_path)?;
        validate_basename("basename", &self.basename)?;
        validate_output_formats("formats", &self.formats)?;
        self.extractor_options().validate()
    }
}

impl Validate for ExtractorOptions {
    fn validate(&self) -> Result<()> {
        let s = &self.selectors;
        validate_selector("selectors.order_node", &s.order_node)?;
        validate_selector("selectors.heading", &s.heading)?;
        validate_selector("selectors.details", &s.details)?;
        validate_selector("selectors.label", &s.label)?;
        validate_selector("selectors.value", &s.value)?;
        validate_selector("selectors.price", &s.price)?;
        validate_selector("selectors.item_title", &s.item_title)?;
        validate_non_empty_string("extract.order_number_label", &self.order_number_label)?;
        validate_non_empty_string(
            "extract.delivery_address_label",
            &self.delivery_address_label,
        )?;
        validate_non_empty_string("extract.currency_symbol", &self.currency_symbol)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["order-export", "--input", "orders.html"]);
        assert_eq!(config.output_path, "./output");
        assert_eq!(config.basename, "orders");
        assert_eq!(config.formats, vec!["csv"]);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.extractor_options().date_policy,
            DatePolicy::Permissive
        );
    }

    #[test]
    fn test_cli_formats_and_strict_dates() {
        let config = CliConfig::parse_from([
            "order-export",
            "-i",
            "orders.html",
            "--formats",
            "csv,tsv,json",
            "--strict-dates",
        ]);
        assert!(config.wants_format("tsv"));
        assert!(config.wants_format("json"));
        assert_eq!(config.extractor_options().date_policy, DatePolicy::Strict);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let config = CliConfig::parse_from([
            "order-export",
            "--input",
            "orders.html",
            "--formats",
            "xlsx",
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extractor_options_reject_bad_selector() {
        let mut options = ExtractorOptions::default();
        assert!(options.validate().is_ok());
        options.selectors.price = "span[".to_string();
        assert!(options.validate().is_err());
    }
}
