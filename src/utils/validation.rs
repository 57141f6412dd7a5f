use crate::utils::error::{ExportError, Result};
use scraper::Selector;

pub const OUTPUT_FORMATS: [&str; 3] = ["csv", "tsv", "json"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ExportError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// The basename ends up as a file name inside the output directory.
pub fn validate_basename(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.contains(['/', '\\', '\0']) {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Basename must not contain path separators".to_string(),
        });
    }
    Ok(())
}

pub fn validate_selector(field_name: &str, selector: &str) -> Result<()> {
    validate_non_empty_string(field_name, selector)?;
    Selector::parse(selector).map_err(|e| ExportError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: selector.to_string(),
        reason: format!("Invalid CSS selector: {}", e),
    })?;
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }

    for format in formats {
        if !OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(ExportError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "orders.html").is_ok());
        assert!(validate_path("input", "").is_err());
        assert!(validate_path("input", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_selector() {
        assert!(validate_selector("selectors.order_node", "div.order-level").is_ok());
        assert!(validate_selector("selectors.order_node", "div[").is_err());
        assert!(validate_selector("selectors.order_node", "   ").is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let formats = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_output_formats("formats", &formats).is_ok());
        assert!(validate_output_formats("formats", &["xlsx".to_string()]).is_err());
        assert!(validate_output_formats("formats", &[]).is_err());
    }

    #[test]
    fn test_validate_basename() {
        assert!(validate_basename("basename", "orders-2021").is_ok());
        assert!(validate_basename("basename", "../orders").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("orders.html".to_string());
        let missing: Option<String> = None;
        assert!(validate_required_field("source.input", &present).is_ok());
        assert!(matches!(
            validate_required_field("source.input", &missing),
            Err(ExportError::MissingConfigError { .. })
        ));
    }
}
