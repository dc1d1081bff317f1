use crate::utils::error::{FinmateError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FinmateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FinmateError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FinmateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FinmateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FinmateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(FinmateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(FinmateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Parses a user-entered numeric field. Blank or non-numeric text is rejected.
pub fn parse_amount(field_name: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FinmateError::invalid_input(field_name, text, "a number is required"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| FinmateError::invalid_input(field_name, text, "not a valid number"))
}

/// Rejects NaN and infinities along with anything `<= 0`.
pub fn validate_positive_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(FinmateError::invalid_input(field_name, value, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(FinmateError::invalid_input(field_name, value, "must be greater than 0"));
    }
    Ok(())
}

pub fn validate_non_negative_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(FinmateError::invalid_input(field_name, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(FinmateError::invalid_input(field_name, value, "cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("model.endpoint", "https://example.com").is_ok());
        assert!(validate_url("model.endpoint", "http://example.com").is_ok());
        assert!(validate_url("model.endpoint", "").is_err());
        assert!(validate_url("model.endpoint", "invalid-url").is_err());
        assert!(validate_url("model.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("chat.history_limit", 10, 1).is_ok());
        assert!(validate_positive_number("chat.history_limit", 0, 1).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("principal", " 250000 ").unwrap(), 250000.0);
        assert_eq!(parse_amount("rate", "6.5").unwrap(), 6.5);
        assert!(matches!(
            parse_amount("principal", ""),
            Err(FinmateError::InvalidInput { .. })
        ));
        assert!(matches!(
            parse_amount("principal", "abc"),
            Err(FinmateError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_amount_bounds() {
        assert!(validate_positive_amount("principal", 1.0).is_ok());
        assert!(validate_positive_amount("principal", 0.0).is_err());
        assert!(validate_positive_amount("principal", f64::NAN).is_err());
        assert!(validate_positive_amount("principal", f64::INFINITY).is_err());
        assert!(validate_non_negative_amount("rate", 0.0).is_ok());
        assert!(validate_non_negative_amount("rate", -0.1).is_err());
    }
}
