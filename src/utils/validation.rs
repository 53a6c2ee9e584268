use crate::utils::error::{EtlError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EtlError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Checks that a delimiter fits in the single byte the csv reader expects.
pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        return Err(EtlError::InvalidConfigValue {
            field: field_name.to_string(),
            value: delimiter.escape_default().to_string(),
            reason: "Delimiter must be a single ASCII character other than a quote or newline"
                .to_string(),
        });
    }
    Ok(delimiter as u8)
}

pub fn validate_required(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::Validation {
            field: field_name.to_string(),
            message: "is required".to_string(),
        });
    }
    Ok(())
}

pub fn validate_letters_only(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
        return Err(EtlError::Validation {
            field: field_name.to_string(),
            message: "should only contain letters".to_string(),
        });
    }
    Ok(())
}

pub fn validate_gender(field_name: &str, value: &str) -> Result<()> {
    validate_letters_only(field_name, value)?;
    match value.to_lowercase().as_str() {
        "male" | "female" => Ok(()),
        _ => Err(EtlError::Validation {
            field: field_name.to_string(),
            message: "must be either Male or Female".to_string(),
        }),
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if !email_pattern().is_match(value) {
        return Err(EtlError::Validation {
            field: field_name.to_string(),
            message: format!("'{}' is not a valid email address (e.g., example@gmail.com)", value),
        });
    }
    Ok(())
}
