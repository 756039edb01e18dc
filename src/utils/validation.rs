use crate::utils::error::{RegistryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::invalid_input(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| RegistryError::invalid_input(field_name, "Value is required"))
}

/// Converts an untrusted signed paging argument into an unsigned one.
pub fn validate_non_negative(field_name: &str, value: i64) -> Result<usize> {
    if value < 0 {
        return Err(RegistryError::InvalidPageRequest {
            field: field_name.to_string(),
            value,
        });
    }
    // 超出 usize 的值視同無窮大，分頁時會被截斷
    Ok(usize::try_from(value).unwrap_or(usize::MAX))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RegistryError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RegistryError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
