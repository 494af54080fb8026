use std::collections::HashSet;

use crate::error::AppError;

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a trimmed name (1-64 Unicode characters).
pub fn validate_name(name: &str, field: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(AppError::Validation(format!(
            "{field} must be 1-64 characters"
        )));
    }
    Ok(())
}

/// Validate an optional count field (must be >= 0 when present).
pub fn validate_non_negative(value: Option<i32>, field: &str) -> Result<(), AppError> {
    if let Some(value) = value
        && value < 0
    {
        return Err(AppError::Validation(format!("{field} must be >= 0")));
    }
    Ok(())
}

/// Validate an ID list used to replace an association set (no duplicates).
/// An empty list is allowed and means "no associations".
pub fn validate_id_set(ids: &[i32], name: &str) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for &id in ids {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!("Duplicate {name} ID: {id}")));
        }
    }
    Ok(())
}
