use crate::error::AppError;

/// Validate a trimmed free-form label (1-`max` Unicode characters).
pub fn validate_label(label: &str, what: &str, max: usize) -> Result<(), AppError> {
    let label = label.trim();
    if label.is_empty() || label.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{what} must be 1-{max} characters"
        )));
    }
    Ok(())
}
