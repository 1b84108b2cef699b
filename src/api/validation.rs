use std::fmt;

/// A form field that failed validation; the message is shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError(pub String);

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejects empty or whitespace-only values. The value is returned as given.
pub fn required<'a>(label: &str, value: &'a str) -> Result<&'a str, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError(format!("{label} is required")));
    }
    Ok(value)
}

/// Rejects only the empty string. Whitespace counts as content.
pub fn non_empty<'a>(label: &str, value: &'a str) -> Result<&'a str, FieldError> {
    if value.is_empty() {
        return Err(FieldError(format!("{label} is required")));
    }
    Ok(value)
}

pub fn max_len<'a>(label: &str, value: &'a str, max: usize) -> Result<&'a str, FieldError> {
    if value.chars().count() > max {
        return Err(FieldError(format!(
            "{label} must be {max} characters or less"
        )));
    }
    Ok(value)
}

/// Trimmed value, or `None` when nothing was entered.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
