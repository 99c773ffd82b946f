use thiserror::Error;

/// A form input that failed validation; rendered next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn required(field: &'static str, value: &str) -> Result<String, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(field, "This field is required."));
    }
    Ok(value.to_string())
}

/// Accepts `YYYY-MM-DD HH:MM` or the `T`-separated form date inputs produce.
pub fn timestamp(field: &'static str, value: &str) -> Result<String, FieldError> {
    let normalized = required(field, value)?.replacen('T', " ", 1);
    chrono::NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M")
        .map(|parsed| parsed.format("%Y-%m-%d %H:%M").to_string())
        .map_err(|_| FieldError::new(field, "Use the format YYYY-MM-DD HH:MM."))
}

pub fn positive_int(field: &'static str, value: &str, max: i64) -> Result<i64, FieldError> {
    let parsed = required(field, value)?
        .parse::<i64>()
        .map_err(|_| FieldError::new(field, "Enter a whole number."))?;
    if parsed < 1 || parsed > max {
        return Err(FieldError::new(
            field,
            format!("Enter a number between 1 and {max}."),
        ));
    }
    Ok(parsed)
}
