use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Parse a character id read back from the page (a `data-id` attribute,
/// a hidden form input, or a typed command argument).
pub fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Character id is empty".to_string()));
    }
    trimmed
        .parse::<DbId>()
        .map_err(|_| CoreError::Validation(format!("Invalid character id: {trimmed}")))
}
