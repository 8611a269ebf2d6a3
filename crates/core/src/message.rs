//! Direct-message domain rules.

/// Maximum message length in characters. Matches the schema constraint on
/// `messages.content`.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Validate message content: non-blank and within the length cap.
pub fn validate_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Message is required".to_string());
    }
    if content.chars().count() > MAX_MESSAGE_LEN {
        return Err(format!(
            "Message must be at most {MAX_MESSAGE_LEN} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_is_rejected() {
        assert!(validate_content("").is_err());
        assert!(validate_content("   ").is_err());
    }

    #[test]
    fn content_at_limit_is_accepted() {
        let content = "x".repeat(MAX_MESSAGE_LEN);
        assert!(validate_content(&content).is_ok());
    }

    #[test]
    fn content_over_limit_is_rejected() {
        let content = "x".repeat(MAX_MESSAGE_LEN + 1);
        let err = validate_content(&content).unwrap_err();
        assert!(err.contains("2000"), "limit must match the schema: {err}");
    }
}
