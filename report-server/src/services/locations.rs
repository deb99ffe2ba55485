use shared::error::{AppError, AppResult, ErrorCode};

const MAX_NAME_LEN: usize = 100;

/// Trimmed location name, 1..=100 characters
pub fn validate_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(AppError::new(ErrorCode::LocationNameInvalid));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Dock 4 ").unwrap(), "Dock 4");
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
        assert!(validate_name(&"x".repeat(100)).is_ok());
    }
}
