use crate::utils::error::{CookbookError, Result};
use std::net::SocketAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_bind_address(field_name: &str, addr: &str) -> Result<SocketAddr> {
    if addr.trim().is_empty() {
        return Err(CookbookError::ValidationError {
            field: field_name.to_string(),
            reason: "Address cannot be empty".to_string(),
        });
    }

    addr.parse::<SocketAddr>()
        .map_err(|e| CookbookError::ValidationError {
            field: field_name.to_string(),
            reason: format!("Invalid socket address '{}': {}", addr, e),
        })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CookbookError::ValidationError {
            field: field_name.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CookbookError::ValidationError {
            field: field_name.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CookbookError::MissingField {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CookbookError::ValidationError {
            field: field_name.to_string(),
            reason: format!("Value {} must be between {} and {}", value, min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bind_address() {
        assert!(validate_bind_address("server.bind", "127.0.0.1:8080").is_ok());
        assert!(validate_bind_address("server.bind", "[::1]:3000").is_ok());
        assert!(validate_bind_address("server.bind", "").is_err());
        assert!(validate_bind_address("server.bind", "localhost").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("cookbook", "cookbook.toml").is_ok());
        assert!(validate_path("cookbook", "").is_err());
        assert!(validate_path("cookbook", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        let absent: Option<i64> = None;
        assert_eq!(*validate_required_field("cookTime", &present).unwrap(), 3);
        assert!(matches!(
            validate_required_field("cookTime", &absent),
            Err(CookbookError::MissingField { field }) if field == "cookTime"
        ));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("resolver.max_depth", 10usize, 1, 4096).is_ok());
        assert!(validate_range("resolver.max_depth", 5000usize, 1, 4096).is_err());
    }
}
