//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid
//! values.

use crate::domain::Category;

/// Validate and normalize a title argument.
pub fn validate_title(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Title cannot be empty".to_string());
    }

    if s.contains('\n') || s.contains('\r') {
        return Err("Title cannot contain newline characters".to_string());
    }

    Ok(s.to_string())
}

/// Validate and normalize a description argument.
pub fn validate_description(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Description cannot be empty".to_string());
    }

    Ok(s.to_string())
}

/// Parse a category literal.
///
/// The accepted values are the exact category names, e.g.
/// `"Road & Transportation"`.
pub fn parse_category(s: &str) -> Result<Category, String> {
    s.trim().parse::<Category>().map_err(|e| {
        let known = Category::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{e}. Known categories: {known}")
    })
}

/// Validate an email used to name an acting identity.
pub fn validate_email(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let Some((local, domain)) = s.split_once('@') else {
        return Err(format!("'{s}' is not an email address"));
    };

    if local.is_empty() || domain.is_empty() {
        return Err(format!("'{s}' is not an email address"));
    }

    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed() {
        assert_eq!(validate_title("  Pothole  ").unwrap(), "Pothole");
        assert!(validate_title("   ").is_err());
        assert!(validate_title("two\nlines").is_err());
    }

    #[test]
    fn category_parse_lists_known_values_on_error() {
        let err = parse_category("Sinkholes").unwrap_err();
        assert!(err.contains("Road & Transportation"));

        assert_eq!(
            parse_category(" Street Lighting ").unwrap(),
            Category::StreetLighting
        );
    }

    #[test]
    fn emails_need_a_local_part_and_domain() {
        assert!(validate_email("clerk@city.gov").is_ok());
        assert!(validate_email("clerk").is_err());
        assert!(validate_email("@city.gov").is_err());
        assert!(validate_email("clerk@").is_err());
    }
}
