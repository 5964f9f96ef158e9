//! Field-level request checks shared by the document services.
//! Every failure is an `AppError::Validation` naming the offending field.

use crate::errors::AppError;

/// Returns the trimmed value, or a validation error if it is missing or blank.
pub fn require(field: &str, value: Option<&str>) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// Trims a supplied value; blank input becomes `None`.
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn max_chars_opt(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    value.map_or(Ok(()), |v| max_chars(field, v, max))
}

/// Trims every item, drops blanks, and checks each remaining item's length.
pub fn clean_list(field: &str, items: Vec<String>, max: usize) -> Result<Vec<String>, AppError> {
    let cleaned: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    for item in &cleaned {
        max_chars(field, item, max)?;
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert!(matches!(
            require("personaName", Some("   ")),
            Err(AppError::Validation(msg)) if msg == "personaName is required"
        ));
        assert!(require("personaName", None).is_err());
        assert_eq!(require("personaName", Some(" Ada ")).unwrap(), "Ada");
    }

    #[test]
    fn test_max_chars_counts_characters_not_bytes() {
        assert!(max_chars("title", "ééé", 3).is_ok());
        assert!(max_chars("title", "éééé", 3).is_err());
    }

    #[test]
    fn test_clean_list_drops_blanks_and_checks_items() {
        let cleaned = clean_list("keySkills", vec![" Rust ".into(), "".into()], 10).unwrap();
        assert_eq!(cleaned, vec!["Rust"]);
        assert!(clean_list("keySkills", vec!["x".repeat(11)], 10).is_err());
    }
}
