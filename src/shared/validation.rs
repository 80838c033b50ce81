use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for calendar date strings as stored on entries (YYYY-MM-DD)
    /// - Valid: "2024-01-03", "1999-12-31"
    /// - Invalid: "2024-1-3", "2024/01/03", "01-03-2024"
    pub static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_regex_valid() {
        assert!(DATE_REGEX.is_match("2024-01-03"));
        assert!(DATE_REGEX.is_match("1999-12-31"));
        assert!(DATE_REGEX.is_match("2026-08-28"));
    }

    #[test]
    fn test_date_regex_invalid() {
        assert!(!DATE_REGEX.is_match("2024-1-3")); // unpadded
        assert!(!DATE_REGEX.is_match("2024/01/03")); // wrong separator
        assert!(!DATE_REGEX.is_match("01-03-2024")); // wrong order
        assert!(!DATE_REGEX.is_match("2024-01-03T00:00:00Z")); // timestamp
        assert!(!DATE_REGEX.is_match("")); // empty
    }
}
