// Validation utilities module
// Provides input predicates, formatters, and custom validator hooks used at
// the schema boundaries

use std::sync::OnceLock;

use regex::Regex;
use validator::ValidationError;

use crate::config::{FOOD_TAGS, MAX_REVIEW_PHOTOS};

/// Validates an Israeli phone number.
///
/// Formatting characters are stripped first; the number is valid iff the
/// remaining digit count is 9 (landline) or 10 (mobile) and the first digit
/// is `0`.
pub fn is_valid_israeli_phone(phone: &str) -> bool {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if cleaned.len() < 9 || cleaned.len() > 10 {
        return false;
    }

    cleaned.starts_with('0')
}

/// Formats an Israeli phone number for display.
///
/// 10-digit numbers render as `XXX-XXX-XXXX`, 9-digit numbers as
/// `XX-XXX-XXXX`; anything else is returned unchanged rather than rejected.
pub fn format_israeli_phone(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match cleaned.len() {
        10 => format!("{}-{}-{}", &cleaned[0..3], &cleaned[3..6], &cleaned[6..]),
        9 => format!("{}-{}-{}", &cleaned[0..2], &cleaned[2..5], &cleaned[5..]),
        _ => phone.to_string(),
    }
}

/// Conservative email predicate for UI-level gating.
///
/// Deliberately not RFC-complete; the persistence provider remains the
/// system of record for addresses.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    });
    re.is_match(email)
}

/// Escapes HTML-sensitive characters in user input.
///
/// A defensive transform only; storage access stays parameterized regardless.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Custom validator: prices must be strictly positive.
pub fn validate_positive_price(price: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if *price <= rust_decimal::Decimal::ZERO {
        let mut err = ValidationError::new("price_must_be_positive");
        err.message = Some("Price must be positive".into());
        return Err(err);
    }
    Ok(())
}

/// Custom validator: every tag must come from the fixed dietary vocabulary.
pub fn validate_food_tags(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        if !FOOD_TAGS.contains(&tag.as_str()) {
            let mut err = ValidationError::new("unknown_food_tag");
            err.message = Some(format!("Unknown dietary tag '{}'", tag).into());
            return Err(err);
        }
    }
    Ok(())
}

/// Custom validator: at most three photos, each a well-formed URL.
pub fn validate_photo_urls(urls: &[String]) -> Result<(), ValidationError> {
    if urls.len() > MAX_REVIEW_PHOTOS {
        let mut err = ValidationError::new("too_many_photos");
        err.message = Some(format!("Maximum {} photos allowed", MAX_REVIEW_PHOTOS).into());
        return Err(err);
    }

    for url in urls {
        if !validator::validate_url(url) {
            let mut err = ValidationError::new("invalid_photo_url");
            err.message = Some(format!("'{}' is not a valid URL", url).into());
            return Err(err);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mobile_phone() {
        assert!(is_valid_israeli_phone("050-123-4567"));
        assert!(is_valid_israeli_phone("0501234567"));
    }

    #[test]
    fn test_valid_landline_phone() {
        assert!(is_valid_israeli_phone("03-123-4567"));
        assert!(is_valid_israeli_phone("031234567"));
    }

    #[test]
    fn test_phone_too_short_rejected() {
        assert!(!is_valid_israeli_phone("1234"));
        assert!(!is_valid_israeli_phone("0"));
    }

    #[test]
    fn test_phone_too_long_rejected() {
        assert!(!is_valid_israeli_phone("05012345678"));
    }

    #[test]
    fn test_phone_without_leading_zero_rejected() {
        assert!(!is_valid_israeli_phone("501234567"));
        assert!(!is_valid_israeli_phone("5012345678"));
    }

    #[test]
    fn test_format_mobile_phone() {
        assert_eq!(format_israeli_phone("0501234567"), "050-123-4567");
        // Already-formatted input is normalized through the same path
        assert_eq!(format_israeli_phone("050-123-4567"), "050-123-4567");
    }

    #[test]
    fn test_format_landline_phone() {
        assert_eq!(format_israeli_phone("031234567"), "03-123-4567");
    }

    #[test]
    fn test_format_passes_through_unexpected_lengths() {
        assert_eq!(format_israeli_phone("1234"), "1234");
        assert_eq!(format_israeli_phone(""), "");
    }

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.co.il"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user @example.com"));
        assert!(!is_valid_email("user@@example.com"));
    }

    #[test]
    fn test_sanitize_escapes_html_characters() {
        assert_eq!(
            sanitize_input("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
        );
        assert_eq!(sanitize_input("a \"b\" c"), "a &quot;b&quot; c");
    }

    #[test]
    fn test_sanitize_leaves_plain_text_alone() {
        assert_eq!(sanitize_input("shawarma & pita"), "shawarma & pita");
    }

    #[test]
    fn test_food_tags_accept_vocabulary() {
        let tags = vec!["vegan".to_string(), "kosher".to_string()];
        assert!(validate_food_tags(&tags).is_ok());
    }

    #[test]
    fn test_food_tags_reject_unknown() {
        let tags = vec!["spicy".to_string()];
        assert!(validate_food_tags(&tags).is_err());
    }

    #[test]
    fn test_photo_urls_limit() {
        let urls: Vec<String> = (0..4).map(|i| format!("https://cdn.example.com/{}.jpg", i)).collect();
        assert!(validate_photo_urls(&urls).is_err());
        assert!(validate_photo_urls(&urls[..3]).is_ok());
    }

    #[test]
    fn test_photo_urls_must_be_well_formed() {
        let urls = vec!["not a url".to_string()];
        assert!(validate_photo_urls(&urls).is_err());
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// Every accepted phone number strips to 9 or 10 digits starting
        /// with 0; every rejected one violates at least one of those rules.
        #[test]
        fn prop_phone_predicate_matches_its_definition() {
            proptest!(|(phone in "[0-9 ()-]{0,14}")| {
                let cleaned: String =
                    phone.chars().filter(|c| c.is_ascii_digit()).collect();
                let expected = (cleaned.len() == 9 || cleaned.len() == 10)
                    && cleaned.starts_with('0');
                prop_assert_eq!(is_valid_israeli_phone(&phone), expected);
            });
        }

        /// Formatting never changes the digits of the number.
        #[test]
        fn prop_format_preserves_digits() {
            proptest!(|(phone in "0[0-9]{8,9}")| {
                let formatted = format_israeli_phone(&phone);
                let digits: String =
                    formatted.chars().filter(|c| c.is_ascii_digit()).collect();
                prop_assert_eq!(digits, phone);
            });
        }

        /// Sanitized output never contains a raw escaped character.
        #[test]
        fn prop_sanitize_removes_all_targets() {
            proptest!(|(input in ".{0,64}")| {
                let out = sanitize_input(&input);
                prop_assert!(!out.contains('<'));
                prop_assert!(!out.contains('>'));
                prop_assert!(!out.contains('"'));
                prop_assert!(!out.contains('\''));
                prop_assert!(!out.contains('/'));
            });
        }
    }
}
