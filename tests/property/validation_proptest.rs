//! Property-based tests for request field validation

use proptest::prelude::*;
use youter::shared::validation::{
    is_valid_email, optional, password, required, required_secret, MAX_PASSWORD_BYTES,
};

proptest! {
    #[test]
    fn test_required_trims(value in "[ \t]{0,3}[a-z0-9]{1,20}[ \t]{0,3}") {
        let cleaned = required(Some(&value), "field", "field is required").unwrap();
        prop_assert_eq!(cleaned, value.trim());
    }

    #[test]
    fn test_blank_is_missing(value in "[ \t\n]{0,8}") {
        prop_assert!(required(Some(&value), "field", "field is required").is_err());
        prop_assert!(required_secret(Some(&value), "password", "password is required").is_err());
        prop_assert!(optional(Some(&value)).is_none());
    }

    #[test]
    fn test_secret_kept_verbatim(value in " {0,2}[a-zA-Z0-9!?]{1,16} {0,2}") {
        let secret = required_secret(Some(&value), "password", "password is required").unwrap();
        prop_assert_eq!(secret, value);
    }

    #[test]
    fn test_well_formed_emails(local in "[a-z0-9._]{1,12}", domain in "[a-z0-9]{1,12}", tld in "[a-z]{2,6}") {
        let email = format!("{local}@{domain}.{tld}");
        let missing_at = format!("{local}{domain}.{tld}");
        let missing_dot = format!("{local}@{domain}");
        prop_assert!(is_valid_email(&email));
        prop_assert!(!is_valid_email(&missing_at));
        prop_assert!(!is_valid_email(&missing_dot));
    }

    #[test]
    fn test_password_limit_counts_bytes(value in "[a-zA-Zé€ ]{1,60}") {
        let result = password(Some(&value), "password", "password is required");
        if value.trim().is_empty() {
            prop_assert!(result.is_err());
        } else {
            prop_assert_eq!(result.is_ok(), value.len() <= MAX_PASSWORD_BYTES);
        }
    }
}
