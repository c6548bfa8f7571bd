use regex::Regex;
use std::sync::OnceLock;

use super::models::Credentials;
use crate::common::{ValidationResult, Validator};

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Mirrors the form's `required` / `type="email"` checks. Password length is
/// left to the auth service.
pub struct CredentialsValidator;

impl Validator<Credentials> for CredentialsValidator {
    fn validate(&self, data: &Credentials) -> ValidationResult {
        let mut result = ValidationResult::new();

        let email = data.email.trim();
        if email.is_empty() {
            result.add_error("email", "Email is required");
        } else if !email_pattern().is_match(email) {
            result.add_error("email", "Enter a valid email address");
        }

        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        }

        result
    }
}
