// Helper functions for safe logging and display names

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 && !parts[0].is_empty() {
            let first = parts[0].chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, parts[1])
        } else {
            "***@***.***".to_string()
        }
    } else {
        "***@***.***".to_string()
    }
}

/// Name shown for a collector on the leaderboard: the email local part
pub fn display_name_from_email(email: &str) -> String {
    match email.split('@').next() {
        Some(local) if !local.trim().is_empty() => local.trim().to_string(),
        _ => "you".to_string(),
    }
}
