// src/common/dev_mode.rs
//! Development mode configuration and utilities
//! Allows bypassing the external auth service when working locally

use std::env;

use crate::auth::AuthedUser;

#[derive(Debug, Clone)]
pub struct DevModeConfig {
    pub enabled: bool,
    pub user_id: String,
    pub user_email: String,
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("DEV_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        let user_id = env::var("DEV_USER_ID")
            .unwrap_or_else(|_| "00000000-0000-0000-0000-000000000001".to_string());

        let user_email =
            env::var("DEV_USER_EMAIL").unwrap_or_else(|_| "dev@archy.local".to_string());

        Self {
            enabled,
            user_id,
            user_email,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Session used for every request while dev mode is on
    pub fn create_dev_user(&self) -> AuthedUser {
        AuthedUser {
            id: self.user_id.clone(),
            email: self.user_email.clone(),
            access_token: None,
        }
    }
}

/// Print dev mode status on startup
pub fn print_dev_mode_status(config: &DevModeConfig) {
    if config.enabled {
        println!("⚠️  🔓 DEV MODE ENABLED 🔓 ⚠️");
        println!("   Authentication bypassed for testing");
        println!("   Dev User: {} ({})", config.user_id, config.user_email);
        println!("   ⚠️  DO NOT USE IN PRODUCTION ⚠️");
        println!();
    } else {
        println!("🔒 Production mode - Authentication required");
    }
}

/// CLI argument parsing for dev mode
pub fn parse_dev_mode_args<I>(args: I) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "--dev" | "--dev-mode" => return Some(true),
            "--no-dev" | "--prod" | "--production" => return Some(false),
            _ => {}
        }
    }

    None
}

/// Override dev mode from CLI args
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(cli_dev_mode) = parse_dev_mode_args(env::args()) {
        println!("🔧 CLI override: DEV_MODE = {}", cli_dev_mode);
        config.enabled = cli_dev_mode;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_mode_config_defaults() {
        let original_dev_mode = env::var("DEV_MODE").ok();

        env::remove_var("DEV_MODE");

        let config = DevModeConfig::from_env();
        assert!(!config.enabled, "Dev mode should be disabled by default");

        if let Some(val) = original_dev_mode {
            env::set_var("DEV_MODE", val);
        }
    }

    #[test]
    fn test_cli_flags() {
        let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(parse_dev_mode_args(args(&["archy", "--dev"])), Some(true));
        assert_eq!(parse_dev_mode_args(args(&["archy", "--prod"])), Some(false));
        assert_eq!(parse_dev_mode_args(args(&["archy"])), None);
    }

    #[test]
    fn test_dev_user_has_no_backend_token() {
        let config = DevModeConfig {
            enabled: true,
            user_id: "dev-1".to_string(),
            user_email: "dev@archy.local".to_string(),
        };
        let user = config.create_dev_user();
        assert_eq!(user.id, "dev-1");
        assert!(user.access_token.is_none());
    }
}
