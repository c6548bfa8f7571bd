//! Authentication data models

use serde::{Deserialize, Serialize};

/// Passwords shorter than this get a hint on the sign-up form. The external
/// auth service decides whether to actually reject them.
pub const MIN_PASSWORD_HINT_LEN: usize = 6;

pub const SIGN_UP_CONFIRMATION: &str = "Check your email for the confirmation link!";

/// JWT claims structure issued by the auth service
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
}

/// Email + password submitted by the credential form
#[derive(Deserialize, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The signed-in identity. Only `id` and `email` are ever used.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}

#[derive(Serialize, Debug)]
pub struct SignInResponse {
    pub access_token: String,
    pub user: SessionUser,
    /// Number of persisted spots loaded for the session, when loading succeeded
    pub spots_loaded: Option<usize>,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Deserialize, Debug)]
pub struct AuthFormQuery {
    #[serde(default)]
    pub mode: AuthMode,
}

/// What the credential form shows in each mode
#[derive(Serialize, Debug)]
pub struct AuthFormView {
    pub mode: AuthMode,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub password_hint: Option<String>,
    pub submit_label: &'static str,
    pub toggle_label: &'static str,
}

impl AuthFormView {
    pub fn for_mode(mode: AuthMode) -> Self {
        match mode {
            AuthMode::SignIn => Self {
                mode,
                title: "Archy",
                subtitle: "Sign in to access your collection",
                password_hint: None,
                submit_label: "Sign In",
                toggle_label: "Don't have an account? Sign up",
            },
            AuthMode::SignUp => Self {
                mode,
                title: "Archy",
                subtitle: "Create an account to save your spots",
                password_hint: Some(format!("Minimum {} characters", MIN_PASSWORD_HINT_LEN)),
                submit_label: "Sign Up",
                toggle_label: "Already have an account? Sign in",
            },
        }
    }
}
