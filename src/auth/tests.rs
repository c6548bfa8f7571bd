//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - JWT token validation
//! - Session resolution through the auth backend
//! - Credential form and handlers

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::{ApiError, Validator};
    use crate::events::AppEvent;
    use crate::test_support::{spot, FakeAuthBackend, MemorySpotRepository, TestStateBuilder};
    use axum::extract::{Extension, Json};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use std::sync::Arc;

    fn token_for(sub: &str, email: Option<&str>, secret: &str, exp: usize) -> String {
        let claims = models::Claims {
            sub: sub.to_string(),
            email: email.map(str::to_string),
            exp,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    fn credentials(email: &str, password: &str) -> models::Credentials {
        models::Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn backend() -> Arc<FakeAuthBackend> {
        Arc::new(FakeAuthBackend::default().with_account("user-1", "maya@archy.app", "hunter22"))
    }

    #[test]
    fn test_jwt_validation_accepts_valid_token() {
        let token = token_for("user-123", Some("maya@archy.app"), "test_secret_key", 9999999999);
        let claims = extractors::validate_jwt(&token, "test_secret_key").expect("valid token");
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email.as_deref(), Some("maya@archy.app"));
    }

    #[test]
    fn test_jwt_validation_fails_with_wrong_secret() {
        let token = token_for("user-123", None, "test_secret_key", 9999999999);
        let result = extractors::validate_jwt(&token, "wrong_secret_key");
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_fails() {
        let token = token_for("user-123", None, "test_secret_key", 1000000000);
        assert!(extractors::validate_jwt(&token, "test_secret_key").is_err());
    }

    #[tokio::test]
    async fn test_resolve_session_with_local_secret() {
        let state = TestStateBuilder::new()
            .config(|c| c.auth_jwt_secret = Some("shared".to_string()))
            .build();
        let token = token_for("user-9", Some("theo@archy.app"), "shared", 9999999999);

        let user = extractors::resolve_session(&state, &token)
            .await
            .expect("session");
        assert_eq!(user.id, "user-9");
        assert_eq!(user.email, "theo@archy.app");
        assert_eq!(user.access_token.as_deref(), Some(token.as_str()));
    }

    #[tokio::test]
    async fn test_resolve_session_through_backend() {
        let state = TestStateBuilder::new().auth_backend(backend()).build();

        let user = extractors::resolve_session(&state, "token-user-1")
            .await
            .expect("session");
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "maya@archy.app");

        let err = extractors::resolve_session(&state, "token-nobody")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_credentials_validator() {
        let validator = validators::CredentialsValidator;

        let ok = validator.validate(&credentials("maya@archy.app", "x"));
        assert!(ok.is_valid);

        let missing = validator.validate(&credentials("  ", ""));
        assert!(missing.has_error("email"));
        assert!(missing.has_error("password"));

        let malformed = validator.validate(&credentials("maya.archy.app", "secret"));
        assert!(malformed.has_error("email"));
    }

    #[test]
    fn test_password_hint_only_in_sign_up_mode() {
        let sign_in = models::AuthFormView::for_mode(models::AuthMode::SignIn);
        assert!(sign_in.password_hint.is_none());
        assert_eq!(sign_in.submit_label, "Sign In");

        let sign_up = models::AuthFormView::for_mode(models::AuthMode::SignUp);
        assert_eq!(sign_up.password_hint.as_deref(), Some("Minimum 6 characters"));
        assert_eq!(sign_up.submit_label, "Sign Up");
    }

    #[tokio::test]
    async fn test_sign_in_loads_spots_and_publishes_session() {
        let repository = Arc::new(MemorySpotRepository::with_spots(vec![
            spot("2", "user-1", "Barbican Estate", "Brutalist", None),
            spot("1", "user-1", "St Paul's Cathedral", "Baroque", None),
            spot("3", "someone-else", "Shard", "Contemporary", None),
        ]));
        let state = TestStateBuilder::new()
            .auth_backend(backend())
            .repository(repository)
            .build_locked();
        let mut events = state.read().await.events.subscribe();

        let Json(response) = handlers::sign_in(
            Extension(state.clone()),
            Json(credentials("maya@archy.app", "hunter22")),
        )
        .await
        .expect("sign in");

        assert_eq!(response.access_token, "token-user-1");
        assert_eq!(response.user.id, "user-1");
        assert_eq!(response.spots_loaded, Some(2));
        assert_eq!(
            events.recv().await.expect("event"),
            AppEvent::SessionChanged {
                user_id: "user-1".to_string(),
                signed_in: true,
            }
        );
    }

    #[tokio::test]
    async fn test_sign_in_rejection_message_is_verbatim() {
        let state = TestStateBuilder::new().auth_backend(backend()).build_locked();

        let err = handlers::sign_in(
            Extension(state),
            Json(credentials("maya@archy.app", "wrong")),
        )
        .await
        .unwrap_err();

        match err {
            ApiError::AuthFailed(message) => assert_eq!(message, "Invalid login credentials"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sign_in_survives_spot_load_failure() {
        let repository = Arc::new(MemorySpotRepository {
            fail_fetch: true,
            ..Default::default()
        });
        let state = TestStateBuilder::new()
            .auth_backend(backend())
            .repository(repository)
            .build_locked();

        let Json(response) = handlers::sign_in(
            Extension(state),
            Json(credentials("maya@archy.app", "hunter22")),
        )
        .await
        .expect("sign in still succeeds");
        assert_eq!(response.spots_loaded, None);
    }

    #[tokio::test]
    async fn test_sign_up_returns_confirmation() {
        let state = TestStateBuilder::new().auth_backend(backend()).build_locked();

        let Json(response) = handlers::sign_up(
            Extension(state.clone()),
            Json(credentials("new@archy.app", "longenough")),
        )
        .await
        .expect("sign up");
        assert_eq!(response.message, models::SIGN_UP_CONFIRMATION);

        let err = handlers::sign_up(
            Extension(state),
            Json(credentials("maya@archy.app", "longenough")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::AuthFailed(m) if m == "User already registered"));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_malformed_email_before_backend() {
        let state = TestStateBuilder::new().auth_backend(backend()).build_locked();

        let err = handlers::sign_up(Extension(state), Json(credentials("nope", "longenough")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_sign_out_forgets_collection() {
        let repository = Arc::new(MemorySpotRepository::with_spots(vec![spot(
            "1",
            "user-1",
            "Barbican Estate",
            "Brutalist",
            None,
        )]));
        let state = TestStateBuilder::new()
            .auth_backend(backend())
            .repository(repository)
            .build_locked();
        let user = crate::test_support::user("user-1", "maya@archy.app");

        let store = state.read().await.spot_store.clone();
        store.load(&user).await.expect("load");
        assert!(store.list("user-1").await.is_some());

        handlers::sign_out(Extension(state), user)
            .await
            .expect("sign out");
        assert!(store.list("user-1").await.is_none());
    }
}
