//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::domain::repository::{UserRepository, VerificationTokenRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router<M>(repo: PgAuthRepository, mailer: M, config: AuthConfig) -> Router
where
    M: Mailer + Send + Sync + 'static,
{
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/send-verification", post(handlers::send_verification::<R, M>))
        .route("/verify-otp", post(handlers::verify_otp::<R, M>))
        .route("/check-email", post(handlers::check_email::<R, M>))
        .route("/signin", post(handlers::sign_in::<R, M>))
        .route("/signout", post(handlers::sign_out::<R, M>))
        .route("/status", get(handlers::session_status::<R, M>))
        .with_state(state)
}
