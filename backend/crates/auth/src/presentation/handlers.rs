//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::CookieConfig;
use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckEmailUseCase, RegisterInput, RegisterUseCase, SendVerificationUseCase, SignInInput,
    SignInUseCase, VerifyOtpUseCase, authenticate_request,
};
use crate::domain::repository::{UserRepository, VerificationTokenRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    CheckEmailRequest, CheckEmailResponse, MessageResponse, RegisterRequest, RegisterResponse,
    SendVerificationRequest, SessionResponse, SignInRequest, SignInResponse, UserSummary,
    VerifyOtpRequest,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

impl<R, M> Clone for AuthAppState<R, M>
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id,
            username: output.username,
            email: output.email,
            name: output.display_name,
            avatar_url: output.avatar_url,
        }),
    ))
}

// ============================================================================
// Email Verification
// ============================================================================

/// POST /api/auth/send-verification
pub async fn send_verification<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SendVerificationRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case =
        SendVerificationUseCase::new(state.repo.clone(), state.repo.clone(), state.mailer.clone());

    use_case.execute(req.email).await?;

    Ok(Json(MessageResponse::new("Verification code sent")))
}

/// POST /api/auth/verify-otp
pub async fn verify_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = VerifyOtpUseCase::new(state.repo.clone(), state.repo.clone());

    use_case.execute(req.email, req.otp).await?;

    Ok(Json(MessageResponse::new("Email verified")))
}

/// POST /api/auth/check-email
pub async fn check_email<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<CheckEmailRequest>,
) -> AuthResult<Json<CheckEmailResponse>>
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = CheckEmailUseCase::new(state.repo.clone());

    let output = use_case.execute(req.email).await?;

    Ok(Json(CheckEmailResponse {
        email: output.email,
        username: output.username,
        verified: output.verified,
    }))
}

// ============================================================================
// Sign In / Sign Out
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            identifier: req.identifier,
            password: req.password,
        })
        .await?;

    let cookie = session_cookie_config(&state.config).build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            token: output.session_token.clone(),
            user: UserSummary {
                id: output.user_id,
                username: output.username,
                email: output.email,
                role: output.role,
                avatar_url: output.avatar_url,
            },
        }),
    ))
}

/// POST /api/auth/signout
///
/// Sessions are stateless, so signing out just clears the cookie.
pub async fn sign_out<R, M>(
    State(state): State<AuthAppState<R, M>>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let cookie = session_cookie_config(&state.config).build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionResponse>>
where
    R: UserRepository + VerificationTokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let claims = authenticate_request(&headers, &state.config)?;

    Ok(Json(SessionResponse {
        user_id: claims.sub.to_string(),
        username: claims.username,
        role: claims.role.code().to_string(),
        expires_at: claims.exp,
    }))
}

fn session_cookie_config(config: &AuthConfig) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.session_ttl_secs()),
    }
}
