//! Application Layer
//!
//! Use cases orchestrating domain objects and repositories.

pub mod check_email;
pub mod config;
pub mod register;
pub mod send_verification;
pub mod session_token;
pub mod sign_in;
pub mod verify_otp;

pub use check_email::{CheckEmailOutput, CheckEmailUseCase};
pub use config::AuthConfig;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use send_verification::SendVerificationUseCase;
pub use session_token::{authenticate_request, SessionClaims};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use verify_otp::VerifyOtpUseCase;
