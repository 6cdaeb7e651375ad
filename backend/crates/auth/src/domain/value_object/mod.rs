//! Value Objects

pub mod email;
pub mod otp_code;
pub mod user_role;
pub mod username;

pub use email::Email;
pub use otp_code::OtpCode;
pub use user_role::UserRole;
pub use username::Username;
