//! Presentation Layer (HTTP)

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{auth_router, auth_router_generic};
