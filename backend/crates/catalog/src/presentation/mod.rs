//! Presentation Layer (HTTP)

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{catalog_router, catalog_router_generic};
