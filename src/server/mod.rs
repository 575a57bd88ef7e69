//! HTTP adapter between the messaging platform gateway and the dispatcher.

pub mod dto;
mod handlers;
pub mod response;
mod router;

pub use router::{AppState, create_router};
