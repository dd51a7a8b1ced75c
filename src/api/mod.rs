//! HTTP API exposing the FAQ engine
//!
//! Thin transport glue: request parsing, response shaping and status codes.
//! All decisions live in [`crate::faq::FaqService`]. Webhook signature
//! verification belongs to the upstream chat platform integration and is
//! deliberately absent here.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use server::serve_api;
