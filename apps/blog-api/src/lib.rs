//! # Blogpost API Server
//!
//! HTTP layer over the blog post store: routes, error mapping, and the
//! startup/shutdown lifecycle.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use server::{RunningServer, ServerError, run_server, start_server};
pub use state::AppState;
