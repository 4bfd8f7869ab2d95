//! Core server components: configuration, shared state, HTTP lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, build_app, build_router};
pub use state::ServerState;
