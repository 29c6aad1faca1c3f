//! HTTP server for DeltaVision.
//!
//! Mirrors the SDK operations as a JSON API so the viewer can be used from
//! a browser on another machine.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::DvServer;
pub use state::AppState;
