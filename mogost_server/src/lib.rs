//! HTTP server for the Mogost toolkit.
//!
//! Uploads are parsed in memory and answered in the same response; nothing
//! is written to disk.

pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod upload;

pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::MogostServer;
pub use state::AppState;
