//! Local HTTP API for the Velix frontend.
//!
//! Routes are nested under `/api/` and wrap `CoreState`. The router is
//! composable: `local_api_router()` returns a `Router` that can be
//! mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::local_api_router;
pub use server::{start_local_api_server, LocalApiServer, LocalApiSession};
pub use types::ApiContext;
