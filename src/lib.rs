//! This crate validates the request and response bodies exchanged with a
//! blockchain node's data and construction APIs. It includes modules for the
//! decoded data model, the validation engine, endpoint dispatch, a JSON-RPC
//! validation service, and configuration.

pub mod types; // Decoded request/response bodies and the objects inside them.
pub mod asserter; // The validation engine.
pub mod endpoint; // Closed set of endpoints and per-endpoint dispatch.
pub mod api; // JSON-RPC service exposing the asserter.
pub mod config; // Defines and loads service configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use asserter::{Asserter, AsserterError, ErrorKind};
pub use endpoint::{Endpoint, Request, Response};
pub use config::Config;
