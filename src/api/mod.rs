//! API Module
//!
//! This module exposes the asserter over JSON-RPC so that node
//! implementations and clients written in any language can have their
//! request and response bodies checked.

mod server;
pub use server::{AppState, Server};

use crate::asserter::{AsserterError, ErrorKind};
use serde::Serialize;

/// Outcome of validating one body.
///
/// Serializes as `{"status": "Accepted"}` or
/// `{"status": "Rejected", "kind": ..., "reason": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum Verdict {
    Accepted,
    Rejected { kind: ErrorKind, reason: String },
}

impl From<AsserterError> for Verdict {
    fn from(err: AsserterError) -> Self {
        Verdict::Rejected {
            kind: err.kind(),
            reason: err.to_string(),
        }
    }
}

impl From<Result<(), AsserterError>> for Verdict {
    fn from(result: Result<(), AsserterError>) -> Self {
        match result {
            Ok(()) => Verdict::Accepted,
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verdict_wire_shape() {
        assert_eq!(
            serde_json::to_value(Verdict::Accepted).unwrap(),
            json!({ "status": "Accepted" })
        );

        let rejected = Verdict::from(AsserterError::HistoricalBalanceLookupNotSupported);
        assert_eq!(
            serde_json::to_value(rejected).unwrap(),
            json!({
                "status": "Rejected",
                "kind": "UnsupportedFeature",
                "reason": "historical balance lookup is not supported"
            })
        );
    }

    #[test]
    fn test_verdict_from_result() {
        assert_eq!(Verdict::from(Ok(())), Verdict::Accepted);
        assert!(matches!(
            Verdict::from(Err(AsserterError::AsserterNotInitialized)),
            Verdict::Rejected {
                kind: ErrorKind::UninitializedAsserter,
                ..
            }
        ));
    }
}
