//! Middleware function driving the gate for one request.
//!
//! The gate only computes an [`Outcome`](crate::Outcome). This module is the
//! thin layer that applies it to a request:
//!
//! ```text
//! HTTP Request
//!   ↓
//! Framework-specific code builds RequestAdapter
//!   ↓
//! authenticate(&mut adapter, &gate)
//!   ↓
//! Proceed (remote_user recorded)  |  Halt(Response) → host sends it as-is
//! ```

use crate::error::Error;
use crate::gate::AuthGate;
use crate::outcome::{Outcome, Response};

use super::{ExtractAuthorization, RequestAdapter};

/// What the host pipeline should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Continue to downstream handlers.
    Proceed,
    /// Stop processing and send this response.
    ///
    /// The response is owned by the host, which may rewrite its body with
    /// request data before sending it.
    Halt(Response),
}

impl GateDecision {
    /// Whether the request may continue.
    pub fn is_proceed(&self) -> bool {
        matches!(self, GateDecision::Proceed)
    }
}

/// Authenticates a request and applies the outcome to it.
///
/// On success the principal is recorded with
/// [`RequestAdapter::set_remote_user`] and [`GateDecision::Proceed`] is
/// returned. Otherwise the adapter is left untouched and the terminal
/// response is returned in [`GateDecision::Halt`]. Every call emits one
/// audit record.
///
/// # Errors
///
/// Returns [`Error::MissingVerifier`] if the gate has no verifier.
///
/// # Examples
///
/// ```
/// use http_auth_gate::web::{authenticate, GateDecision, RequestAdapter};
/// use http_auth_gate::{verify_basic, AuthGate, Config};
///
/// let config = Config::default();
/// let gate = AuthGate::new(&config).verifier(verify_basic(|u, p| u == "foo" && p == "bar"));
///
/// let mut adapter = RequestAdapter::new("req-1".to_string());
/// adapter.add_header("Authorization".to_string(), "Basic Zm9vOmJhcg==".to_string());
///
/// assert_eq!(authenticate(&mut adapter, &gate).unwrap(), GateDecision::Proceed);
/// assert_eq!(adapter.remote_user(), Some("foo"));
/// ```
pub fn authenticate(
    adapter: &mut RequestAdapter,
    gate: &AuthGate<'_>,
) -> Result<GateDecision, Error> {
    let (outcome, event) = gate.evaluate_event(adapter.authorization(), adapter.request_id())?;
    event.emit();

    if let Outcome::Authenticated { principal } = &outcome {
        adapter.set_remote_user(principal.clone());
    }

    Ok(outcome
        .into_response()
        .map_or(GateDecision::Proceed, GateDecision::Halt))
}
