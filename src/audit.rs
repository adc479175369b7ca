//! Structured audit records for authentication decisions.
//!
//! One [`AuthEvent`] is produced per evaluation. It holds only metadata that
//! is safe to log: the request id, the lowercase scheme, the decision, a
//! short static reason, and the Basic username on success. Passwords, tokens
//! and raw header text never appear.

use std::fmt;

use crate::outcome::Outcome;

/// Tracing target used for audit records.
pub const AUDIT_TARGET: &str = "http_auth_gate::audit";

/// Decision recorded in an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// Credentials accepted
    Authenticated,
    /// Missing, not accepted, or rejected credentials
    Unauthorized,
    /// Unparsable header or failing verifier
    Malformed,
}

impl From<&Outcome> for AuditOutcome {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Authenticated { .. } => AuditOutcome::Authenticated,
            Outcome::Unauthorized { .. } => AuditOutcome::Unauthorized,
            Outcome::MalformedRequest { .. } => AuditOutcome::Malformed,
        }
    }
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::Authenticated => write!(f, "authenticated"),
            AuditOutcome::Unauthorized => write!(f, "unauthorized"),
            AuditOutcome::Malformed => write!(f, "malformed"),
        }
    }
}

/// An audit record for one evaluation.
///
/// # Example
///
/// ```
/// use http_auth_gate::{AuthGate, Config, verify_basic};
/// use http_auth_gate::audit::AuditOutcome;
///
/// let config = Config::default();
/// let gate = AuthGate::new(&config).verifier(verify_basic(|u, p| u == "foo" && p == "bar"));
///
/// let (_, event) = gate
///     .evaluate_event(Some("Basic Zm9vOmJhcg=="), "req-1")
///     .unwrap();
///
/// assert_eq!(event.request_id(), "req-1");
/// assert_eq!(event.scheme(), Some("basic"));
/// assert_eq!(event.outcome(), AuditOutcome::Authenticated);
/// assert_eq!(event.principal(), Some("foo"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEvent {
    request_id: String,
    scheme: Option<String>,
    outcome: AuditOutcome,
    reason: &'static str,
    principal: Option<String>,
}

impl AuthEvent {
    pub(crate) fn new(
        request_id: impl Into<String>,
        scheme: Option<String>,
        outcome: &Outcome,
        reason: &'static str,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            scheme,
            outcome: outcome.into(),
            reason,
            principal: outcome.principal().map(str::to_string),
        }
    }

    /// Returns the request identifier.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the lowercase scheme, if the header had one.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the decision.
    pub fn outcome(&self) -> AuditOutcome {
        self.outcome
    }

    /// Returns the short reason for the decision.
    pub fn reason(&self) -> &'static str {
        self.reason
    }

    /// Returns the authenticated principal.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    /// Emits the event through tracing with structured fields.
    pub fn emit(&self) {
        tracing::info!(
            target: AUDIT_TARGET,
            request_id = %self.request_id,
            scheme = ?self.scheme,
            outcome = %self.outcome,
            reason = self.reason,
            principal = ?self.principal,
            "authentication decision"
        );
    }
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({})",
            self.request_id, self.outcome, self.reason
        )?;
        if let Some(scheme) = &self.scheme {
            write!(f, " scheme={}", scheme)?;
        }
        if let Some(principal) = &self.principal {
            write!(f, " principal={}", principal)?;
        }
        Ok(())
    }
}
