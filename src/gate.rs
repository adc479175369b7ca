use std::sync::Arc;

use crate::{
    audit::AuthEvent,
    config::{Config, ConfigOverrides},
    error::{Error, ExtractionError},
    extract::{classify, extract_credentials},
    outcome::Outcome,
    verifier::Verifier,
};

/// The authentication gate.
///
/// `AuthGate` binds a base [`Config`] to optional per-route overrides and a
/// call-site verifier, then evaluates requests one at a time. It holds no
/// mutable state and can be shared across threads.
///
/// # Examples
///
/// ```
/// use http_auth_gate::{AuthGate, Config, ConfigOverrides, Outcome, verify_basic};
///
/// let config = Config::default();
///
/// let gate = AuthGate::new(&config)
///     .with(ConfigOverrides::new().realm("Admin"))
///     .verifier(verify_basic(|u, p| u == "foo" && p == "bar"));
///
/// let outcome = gate.evaluate(Some("Basic Zm9vOmJhcg==")).expect("verifier configured");
/// assert_eq!(outcome, Outcome::Authenticated { principal: Some("foo".to_string()) });
///
/// let denied = gate.evaluate(None).unwrap();
/// assert_eq!(denied.status(), Some(401));
/// ```
#[derive(Clone)]
pub struct AuthGate<'a> {
    config: &'a Config,
    overrides: ConfigOverrides,
    verifier: Option<Arc<dyn Verifier>>,
}

impl<'a> AuthGate<'a> {
    /// Creates a gate over the given base configuration.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            overrides: ConfigOverrides::new(),
            verifier: None,
        }
    }

    /// Sets the per-call overrides merged over the base configuration.
    pub fn with(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Sets the call-site verifier. It takes precedence over any verifier
    /// in the overrides or the base configuration.
    pub fn verifier(mut self, verifier: impl Verifier + 'static) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    /// Sets the call-site verifier from an already shared handle.
    pub fn shared_verifier(mut self, verifier: Arc<dyn Verifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Returns the effective configuration for this gate.
    pub fn effective_config(&self) -> Config {
        self.config.merge(&self.overrides)
    }

    /// Evaluates a raw `Authorization` header value.
    ///
    /// Request problems never surface as errors: they become
    /// [`Outcome::Unauthorized`] or [`Outcome::MalformedRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVerifier`] if no verifier was configured
    /// anywhere.
    pub fn evaluate(&self, raw: Option<&str>) -> Result<Outcome, Error> {
        self.decide(raw).map(|decision| decision.outcome)
    }

    /// Evaluates a header and also returns the audit record for it.
    ///
    /// The record is returned, not emitted; call [`AuthEvent::emit`] to send
    /// it to the tracing subscriber.
    ///
    /// # Errors
    ///
    /// Same as [`evaluate`](Self::evaluate).
    pub fn evaluate_event(
        &self,
        raw: Option<&str>,
        request_id: &str,
    ) -> Result<(Outcome, AuthEvent), Error> {
        let Decision {
            outcome,
            scheme,
            reason,
        } = self.decide(raw)?;
        let event = AuthEvent::new(request_id, scheme, &outcome, reason);
        Ok((outcome, event))
    }

    fn decide(&self, raw: Option<&str>) -> Result<Decision, Error> {
        let config = self.effective_config();
        let verifier = self
            .verifier
            .clone()
            .or_else(|| config.verifier().cloned())
            .ok_or(Error::MissingVerifier)?;

        let (scheme, rest) = match classify(raw) {
            Ok(parts) => parts,
            Err(ExtractionError::NoHeader) => {
                return Ok(Decision::unauthorized(&config, None, "no credentials"));
            }
            Err(ExtractionError::Malformed { scheme, reason }) => {
                return Ok(Decision::malformed(&config, scheme, reason));
            }
        };

        if !config.accepts(&scheme) {
            return Ok(Decision::unauthorized(&config, Some(scheme), "scheme not accepted"));
        }

        let credentials = match extract_credentials(&scheme, rest) {
            Ok(credentials) => credentials,
            Err(err) => {
                let reason = match err {
                    ExtractionError::Malformed { reason, .. } => reason,
                    ExtractionError::NoHeader => "missing credentials",
                };
                return Ok(Decision::malformed(&config, Some(scheme), reason));
            }
        };

        let decision = match verifier.verify(&credentials) {
            Ok(true) => {
                tracing::debug!(scheme = %scheme, "credentials accepted");
                Decision {
                    outcome: Outcome::Authenticated {
                        principal: credentials.principal().map(str::to_string),
                    },
                    scheme: Some(scheme),
                    reason: "verified",
                }
            }
            Ok(false) => Decision::unauthorized(&config, Some(scheme), "verification failed"),
            Err(err) => {
                tracing::warn!(scheme = %scheme, error = %err, "verifier failed");
                Decision::malformed(&config, Some(scheme), "verifier error")
            }
        };

        Ok(decision)
    }
}

/// Evaluates a header against a configuration in one call.
///
/// Shorthand for `AuthGate::new(config).evaluate(raw)` with an optional
/// call-site verifier.
///
/// # Errors
///
/// Returns [`Error::MissingVerifier`] if neither `verifier` nor the
/// configuration supplies one.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use http_auth_gate::{evaluate, verify_bearer, Config, ConfigOverrides, Verifier};
///
/// let config = Config::default().configure(ConfigOverrides::new().schemes(["bearer"]));
/// let verifier: Arc<dyn Verifier> = Arc::new(verify_bearer(|t| t == "4t0k3n"));
///
/// let outcome = evaluate(Some("Bearer 4t0k3n"), &config, Some(verifier)).unwrap();
/// assert!(outcome.is_authenticated());
/// ```
pub fn evaluate(
    raw: Option<&str>,
    config: &Config,
    verifier: Option<Arc<dyn Verifier>>,
) -> Result<Outcome, Error> {
    let gate = AuthGate::new(config);
    match verifier {
        Some(verifier) => gate.shared_verifier(verifier).evaluate(raw),
        None => gate.evaluate(raw),
    }
}

struct Decision {
    outcome: Outcome,
    scheme: Option<String>,
    reason: &'static str,
}

impl Decision {
    fn unauthorized(config: &Config, scheme: Option<String>, reason: &'static str) -> Self {
        tracing::debug!(scheme = ?scheme, reason, "rejecting request as unauthorized");
        Self {
            outcome: Outcome::Unauthorized {
                headers: config.unauthorized_headers(),
                body: config.unauthorized_body(),
            },
            scheme,
            reason,
        }
    }

    fn malformed(config: &Config, scheme: Option<String>, reason: &'static str) -> Self {
        tracing::debug!(scheme = ?scheme, reason, "rejecting request as malformed");
        Self {
            outcome: Outcome::MalformedRequest {
                headers: config.bad_request_headers(),
            },
            scheme,
            reason,
        }
    }
}
