use thiserror::Error;

/// Errors that escape the authentication gate.
///
/// Every problem with the request itself is folded into an [`Outcome`](crate::Outcome).
/// What remains here are programming-contract violations in the application
/// that wired the gate up, so they are not meant to be rendered as HTTP
/// responses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No verifier was supplied at the call site, in the overrides, or in the
    /// global configuration.
    #[error("no verifier configured: supply one at the call site or in the global configuration")]
    MissingVerifier,
}

/// Why an `Authorization` header could not be turned into credentials.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The header is absent, empty, or whitespace only.
    #[error("no authorization header provided")]
    NoHeader,
    /// The header is present but does not follow its scheme's grammar.
    #[error("malformed authorization header{}: {reason}", fmt_scheme(.scheme))]
    Malformed {
        /// The lowercase scheme, when one could be read.
        scheme: Option<String>,
        /// Short static description, safe to log.
        reason: &'static str,
    },
}

impl ExtractionError {
    pub(crate) fn malformed(scheme: impl Into<String>, reason: &'static str) -> Self {
        Self::Malformed {
            scheme: Some(scheme.into()),
            reason,
        }
    }
}

fn fmt_scheme(scheme: &Option<String>) -> String {
    match scheme {
        Some(s) => format!(" ({s})"),
        None => String::new(),
    }
}

/// Error returned by a [`Verifier`](crate::Verifier) that could not reach a decision.
///
/// The gate degrades any of these to a 400 response.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The verifier expects a different credential shape than the one parsed
    /// from the request, e.g. a Basic verifier fed a Bearer token.
    #[error("verifier expected {expected} credentials, got scheme '{scheme}'")]
    UnexpectedCredentials {
        /// The credential shape the verifier accepts.
        expected: &'static str,
        /// The scheme that was actually presented.
        scheme: String,
    },
    /// The verifier itself failed.
    #[error("verifier failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl VerifyError {
    /// Wraps any error raised while verifying.
    pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Failed(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_names_scheme() {
        let err = ExtractionError::malformed("basic", "invalid base64");
        assert_eq!(
            err.to_string(),
            "malformed authorization header (basic): invalid base64"
        );
    }

    #[test]
    fn malformed_display_without_scheme() {
        let err = ExtractionError::Malformed {
            scheme: None,
            reason: "missing credentials",
        };
        assert_eq!(
            err.to_string(),
            "malformed authorization header: missing credentials"
        );
    }

    #[test]
    fn verify_error_wraps_string_messages() {
        let err = VerifyError::failed("backend unavailable");
        assert_eq!(err.to_string(), "verifier failed: backend unavailable");
        assert!(std::error::Error::source(&err).is_some());
    }
}
