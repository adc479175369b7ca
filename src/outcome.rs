//! Gate outcomes and the terminal responses they map to.

use crate::config::Headers;

/// Status code of the response sent when credentials are missing or rejected.
pub const UNAUTHORIZED: u16 = 401;

/// Status code of the response sent when the header cannot be interpreted.
pub const BAD_REQUEST: u16 = 400;

/// Result of evaluating one request.
///
/// `Authenticated` lets the request proceed. The other two are terminal: the
/// host must stop processing and send [`Outcome::into_response`] as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The verifier accepted the credentials.
    Authenticated {
        /// The Basic username; `None` for every other scheme.
        principal: Option<String>,
    },
    /// The header is absent, the scheme is not accepted, or the verifier
    /// rejected the credentials.
    Unauthorized {
        /// Headers from the configured 401 builder.
        headers: Headers,
        /// Body from the configured renderer; empty by default.
        body: String,
    },
    /// The header is unparsable or the verifier failed.
    MalformedRequest {
        /// Headers from the configured 400 builder.
        headers: Headers,
    },
}

impl Outcome {
    /// Whether the request may proceed.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Outcome::Authenticated { .. })
    }

    /// The recorded principal, if authenticated with Basic credentials.
    pub fn principal(&self) -> Option<&str> {
        match self {
            Outcome::Authenticated { principal } => principal.as_deref(),
            _ => None,
        }
    }

    /// The status of the terminal response; `None` when authenticated.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Authenticated { .. } => None,
            Outcome::Unauthorized { .. } => Some(UNAUTHORIZED),
            Outcome::MalformedRequest { .. } => Some(BAD_REQUEST),
        }
    }

    /// Converts a terminal outcome into the response the host should emit.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_auth_gate::{AuthGate, Config, verify_basic};
    ///
    /// let config = Config::default();
    /// let gate = AuthGate::new(&config).verifier(verify_basic(|_, _| true));
    ///
    /// let response = gate.evaluate(None).unwrap().into_response().unwrap();
    /// assert_eq!(response.status, 401);
    /// assert_eq!(response.headers["WWW-Authenticate"], r#"Basic realm="Restricted Area""#);
    /// assert!(response.body.is_empty());
    /// ```
    pub fn into_response(self) -> Option<Response> {
        match self {
            Outcome::Authenticated { .. } => None,
            Outcome::Unauthorized { headers, body } => Some(Response {
                status: UNAUTHORIZED,
                headers,
                body,
            }),
            Outcome::MalformedRequest { headers } => Some(Response {
                status: BAD_REQUEST,
                headers,
                body: String::new(),
            }),
        }
    }
}

/// A terminal response for the host's halting primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Headers,
    /// Response body.
    pub body: String,
}
