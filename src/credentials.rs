//! Credential values extracted from an `Authorization` header.

use std::collections::BTreeMap;
use std::fmt;

use crate::secret::Secret;

/// Credentials parsed from a single request's `Authorization` header.
///
/// Values are owned by one evaluation and dropped when it finishes. Secret
/// parts are wrapped in [`Secret`], so `Debug` output is safe to log.
///
/// # Examples
///
/// ```
/// use http_auth_gate::{extract, Credentials};
///
/// let extracted = extract(Some("Basic Zm9vOmJhcg==")).unwrap();
/// match extracted.credentials {
///     Credentials::Basic { username, password } => {
///         assert_eq!(username, "foo");
///         assert_eq!(password.expose_secret(), "bar");
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub enum Credentials {
    /// `Basic` username and password.
    Basic {
        /// Decoded user id, everything before the first `:`.
        username: String,
        /// Decoded password, everything after the first `:`.
        password: Secret<String>,
    },
    /// `Bearer` token.
    Bearer {
        /// The token text.
        token: Secret<String>,
    },
    /// Any other scheme, including `Digest`.
    Generic {
        /// Lowercase scheme name.
        scheme: String,
        /// The parsed remainder of the header.
        payload: Payload,
    },
}

impl Credentials {
    /// Returns the lowercase scheme these credentials were presented with.
    pub fn scheme(&self) -> &str {
        match self {
            Credentials::Basic { .. } => "basic",
            Credentials::Bearer { .. } => "bearer",
            Credentials::Generic { scheme, .. } => scheme,
        }
    }

    /// Returns the identity to record on success.
    ///
    /// Only Basic credentials carry one.
    pub fn principal(&self) -> Option<&str> {
        match self {
            Credentials::Basic { username, .. } => Some(username),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { username, password } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", password)
                .finish(),
            Credentials::Bearer { token } => {
                f.debug_struct("Bearer").field("token", token).finish()
            }
            // Generic payloads are opaque to us and may hold anything; only
            // the shape is shown.
            Credentials::Generic { scheme, payload } => f
                .debug_struct("Generic")
                .field("scheme", scheme)
                .field("payload", &payload.shape())
                .finish(),
        }
    }
}

/// Payload of a generic (non-Basic, non-Bearer) scheme.
#[derive(Clone, PartialEq, Eq)]
pub enum Payload {
    /// A single token without any `=`, e.g. `Token 4t0k3n`.
    Opaque(String),
    /// `key=value` / `key="value"` pairs, e.g. Digest parameters.
    Params(BTreeMap<String, String>),
}

impl Payload {
    /// Returns the opaque text, if this is the opaque form.
    pub fn as_opaque(&self) -> Option<&str> {
        match self {
            Payload::Opaque(s) => Some(s),
            Payload::Params(_) => None,
        }
    }

    /// Returns the parameter map, if this is the key-value form.
    pub fn as_params(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Payload::Opaque(_) => None,
            Payload::Params(map) => Some(map),
        }
    }

    /// Looks up a single parameter. Always `None` for the opaque form.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.as_params()
            .and_then(|map| map.get(key))
            .map(String::as_str)
    }

    fn shape(&self) -> PayloadShape<'_> {
        PayloadShape(self)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.shape().fmt(f)
    }
}

struct PayloadShape<'a>(&'a Payload);

impl fmt::Debug for PayloadShape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Payload::Opaque(_) => f.write_str("Opaque([REDACTED])"),
            Payload::Params(map) => f.debug_set().entries(map.keys()).finish(),
        }
    }
}
