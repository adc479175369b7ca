//! Gate configuration and per-call overrides.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::verifier::Verifier;

/// Response headers, keyed by header name.
pub type Headers = BTreeMap<String, String>;

/// Builds response headers from the effective configuration.
pub type HeaderBuilder = Arc<dyn Fn(&Config) -> Headers + Send + Sync>;

/// Renders a response body from the effective configuration.
///
/// The renderer sees only the configuration, not the request. Hosts that
/// need request data in the 401 body rewrite the body of the
/// [`GateDecision::Halt`](crate::web::GateDecision::Halt) response instead.
pub type BodyRenderer = Arc<dyn Fn(&Config) -> String + Send + Sync>;

/// Realm used when none is configured.
pub const DEFAULT_REALM: &str = "Restricted Area";

/// Name of the challenge header sent with 401 responses.
pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";

/// Immutable gate configuration.
///
/// A `Config` is built once at application setup with [`Config::configure`]
/// and then shared read-only by every request. Per-route adjustments are
/// expressed as [`ConfigOverrides`] and merged with [`Config::merge`], which
/// returns a new value and leaves the receiver untouched.
///
/// # Examples
///
/// ```
/// use http_auth_gate::{Config, ConfigOverrides};
///
/// let global = Config::default().configure(ConfigOverrides::new().realm("NetherRealm"));
/// assert_eq!(global.realm(), "NetherRealm");
/// assert!(global.accepts("basic"));
///
/// let route = global.merge(&ConfigOverrides::new().schemes(["Bearer"]));
/// assert!(route.accepts("bearer"));
/// assert!(!route.accepts("basic"));
/// assert_eq!(route.realm(), "NetherRealm");
/// ```
#[derive(Clone)]
pub struct Config {
    realm: String,
    schemes: BTreeSet<String>,
    unauthorized_headers: HeaderBuilder,
    bad_request_headers: HeaderBuilder,
    unauthorized_body: Option<BodyRenderer>,
    verifier: Option<Arc<dyn Verifier>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            realm: DEFAULT_REALM.to_string(),
            schemes: BTreeSet::from(["basic".to_string()]),
            unauthorized_headers: Arc::new(basic_challenge),
            bad_request_headers: Arc::new(|_: &Config| Headers::new()),
            unauthorized_body: None,
            verifier: None,
        }
    }
}

impl Config {
    /// Registers application-wide options on top of this configuration.
    ///
    /// Equivalent to [`merge`](Self::merge) but consumes the receiver, which
    /// reads naturally in setup code that layers several option sets.
    pub fn configure(self, overrides: ConfigOverrides) -> Self {
        self.merge(&overrides)
    }

    /// Returns a new configuration with every set override field replacing
    /// the corresponding field of `self`.
    ///
    /// The merge is shallow: a `schemes` override replaces the whole set. An
    /// empty `schemes` override is ignored so the accepted set never becomes
    /// empty.
    pub fn merge(&self, overrides: &ConfigOverrides) -> Self {
        let schemes = match &overrides.schemes {
            Some(schemes) if !schemes.is_empty() => schemes.clone(),
            _ => self.schemes.clone(),
        };

        Self {
            realm: overrides
                .realm
                .clone()
                .unwrap_or_else(|| self.realm.clone()),
            schemes,
            unauthorized_headers: overrides
                .unauthorized_headers
                .clone()
                .unwrap_or_else(|| Arc::clone(&self.unauthorized_headers)),
            bad_request_headers: overrides
                .bad_request_headers
                .clone()
                .unwrap_or_else(|| Arc::clone(&self.bad_request_headers)),
            unauthorized_body: overrides
                .unauthorized_body
                .clone()
                .or_else(|| self.unauthorized_body.clone()),
            verifier: overrides
                .verifier
                .clone()
                .or_else(|| self.verifier.clone()),
        }
    }

    /// The protection-space name echoed in the challenge header.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// The accepted schemes, lowercase.
    pub fn schemes(&self) -> &BTreeSet<String> {
        &self.schemes
    }

    /// Whether `scheme` (any case) is accepted.
    pub fn accepts(&self, scheme: &str) -> bool {
        self.schemes.contains(&scheme.to_ascii_lowercase())
    }

    /// The configured default verifier, if any.
    pub fn verifier(&self) -> Option<&Arc<dyn Verifier>> {
        self.verifier.as_ref()
    }

    /// Headers for a 401 response.
    pub fn unauthorized_headers(&self) -> Headers {
        (self.unauthorized_headers)(self)
    }

    /// Headers for a 400 response.
    pub fn bad_request_headers(&self) -> Headers {
        (self.bad_request_headers)(self)
    }

    /// Body for a 401 response; empty unless a renderer is configured.
    pub fn unauthorized_body(&self) -> String {
        self.unauthorized_body
            .as_ref()
            .map(|render| render(self))
            .unwrap_or_default()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("realm", &self.realm)
            .field("schemes", &self.schemes)
            .field("unauthorized_body", &self.unauthorized_body.is_some())
            .field("verifier", &self.verifier.is_some())
            .finish_non_exhaustive()
    }
}

/// The default 401 header builder: `WWW-Authenticate: Basic realm="<realm>"`.
pub fn basic_challenge(config: &Config) -> Headers {
    Headers::from([(
        WWW_AUTHENTICATE.to_string(),
        format!("Basic realm=\"{}\"", config.realm()),
    )])
}

/// Partial configuration; every unset field inherits from the base.
///
/// # Examples
///
/// ```
/// use http_auth_gate::{verify_bearer, Config, ConfigOverrides};
///
/// let overrides = ConfigOverrides::new()
///     .schemes(["bearer"])
///     .verifier(verify_bearer(|t| t == "4t0k3n"));
///
/// let config = Config::default().merge(&overrides);
/// assert!(config.verifier().is_some());
/// ```
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    realm: Option<String>,
    schemes: Option<BTreeSet<String>>,
    unauthorized_headers: Option<HeaderBuilder>,
    bad_request_headers: Option<HeaderBuilder>,
    unauthorized_body: Option<BodyRenderer>,
    verifier: Option<Arc<dyn Verifier>>,
}

impl ConfigOverrides {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the realm.
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Replaces the accepted schemes. Names are lowercased.
    pub fn schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.schemes = Some(
            schemes
                .into_iter()
                .map(|s| s.as_ref().to_ascii_lowercase())
                .collect(),
        );
        self
    }

    /// Sets the 401 header builder.
    pub fn unauthorized_headers<F>(mut self, build: F) -> Self
    where
        F: Fn(&Config) -> Headers + Send + Sync + 'static,
    {
        self.unauthorized_headers = Some(Arc::new(build));
        self
    }

    /// Sets the 400 header builder.
    pub fn bad_request_headers<F>(mut self, build: F) -> Self
    where
        F: Fn(&Config) -> Headers + Send + Sync + 'static,
    {
        self.bad_request_headers = Some(Arc::new(build));
        self
    }

    /// Sets a renderer for the 401 body. See [`BodyRenderer`] for what it can see.
    pub fn unauthorized_body<F>(mut self, render: F) -> Self
    where
        F: Fn(&Config) -> String + Send + Sync + 'static,
    {
        self.unauthorized_body = Some(Arc::new(render));
        self
    }

    /// Sets the default verifier.
    pub fn verifier(mut self, verifier: impl Verifier + 'static) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    /// Sets the default verifier from an already shared handle.
    pub fn shared_verifier(mut self, verifier: Arc<dyn Verifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("realm", &self.realm)
            .field("schemes", &self.schemes)
            .field("unauthorized_headers", &self.unauthorized_headers.is_some())
            .field("bad_request_headers", &self.bad_request_headers.is_some())
            .field("unauthorized_body", &self.unauthorized_body.is_some())
            .field("verifier", &self.verifier.is_some())
            .finish()
    }
}
