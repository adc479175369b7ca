//! HTTP `Authorization` header gate.
//!
//! This crate decides, per request, whether the credentials in an
//! `Authorization` header let the request proceed:
//! - **Extraction**: the scheme is classified and its payload parsed into
//!   Basic, Bearer, or generic (opaque or Digest-style parameter) credentials
//! - **Verification**: accept/reject is delegated to a caller-supplied
//!   [`Verifier`]
//! - **Outcome**: the result is returned as a value, never as control flow;
//!   the host pipeline halts with the response when it is not authenticated
//!
//! # Core Types
//!
//! - [`Config`] / [`ConfigOverrides`]: immutable global configuration and
//!   per-route overrides, merged field by field
//! - [`AuthGate`]: binds configuration and verifier, evaluates requests
//! - [`Credentials`] / [`Payload`]: what was extracted from the header
//! - [`Outcome`]: `Authenticated`, `Unauthorized` (401) or `MalformedRequest` (400)
//! - [`Secret<T>`]: redacts passwords and tokens in logs
//!
//! # Examples
//!
//! ```
//! use http_auth_gate::{verify_basic, AuthGate, Config, ConfigOverrides, Outcome};
//!
//! // Application setup: register global options once.
//! let config = Config::default().configure(
//!     ConfigOverrides::new()
//!         .realm("NetherRealm")
//!         .verifier(verify_basic(|user, pass| user == "foo" && pass == "bar")),
//! );
//!
//! // Per request.
//! let gate = AuthGate::new(&config);
//!
//! let outcome = gate.evaluate(Some("Basic Zm9vOmJhcg==")).unwrap();
//! assert_eq!(outcome.principal(), Some("foo"));
//!
//! let rejected = gate.evaluate(None).unwrap().into_response().unwrap();
//! assert_eq!(rejected.status, 401);
//! assert_eq!(rejected.headers["WWW-Authenticate"], r#"Basic realm="NetherRealm""#);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod config;
mod credentials;
mod error;
mod extract;
mod gate;
mod outcome;
mod secret;
mod verifier;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use config::{
    basic_challenge, BodyRenderer, Config, ConfigOverrides, HeaderBuilder, Headers, DEFAULT_REALM,
    WWW_AUTHENTICATE,
};
pub use credentials::{Credentials, Payload};
pub use error::{Error, ExtractionError, VerifyError};
pub use extract::{classify, extract, extract_credentials, parse_payload, Extracted};
pub use gate::{evaluate, AuthGate};
pub use outcome::{Outcome, Response, BAD_REQUEST, UNAUTHORIZED};
pub use secret::Secret;
pub use verifier::{
    verify_basic, verify_bearer, verify_fn, verify_generic, BasicVerifier, BearerVerifier,
    FnVerifier, GenericVerifier, Verdict, Verifier,
};
