//! The verification seam between the gate and application code.
//!
//! The gate never decides on its own whether credentials are acceptable. It
//! hands them to a [`Verifier`], a trait with a single operation. The
//! adapters in this module spread credentials positionally so that
//! application code can be written as a plain closure over the parts it
//! cares about:
//!
//! | adapter              | closure receives       |
//! |----------------------|------------------------|
//! | [`verify_basic`]     | `(username, password)` |
//! | [`verify_bearer`]    | `(token)`              |
//! | [`verify_generic`]   | `(scheme, payload)`    |
//! | [`verify_fn`]        | `&Credentials`         |
//!
//! The positional closures return any [`Verdict`]: a plain `bool`, or a
//! `Result<bool, E>` when the lookup behind them can fail.

use std::marker::PhantomData;

use crate::credentials::{Credentials, Payload};
use crate::error::VerifyError;

/// Decides whether presented credentials are acceptable.
///
/// Implementations must be `Send + Sync`: a single verifier is shared by
/// every concurrent evaluation that uses the same configuration.
///
/// # Examples
///
/// ```
/// use http_auth_gate::{Credentials, Verifier, VerifyError};
///
/// struct StaticToken(&'static str);
///
/// impl Verifier for StaticToken {
///     fn verify(&self, credentials: &Credentials) -> Result<bool, VerifyError> {
///         Ok(matches!(
///             credentials,
///             Credentials::Bearer { token } if token.expose_secret() == self.0
///         ))
///     }
/// }
/// ```
pub trait Verifier: Send + Sync {
    /// Returns `Ok(true)` to accept, `Ok(false)` to reject, `Err` if no
    /// decision could be made.
    fn verify(&self, credentials: &Credentials) -> Result<bool, VerifyError>;
}

/// The answer a verifier closure gives.
///
/// Implemented for `bool` (always a decision) and for `Result<bool, E>`
/// where `E` converts into [`VerifyError`].
///
/// # Examples
///
/// ```
/// use http_auth_gate::{Verdict, VerifyError};
///
/// assert!(true.into_verdict().unwrap());
///
/// let failed: Result<bool, VerifyError> = Err(VerifyError::failed("user store offline"));
/// assert!(failed.into_verdict().is_err());
/// ```
pub trait Verdict {
    /// Converts the closure's answer into the verifier result.
    fn into_verdict(self) -> Result<bool, VerifyError>;
}

impl Verdict for bool {
    fn into_verdict(self) -> Result<bool, VerifyError> {
        Ok(self)
    }
}

impl<E> Verdict for Result<bool, E>
where
    E: Into<VerifyError>,
{
    fn into_verdict(self) -> Result<bool, VerifyError> {
        self.map_err(Into::into)
    }
}

/// Verifier over Basic `(username, password)` pairs. See [`verify_basic`].
#[derive(Debug, Clone, Copy)]
pub struct BasicVerifier<F, V = bool>(F, PhantomData<fn() -> V>);

/// Verifier over Bearer tokens. See [`verify_bearer`].
#[derive(Debug, Clone, Copy)]
pub struct BearerVerifier<F, V = bool>(F, PhantomData<fn() -> V>);

/// Verifier over `(scheme, payload)` pairs. See [`verify_generic`].
#[derive(Debug, Clone, Copy)]
pub struct GenericVerifier<F, V = bool>(F, PhantomData<fn() -> V>);

/// Verifier over raw [`Credentials`]. See [`verify_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnVerifier<F>(F);

/// Builds a verifier from a closure over the Basic username and password.
///
/// Non-Basic credentials produce [`VerifyError::UnexpectedCredentials`].
///
/// # Examples
///
/// ```
/// use http_auth_gate::{extract, verify_basic, Verifier};
///
/// let verifier = verify_basic(|user, pass| user == "foo" && pass == "bar");
/// let creds = extract(Some("Basic Zm9vOmJhcg==")).unwrap().credentials;
/// assert!(verifier.verify(&creds).unwrap());
/// ```
pub fn verify_basic<F, V>(f: F) -> BasicVerifier<F, V>
where
    F: Fn(&str, &str) -> V + Send + Sync,
    V: Verdict,
{
    BasicVerifier(f, PhantomData)
}

/// Builds a verifier from a closure over the Bearer token.
///
/// # Examples
///
/// ```
/// use http_auth_gate::{extract, verify_bearer, Verifier, VerifyError};
///
/// let tokens: Option<&[&str]> = None;
/// let verifier = verify_bearer(move |token| match tokens {
///     Some(known) => Ok(known.iter().any(|k| *k == token)),
///     None => Err(VerifyError::failed("token store unavailable")),
/// });
/// let creds = extract(Some("Bearer 4t0k3n")).unwrap().credentials;
/// assert!(verifier.verify(&creds).is_err());
/// ```
pub fn verify_bearer<F, V>(f: F) -> BearerVerifier<F, V>
where
    F: Fn(&str) -> V + Send + Sync,
    V: Verdict,
{
    BearerVerifier(f, PhantomData)
}

/// Builds a verifier from a closure over the scheme and generic payload.
///
/// Used for `Digest` and custom token schemes.
pub fn verify_generic<F, V>(f: F) -> GenericVerifier<F, V>
where
    F: Fn(&str, &Payload) -> V + Send + Sync,
    V: Verdict,
{
    GenericVerifier(f, PhantomData)
}

/// Builds a verifier from a fallible closure over the raw credentials.
pub fn verify_fn<F>(f: F) -> FnVerifier<F>
where
    F: Fn(&Credentials) -> Result<bool, VerifyError> + Send + Sync,
{
    FnVerifier(f)
}

fn unexpected(expected: &'static str, credentials: &Credentials) -> VerifyError {
    VerifyError::UnexpectedCredentials {
        expected,
        scheme: credentials.scheme().to_string(),
    }
}

impl<F, V> Verifier for BasicVerifier<F, V>
where
    F: Fn(&str, &str) -> V + Send + Sync,
    V: Verdict,
{
    fn verify(&self, credentials: &Credentials) -> Result<bool, VerifyError> {
        match credentials {
            Credentials::Basic { username, password } => {
                (self.0)(username, password.expose_secret()).into_verdict()
            }
            other => Err(unexpected("basic", other)),
        }
    }
}

impl<F, V> Verifier for BearerVerifier<F, V>
where
    F: Fn(&str) -> V + Send + Sync,
    V: Verdict,
{
    fn verify(&self, credentials: &Credentials) -> Result<bool, VerifyError> {
        match credentials {
            Credentials::Bearer { token } => (self.0)(token.expose_secret()).into_verdict(),
            other => Err(unexpected("bearer", other)),
        }
    }
}

impl<F, V> Verifier for GenericVerifier<F, V>
where
    F: Fn(&str, &Payload) -> V + Send + Sync,
    V: Verdict,
{
    fn verify(&self, credentials: &Credentials) -> Result<bool, VerifyError> {
        match credentials {
            Credentials::Generic { scheme, payload } => (self.0)(scheme, payload).into_verdict(),
            other => Err(unexpected("generic", other)),
        }
    }
}

impl<F> Verifier for FnVerifier<F>
where
    F: Fn(&Credentials) -> Result<bool, VerifyError> + Send + Sync,
{
    fn verify(&self, credentials: &Credentials) -> Result<bool, VerifyError> {
        (self.0)(credentials)
    }
}
