use std::fmt;

/// A wrapper that keeps credential material out of logs.
///
/// Passwords and bearer tokens parsed from an `Authorization` header are held
/// in a `Secret<String>`. The wrapped value can only be read through
/// [`expose_secret`](Self::expose_secret), so a stray `{:?}` on
/// [`Credentials`](crate::Credentials) or an outcome never prints it.
///
/// # Examples
///
/// ```
/// use http_auth_gate::Secret;
///
/// let password = Secret::new("Circle of Life".to_string());
///
/// assert_eq!(format!("{:?}", password), "[REDACTED]");
/// assert_eq!(format!("{}", password), "[REDACTED]");
/// assert_eq!(password.expose_secret(), "Circle of Life");
/// ```
// Do NOT derive Clone, Copy, or Default. Credentials live for a single
// evaluation and must not be duplicated into longer-lived state.
pub struct Secret<T> {
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the secret value.
    ///
    /// Intended for verifiers comparing credentials. Do not log the result.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

// No Deref, AsRef or Borrow: the only access is expose_secret().

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
