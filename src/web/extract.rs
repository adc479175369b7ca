//! Extraction boundary trait for web integration.

/// Exposes the raw `Authorization` header of a framework-specific request.
///
/// This is the only thing the gate reads from a request. Implementations
/// return the header text exactly as received; all parsing happens in the
/// gate.
///
/// # Examples
///
/// ```
/// use http_auth_gate::web::ExtractAuthorization;
///
/// struct MyFrameworkRequest {
///     auth: Option<String>,
/// }
///
/// impl ExtractAuthorization for MyFrameworkRequest {
///     fn authorization(&self) -> Option<&str> {
///         self.auth.as_deref()
///     }
/// }
///
/// let req = MyFrameworkRequest { auth: Some("Token abc".to_string()) };
/// assert_eq!(req.authorization(), Some("Token abc"));
/// ```
pub trait ExtractAuthorization {
    /// Returns the `Authorization` header value, if present.
    fn authorization(&self) -> Option<&str>;
}
