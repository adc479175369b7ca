//! Request adapter for mapping host requests to gate inputs.

use std::collections::HashMap;

use super::ExtractAuthorization;

/// Name of the header carrying credentials.
pub const AUTHORIZATION: &str = "authorization";

/// Framework-neutral view of an incoming request.
///
/// `RequestAdapter` carries what the gate needs from a request and the slot
/// it writes back to:
/// - the request id, for audit correlation
/// - request headers, looked up case-insensitively
/// - the authenticated principal (`remote_user`) once the gate accepts
///
/// Framework integrations should implement `From<FrameworkRequest>` for
/// `RequestAdapter`, or implement [`ExtractAuthorization`] on their own type.
///
/// # Examples
///
/// ```
/// use http_auth_gate::web::{ExtractAuthorization, RequestAdapter};
///
/// let mut adapter = RequestAdapter::new("req-12345".to_string());
/// adapter.add_header("Authorization".to_string(), "Bearer 4t0k3n".to_string());
///
/// assert_eq!(adapter.authorization(), Some("Bearer 4t0k3n"));
/// assert_eq!(adapter.header("AUTHORIZATION"), Some("Bearer 4t0k3n"));
/// assert!(adapter.remote_user().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    request_id: String,
    /// Keyed by lowercase header name
    headers: HashMap<String, String>,
    remote_user: Option<String>,
}

impl RequestAdapter {
    /// Creates an adapter with the given request id and no headers.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            headers: HashMap::new(),
            remote_user: None,
        }
    }

    /// Adds a header. Names are case-insensitive; a repeated name replaces
    /// the earlier value.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name.to_ascii_lowercase(), value);
    }

    /// Looks up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the request id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Records the authenticated principal for downstream handlers.
    pub fn set_remote_user(&mut self, user: Option<String>) {
        self.remote_user = user;
    }

    /// Returns the authenticated principal, if one was recorded.
    pub fn remote_user(&self) -> Option<&str> {
        self.remote_user.as_deref()
    }
}

impl ExtractAuthorization for RequestAdapter {
    fn authorization(&self) -> Option<&str> {
        self.header(AUTHORIZATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_adapter_new() {
        let adapter = RequestAdapter::new("req-test".to_string());
        assert_eq!(adapter.request_id(), "req-test");
        assert!(adapter.remote_user().is_none());
        assert!(adapter.authorization().is_none());
    }

    #[test]
    fn headers_are_case_insensitive() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter.add_header("X-Custom".to_string(), "value".to_string());

        assert_eq!(adapter.header("x-custom"), Some("value"));
        assert_eq!(adapter.header("X-CUSTOM"), Some("value"));
        assert_eq!(adapter.header("missing"), None);
    }

    #[test]
    fn repeated_header_replaces_value() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter.add_header("Authorization".to_string(), "Basic old".to_string());
        adapter.add_header("authorization".to_string(), "Basic new".to_string());

        assert_eq!(adapter.authorization(), Some("Basic new"));
    }

    #[test]
    fn remote_user_round_trips() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter.set_remote_user(Some("foo".to_string()));
        assert_eq!(adapter.remote_user(), Some("foo"));

        adapter.set_remote_user(None);
        assert!(adapter.remote_user().is_none());
    }
}
