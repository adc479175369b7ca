//! Scheme classification and credential extraction.
//!
//! Turns a raw `Authorization` header value into a lowercase scheme and a
//! [`Credentials`] value:
//!
//! - `Basic` payloads are base64-decoded into a username/password pair,
//!   with or without `=` padding
//! - `Bearer` payloads yield the bare token
//! - every other scheme yields a generic [`Payload`], either opaque text or
//!   a map of Digest-style `key="value"` parameters
//!
//! Generic parameter parsing is lenient: segments that are not `key=value`
//! are skipped and parsing never fails. The comma split does not look inside
//! quoted values, so a quoted value containing `,` is cut at that comma.

use std::collections::BTreeMap;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::credentials::{Credentials, Payload};
use crate::error::ExtractionError;
use crate::secret::Secret;

/// Standard-alphabet decoder for Basic payloads; `=` padding is optional.
const BASIC_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A scheme together with the credentials presented for it.
#[derive(Debug)]
pub struct Extracted {
    /// Lowercase scheme name.
    pub scheme: String,
    /// The parsed credentials.
    pub credentials: Credentials,
}

/// Splits a raw header into its lowercase scheme and the remaining text.
///
/// The remainder is returned as-is (it may be empty); scheme-specific checks
/// happen in [`extract_credentials`].
///
/// # Errors
///
/// Returns [`ExtractionError::NoHeader`] if the header is absent, empty, or
/// whitespace only.
///
/// # Examples
///
/// ```
/// use http_auth_gate::classify;
///
/// let (scheme, rest) = classify(Some("Bearer   4t0k3n")).unwrap();
/// assert_eq!(scheme, "bearer");
/// assert_eq!(rest, "4t0k3n");
/// ```
pub fn classify(raw: Option<&str>) -> Result<(String, &str), ExtractionError> {
    let raw = raw.map(str::trim_start).unwrap_or_default();
    if raw.is_empty() {
        return Err(ExtractionError::NoHeader);
    }

    let (scheme, rest) = match raw.find(char::is_whitespace) {
        Some(idx) => (&raw[..idx], raw[idx..].trim_start()),
        None => (raw, ""),
    };

    Ok((scheme.to_ascii_lowercase(), rest))
}

/// Parses the text after the scheme according to the scheme's grammar.
///
/// # Errors
///
/// Returns [`ExtractionError::Malformed`] when the remainder is empty, when a
/// Basic payload is not valid base64, not UTF-8, or lacks a `:`, or when a
/// Bearer token is empty.
pub fn extract_credentials(scheme: &str, rest: &str) -> Result<Credentials, ExtractionError> {
    if rest.trim().is_empty() {
        return Err(ExtractionError::malformed(scheme, "missing credentials"));
    }

    match scheme {
        "basic" => decode_basic(rest),
        "bearer" => {
            let token = rest
                .split_whitespace()
                .next()
                .ok_or_else(|| ExtractionError::malformed(scheme, "empty bearer token"))?;
            Ok(Credentials::Bearer {
                token: Secret::new(token.to_string()),
            })
        }
        _ => Ok(Credentials::Generic {
            scheme: scheme.to_string(),
            payload: parse_payload(rest),
        }),
    }
}

/// Classifies the header and extracts its credentials in one step.
///
/// # Errors
///
/// See [`classify`] and [`extract_credentials`].
///
/// # Examples
///
/// ```
/// use http_auth_gate::{extract, Credentials};
///
/// let extracted = extract(Some(r#"Digest username="Mufasa", nonce="n""#)).unwrap();
/// assert_eq!(extracted.scheme, "digest");
/// match extracted.credentials {
///     Credentials::Generic { payload, .. } => {
///         assert_eq!(payload.get("username"), Some("Mufasa"));
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn extract(raw: Option<&str>) -> Result<Extracted, ExtractionError> {
    let (scheme, rest) = classify(raw)?;
    let credentials = extract_credentials(&scheme, rest)?;
    Ok(Extracted {
        scheme,
        credentials,
    })
}

fn decode_basic(rest: &str) -> Result<Credentials, ExtractionError> {
    let decoded = BASIC_ENGINE
        .decode(rest.trim())
        .map_err(|_| ExtractionError::malformed("basic", "invalid base64"))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| ExtractionError::malformed("basic", "credentials are not UTF-8"))?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| ExtractionError::malformed("basic", "missing ':' separator"))?;

    Ok(Credentials::Basic {
        username: username.to_string(),
        password: Secret::new(password.to_string()),
    })
}

/// Parses a generic payload into its opaque or key-value form.
///
/// A single comma segment without `=` is opaque text; anything else is
/// read as parameters.
///
/// # Examples
///
/// ```
/// use http_auth_gate::{parse_payload, Payload};
///
/// assert_eq!(parse_payload(" 4t0k3n "), Payload::Opaque("4t0k3n".to_string()));
///
/// let params = parse_payload(r#"realm="a \"quoted\" realm", qop=auth"#);
/// assert_eq!(params.get("realm"), Some(r#"a "quoted" realm"#));
/// assert_eq!(params.get("qop"), Some("auth"));
/// ```
pub fn parse_payload(rest: &str) -> Payload {
    let segments: Vec<&str> = rest.split(',').collect();
    if let [single] = segments.as_slice() {
        if !single.contains('=') {
            return Payload::Opaque(single.trim().to_string());
        }
    }

    let mut params = BTreeMap::new();
    for segment in segments {
        match parse_param(segment.trim()) {
            Some((key, value)) => {
                params.insert(key.to_string(), value);
            }
            None => tracing::trace!(segment_len = segment.len(), "skipping malformed segment"),
        }
    }
    Payload::Params(params)
}

fn parse_param(segment: &str) -> Option<(&str, String)> {
    let eq = segment.find('=')?;
    let key = segment[..eq].trim();
    if key.is_empty() {
        return None;
    }

    let value = &segment[eq + 1..];
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);

    Some((key, value.replace("\\\"", "\"")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

    const DIGEST: &str = r#"Digest username="Mufasa",
       realm="http-auth@example.org",
       uri="/dir/index.html",
       algorithm=MD5,
       nonce="7ypf/xlj9XXwfDPEoM4URrv/xwf94BcCAzFZH4GiTo0v",
       nc=00000001,
       cnonce="f2/wE4q74E6zIJEtWaHKaf5wv/H5QzzpXusqGemxURZJ",
       qop=auth,
       response="8ca523f5e9506fed4657c9700eebdbec",
       opaque="FQhe/qaU925kfnzjCev0ciny7QMkPqMAFRtzCUYo5tdS"
"#;

    fn generic(raw: &str) -> (String, Payload) {
        match extract(Some(raw)).expect("should extract").credentials {
            Credentials::Generic { scheme, payload } => (scheme, payload),
            other => panic!("expected generic credentials, got {:?}", other),
        }
    }

    #[test]
    fn absent_or_blank_header_is_no_header() {
        assert_eq!(classify(None).unwrap_err(), ExtractionError::NoHeader);
        assert_eq!(classify(Some("")).unwrap_err(), ExtractionError::NoHeader);
        assert_eq!(classify(Some("  \t")).unwrap_err(), ExtractionError::NoHeader);
    }

    #[test]
    fn classify_lowercases_scheme() {
        let (scheme, rest) = classify(Some("DiGeSt  a=b")).unwrap();
        assert_eq!(scheme, "digest");
        assert_eq!(rest, "a=b");
    }

    #[test]
    fn scheme_without_payload_is_malformed() {
        let err = extract(Some("Basic")).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::Malformed {
                scheme: Some("basic".to_string()),
                reason: "missing credentials",
            }
        );
        assert!(matches!(
            extract(Some("Bearer   ")),
            Err(ExtractionError::Malformed { .. })
        ));
    }

    #[test]
    fn basic_decodes_pair() {
        let extracted = extract(Some("Basic Zm9vOmJhcg==")).unwrap();
        assert_eq!(extracted.scheme, "basic");
        match extracted.credentials {
            Credentials::Basic { username, password } => {
                assert_eq!(username, "foo");
                assert_eq!(password.expose_secret(), "bar");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn basic_splits_on_first_colon_only() {
        let header = format!("basic {}", STANDARD.encode("foo:b:a:r"));
        match extract(Some(&header)).unwrap().credentials {
            Credentials::Basic { username, password } => {
                assert_eq!(username, "foo");
                assert_eq!(password.expose_secret(), "b:a:r");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn basic_allows_empty_password() {
        let header = format!("Basic {}", STANDARD.encode("foo:"));
        match extract(Some(&header)).unwrap().credentials {
            Credentials::Basic { username, password } => {
                assert_eq!(username, "foo");
                assert_eq!(password.expose_secret(), "");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn basic_accepts_unpadded_payload() {
        let unpadded = format!("Basic {}", STANDARD_NO_PAD.encode("foo:bar"));
        assert_eq!(unpadded, "Basic Zm9vOmJhcg");

        match extract(Some(&unpadded)).unwrap().credentials {
            Credentials::Basic { username, password } => {
                assert_eq!(username, "foo");
                assert_eq!(password.expose_secret(), "bar");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn basic_rejects_bad_base64() {
        let err = extract(Some("Basic !!!not-base64!!!")).unwrap_err();
        assert_eq!(err, ExtractionError::malformed("basic", "invalid base64"));
    }

    #[test]
    fn basic_rejects_missing_separator() {
        let header = format!("Basic {}", STANDARD.encode("foobar"));
        let err = extract(Some(&header)).unwrap_err();
        assert_eq!(err, ExtractionError::malformed("basic", "missing ':' separator"));
    }

    #[test]
    fn basic_rejects_non_utf8() {
        let header = format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':', b'x']));
        let err = extract(Some(&header)).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::malformed("basic", "credentials are not UTF-8")
        );
    }

    #[test]
    fn bearer_takes_first_token() {
        let extracted = extract(Some("Bearer  4t0k3n trailing")).unwrap();
        match extracted.credentials {
            Credentials::Bearer { token } => assert_eq!(token.expose_secret(), "4t0k3n"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn token_scheme_is_opaque() {
        let (scheme, payload) = generic("Token 4t0k3n");
        assert_eq!(scheme, "token");
        assert_eq!(payload, Payload::Opaque("4t0k3n".to_string()));
    }

    #[test]
    fn digest_parameters_are_parsed() {
        let (scheme, payload) = generic(DIGEST);
        assert_eq!(scheme, "digest");

        let params = payload.as_params().expect("params form");
        assert_eq!(params.len(), 10);
        assert_eq!(params["username"], "Mufasa");
        assert_eq!(params["realm"], "http-auth@example.org");
        assert_eq!(params["algorithm"], "MD5");
        assert_eq!(params["nc"], "00000001");
        assert_eq!(params["opaque"], "FQhe/qaU925kfnzjCev0ciny7QMkPqMAFRtzCUYo5tdS");
    }

    #[test]
    fn single_segment_with_equals_is_params() {
        assert_eq!(
            parse_payload("token=abc"),
            Payload::Params(BTreeMap::from([("token".to_string(), "abc".to_string())]))
        );
    }

    #[test]
    fn escaped_quotes_are_unescaped() {
        let payload = parse_payload(r#"realm="say \"hi\"", empty="""#);
        assert_eq!(payload.get("realm"), Some(r#"say "hi""#));
        assert_eq!(payload.get("empty"), Some(""));
    }

    #[test]
    fn last_duplicate_wins() {
        let payload = parse_payload(r#"a="1", b=2, a="3""#);
        assert_eq!(payload.get("a"), Some("3"));
        assert_eq!(payload.get("b"), Some("2"));
    }

    #[test]
    fn segments_without_equals_are_skipped() {
        let payload = parse_payload(r#"username="Mufasa", garbage, =novalue"#);
        let params = payload.as_params().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["username"], "Mufasa");

        assert_eq!(parse_payload("abc, def"), Payload::Params(BTreeMap::new()));
    }

    #[test]
    fn quoted_commas_split_values() {
        // The comma split runs before quote handling.
        let payload = parse_payload(r#"realm="a, b", nonce="n""#);
        assert_eq!(payload.get("realm"), Some("a"));
        assert_eq!(payload.get("nonce"), Some("n"));
    }

    mod proptests {
        use super::*;
        use crate::test_utils::{arb_param_key, arb_param_value, arb_username};
        use proptest::prelude::*;

        proptest! {
            /// Property: encoding a Basic pair then extracting yields it back
            #[test]
            fn proptest_basic_pair_round_trips(
                username in arb_username(),
                password in "[ -~]{0,32}",
            ) {
                let header = format!("Basic {}", STANDARD.encode(format!("{username}:{password}")));
                match extract(Some(&header)).expect("valid basic header").credentials {
                    Credentials::Basic { username: u, password: p } => {
                        prop_assert_eq!(u, username);
                        prop_assert_eq!(p.expose_secret(), &password);
                    }
                    other => prop_assert!(false, "unexpected {:?}", other),
                }
            }

            /// Property: a single segment without '=' is the trimmed opaque text
            #[test]
            fn proptest_single_segment_is_opaque(
                token in "[A-Za-z0-9._~+/-]{1,40}",
                pad in " {0,3}",
            ) {
                let payload = parse_payload(&format!("{pad}{token}{pad}"));
                prop_assert_eq!(payload, Payload::Opaque(token));
            }

            /// Property: k1="v1", k2="v2" parses into both keys with unescaped values
            #[test]
            fn proptest_quoted_pairs_parse(
                k1 in arb_param_key(),
                k2 in arb_param_key(),
                v1 in arb_param_value(),
                v2 in arb_param_value(),
            ) {
                prop_assume!(k1 != k2);
                let escape = |v: &str| v.replace('"', "\\\"");
                let raw = format!(r#"{k1}="{}", {k2}="{}""#, escape(&v1), escape(&v2));

                let payload = parse_payload(&raw);
                prop_assert_eq!(payload.get(&k1), Some(v1.as_str()));
                prop_assert_eq!(payload.get(&k2), Some(v2.as_str()));
            }

            /// Property: extraction never panics on arbitrary input
            #[test]
            fn proptest_extract_never_panics(raw in ".{0,64}") {
                let _ = extract(Some(&raw));
            }
        }
    }
}
