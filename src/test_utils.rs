//! Shared proptest strategies for unit tests.

use proptest::prelude::*;

/// Basic user ids: anything printable except `:`.
pub fn arb_username() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -9;-~]{0,24}").unwrap()
}

/// Parameter names as they appear in Digest-style payloads.
pub fn arb_param_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_-]{0,11}").unwrap()
}

/// Parameter values without commas or backslashes; quotes are allowed and
/// get escaped by the caller.
pub fn arb_param_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 /@.:=\"+-]{0,24}").unwrap()
}

/// Scheme names that are never one of the built-in ones.
pub fn arb_custom_scheme() -> impl Strategy<Value = String> {
    prop::string::string_regex("x-[a-z]{1,10}").unwrap()
}
