//! Web framework integration surface.
//!
//! This module is the boundary between host HTTP frameworks and the gate.
//! It contains no framework-specific code; it defines the small interface a
//! framework integration implements:
//!
//! 1. Build a [`RequestAdapter`] (or implement [`ExtractAuthorization`])
//!    from the framework's request type
//! 2. Call [`authenticate`] with an [`AuthGate`](crate::AuthGate)
//! 3. On [`GateDecision::Halt`], send the response unchanged and stop
//! 4. On [`GateDecision::Proceed`], read the principal with
//!    [`RequestAdapter::remote_user`] in downstream handlers
//!
//! No global state: the configuration and gate are passed in explicitly.

mod adapter;
mod extract;
mod middleware;

pub use adapter::{RequestAdapter, AUTHORIZATION};
pub use extract::ExtractAuthorization;
pub use middleware::{authenticate, GateDecision};
