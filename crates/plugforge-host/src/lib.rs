//! # plugforge-host
//!
//! Host services handed to loaded modules.
//!
//! Network-capable plugins do not bring their own HTTP stack; the host
//! hands each loaded module a [`Transport`] built from the capabilities
//! the module declared in its manifest. Every call is capability-checked
//! before any I/O happens, so an undeclared facility fails fast and
//! off-line.
//!
//! Retry, timeout and TLS policy are the transport implementation's
//! concern; the discovery core never blocks on the network.

pub mod transport;

pub use transport::{HostError, HostResult, HttpReply, HttpTransport, Transport};
