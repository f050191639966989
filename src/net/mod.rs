//! Network setup.
//!
//! Plain TCP listeners are bound directly in `lifecycle::startup`; this
//! module holds the TLS side.

pub mod tls;
