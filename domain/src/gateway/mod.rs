//! Clients for the external services the platform integrates with.
//!
//! Each gateway wraps one provider's HTTP API behind a small typed client.
//! Base URLs are taken from config so tests can point a client at a mock
//! server.

pub mod expo;
pub mod resend;
pub mod stripe;
