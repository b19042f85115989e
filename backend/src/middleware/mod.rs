//! Cross-cutting request middleware.
//!
//! The role gate lives with the HTTP adapter because it reads the session;
//! only adapter-agnostic concerns sit here.

pub mod trace;

pub use trace::Trace;
