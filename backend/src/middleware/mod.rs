//! Request middleware.
//!
//! [`Trace`] scopes each request to a trace identifier echoed in the
//! `trace-id` response header.

pub mod trace;

pub use trace::Trace;
