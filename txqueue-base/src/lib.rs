//! Backends and services for the submission queue: configuration, tracing
//! and metrics plumbing, the in-memory store/index, and the two caller-side
//! flows — the submission service (atomic enqueue) and the status poller
//! (read until terminal or deadline).

// Forbid unsafe code outside of tests
#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(missing_docs)]

pub mod settings;

mod metrics;
pub use metrics::*;

mod store;
pub use store::*;

mod submitter;
pub use submitter::*;

mod poller;
pub use poller::*;
