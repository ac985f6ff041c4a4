//! Core data model and abstractions for a priority-ordered transaction
//! submission queue.
//!
//! Producers enqueue pending submissions with a caller-supplied priority; an
//! external processor drains the ordered index, executes each submission and
//! writes a terminal status back to the record store; callers poll the store
//! until their submission finishes, then resolve its result handle against
//! the execution backend. This crate holds the pieces every side of that
//! exchange agrees on: the record shape and codec, the sort-key (score)
//! construction, identifier generation, the error taxonomy and the store /
//! index / executor traits. Concrete backends and the services that drive
//! them live in `txqueue-base`.

// Forbid unsafe code outside of tests
#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(missing_docs)]

pub use error::*;
pub use identifier::*;
pub use score::*;
pub use traits::*;
pub use types::*;

mod error;
mod identifier;
mod score;
mod traits;
mod types;
