//! Shared run state
//!
//! The only mutable state that crosses component boundaries is the
//! cancellation token; everything else (accumulators, seen-sets) is owned
//! exclusively by one category run.

mod cancel;

pub use cancel::{spawn_cancel_listener, CancelToken};
