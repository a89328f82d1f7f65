//! Message boundary around the import pipeline.
//!
//! A caller submits one tagged [`Request`] and gets back exactly one tagged
//! [`Response`]. [`handle`] is the whole contract; [`WorkerPool`] runs it on a
//! fixed set of threads and passes the caller's correlation ids through.

mod pool;
mod protocol;

pub use pool::{Submitter, WorkerPool};
pub use protocol::{Request, Response, handle};
