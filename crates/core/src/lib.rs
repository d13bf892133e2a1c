//! Pure domain logic for the service-report backend.
//!
//! Nothing in this crate performs I/O. The HTTP layer, database layer and
//! renderers all depend on the contracts defined here.

pub mod compose;
pub mod error;
pub mod gallery;
pub mod report_no;
pub mod types;
pub mod workflow;
