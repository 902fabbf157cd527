//! HTTP handlers.
//!
//! - `documents`: document CRUD surface (list/create/get/mutate)
//! - `versions`: history queries, restore, and diffs
//! - `health`: liveness check

pub mod documents;
pub mod health;
pub mod versions;

pub use documents::*;
pub use health::*;
pub use versions::*;
