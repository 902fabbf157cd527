//! Data access layer: plain sqlx query functions over the `documents` and
//! `document_versions` tables. Route handlers and services call these; no
//! business logic lives here.

pub mod documents;
pub mod versions;

pub use documents::*;
pub use versions::*;
