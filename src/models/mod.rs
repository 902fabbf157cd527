pub mod document;
pub mod version;

pub use document::*;
pub use version::*;
