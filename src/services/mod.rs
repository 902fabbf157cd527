//! Business logic: the mutation coordinator, restore operator, diff engine,
//! history queries, and text metrics. Routes call into here; everything that
//! must be atomic is atomic inside this layer.

pub mod diff;
pub mod history;
pub mod mutation;
pub mod restore;
pub mod text;
