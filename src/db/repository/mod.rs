//! Repository layer: table-scoped database operations.

mod preference;

pub use preference::*;
