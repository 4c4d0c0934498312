pub mod enums;
pub mod hospital;

pub use enums::*;
pub use hospital::*;
