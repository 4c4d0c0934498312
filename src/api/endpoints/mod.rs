//! API endpoint handlers.
//!
//! Each module corresponds to a frontend surface. Handlers stay thin and
//! delegate to `CoreState`.

pub mod catalog;
pub mod health;
pub mod hospitals;
pub mod map;
pub mod readiness;
pub mod selection;
pub mod theme;
