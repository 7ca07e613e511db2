//! Domain primitives shared by the storage and API crates.

pub mod error;
pub mod rating;
pub mod types;
