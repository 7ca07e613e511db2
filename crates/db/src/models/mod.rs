//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (validated with `validator`)
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! All entities serialize in camelCase to match the browser client's JSON
//! contract.

pub mod bookmark;
pub mod chapter;
pub mod comment;
pub mod like;
pub mod novel;
pub mod reading_history;
pub mod session;
pub mod user;
pub mod user_settings;
