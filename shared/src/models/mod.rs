//! Domain models for the Mesa ordering platform
//!
//! Plain relational rows: snowflake `i64` ids, `i64` millisecond
//! timestamps, soft-delete via `is_active`. Each entity ships with its
//! `XxxCreate` / `XxxUpdate` payload structs (update fields are all
//! optional and applied with COALESCE at the repository layer).

mod address;
mod branch;
mod delivery;
mod favorite;
mod loyalty;
mod menu;
mod offer;
mod order;
mod restaurant;
mod review;
mod user;

pub use address::*;
pub use branch::*;
pub use delivery::*;
pub use favorite::*;
pub use loyalty::*;
pub use menu::*;
pub use offer::*;
pub use order::*;
pub use restaurant::*;
pub use review::*;
pub use user::*;
