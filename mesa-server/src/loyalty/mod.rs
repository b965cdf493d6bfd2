//! Loyalty Module
//!
//! Pure tier and points arithmetic; persistence lives in
//! `db::repository::loyalty`.

mod tier;

pub use tier::*;
