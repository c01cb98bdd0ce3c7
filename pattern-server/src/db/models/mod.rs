//! Data models
//!
//! Storage-facing record types. IDs are SurrealDB `Thing`s in the
//! `table:id` format; the generated product code is a separate display
//! field, never the storage key.

pub mod category;
pub mod product;
pub mod user;

pub use category::*;
pub use product::*;
pub use user::*;

use surrealdb::sql::Thing;

/// Render a record id as its canonical `table:id` string
pub fn thing_to_string(thing: &Thing) -> String {
    thing.to_raw()
}
