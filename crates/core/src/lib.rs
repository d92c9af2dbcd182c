//! `stockkeep-core`: domain building blocks shared by the inventory crates.
//!
//! Pure types only; no IO, no logging.

pub mod error;
pub mod name;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use name::ItemName;
pub use value_object::ValueObject;
