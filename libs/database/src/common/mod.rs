//! Common utilities shared by the store client

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
