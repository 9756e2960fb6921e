//! Data Transfer Objects for request deserialization.

pub mod create;

pub use create::CreateQuery;
